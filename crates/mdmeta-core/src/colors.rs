//! Terminal styling for registry listings.
//!
//! Each piece of a rendered key rule has a [`Style`]; [`Colors`] decides
//! whether that style turns into ANSI codes. Only the 16 standard colors are
//! used so output reads on light and dark themes.

use std::fmt;

/// What a piece of rendered text is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// A metadata key name.
    Key,
    /// A value kind such as `integer` or `tagset`.
    Kind,
    /// An editor category such as `[Value Range]`.
    Category,
    /// Field roles a key is offered for.
    Scope,
    /// Keys that must be set or must be absent.
    Dependency,
    /// Labels and descriptions.
    Label,
}

impl Style {
    fn ansi(self) -> &'static str {
        match self {
            Style::Key => "\x1b[34m",
            Style::Kind => "\x1b[32m",
            Style::Category => "\x1b[35m",
            Style::Scope => "\x1b[36m",
            Style::Dependency => "\x1b[33m",
            Style::Label => "\x1b[2m",
        }
    }
}

const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Colors {
    enabled: bool,
}

impl Colors {
    pub const ON: Self = Self { enabled: true };
    pub const OFF: Self = Self { enabled: false };

    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(self) -> bool {
        self.enabled
    }

    pub fn paint<T: fmt::Display>(self, style: Style, text: T) -> Painted<T> {
        Painted {
            code: if self.enabled { style.ansi() } else { "" },
            text,
        }
    }
}

/// Text wrapped in a style, rendered through `Display`.
pub struct Painted<T> {
    code: &'static str,
    text: T,
}

impl<T: fmt::Display> fmt::Display for Painted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            return fmt::Display::fmt(&self.text, f);
        }
        write!(f, "{}{}{}", self.code, self.text, RESET)
    }
}
