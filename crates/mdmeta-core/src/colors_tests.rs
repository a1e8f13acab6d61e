use crate::colors::{Colors, Style};

#[test]
fn off_leaves_text_untouched() {
    assert_eq!(Colors::OFF.paint(Style::Key, "ClampMin").to_string(), "ClampMin");
    assert!(!Colors::new(false).is_enabled());
}

#[test]
fn on_wraps_in_style_code() {
    let painted = Colors::ON.paint(Style::Dependency, "EditCondition");
    assert_eq!(painted.to_string(), "\x1b[33mEditCondition\x1b[0m");
}
