//! Value validation and encoding.
//!
//! Every value is stored as a string. Each [`ValueKind`] has one canonical
//! encoding; user input is validated against the rule and canonicalized
//! before it is written.

use indexmap::IndexSet;

use mdmeta_core::MetadataMap;
use mdmeta_core::utils::sanitize_float;

use crate::rule::{KeyRule, ValueKind};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("`{key}` expects an integer, got {value:?}")]
    NotAnInteger { key: String, value: String },

    #[error("`{key}` expects a number, got {value:?}")]
    NotANumber { key: String, value: String },

    #[error("`{key}` expects `true` or `false`, got {value:?}")]
    NotABoolean { key: String, value: String },

    #[error("`{key}` must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("`{key}` requires a value")]
    Empty { key: String },

    #[error("`{key}` must be one of [{options}], got {value:?}")]
    NotInList {
        key: String,
        value: String,
        options: String,
    },
}

/// What [`KeyRule::apply`] did to the target map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueChange {
    Set(String),
    Removed,
}

impl KeyRule {
    /// Canonical encoding of `raw` for this rule.
    pub fn validate_value(&self, raw: &str) -> Result<String, ValueError> {
        let value = raw.trim();
        match self.kind {
            ValueKind::Flag => Ok(String::new()),
            ValueKind::Boolean => self.parse_bool(value),
            ValueKind::Integer => self.parse_int(value),
            ValueKind::Float => self.parse_float(value),
            ValueKind::String | ValueKind::Tag => {
                if value.is_empty() {
                    return Err(self.empty());
                }
                Ok(value.to_string())
            }
            ValueKind::TagSet => {
                let tags: IndexSet<&str> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect();
                if tags.is_empty() {
                    return Err(self.empty());
                }
                Ok(tags.into_iter().collect::<Vec<_>>().join(","))
            }
            ValueKind::ValueList => {
                if self.value_list.iter().any(|option| option == value) {
                    return Ok(value.to_string());
                }
                Err(ValueError::NotInList {
                    key: self.key.clone(),
                    value: value.to_string(),
                    options: self.value_list.join(", "),
                })
            }
        }
    }

    /// Validates `raw` and writes it under the rule's key.
    ///
    /// Blank input for string-like kinds removes the key instead.
    pub fn apply<M: MetadataMap + ?Sized>(
        &self,
        target: &mut M,
        raw: &str,
    ) -> Result<ValueChange, ValueError> {
        let clears = matches!(
            self.kind,
            ValueKind::String | ValueKind::Tag | ValueKind::TagSet
        );
        if clears && raw.trim().is_empty() {
            target.remove(&self.key);
            return Ok(ValueChange::Removed);
        }

        let value = self.validate_value(raw)?;
        target.set(&self.key, &value);
        Ok(ValueChange::Set(value))
    }

    fn parse_bool(&self, value: &str) -> Result<String, ValueError> {
        if value.eq_ignore_ascii_case("true") {
            Ok("true".to_string())
        } else if value.eq_ignore_ascii_case("false") {
            Ok("false".to_string())
        } else {
            Err(ValueError::NotABoolean {
                key: self.key.clone(),
                value: value.to_string(),
            })
        }
    }

    fn parse_int(&self, value: &str) -> Result<String, ValueError> {
        let parsed: i64 = value.parse().map_err(|_| ValueError::NotAnInteger {
            key: self.key.clone(),
            value: value.to_string(),
        })?;

        if parsed < i64::from(self.min_int) || parsed > i64::from(self.max_int) {
            return Err(ValueError::OutOfRange {
                key: self.key.clone(),
                value: parsed.to_string(),
                min: self.min_int.to_string(),
                max: self.max_int.to_string(),
            });
        }
        Ok(parsed.to_string())
    }

    fn parse_float(&self, value: &str) -> Result<String, ValueError> {
        let parsed = value
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ValueError::NotANumber {
                key: self.key.clone(),
                value: value.to_string(),
            })?;

        if parsed < self.min_float || parsed > self.max_float {
            return Err(ValueError::OutOfRange {
                key: self.key.clone(),
                value: sanitize_float(parsed),
                min: sanitize_float(self.min_float),
                max: sanitize_float(self.max_float),
            });
        }
        Ok(sanitize_float(parsed))
    }

    fn empty(&self) -> ValueError {
        ValueError::Empty {
            key: self.key.clone(),
        }
    }
}
