// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Schema Module
//!
//! Structural contracts for every content collection, expressed as data.
//!
//! A [`Schema`] is a root [`Constraint`]; object constraints carry a table of
//! [`Field`] descriptors (name, constraint, required or optional). Checking a
//! JSON value walks the table and collects one [`ValidationError`] per
//! violated field instead of stopping at the first one.
//!
//! ## Example
//!
//! ```
//! use siteflow::schema::{Constraint, Field, Schema};
//! use serde_json::json;
//!
//! const LINK_FIELDS: &[Field] = &[
//!     Field::required("label", Constraint::Text { min_len: 1 }),
//!     Field::required("url", Constraint::Url),
//! ];
//! static LINK: Schema = Schema::new("link", Constraint::Object(LINK_FIELDS));
//!
//! let errors = LINK.validate(&json!({ "label": "", "url": "nope" }));
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors[0].path, "label");
//! ```

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use url::Url;

/// Constraint tables for each content collection and the validation manifest.
pub mod tables;

/// Pattern every slug must match.
pub const SLUG_PATTERN: &str = "^[a-z0-9-]+$";

const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_'+.\-]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";
const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

/// A single field-level violation found while checking a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-joined location inside the document, e.g. `0.slug`.
    pub path: String,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    fn new(path: &[String], message: impl Into<String>) -> Self {
        let path = if path.is_empty() {
            "(root)".to_string()
        } else {
            path.join(".")
        };
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// What a JSON value must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// A string of at least `min_len` characters. `min_len: 0` accepts any string.
    Text {
        /// Minimum length in characters.
        min_len: usize,
    },
    /// An absolute URL.
    Url,
    /// An email address.
    Email,
    /// A site-root-relative path (leading `/`).
    RootPath,
    /// A slug matching [`SLUG_PATTERN`].
    Slug,
    /// A `YYYY-MM-DD` calendar date.
    Date,
    /// A JSON boolean.
    Boolean,
    /// A JSON number without a fractional part.
    Integer,
    /// One string out of a closed set.
    OneOf(&'static [&'static str]),
    /// An array whose every element satisfies the inner constraint.
    ListOf(&'static Constraint),
    /// An object described by a field table. Unknown keys are ignored.
    Object(&'static [Field]),
}

/// Whether a field may be absent from its object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The key must exist.
    Required,
    /// The key may be absent; when present it must satisfy the constraint.
    Optional,
}

/// A field descriptor inside an object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// JSON key.
    pub name: &'static str,
    /// Constraint applied to the value.
    pub constraint: Constraint,
    /// Required or optional.
    pub presence: Presence,
}

impl Field {
    /// Describes a required field.
    pub const fn required(
        name: &'static str,
        constraint: Constraint,
    ) -> Self {
        Self {
            name,
            constraint,
            presence: Presence::Required,
        }
    }

    /// Describes an optional field.
    pub const fn optional(
        name: &'static str,
        constraint: Constraint,
    ) -> Self {
        Self {
            name,
            constraint,
            presence: Presence::Optional,
        }
    }
}

/// A named structural contract for one content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Identifier used in logs.
    pub name: &'static str,
    /// Constraint for the document root.
    pub root: Constraint,
}

impl Schema {
    /// Creates a schema from its root constraint.
    pub const fn new(name: &'static str, root: Constraint) -> Self {
        Self { name, root }
    }

    /// Checks `value` and returns every violation, in document order.
    pub fn validate(&self, value: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut path = Vec::new();
        check(value, &self.root, &mut path, &mut errors);
        errors
    }
}

fn check(
    value: &Value,
    constraint: &Constraint,
    path: &mut Vec<String>,
    errors: &mut Vec<ValidationError>,
) {
    match constraint {
        Constraint::Boolean => {
            if !value.is_boolean() {
                errors.push(mismatch(path, "boolean", value));
            }
        }
        Constraint::Integer => match value.as_f64() {
            Some(_) if whole_number(value).is_some() => {}
            Some(n) if n.fract() != 0.0 => errors.push(ValidationError::new(
                path,
                "Expected integer, received float",
            )),
            Some(_) => errors.push(ValidationError::new(
                path,
                "Number must fit in a signed 64-bit integer",
            )),
            None => errors.push(mismatch(path, "number", value)),
        },
        Constraint::OneOf(options) => {
            let expected = options
                .iter()
                .map(|option| format!("'{}'", option))
                .collect::<Vec<_>>()
                .join(" | ");
            match value.as_str() {
                Some(s) if options.iter().any(|option| *option == s) => {}
                Some(s) => errors.push(ValidationError::new(
                    path,
                    format!(
                        "Invalid enum value. Expected {}, received '{}'",
                        expected, s
                    ),
                )),
                None => errors.push(ValidationError::new(
                    path,
                    format!(
                        "Expected {}, received {}",
                        expected,
                        type_name(value)
                    ),
                )),
            }
        }
        Constraint::ListOf(inner) => match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    path.push(index.to_string());
                    check(item, inner, path, errors);
                    let _ = path.pop();
                }
            }
            None => errors.push(mismatch(path, "array", value)),
        },
        Constraint::Object(fields) => match value.as_object() {
            Some(map) => {
                for field in fields.iter() {
                    path.push(field.name.to_string());
                    match (map.get(field.name), field.presence) {
                        (Some(inner), _) => {
                            check(inner, &field.constraint, path, errors)
                        }
                        (None, Presence::Required) => {
                            errors.push(ValidationError::new(path, "Required"))
                        }
                        (None, Presence::Optional) => {}
                    }
                    let _ = path.pop();
                }
            }
            None => errors.push(mismatch(path, "object", value)),
        },
        string_constraint => match value.as_str() {
            Some(s) => {
                if let Some(message) = check_string(s, string_constraint) {
                    errors.push(ValidationError::new(path, message));
                }
            }
            None => errors.push(mismatch(path, "string", value)),
        },
    }
}

/// Applies a string-format constraint, returning the violation message.
fn check_string(s: &str, constraint: &Constraint) -> Option<String> {
    match constraint {
        Constraint::Text { min_len } => {
            (s.chars().count() < *min_len).then(|| {
                format!(
                    "String must contain at least {} character(s)",
                    min_len
                )
            })
        }
        Constraint::Url => {
            Url::parse(s).is_err().then(|| "Invalid url".to_string())
        }
        Constraint::Email => {
            (!is_email(s)).then(|| "Invalid email".to_string())
        }
        Constraint::RootPath => (!s.starts_with('/'))
            .then(|| "Invalid input: must start with \"/\"".to_string()),
        Constraint::Slug => (!slug_regex().is_match(s))
            .then(|| format!("Invalid: must match {}", SLUG_PATTERN)),
        Constraint::Date => {
            (!is_calendar_date(s)).then(|| "Invalid date".to_string())
        }
        _ => None,
    }
}

fn mismatch(path: &[String], expected: &str, value: &Value) -> ValidationError {
    ValidationError::new(
        path,
        format!("Expected {}, received {}", expected, type_name(value)),
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn slug_regex() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| compile(SLUG_PATTERN))
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| compile(EMAIL_PATTERN))
}

fn date_regex() -> &'static Regex {
    static DATE: OnceLock<Regex> = OnceLock::new();
    DATE.get_or_init(|| compile(DATE_PATTERN))
}

// The patterns are compile-time constants covered by the tests below.
#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern is valid")
}

/// Reads `value` as a whole number in the `i64` range.
///
/// Integer tokens and floats without a fractional part (`2021.0`) both
/// qualify. The typed records deserialize integer fields through this same
/// rule, so anything the validator accepts also loads.
pub fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let n = value.as_f64()?;
    let in_range = (i64::MIN as f64..i64::MAX as f64).contains(&n);
    (in_range && n.fract() == 0.0).then_some(n as i64)
}

/// Returns `true` when `s` looks like an email address.
pub fn is_email(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && email_regex().is_match(s)
}

/// Returns `true` when `s` is a real `YYYY-MM-DD` calendar date.
pub fn is_calendar_date(s: &str) -> bool {
    date_regex().is_match(s)
        && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Returns `true` when `s` is a valid slug.
pub fn is_slug(s: &str) -> bool {
    slug_regex().is_match(s)
}
