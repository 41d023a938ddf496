//! Declarative field schemas for JSON request bodies.
//!
//! Each writable resource declares its fields once as a static [`Schema`]. The
//! same schema validates every write operation; the [`WriteMode`] decides which
//! fields are required:
//!
//! | mode      | required fields        |
//! |-----------|------------------------|
//! | `Create`  | all                    |
//! | `Replace` | all                    |
//! | `Partial` | none (omitted = keep)  |
//!
//! Unknown keys are ignored in every mode. All problems are collected into a
//! [`FieldErrors`] map rather than stopping at the first one.
//!
//! ```
//! use listmate_core::{FieldKind, FieldSpec, Schema, WriteMode};
//! use serde_json::json;
//!
//! static NOTE: Schema = Schema::new(&[FieldSpec {
//!     name: "title",
//!     kind: FieldKind::Text { max_length: 20 },
//! }]);
//!
//! let fields = NOTE.validate(&json!({"title": "Milk"}), WriteMode::Create).unwrap();
//! assert_eq!(fields.text("title"), Some("Milk"));
//!
//! let errors = NOTE.validate(&json!({}), WriteMode::Replace).unwrap_err();
//! assert_eq!(errors.get("title").unwrap(), ["This field is required."]);
//!
//! assert!(NOTE.validate(&json!({}), WriteMode::Partial).unwrap().is_empty());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_STRING: &str = "Not a valid string.";
const NOT_BOOLEAN: &str = "Must be a valid boolean.";

/// The kind of write a request body is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// New resource; every field must be supplied.
    Create,
    /// Full update; every field must be supplied.
    Replace,
    /// Partial update; any subset of fields.
    Partial,
}

impl WriteMode {
    /// Whether every schema field must be present in this mode.
    #[must_use]
    pub const fn requires_all_fields(self) -> bool {
        matches!(self, Self::Create | Self::Replace)
    }
}

/// Value type and constraints of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-blank string, trimmed, at most `max_length` characters.
    Text { max_length: usize },
    /// Non-empty string kept exactly as sent (passwords).
    Secret { max_length: usize },
    /// JSON `true` or `false`.
    Boolean,
}

/// One declared field of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// JSON key.
    pub name: &'static str,
    /// Expected value kind.
    pub kind: FieldKind,
}

/// The writable fields of a resource.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [FieldSpec],
}

/// A validated field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Boolean(bool),
}

/// The fields that were present in a body and passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(BTreeMap<&'static str, FieldValue>);

/// Validation failures keyed by field name.
///
/// Serializes as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl Schema {
    /// Create a schema from a static field list.
    #[must_use]
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    /// The declared fields.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Validate a JSON body against this schema.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] if the body is not a JSON object, a required
    /// field is missing, or a present field has the wrong type or violates
    /// its constraints.
    pub fn validate(&self, body: &Value, mode: WriteMode) -> Result<Fields, FieldErrors> {
        let Value::Object(map) = body else {
            return Err(FieldErrors::non_field(format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(body)
            )));
        };

        let mut fields = Fields::default();
        let mut errors = FieldErrors::default();

        for field in self.fields {
            match map.get(field.name) {
                None => {
                    if mode.requires_all_fields() {
                        errors.add(field.name, REQUIRED);
                    }
                }
                Some(value) => match field.kind.check(value) {
                    Ok(valid) => {
                        fields.0.insert(field.name, valid);
                    }
                    Err(message) => errors.add(field.name, message),
                },
            }
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(errors)
        }
    }
}

impl FieldKind {
    fn check(self, value: &Value) -> Result<FieldValue, String> {
        if value.is_null() {
            return Err(NOT_NULL.to_owned());
        }

        match self {
            Self::Text { max_length } => {
                let Value::String(raw) = value else {
                    return Err(NOT_STRING.to_owned());
                };
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(NOT_BLANK.to_owned());
                }
                if trimmed.chars().count() > max_length {
                    return Err(format!(
                        "Ensure this field has no more than {max_length} characters."
                    ));
                }
                Ok(FieldValue::Text(trimmed.to_owned()))
            }
            Self::Secret { max_length } => {
                let Value::String(raw) = value else {
                    return Err(NOT_STRING.to_owned());
                };
                if raw.is_empty() {
                    return Err(NOT_BLANK.to_owned());
                }
                if raw.chars().count() > max_length {
                    return Err(format!(
                        "Ensure this field has no more than {max_length} characters."
                    ));
                }
                Ok(FieldValue::Text(raw.clone()))
            }
            Self::Boolean => value
                .as_bool()
                .map(FieldValue::Boolean)
                .ok_or_else(|| NOT_BOOLEAN.to_owned()),
        }
    }
}

impl Fields {
    /// The validated text value of `name`, if it was supplied.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// The validated boolean value of `name`, if it was supplied.
    #[must_use]
    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(FieldValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    /// Returns `true` if no recognized field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FieldErrors {
    /// Errors with a single message that is not tied to a field.
    #[must_use]
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
