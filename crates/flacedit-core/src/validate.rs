//! Validation of edit input into a [`TagSet`].
//!
//! Every field is judged on its own. A field that fails is dropped and a
//! warning is recorded; validation as a whole never fails.

use serde_json::Value;

use crate::journal::Journal;
use crate::tags::{FieldValue, RawTags, TagSet};

const COMPONENT: &str = "flacedit::validate";

/// Turns raw edit input into a [`TagSet`], recording what it drops.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'j> {
    journal: &'j dyn Journal,
}

impl<'j> Validator<'j> {
    #[must_use]
    pub fn new(journal: &'j dyn Journal) -> Self {
        Self { journal }
    }

    /// Validate typed input.
    ///
    /// A single value is kept as a one-element sequence if it is not
    /// blank. A list is kept as-is only if every element is non-blank;
    /// otherwise the whole field is dropped.
    pub fn validate(&self, raw: &RawTags) -> TagSet {
        let mut valid = TagSet::new();

        for (field, value) in raw {
            match value {
                FieldValue::Single(text) => {
                    if !valid.insert(field.as_str(), text.as_str()) {
                        self.journal.warn(
                            COMPONENT,
                            &format!("Empty string for key {}. Skipping.", field),
                        );
                    }
                }
                FieldValue::List(values) => {
                    if !valid.insert_values(field.as_str(), values.clone()) {
                        self.journal.warn(
                            COMPONENT,
                            &format!(
                                "Invalid list for key {}. Contains empty values or is empty. Skipping.",
                                field
                            ),
                        );
                    }
                }
            }
        }

        valid
    }

    /// Validate untyped input, such as an edit document read from JSON.
    ///
    /// Anything other than an object yields an empty result. Within an
    /// object, strings and arrays of strings are validated as in
    /// [`Validator::validate`]; arrays holding a non-string element and
    /// values of any other type drop their field.
    pub fn validate_json(&self, raw: &Value) -> TagSet {
        let Some(object) = raw.as_object() else {
            self.journal.error(
                COMPONENT,
                &format!(
                    "Edit input must be a mapping of field names to values, got {}",
                    json_kind(raw)
                ),
            );
            return TagSet::new();
        };

        let mut typed = RawTags::new();
        for (field, value) in object {
            match value {
                Value::String(text) => {
                    typed.insert(field.clone(), FieldValue::Single(text.clone()));
                }
                Value::Array(items) => {
                    let strings: Option<Vec<String>> = items
                        .iter()
                        .map(|item| item.as_str().map(str::to_string))
                        .collect();
                    match strings {
                        Some(values) => {
                            typed.insert(field.clone(), FieldValue::List(values));
                        }
                        None => self.journal.warn(
                            COMPONENT,
                            &format!(
                                "Invalid list for key {}. Contains non-string values. Skipping.",
                                field
                            ),
                        ),
                    }
                }
                other => self.journal.warn(
                    COMPONENT,
                    &format!(
                        "Invalid value type for key {}: expected string or list, got {}. Skipping.",
                        field,
                        json_kind(other)
                    ),
                ),
            }
        }

        self.validate(&typed)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
