//! Tag model: validated tag sets, raw edit input and pending edits.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Field names prompted for during an edit session unless configured
/// otherwise.
pub const DEFAULT_FIELDS: [&str; 5] = ["TITLE", "ARTIST", "ALBUM", "DATE", "GENRE"];

/// Returns `true` if `value` still has content after trimming whitespace.
pub fn is_meaningful(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Returns `true` if `name` can be stored as a Vorbis comment field name:
/// non-empty, ASCII 0x20 through 0x7D, and no `=`.
pub fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|byte| (0x20..=0x7D).contains(&byte) && byte != b'=')
}

/// The full set of a file's tags: field name to one or more values.
///
/// Field names are case-sensitive keys. Every stored value is non-blank and
/// no field is ever present with an empty sequence; the mutators refuse
/// input that would break this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    fields: BTreeMap<String, Vec<String>>,
}

impl TagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `field` with `values`.
    ///
    /// Returns `false`, leaving the set untouched, if `values` is empty or
    /// any value is blank.
    pub fn insert_values(&mut self, field: impl Into<String>, values: Vec<String>) -> bool {
        if values.is_empty() || !values.iter().all(|v| is_meaningful(v)) {
            return false;
        }
        self.fields.insert(field.into(), values);
        true
    }

    /// Replace `field` with the single `value`.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> bool {
        self.insert_values(field, vec![value.into()])
    }

    /// Append `value` to `field`, creating the field if needed.
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) -> bool {
        let value = value.into();
        if !is_meaningful(&value) {
            return false;
        }
        self.fields.entry(field.into()).or_default().push(value);
        true
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Values of every field whose name equals `field` ignoring ASCII case,
    /// the way the file itself matches field names.
    pub fn get_ignore_case(&self, field: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(field))
            .flat_map(|(_, values)| values.iter().map(String::as_str))
            .collect()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, values) in &self.fields {
            writeln!(f, "{}: {}", field, values.join(", "))?;
        }
        Ok(())
    }
}

/// An unvalidated field value: one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    List(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Unvalidated edit input, keyed by field name.
pub type RawTags = BTreeMap<String, FieldValue>;

/// Single-value replacements collected during an edit session.
///
/// Blank answers are never stored: a blank answer means "no change".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEdits {
    edits: BTreeMap<String, String>,
}

impl PendingEdits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a replacement. Returns `false` and records nothing if `value`
    /// is blank.
    ///
    /// Field names match ignoring ASCII case, so a later answer for `title`
    /// replaces an earlier one for `TITLE`.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> bool {
        let value = value.into();
        if !is_meaningful(&value) {
            return false;
        }
        let field = field.into();
        self.edits
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&field));
        self.edits.insert(field, value);
        true
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.edits.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.edits.iter()
    }

    /// Convert into raw input for the validator.
    pub fn into_raw(self) -> RawTags {
        self.edits
            .into_iter()
            .map(|(field, value)| (field, FieldValue::Single(value)))
            .collect()
    }
}
