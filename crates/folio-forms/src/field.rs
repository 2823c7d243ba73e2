//! Field definitions and form layouts.

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{FormError, Result};
use crate::validation::ValidationResult;

/// Kind of input a field is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input.
    #[default]
    Text,
    /// Email input; values must look like an address.
    Email,
    /// Multi-line text input.
    Textarea,
}

impl FieldKind {
    /// Returns the HTML input type.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Textarea => "textarea",
        }
    }
}

/// Declared constraints of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldConstraints {
    /// Whether a blank value is rejected.
    #[serde(default)]
    pub required: bool,
    /// Input kind.
    #[serde(default)]
    pub kind: FieldKind,
    /// Minimum number of characters in the trimmed value.
    #[serde(default)]
    pub min_length: Option<usize>,
}

/// Declaration of a field, before the form is live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Label used in messages; derived from the name when absent.
    #[serde(default)]
    pub label: Option<String>,
    /// Constraints.
    #[serde(flatten)]
    pub constraints: FieldConstraints,
}

impl FieldSpec {
    /// Creates a new optional text field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            constraints: FieldConstraints::default(),
        }
    }

    /// Creates a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name).kind(FieldKind::Text)
    }

    /// Creates an email field.
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name).kind(FieldKind::Email)
    }

    /// Creates a textarea field.
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name).kind(FieldKind::Textarea)
    }

    /// Sets the input kind.
    #[must_use]
    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.constraints.kind = kind;
        self
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    /// Sets the minimum length.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.min_length = Some(min);
        self
    }

    /// Sets an explicit label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the label, falling back to the capitalized name.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| capitalize(&self.name))
    }
}

/// A live field: declaration plus current value and verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Label used in messages.
    pub label: String,
    /// Current value.
    pub value: String,
    /// Declared constraints.
    pub constraints: FieldConstraints,
    /// Last verdict shown for this field.
    pub validity: ValidationResult,
}

impl Field {
    /// Creates a field with an empty value.
    pub fn from_spec(spec: &FieldSpec) -> Self {
        Self {
            name: spec.name.clone(),
            label: spec.display_label(),
            value: String::new(),
            constraints: spec.constraints,
            validity: ValidationResult::Valid,
        }
    }

    /// Sets the current value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Returns whether the field is currently flagged invalid.
    pub fn is_invalid(&self) -> bool {
        !self.validity.is_valid()
    }

    /// Returns the id of the field's error region.
    pub fn error_id(&self) -> String {
        error_id(&self.name)
    }
}

/// Ordered form layout. Insertion order is document/tab order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    /// Field declarations.
    pub fields: Vec<FieldSpec>,
}

impl FormSpec {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// The contact form: name, email and message, all required.
    pub fn contact() -> Self {
        Self::new()
            .field(FieldSpec::text("name").required().min_length(2))
            .field(FieldSpec::email("email").required())
            .field(FieldSpec::textarea("message").required().min_length(10))
    }

    /// Parses a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Creates live fields, rejecting empty or ambiguous layouts.
    pub fn build(&self) -> Result<Vec<Field>> {
        if self.fields.is_empty() {
            return Err(FormError::EmptyForm);
        }

        let mut fields: Vec<Field> = Vec::with_capacity(self.fields.len());
        for spec in &self.fields {
            if fields.iter().any(|f| f.name == spec.name) {
                return Err(FormError::DuplicateField(spec.name.clone()));
            }
            fields.push(Field::from_spec(spec));
        }
        Ok(fields)
    }
}

/// Field values at a point in time, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    entries: Vec<(String, String)>,
}

impl FieldValues {
    /// Creates an empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots the values of a set of fields.
    pub fn from_fields(fields: &[Field]) -> Self {
        Self {
            entries: fields
                .iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
        }
    }

    /// Sets a value, replacing an existing entry in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns a value by field name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serializes the values as a JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for FieldValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

/// Returns the id of a field's error region.
pub fn error_id(name: &str) -> String {
    format!("error-{name}")
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
