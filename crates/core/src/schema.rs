//! Ordered field schema for flat-form deck content.

use serde::{Deserialize, Serialize};

/// Fields read from flat content when no schema is configured, in slide order.
pub const DEFAULT_FIELDS: &[&str] = &[
    "title",
    "abstract",
    "problem",
    "solution",
    "architecture",
    "technologies",
    "impact",
    "outcome",
];

/// One named field and the title shown on its slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Key read from the raw content and used as the output slide key.
    pub name: String,

    /// Slide title.
    pub label: String,
}

impl FieldSpec {
    /// Create a field whose label is derived from its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let label = field_label(&name);
        Self { name, label }
    }

    /// Create a field with an explicit label.
    pub fn with_label(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// The ordered list of fields a flat-form deck is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::from_names(DEFAULT_FIELDS.iter().copied())
    }
}

impl FieldSchema {
    /// Create a schema from explicit field specs.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Create a schema from field names, deriving each label.
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            fields: names.into_iter().map(FieldSpec::new).collect(),
        }
    }

    /// Append a field.
    pub fn push(&mut self, field: FieldSpec) {
        self.fields.push(field);
    }

    /// Fields in slide order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Derive a slide title from a field name.
///
/// Underscores become spaces and every word is capitalized with the rest
/// lowercased ("tech_stack" -> "Tech Stack").
pub fn field_label(name: &str) -> String {
    title_case(&name.replace('_', " "))
}

/// Uppercase the first letter of each word and lowercase the rest.
///
/// A word starts at any letter not preceded by another letter, so
/// "3d-printing" becomes "3D-Printing".
pub fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                output.extend(c.to_lowercase());
            } else {
                output.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            output.push(c);
            prev_is_letter = false;
        }
    }

    output
}
