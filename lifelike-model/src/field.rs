use serde::{Deserialize, Serialize};

/// One entry of the host's field catalog, as returned by the adapter's
/// `list_fields` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
}

impl FieldDefinition {
    fn simple(name: &str, kind: FieldKind, label: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            label: label.to_string(),
        }
    }

    /// Shorthand for a text field.
    pub fn text(name: &str, label: &str) -> Self {
        Self::simple(name, FieldKind::Text, label)
    }

    /// Shorthand for an image/file field.
    pub fn image(name: &str, label: &str) -> Self {
        Self::simple(name, FieldKind::Image, label)
    }

    /// Shorthand for a taxonomy-term reference field.
    pub fn term_reference(name: &str, label: &str) -> Self {
        Self::simple(name, FieldKind::TermReference, label)
    }

    /// Shorthand for a long-text (body) field.
    pub fn long_text(name: &str, label: &str) -> Self {
        Self::simple(name, FieldKind::LongText, label)
    }
}

/// The data type of a catalog field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Image,
    File,
    TermReference,
    Number,
    Bool,
}

/// A taxonomy vocabulary known to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    pub machine_name: String,
    pub label: String,
}

/// A file to be handed to the host's file subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSpec {
    pub name: String,
    pub contents: Vec<u8>,
}

impl FileSpec {
    pub fn new(name: &str, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            contents: contents.into(),
        }
    }
}

/// The host's record of a saved file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedFile {
    pub id: u64,
    pub uri: String,
}
