//! Record model and the document shapes exchanged with the storage collaborator.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field holding a record's display name.
pub const NAME_FIELD: &str = "name";

/// A single field value stored on a document.
///
/// Mirrors the scalar value kinds of the document database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Null,
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

/// Field name -> value map of a document.
pub type Fields = BTreeMap<String, FieldValue>;

/// A document as returned by the storage collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Identifier assigned by the collaborator.
    pub id: String,
    pub fields: Fields,
}

/// A named, identifier-keyed entry of the managed collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
}

impl Record {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Projects a document onto a record.
    ///
    /// A document without a string `name` field yields an empty name.
    pub fn from_document(doc: &Document) -> Self {
        let name = doc
            .fields
            .get(NAME_FIELD)
            .and_then(FieldValue::as_str)
            .unwrap_or_default();
        Self::new(doc.id.clone(), name)
    }
}

/// Builds the field map written for a record name.
pub fn name_fields(name: &str) -> Fields {
    let mut fields = Fields::new();
    fields.insert(NAME_FIELD.to_string(), FieldValue::from(name));
    fields
}

/// Returns true when `text` is empty after trimming.
///
/// This is the only validation applied to user input.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_document_reads_name() {
        let doc = Document {
            id: "abc".to_string(),
            fields: name_fields("Alice"),
        };
        assert_eq!(Record::from_document(&doc), Record::new("abc", "Alice"));
    }

    #[test]
    fn test_from_document_missing_name_is_empty() {
        let mut fields = Fields::new();
        fields.insert("age".to_string(), FieldValue::Integer(3));
        let doc = Document {
            id: "x".to_string(),
            fields,
        };
        assert_eq!(Record::from_document(&doc).name, "");
    }

    #[test]
    fn test_from_document_non_string_name_is_empty() {
        let mut fields = Fields::new();
        fields.insert(NAME_FIELD.to_string(), FieldValue::Boolean(true));
        let doc = Document {
            id: "x".to_string(),
            fields,
        };
        assert_eq!(Record::from_document(&doc).name, "");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" Bob "));
    }
}
