//! Typed document records and their structural validation.
//!
//! # Design
//! - Responses are validated as JSON before any field is pulled out:
//!   required fields first presence, then type; optional fields type only
//!   when present. The first violation wins and nulls count as absent.
//! - Validation runs on local-case keys, after wire keys have been
//!   converted. The one camelCase survivor is the wire key `type`, which is
//!   a single word and converts to itself.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Lifecycle state of a server-side document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    Completed,
    Processing,
    Expired,
    Failed,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Completed => "completed",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Expired => "expired",
            DocumentStatus::Failed => "failed",
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "completed" => Some(DocumentStatus::Completed),
            "processing" => Some(DocumentStatus::Processing),
            "expired" => Some(DocumentStatus::Expired),
            "failed" => Some(DocumentStatus::Failed),
            _ => None,
        }
    }
}

/// How a document came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    FromHtml,
    Flattened,
    Watermarked,
    Encrypted,
    Compressed,
    Signed,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::FromHtml => "from_html",
            DocumentType::Flattened => "flattened",
            DocumentType::Watermarked => "watermarked",
            DocumentType::Encrypted => "encrypted",
            DocumentType::Compressed => "compressed",
            DocumentType::Signed => "signed",
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "from_html" => Some(DocumentType::FromHtml),
            "flattened" => Some(DocumentType::Flattened),
            "watermarked" => Some(DocumentType::Watermarked),
            "encrypted" => Some(DocumentType::Encrypted),
            "compressed" => Some(DocumentType::Compressed),
            "signed" => Some(DocumentType::Signed),
            _ => None,
        }
    }
}

/// A document record as returned by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    /// When the stored file becomes unavailable.
    pub expires_at: DateTime<Utc>,
    pub document_type: Option<DocumentType>,
    /// Pre-signed download URL, when the server issued one.
    pub file_url: Option<String>,
    /// File size in bytes.
    pub size: Option<u64>,
    /// Opaque caller data attached at creation.
    pub metadata: Option<Value>,
    /// Id of the document this one was derived from.
    pub derived_from: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Str,
    Timestamp,
    Status,
    Type,
    Integer,
    Object,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::Str => "string",
            FieldKind::Timestamp => "ISO-8601 date-time string",
            FieldKind::Status => "document status string",
            FieldKind::Type => "document type string",
            FieldKind::Integer => "integer",
            FieldKind::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::Str => value.is_string(),
            FieldKind::Timestamp => {
                value.as_str().is_some_and(|s| parse_timestamp(s).is_some())
            }
            FieldKind::Status => value.as_str().is_some_and(|s| DocumentStatus::from_wire(s).is_some()),
            FieldKind::Type => value.as_str().is_some_and(|s| DocumentType::from_wire(s).is_some()),
            FieldKind::Integer => value.is_u64(),
            FieldKind::Object => value.is_object(),
        }
    }
}

/// Shape table in checking order. `type` must already hold the wire value
/// verbatim since key conversion leaves single-word keys alone.
const FIELDS: &[(&str, FieldKind, bool)] = &[
    ("id", FieldKind::Str, true),
    ("status", FieldKind::Status, true),
    ("created_at", FieldKind::Timestamp, true),
    ("expires_at", FieldKind::Timestamp, true),
    ("type", FieldKind::Type, false),
    ("file_url", FieldKind::Str, false),
    ("size", FieldKind::Integer, false),
    ("metadata", FieldKind::Object, false),
    ("derived_from", FieldKind::Str, false),
];

/// Check a decoded document against the shape table, stopping at the first
/// violation.
pub fn validate(map: &Map<String, Value>) -> Result<()> {
    for &(name, kind, required) in FIELDS {
        match map.get(name) {
            None | Some(Value::Null) => {
                if required {
                    return Err(Error::MissingField(name));
                }
            }
            Some(value) => {
                if !kind.matches(value) {
                    return Err(Error::TypeMismatch { field: name, expected: kind.expected() });
                }
            }
        }
    }
    Ok(())
}

/// Accept both offset-carrying RFC 3339 and naive ISO-8601 timestamps;
/// naive ones are taken as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    value.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

impl Document {
    /// Build a `Document` from a local-case JSON value, validating first.
    pub fn from_value(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            _ => return Err(Error::TypeMismatch { field: "document", expected: "object" }),
        };
        validate(&map)?;
        let id = required_str(&map, "id")?;
        let status = map
            .get("status")
            .and_then(Value::as_str)
            .and_then(DocumentStatus::from_wire)
            .ok_or(Error::MissingField("status"))?;
        let created_at = required_timestamp(&map, "created_at")?;
        let expires_at = required_timestamp(&map, "expires_at")?;
        Ok(Document {
            id,
            status,
            created_at,
            expires_at,
            document_type: map.get("type").and_then(Value::as_str).and_then(DocumentType::from_wire),
            file_url: optional_str(&map, "file_url"),
            size: map.get("size").and_then(Value::as_u64),
            metadata: map.get("metadata").filter(|v| !v.is_null()).cloned(),
            derived_from: optional_str(&map, "derived_from"),
        })
    }
}

fn required_str(map: &Map<String, Value>, name: &'static str) -> Result<String> {
    map.get(name)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(Error::MissingField(name))
}

fn required_timestamp(map: &Map<String, Value>, name: &'static str) -> Result<DateTime<Utc>> {
    map.get(name)
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .ok_or(Error::MissingField(name))
}

fn optional_str(map: &Map<String, Value>, name: &str) -> Option<String> {
    map.get(name).and_then(Value::as_str).map(str::to_owned)
}
