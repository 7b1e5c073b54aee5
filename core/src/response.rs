//! Interpretation of successful response bodies.
//!
//! The transport layer has already turned non-2xx statuses into errors by
//! the time a body reaches these functions.

use bytes::Bytes;
use serde_json::Value;

use crate::case::keys_to_snake;
use crate::document::Document;
use crate::error::Result;

/// Outcome of a PDF operation, as selected by the `json_response` flag.
#[derive(Debug, Clone)]
pub enum PdfOutput {
    /// Raw PDF bytes.
    File(Bytes),
    /// Decoded document record.
    Document(Document),
}

impl PdfOutput {
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            PdfOutput::File(bytes) => Some(bytes),
            PdfOutput::Document(_) => None,
        }
    }

    pub fn into_document(self) -> Option<Document> {
        match self {
            PdfOutput::File(_) => None,
            PdfOutput::Document(document) => Some(document),
        }
    }
}

/// Interpret a PDF-operation body according to the caller's declared intent.
///
/// The intent wins over the body's looks: with `wants_json` unset the bytes
/// come back verbatim, JSON-shaped or not.
pub fn build_output(body: Bytes, wants_json: bool) -> Result<PdfOutput> {
    if wants_json {
        Ok(PdfOutput::Document(decode_document(&body)?))
    } else {
        Ok(PdfOutput::File(body))
    }
}

/// Decode a JSON body into a validated `Document`.
pub fn decode_document(body: &[u8]) -> Result<Document> {
    let value: Value = serde_json::from_slice(body)?;
    Document::from_value(keys_to_snake(value))
}

/// Decode an extract-form-data body, rewriting field names to local case.
pub fn decode_form_data(body: &[u8]) -> Result<Value> {
    let value: Value = serde_json::from_slice(body)?;
    Ok(keys_to_snake(value))
}
