//! Execution of request descriptors, sync and async.
//!
//! # Design
//! - Exactly one attempt per call: no retries, no redirects beyond reqwest's
//!   defaults, the descriptor's timeout bounding the whole exchange.
//! - Non-2xx statuses become `Error::Http` here, carrying the message dug
//!   out of JSON error bodies; callers past this point only ever see
//!   successful payloads.
//! - The sync and async paths are mirrored line for line; edits belong in
//!   both.

use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::params::FileUpload;
use crate::request::{FilePart, HttpMethod, Payload, RequestDescriptor};

/// A successful raw response: status, headers, undecoded body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

/// Execute a descriptor on the async client.
pub async fn send(client: &reqwest::Client, descriptor: &RequestDescriptor) -> Result<RawResponse> {
    debug!(method = ?descriptor.method, url = %descriptor.url, "sending request");
    let mut request = match descriptor.method {
        HttpMethod::Get => client.get(&descriptor.url),
        HttpMethod::Post => client.post(&descriptor.url),
    };
    for (name, value) in &descriptor.headers {
        request = request.header(name, value);
    }
    request = request.timeout(descriptor.timeout);
    request = match &descriptor.payload {
        Payload::Query(pairs) => request.query(pairs),
        Payload::Json(body) => request.json(body),
        Payload::Multipart { fields, parts } => request.multipart(multipart_form(fields, parts)?),
    };

    let response = request.send().await?;
    let status = response.status().as_u16();
    let headers = collect_headers(response.headers());
    if !response.status().is_success() {
        let content_type = content_type(&headers);
        let body = response.text().await.unwrap_or_default();
        debug!(status, "request rejected");
        return Err(http_error(status, content_type.as_deref(), &body));
    }
    let body = response.bytes().await?;
    debug!(status, bytes = body.len(), "request completed");
    Ok(RawResponse { status, headers, body })
}

/// Execute a descriptor on the blocking client.
///
/// Must not be called from inside an async runtime; that is the facade's
/// contract to uphold.
pub fn send_blocking(
    client: &reqwest::blocking::Client,
    descriptor: &RequestDescriptor,
) -> Result<RawResponse> {
    debug!(method = ?descriptor.method, url = %descriptor.url, "sending request");
    let mut request = match descriptor.method {
        HttpMethod::Get => client.get(&descriptor.url),
        HttpMethod::Post => client.post(&descriptor.url),
    };
    for (name, value) in &descriptor.headers {
        request = request.header(name, value);
    }
    request = request.timeout(descriptor.timeout);
    request = match &descriptor.payload {
        Payload::Query(pairs) => request.query(pairs),
        Payload::Json(body) => request.json(body),
        Payload::Multipart { fields, parts } => {
            request.multipart(multipart_form_blocking(fields, parts)?)
        }
    };

    let response = request.send()?;
    let status = response.status().as_u16();
    let headers = collect_headers(response.headers());
    if !response.status().is_success() {
        let content_type = content_type(&headers);
        let body = response.text().unwrap_or_default();
        debug!(status, "request rejected");
        return Err(http_error(status, content_type.as_deref(), &body));
    }
    let body = response.bytes()?;
    debug!(status, bytes = body.len(), "request completed");
    Ok(RawResponse { status, headers, body })
}

fn multipart_form(
    fields: &[(String, String)],
    parts: &[FilePart],
) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in fields {
        form = form.text(name.clone(), value.clone());
    }
    for part in parts {
        form = form.part(part.name.clone(), file_part(&part.file)?);
    }
    Ok(form)
}

fn file_part(file: &FileUpload) -> Result<reqwest::multipart::Part> {
    let mut part = reqwest::multipart::Part::stream(reqwest::Body::from(file.data.clone()))
        .file_name(file.name.clone());
    if let Some(content_type) = &file.content_type {
        part = part
            .mime_str(content_type)
            .map_err(|err| Error::Params(format!("invalid content type '{content_type}': {err}")))?;
    }
    Ok(part)
}

fn multipart_form_blocking(
    fields: &[(String, String)],
    parts: &[FilePart],
) -> Result<reqwest::blocking::multipart::Form> {
    let mut form = reqwest::blocking::multipart::Form::new();
    for (name, value) in fields {
        form = form.text(name.clone(), value.clone());
    }
    for part in parts {
        form = form.part(part.name.clone(), file_part_blocking(&part.file)?);
    }
    Ok(form)
}

fn file_part_blocking(file: &FileUpload) -> Result<reqwest::blocking::multipart::Part> {
    let mut part = reqwest::blocking::multipart::Part::bytes(file.data.to_vec())
        .file_name(file.name.clone());
    if let Some(content_type) = &file.content_type {
        part = part
            .mime_str(content_type)
            .map_err(|err| Error::Params(format!("invalid content type '{content_type}': {err}")))?;
    }
    Ok(part)
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (name.to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
        })
        .collect()
}

fn content_type(headers: &[(String, String)]) -> Option<String> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.clone())
}

fn http_error(status: u16, content_type: Option<&str>, body: &str) -> Error {
    Error::Http { status, message: extract_message(content_type, body) }
}

/// Pull the `message` field out of a JSON error body; anything else is
/// reported raw.
fn extract_message(content_type: Option<&str>, body: &str) -> String {
    if content_type.is_some_and(|ct| ct.contains("application/json")) {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            if let Some(message) = value.get("message").and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }
    body.to_string()
}
