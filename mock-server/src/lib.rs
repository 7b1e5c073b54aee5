//! In-memory simulation of the PDFGate API for integration tests.
//!
//! Speaks the real wire format: bearer auth, camelCase JSON keys,
//! `{statusCode, message, error}` error bodies, and PDF bytes or document
//! records depending on the `jsonResponse` flag. "Rendering" fabricates a
//! tiny PDF-shaped byte string; transformations rewrite it just enough for
//! tests to observe that something happened.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// One stored document record plus its file bytes.
#[derive(Clone, Debug)]
pub struct StoredDocument {
    pub id: String,
    pub status: &'static str,
    pub document_type: &'static str,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub metadata: Option<Value>,
    pub derived_from: Option<String>,
    pub data: Vec<u8>,
}

impl StoredDocument {
    fn new(
        document_type: &'static str,
        data: Vec<u8>,
        metadata: Option<Value>,
        derived_from: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            status: "completed",
            document_type,
            created_at: now,
            expires_at: now + chrono::Duration::days(1),
            metadata,
            derived_from,
            data,
        }
    }

    fn file_url(&self, expires_in: Option<u64>) -> String {
        match expires_in {
            Some(seconds) => format!("https://files.pdfgate.test/{}?expiresIn={seconds}", self.id),
            None => format!("https://files.pdfgate.test/{}", self.id),
        }
    }

    /// Wire-format record: camelCase keys, optional fields omitted.
    fn to_json(&self, expires_in: Option<u64>) -> Value {
        let mut document = json!({
            "id": self.id,
            "status": self.status,
            "type": self.document_type,
            "createdAt": self.created_at.to_rfc3339(),
            "expiresAt": self.expires_at.to_rfc3339(),
            "fileUrl": self.file_url(expires_in),
            "size": self.data.len(),
        });
        if let Some(metadata) = &self.metadata {
            document["metadata"] = metadata.clone();
        }
        if let Some(derived_from) = &self.derived_from {
            document["derivedFrom"] = json!(derived_from);
        }
        document
    }
}

pub type Db = Arc<RwLock<HashMap<String, StoredDocument>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/document/{id}", get(get_document))
        .route("/file/{id}", get(get_file))
        .route("/v1/generate/pdf", post(generate_pdf))
        .route("/forms/flatten", post(flatten_pdf))
        .route("/forms/extract-data", post(extract_form_data))
        .route("/protect/pdf", post(protect_pdf))
        .route("/compress/pdf", post(compress_pdf))
        .route("/watermark/pdf", post(watermark_pdf))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

#[derive(Deserialize)]
pub struct DocumentQuery {
    #[serde(rename = "preSignedUrlExpiresIn")]
    pre_signed_url_expires_in: Option<u64>,
}

async fn get_document(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(query): Query<DocumentQuery>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    let documents = db.read().await;
    match documents.get(&id) {
        Some(document) => Json(document.to_json(query.pre_signed_url_expires_in)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Document not found"),
    }
}

async fn get_file(State(db): State<Db>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    let documents = db.read().await;
    match documents.get(&id) {
        Some(document) => {
            ([(header::CONTENT_TYPE, "application/pdf")], document.data.clone()).into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "Document not found"),
    }
}

async fn generate_pdf(State(db): State<Db>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    let html = body.get("html").and_then(Value::as_str);
    let url = body.get("url").and_then(Value::as_str);
    let content = match (html, url) {
        (Some(html), None) => html.to_string(),
        (None, Some(url)) => format!("rendered {url}"),
        (Some(_), Some(_)) => {
            return error_response(StatusCode::BAD_REQUEST, "Provide either 'html' or 'url', not both")
        }
        (None, None) => {
            return error_response(StatusCode::BAD_REQUEST, "Either 'html' or 'url' must be provided")
        }
    };
    let document = StoredDocument::new(
        "from_html",
        fake_pdf(&content),
        body.get("metadata").filter(|m| !m.is_null()).cloned(),
        None,
    );
    db.write().await.insert(document.id.clone(), document.clone());
    let wants_json = body.get("jsonResponse").and_then(Value::as_bool).unwrap_or(false);
    let expires_in = body.get("preSignedUrlExpiresIn").and_then(Value::as_u64);
    respond_created(&document, wants_json, expires_in)
}

async fn flatten_pdf(State(db): State<Db>, headers: HeaderMap, multipart: Multipart) -> Response {
    match transform_request(&db, &headers, multipart).await {
        Ok((intake, data, derived_from)) => {
            store_and_respond(&db, &intake, "flattened", data, derived_from).await
        }
        Err(response) => response,
    }
}

async fn extract_form_data(
    State(db): State<Db>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    match transform_request(&db, &headers, multipart).await {
        Ok(_) => Json(json!({"firstName": "John", "lastName": "Doe"})).into_response(),
        Err(response) => response,
    }
}

async fn protect_pdf(State(db): State<Db>, headers: HeaderMap, multipart: Multipart) -> Response {
    match transform_request(&db, &headers, multipart).await {
        Ok((intake, mut data, derived_from)) => {
            data.extend_from_slice(b"\n% encrypted\n");
            store_and_respond(&db, &intake, "encrypted", data, derived_from).await
        }
        Err(response) => response,
    }
}

async fn compress_pdf(State(db): State<Db>, headers: HeaderMap, multipart: Multipart) -> Response {
    match transform_request(&db, &headers, multipart).await {
        Ok((intake, data, derived_from)) => {
            store_and_respond(&db, &intake, "compressed", compress_bytes(data), derived_from).await
        }
        Err(response) => response,
    }
}

async fn watermark_pdf(State(db): State<Db>, headers: HeaderMap, multipart: Multipart) -> Response {
    match transform_request(&db, &headers, multipart).await {
        Ok((intake, mut data, derived_from)) => {
            match intake.fields.get("type").map(String::as_str) {
                Some("text") => {
                    if !intake.fields.contains_key("text") {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            "Required field 'text' is missing",
                        );
                    }
                }
                Some("image") => {
                    if intake.watermark.is_none() {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            "Required field 'watermark' is missing",
                        );
                    }
                }
                _ => {
                    return error_response(StatusCode::BAD_REQUEST, "Required field 'type' is missing")
                }
            }
            data.extend_from_slice(b"\n% watermark\n");
            store_and_respond(&db, &intake, "watermarked", data, derived_from).await
        }
        Err(response) => response,
    }
}

/// Text fields plus the two recognized file parts of a transformation call.
#[derive(Default)]
struct Intake {
    file: Option<Vec<u8>>,
    watermark: Option<Vec<u8>>,
    fields: HashMap<String, String>,
}

/// Auth, multipart intake, and source resolution shared by the four
/// transformation endpoints and extraction.
async fn transform_request(
    db: &Db,
    headers: &HeaderMap,
    multipart: Multipart,
) -> Result<(Intake, Vec<u8>, Option<String>), Response> {
    check_auth(headers)?;
    let intake = read_form(multipart).await?;
    let (data, derived_from) = resolve_source(db, &intake).await?;
    Ok((intake, data, derived_from))
}

async fn read_form(mut multipart: Multipart) -> Result<Intake, Response> {
    let mut intake = Intake::default();
    while let Some(field) = multipart.next_field().await.map_err(|_| bad_multipart())? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                intake.file = Some(field.bytes().await.map_err(|_| bad_multipart())?.to_vec());
            }
            "watermark" => {
                intake.watermark = Some(field.bytes().await.map_err(|_| bad_multipart())?.to_vec());
            }
            "" => continue,
            _ => {
                let text = field.text().await.map_err(|_| bad_multipart())?;
                intake.fields.insert(name, text);
            }
        }
    }
    Ok(intake)
}

fn bad_multipart() -> Response {
    error_response(StatusCode::BAD_REQUEST, "Malformed multipart body")
}

async fn resolve_source(db: &Db, intake: &Intake) -> Result<(Vec<u8>, Option<String>), Response> {
    match (intake.fields.get("documentId"), &intake.file) {
        (Some(_), Some(_)) => Err(error_response(
            StatusCode::BAD_REQUEST,
            "Provide either 'documentId' or 'file', not both",
        )),
        (Some(id), None) => {
            let documents = db.read().await;
            match documents.get(id) {
                Some(document) => Ok((document.data.clone(), Some(id.clone()))),
                None => Err(error_response(StatusCode::NOT_FOUND, "Document not found")),
            }
        }
        (None, Some(data)) => Ok((data.clone(), None)),
        (None, None) => {
            Err(error_response(StatusCode::BAD_REQUEST, "Required field 'pdf' is missing"))
        }
    }
}

async fn store_and_respond(
    db: &Db,
    intake: &Intake,
    document_type: &'static str,
    data: Vec<u8>,
    derived_from: Option<String>,
) -> Response {
    let metadata = intake.fields.get("metadata").and_then(|raw| serde_json::from_str(raw).ok());
    let document = StoredDocument::new(document_type, data, metadata, derived_from);
    db.write().await.insert(document.id.clone(), document.clone());
    let wants_json = intake.fields.get("jsonResponse").map(String::as_str) == Some("true");
    let expires_in =
        intake.fields.get("preSignedUrlExpiresIn").and_then(|value| value.parse().ok());
    respond_created(&document, wants_json, expires_in)
}

fn respond_created(document: &StoredDocument, wants_json: bool, expires_in: Option<u64>) -> Response {
    if wants_json {
        (StatusCode::CREATED, Json(document.to_json(expires_in))).into_response()
    } else {
        (
            StatusCode::CREATED,
            [(header::CONTENT_TYPE, "application/pdf")],
            document.data.clone(),
        )
            .into_response()
    }
}

fn check_auth(headers: &HeaderMap) -> Result<(), Response> {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.strip_prefix("Bearer ").is_some_and(|key| !key.is_empty()));
    if authorized {
        Ok(())
    } else {
        Err(error_response(StatusCode::UNAUTHORIZED, "Missing or invalid API key"))
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "statusCode": status.as_u16(),
        "message": message,
        "error": status.canonical_reason().unwrap_or("Error"),
    });
    (status, Json(body)).into_response()
}

fn fake_pdf(content: &str) -> Vec<u8> {
    let mut data = b"%PDF-1.4\n".to_vec();
    data.extend_from_slice(content.as_bytes());
    data.extend_from_slice(b"\n%%EOF\n");
    data
}

/// Drop a quarter of the bytes, at least one, and never below one byte, so
/// output length is strictly under input length for anything non-trivial.
fn compress_bytes(mut data: Vec<u8>) -> Vec<u8> {
    if data.len() > 1 {
        let keep = data.len() - (data.len() / 4).max(1);
        data.truncate(keep);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_json_uses_wire_keys() {
        let document =
            StoredDocument::new("from_html", fake_pdf("<p>hi</p>"), None, Some("doc-0".into()));
        let value = document.to_json(None);
        assert_eq!(value["type"], "from_html");
        assert_eq!(value["status"], "completed");
        assert_eq!(value["derivedFrom"], "doc-0");
        assert!(value["createdAt"].as_str().unwrap().contains('T'));
        assert!(value.get("metadata").is_none());
        assert_eq!(value["size"].as_u64().unwrap(), document.data.len() as u64);
    }

    #[test]
    fn file_url_carries_expiry_when_requested() {
        let document = StoredDocument::new("compressed", vec![1, 2, 3], None, None);
        assert!(!document.file_url(None).contains("expiresIn"));
        assert!(document.file_url(Some(600)).ends_with("?expiresIn=600"));
    }

    #[test]
    fn fake_pdf_has_magic_and_trailer() {
        let data = fake_pdf("body");
        assert!(data.starts_with(b"%PDF-"));
        assert!(data.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn compress_strictly_shrinks() {
        for len in [2usize, 3, 4, 100, 4096] {
            let data = vec![0u8; len];
            let compressed = compress_bytes(data);
            assert!(compressed.len() < len, "len {len} did not shrink");
            assert!(!compressed.is_empty());
        }
    }

    #[test]
    fn compress_leaves_trivial_input_alone() {
        assert_eq!(compress_bytes(vec![9]), vec![9]);
        assert!(compress_bytes(Vec::new()).is_empty());
    }
}
