//! Endpoint URL construction.
//!
//! Pure string assembly from a base URL. Query parameters are not handled
//! here; they travel in the request descriptor's payload.

pub fn document_url(base_url: &str, document_id: &str) -> String {
    format!("{base_url}/document/{document_id}")
}

pub fn file_url(base_url: &str, document_id: &str) -> String {
    format!("{base_url}/file/{document_id}")
}

pub fn generate_pdf_url(base_url: &str) -> String {
    format!("{base_url}/v1/generate/pdf")
}

pub fn flatten_pdf_url(base_url: &str) -> String {
    format!("{base_url}/forms/flatten")
}

pub fn extract_form_data_url(base_url: &str) -> String {
    format!("{base_url}/forms/extract-data")
}

pub fn protect_pdf_url(base_url: &str) -> String {
    format!("{base_url}/protect/pdf")
}

pub fn compress_pdf_url(base_url: &str) -> String {
    format!("{base_url}/compress/pdf")
}

pub fn watermark_pdf_url(base_url: &str) -> String {
    format!("{base_url}/watermark/pdf")
}
