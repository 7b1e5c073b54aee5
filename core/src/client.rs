//! Asynchronous client facade.
//!
//! # Design
//! `Client` wires the three layers together: build a descriptor, execute it
//! once, interpret the body. It holds only the credential-derived
//! `RequestBuilder` and a reqwest connection pool, so clones are cheap and
//! share the pool. No state carries over between calls.

use bytes::Bytes;
use serde_json::Value;

use crate::document::Document;
use crate::error::Result;
use crate::http;
use crate::params::{
    CompressPdfParams, ExtractPdfFormDataParams, FlattenPdfParams, GeneratePdfParams,
    GetDocumentParams, GetFileParams, ProtectPdfParams, WatermarkPdfParams,
};
use crate::request::RequestBuilder;
use crate::response::{self, PdfOutput};

/// Asynchronous client for the PDFGate API.
///
/// Construction validates the API key prefix and resolves the environment;
/// no request leaves the process until an operation is called. Dropping a
/// call's future cancels the underlying request.
#[derive(Debug, Clone)]
pub struct Client {
    builder: RequestBuilder,
    http: reqwest::Client,
}

impl Client {
    /// Create a client, resolving production or sandbox from the key prefix.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::from_builder(RequestBuilder::new(api_key)?)
    }

    /// Create a client against an explicit base URL. Intended for tests and
    /// staging environments; the key prefix is not consulted.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        Self::from_builder(RequestBuilder::with_base_url(api_key, base_url))
    }

    fn from_builder(builder: RequestBuilder) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { builder, http })
    }

    pub fn base_url(&self) -> &str {
        self.builder.base_url()
    }

    /// Fetch a document record by id.
    pub async fn get_document(&self, params: &GetDocumentParams) -> Result<Document> {
        let descriptor = self.builder.build_get_document(params);
        let raw = http::send(&self.http, &descriptor).await?;
        response::decode_document(&raw.body)
    }

    /// Download the stored file for a document.
    pub async fn get_file(&self, params: &GetFileParams) -> Result<Bytes> {
        let descriptor = self.builder.build_get_file(params);
        let raw = http::send(&self.http, &descriptor).await?;
        Ok(raw.body)
    }

    /// Render a PDF from HTML markup or a URL.
    pub async fn generate_pdf(&self, params: &GeneratePdfParams) -> Result<PdfOutput> {
        let descriptor = self.builder.build_generate_pdf(params)?;
        let raw = http::send(&self.http, &descriptor).await?;
        response::build_output(raw.body, params.json_response)
    }

    /// Flatten interactive form fields into static page content.
    pub async fn flatten_pdf(&self, params: &FlattenPdfParams) -> Result<PdfOutput> {
        let descriptor = self.builder.build_flatten_pdf(params)?;
        let raw = http::send(&self.http, &descriptor).await?;
        response::build_output(raw.body, params.json_response)
    }

    /// Read form field values out of a PDF. Keys in the returned JSON are
    /// converted to snake_case.
    pub async fn extract_pdf_form_data(&self, params: &ExtractPdfFormDataParams) -> Result<Value> {
        let descriptor = self.builder.build_extract_form_data(params);
        let raw = http::send(&self.http, &descriptor).await?;
        response::decode_form_data(&raw.body)
    }

    /// Encrypt a PDF and apply permission flags.
    pub async fn protect_pdf(&self, params: &ProtectPdfParams) -> Result<PdfOutput> {
        let descriptor = self.builder.build_protect_pdf(params)?;
        let raw = http::send(&self.http, &descriptor).await?;
        response::build_output(raw.body, params.json_response)
    }

    /// Reduce a PDF's size without visual changes.
    pub async fn compress_pdf(&self, params: &CompressPdfParams) -> Result<PdfOutput> {
        let descriptor = self.builder.build_compress_pdf(params)?;
        let raw = http::send(&self.http, &descriptor).await?;
        response::build_output(raw.body, params.json_response)
    }

    /// Stamp a text or image watermark onto every page.
    pub async fn watermark_pdf(&self, params: &WatermarkPdfParams) -> Result<PdfOutput> {
        let descriptor = self.builder.build_watermark_pdf(params)?;
        let raw = http::send(&self.http, &descriptor).await?;
        response::build_output(raw.body, params.json_response)
    }
}
