//! Blocking client facade.
//!
//! Mirrors [`crate::client::Client`] operation for operation on
//! `reqwest::blocking`. Construct and use it outside of async runtimes;
//! `reqwest::blocking` panics when driven from inside one.

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

/// Blocking client for the PDFGate API.
#[derive(Debug, Clone)]
pub struct BlockingClient {
    builder: RequestBuilder,
    http: reqwest::blocking::Client,
}

impl BlockingClient {
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
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self { builder, http })
    }

    pub fn base_url(&self) -> &str {
        self.builder.base_url()
    }

    /// Fetch a document record by id.
    pub fn get_document(&self, params: &GetDocumentParams) -> Result<Document> {
        let descriptor = self.builder.build_get_document(params);
        let raw = http::send_blocking(&self.http, &descriptor)?;
        response::decode_document(&raw.body)
    }

    /// Download the stored file for a document.
    pub fn get_file(&self, params: &GetFileParams) -> Result<Bytes> {
        let descriptor = self.builder.build_get_file(params);
        let raw = http::send_blocking(&self.http, &descriptor)?;
        Ok(raw.body)
    }

    /// Render a PDF from HTML markup or a URL.
    pub fn generate_pdf(&self, params: &GeneratePdfParams) -> Result<PdfOutput> {
        let descriptor = self.builder.build_generate_pdf(params)?;
        let raw = http::send_blocking(&self.http, &descriptor)?;
        response::build_output(raw.body, params.json_response)
    }

    /// Flatten interactive form fields into static page content.
    pub fn flatten_pdf(&self, params: &FlattenPdfParams) -> Result<PdfOutput> {
        let descriptor = self.builder.build_flatten_pdf(params)?;
        let raw = http::send_blocking(&self.http, &descriptor)?;
        response::build_output(raw.body, params.json_response)
    }

    /// Read form field values out of a PDF. Keys in the returned JSON are
    /// converted to snake_case.
    pub fn extract_pdf_form_data(&self, params: &ExtractPdfFormDataParams) -> Result<Value> {
        let descriptor = self.builder.build_extract_form_data(params);
        let raw = http::send_blocking(&self.http, &descriptor)?;
        response::decode_form_data(&raw.body)
    }

    /// Encrypt a PDF and apply permission flags.
    pub fn protect_pdf(&self, params: &ProtectPdfParams) -> Result<PdfOutput> {
        let descriptor = self.builder.build_protect_pdf(params)?;
        let raw = http::send_blocking(&self.http, &descriptor)?;
        response::build_output(raw.body, params.json_response)
    }

    /// Reduce a PDF's size without visual changes.
    pub fn compress_pdf(&self, params: &CompressPdfParams) -> Result<PdfOutput> {
        let descriptor = self.builder.build_compress_pdf(params)?;
        let raw = http::send_blocking(&self.http, &descriptor)?;
        response::build_output(raw.body, params.json_response)
    }

    /// Stamp a text or image watermark onto every page.
    pub fn watermark_pdf(&self, params: &WatermarkPdfParams) -> Result<PdfOutput> {
        let descriptor = self.builder.build_watermark_pdf(params)?;
        let raw = http::send_blocking(&self.http, &descriptor)?;
        response::build_output(raw.body, params.json_response)
    }
}
