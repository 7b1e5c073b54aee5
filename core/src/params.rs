//! Parameter types for every API operation.
//!
//! # Design
//! - Plain structs with public fields, one per operation. Constructors fill
//!   in the required parts; everything else is set directly.
//! - Serialization derives produce local snake_case keys; the request
//!   builder converts them to wire case and drops absent options.
//! - Fields that travel outside the serialized body (the input source, the
//!   watermark image) are marked `#[serde(skip)]`.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An in-memory file to upload as a multipart part.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// File name reported to the server.
    pub name: String,
    /// Raw file contents.
    pub data: Bytes,
    /// Optional MIME type, e.g. `application/pdf`.
    pub content_type: Option<String>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self { name: name.into(), data: data.into(), content_type: None }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Input document for a transformation call.
///
/// Either a document already held by the service or a fresh upload. The
/// request builder turns the id into a `documentId` form field and the
/// upload into a `file` multipart part.
#[derive(Debug, Clone)]
pub enum PdfSource {
    DocumentId(String),
    File(FileUpload),
}

/// Page sizes supported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSizeType {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    Ledger,
    Tabloid,
    Legal,
    Letter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOrientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmulateMediaType {
    Screen,
    Print,
}

/// The fourteen built-in PDF fonts usable for text watermarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PdfStandardFont {
    #[serde(rename = "times-roman")]
    TimesRoman,
    #[serde(rename = "times-bold")]
    TimesBold,
    #[serde(rename = "times-italic")]
    TimesItalic,
    #[serde(rename = "times-bolditalic")]
    TimesBoldItalic,
    #[serde(rename = "helvetica")]
    Helvetica,
    #[serde(rename = "helvetica-bold")]
    HelveticaBold,
    #[serde(rename = "helvetica-oblique")]
    HelveticaOblique,
    #[serde(rename = "helvetica-boldoblique")]
    HelveticaBoldOblique,
    #[serde(rename = "courier")]
    Courier,
    #[serde(rename = "courier-bold")]
    CourierBold,
    #[serde(rename = "courier-oblique")]
    CourierOblique,
    #[serde(rename = "courier-boldoblique")]
    CourierBoldOblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionAlgorithm {
    #[serde(rename = "AES256")]
    Aes256,
    #[serde(rename = "AES128")]
    Aes128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkType {
    Text,
    Image,
}

/// Page margins as CSS-style length strings, e.g. `"1cm"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfPageMargin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

/// One ordered sequence of selectors to click before rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickSelectorChain {
    pub selectors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickSelectorChainSetup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_failing_chains: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chains: Option<Vec<ClickSelectorChain>>,
}

/// HTTP basic-auth credentials for fetching a protected URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authentication {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Parameters for `GET /document/{id}`.
#[derive(Debug, Clone)]
pub struct GetDocumentParams {
    pub document_id: String,
    /// Lifetime in seconds for the pre-signed `file_url` in the response.
    pub pre_signed_url_expires_in: Option<u64>,
}

impl GetDocumentParams {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self { document_id: document_id.into(), pre_signed_url_expires_in: None }
    }
}

/// Parameters for `GET /file/{id}`.
#[derive(Debug, Clone)]
pub struct GetFileParams {
    pub document_id: String,
}

impl GetFileParams {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self { document_id: document_id.into() }
    }
}

/// Parameters for PDF generation from HTML or a URL.
///
/// Exactly one of `html` and `url` must be set; the request builder rejects
/// both the empty and the ambiguous combination before sending anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratePdfParams {
    /// HTML markup to render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// URL of a page to render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `true` asks for a JSON document record instead of raw PDF bytes.
    pub json_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_signed_url_expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size_type: Option<PageSizeType>,
    /// Page width in pixels; overrides `page_size_type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Page height in pixels; overrides `page_size_type`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<FileOrientation>,
    /// HTML template for the page header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// HTML template for the page footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<PdfPageMargin>,
    /// Rendering timeout in milliseconds, enforced server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// JavaScript injected into the page before rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript: Option<String>,
    /// CSS injected into the page before rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emulate_media_type: Option<EmulateMediaType>,
    /// Extra headers sent when fetching `url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_headers: Option<BTreeMap<String, String>>,
    /// Opaque caller data stored with the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Wait until this selector appears before rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_selector: Option<String>,
    /// Click this selector once before rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_selector_chain_setup: Option<ClickSelectorChainSetup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_network_idle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<bool>,
    /// Keep interactive form fields in the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_form_fields: Option<bool>,
    /// Delay in milliseconds between page load and rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_images: Option<bool>,
    /// Rendering scale factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Pages to include, e.g. `"1-3,5"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_ranges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_background: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl GeneratePdfParams {
    pub fn from_html(html: impl Into<String>) -> Self {
        Self { html: Some(html.into()), ..Self::default() }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self { url: Some(url.into()), ..Self::default() }
    }
}

/// Parameters for flattening interactive form fields.
#[derive(Debug, Clone, Serialize)]
pub struct FlattenPdfParams {
    #[serde(skip)]
    pub source: PdfSource,
    pub json_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_signed_url_expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl FlattenPdfParams {
    pub fn by_document_id(document_id: impl Into<String>) -> Self {
        Self::new(PdfSource::DocumentId(document_id.into()))
    }

    pub fn by_file(file: FileUpload) -> Self {
        Self::new(PdfSource::File(file))
    }

    fn new(source: PdfSource) -> Self {
        Self { source, json_response: false, pre_signed_url_expires_in: None, metadata: None }
    }
}

/// Parameters for reading form field values out of a PDF.
#[derive(Debug, Clone)]
pub struct ExtractPdfFormDataParams {
    pub source: PdfSource,
}

impl ExtractPdfFormDataParams {
    pub fn by_document_id(document_id: impl Into<String>) -> Self {
        Self { source: PdfSource::DocumentId(document_id.into()) }
    }

    pub fn by_file(file: FileUpload) -> Self {
        Self { source: PdfSource::File(file) }
    }
}

/// Parameters for password protection and permission flags.
#[derive(Debug, Clone, Serialize)]
pub struct ProtectPdfParams {
    #[serde(skip)]
    pub source: PdfSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<EncryptionAlgorithm>,
    /// Password required to open the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_password: Option<String>,
    /// Password required to change permissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_print: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_copy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_editing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypt_metadata: Option<bool>,
    pub json_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_signed_url_expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ProtectPdfParams {
    pub fn by_document_id(document_id: impl Into<String>) -> Self {
        Self::new(PdfSource::DocumentId(document_id.into()))
    }

    pub fn by_file(file: FileUpload) -> Self {
        Self::new(PdfSource::File(file))
    }

    fn new(source: PdfSource) -> Self {
        Self {
            source,
            algorithm: None,
            user_password: None,
            owner_password: None,
            disable_print: None,
            disable_copy: None,
            disable_editing: None,
            encrypt_metadata: None,
            json_response: false,
            pre_signed_url_expires_in: None,
            metadata: None,
        }
    }
}

/// Parameters for lossless size reduction.
#[derive(Debug, Clone, Serialize)]
pub struct CompressPdfParams {
    #[serde(skip)]
    pub source: PdfSource,
    /// Optimize the file for streaming display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linearize: Option<bool>,
    pub json_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_signed_url_expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl CompressPdfParams {
    pub fn by_document_id(document_id: impl Into<String>) -> Self {
        Self::new(PdfSource::DocumentId(document_id.into()))
    }

    pub fn by_file(file: FileUpload) -> Self {
        Self::new(PdfSource::File(file))
    }

    fn new(source: PdfSource) -> Self {
        Self {
            source,
            linearize: None,
            json_response: false,
            pre_signed_url_expires_in: None,
            metadata: None,
        }
    }
}

/// Parameters for stamping a text or image watermark.
#[derive(Debug, Clone, Serialize)]
pub struct WatermarkPdfParams {
    #[serde(skip)]
    pub source: PdfSource,
    #[serde(rename = "type")]
    pub watermark_type: WatermarkType,
    /// Watermark text; used with `WatermarkType::Text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Watermark image; used with `WatermarkType::Image`. Travels as its
    /// own multipart part, not in the field set.
    #[serde(skip)]
    pub watermark: Option<FileUpload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<PdfStandardFont>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// CSS-style color, e.g. `"#ff0000"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    /// 0.0 (invisible) to 1.0 (opaque).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,
    /// Rotation in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    pub json_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_signed_url_expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl WatermarkPdfParams {
    pub fn by_document_id(document_id: impl Into<String>, watermark_type: WatermarkType) -> Self {
        Self::new(PdfSource::DocumentId(document_id.into()), watermark_type)
    }

    pub fn by_file(file: FileUpload, watermark_type: WatermarkType) -> Self {
        Self::new(PdfSource::File(file), watermark_type)
    }

    fn new(source: PdfSource, watermark_type: WatermarkType) -> Self {
        Self {
            source,
            watermark_type,
            text: None,
            watermark: None,
            font: None,
            font_size: None,
            font_color: None,
            opacity: None,
            x_position: None,
            y_position: None,
            image_width: None,
            image_height: None,
            rotate: None,
            json_response: false,
            pre_signed_url_expires_in: None,
            metadata: None,
        }
    }
}
