//! Client library for the PDFGate PDF-processing API.
//!
//! # Overview
//! Generates PDFs from HTML or URLs, transforms existing ones (flatten,
//! protect, compress, watermark), extracts form data, and fetches stored
//! documents and files. Each operation exists twice: async on [`Client`],
//! blocking on [`BlockingClient`].
//!
//! # Design
//! - Every call is a straight pipeline: build a `RequestDescriptor`, execute
//!   it exactly once, interpret the body. The stages live in `request`,
//!   `http`, and `response` and are testable on their own.
//! - The API key picks the environment: `live_` keys talk to production,
//!   `test_` keys to the sandbox. Resolution happens once, at construction.
//! - The wire format is camelCase; this crate is snake_case throughout.
//!   Keys are converted at the JSON boundary in both directions.
//! - Parameter problems surface as `Error::Params` before any request is
//!   sent; server refusals surface as `Error::Http` with the server's own
//!   message.

pub mod blocking;
pub mod case;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod params;
pub mod request;
pub mod response;
pub mod urls;

pub use blocking::BlockingClient;
pub use client::Client;
pub use config::Domain;
pub use document::{Document, DocumentStatus, DocumentType};
pub use error::{Error, Result};
pub use params::{
    Authentication, ClickSelectorChain, ClickSelectorChainSetup, CompressPdfParams,
    EmulateMediaType, EncryptionAlgorithm, ExtractPdfFormDataParams, FileOrientation, FileUpload,
    FlattenPdfParams, GeneratePdfParams, GetDocumentParams, GetFileParams, PageSizeType,
    PdfPageMargin, PdfSource, PdfStandardFont, ProtectPdfParams, Viewport, WatermarkPdfParams,
    WatermarkType,
};
pub use request::{FilePart, HttpMethod, Payload, RequestBuilder, RequestDescriptor};
pub use response::PdfOutput;
