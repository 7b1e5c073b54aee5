//! Per-operation request construction.
//!
//! # Design
//! `RequestBuilder` turns parameter values into `RequestDescriptor`s: plain
//! data naming the method, URL, headers, payload, and timeout. Descriptors
//! carry no transport state; execution lives in `http` and interpretation in
//! `response`. Each descriptor is built once, executed once, and dropped, so
//! nothing request-scoped outlives the call.
//!
//! All parameter checks happen here. A builder that returns `Err` has sent
//! nothing.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::case::keys_to_camel;
use crate::config::{self, Domain};
use crate::error::{Error, Result};
use crate::params::{
    CompressPdfParams, ExtractPdfFormDataParams, FileUpload, FlattenPdfParams, GeneratePdfParams,
    GetDocumentParams, GetFileParams, PdfSource, ProtectPdfParams, WatermarkPdfParams,
};
use crate::urls;

/// HTTP method of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One file part of a multipart request.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name, `file` or `watermark`.
    pub name: String,
    pub file: FileUpload,
}

/// Request payload in one of the three encodings the API accepts.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Query-string pairs, already in wire case.
    Query(Vec<(String, String)>),
    /// JSON body with wire-case keys.
    Json(Value),
    /// Multipart form: stringified fields plus file parts.
    Multipart {
        fields: Vec<(String, String)>,
        parts: Vec<FilePart>,
    },
}

/// A fully described request, ready for execution.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
    pub timeout: Duration,
}

/// Builds one descriptor per operation from an API key and base URL.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    api_key: String,
    base_url: String,
}

impl RequestBuilder {
    /// Resolve the base URL from the API key prefix.
    pub fn new(api_key: &str) -> Result<Self> {
        let domain = Domain::from_api_key(api_key)?;
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: domain.base_url().to_string(),
        })
    }

    /// Use an explicit base URL, bypassing prefix resolution. Trailing
    /// slashes are stripped so path joins stay predictable.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![("Authorization".to_string(), format!("Bearer {}", self.api_key))]
    }

    pub fn build_get_document(&self, params: &GetDocumentParams) -> RequestDescriptor {
        let mut query = Vec::new();
        if let Some(expires_in) = params.pre_signed_url_expires_in {
            query.push(("preSignedUrlExpiresIn".to_string(), expires_in.to_string()));
        }
        RequestDescriptor {
            method: HttpMethod::Get,
            url: urls::document_url(&self.base_url, &params.document_id),
            headers: self.headers(),
            payload: Payload::Query(query),
            timeout: config::DEFAULT_TIMEOUT,
        }
    }

    pub fn build_get_file(&self, params: &GetFileParams) -> RequestDescriptor {
        RequestDescriptor {
            method: HttpMethod::Get,
            url: urls::file_url(&self.base_url, &params.document_id),
            headers: self.headers(),
            payload: Payload::Query(Vec::new()),
            timeout: config::DEFAULT_TIMEOUT,
        }
    }

    pub fn build_generate_pdf(&self, params: &GeneratePdfParams) -> Result<RequestDescriptor> {
        match (&params.html, &params.url) {
            (None, None) => {
                return Err(Error::Params(
                    "either 'html' or 'url' must be provided to generate a PDF".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(Error::Params(
                    "'html' and 'url' are mutually exclusive; provide exactly one".to_string(),
                ))
            }
            _ => {}
        }
        check_metadata(params.metadata.as_ref())?;
        Ok(RequestDescriptor {
            method: HttpMethod::Post,
            url: urls::generate_pdf_url(&self.base_url),
            headers: self.headers(),
            payload: Payload::Json(to_wire_value(params)?),
            timeout: config::GENERATE_PDF_TIMEOUT,
        })
    }

    pub fn build_flatten_pdf(&self, params: &FlattenPdfParams) -> Result<RequestDescriptor> {
        check_metadata(params.metadata.as_ref())?;
        self.build_transform(
            urls::flatten_pdf_url(&self.base_url),
            params,
            &params.source,
            config::FLATTEN_PDF_TIMEOUT,
        )
    }

    pub fn build_extract_form_data(&self, params: &ExtractPdfFormDataParams) -> RequestDescriptor {
        let (fields, parts) = source_parts(&params.source);
        RequestDescriptor {
            method: HttpMethod::Post,
            url: urls::extract_form_data_url(&self.base_url),
            headers: self.headers(),
            payload: Payload::Multipart { fields, parts },
            timeout: config::DEFAULT_TIMEOUT,
        }
    }

    pub fn build_protect_pdf(&self, params: &ProtectPdfParams) -> Result<RequestDescriptor> {
        check_metadata(params.metadata.as_ref())?;
        self.build_transform(
            urls::protect_pdf_url(&self.base_url),
            params,
            &params.source,
            config::PROTECT_PDF_TIMEOUT,
        )
    }

    pub fn build_compress_pdf(&self, params: &CompressPdfParams) -> Result<RequestDescriptor> {
        check_metadata(params.metadata.as_ref())?;
        self.build_transform(
            urls::compress_pdf_url(&self.base_url),
            params,
            &params.source,
            config::COMPRESS_PDF_TIMEOUT,
        )
    }

    pub fn build_watermark_pdf(&self, params: &WatermarkPdfParams) -> Result<RequestDescriptor> {
        check_metadata(params.metadata.as_ref())?;
        let mut descriptor = self.build_transform(
            urls::watermark_pdf_url(&self.base_url),
            params,
            &params.source,
            config::WATERMARK_PDF_TIMEOUT,
        )?;
        if let Some(image) = &params.watermark {
            if let Payload::Multipart { parts, .. } = &mut descriptor.payload {
                parts.push(FilePart { name: "watermark".to_string(), file: image.clone() });
            }
        }
        Ok(descriptor)
    }

    /// Common shape of the four transformation endpoints: serialized fields
    /// plus the input source, all as one multipart form.
    fn build_transform<T: Serialize>(
        &self,
        url: String,
        params: &T,
        source: &PdfSource,
        timeout: Duration,
    ) -> Result<RequestDescriptor> {
        let (mut fields, parts) = source_parts(source);
        let mut form = form_fields(to_wire_value(params)?);
        form.append(&mut fields);
        Ok(RequestDescriptor {
            method: HttpMethod::Post,
            url,
            headers: self.headers(),
            payload: Payload::Multipart { fields: form, parts },
            timeout,
        })
    }
}

fn source_parts(source: &PdfSource) -> (Vec<(String, String)>, Vec<FilePart>) {
    match source {
        PdfSource::DocumentId(id) => {
            (vec![("documentId".to_string(), id.clone())], Vec::new())
        }
        PdfSource::File(file) => (
            Vec::new(),
            vec![FilePart { name: "file".to_string(), file: file.clone() }],
        ),
    }
}

/// Serialize parameters and convert the keys to wire case.
fn to_wire_value<T: Serialize>(params: &T) -> Result<Value> {
    let value = serde_json::to_value(params)
        .map_err(|err| Error::Params(format!("failed to serialize parameters: {err}")))?;
    Ok(keys_to_camel(value))
}

fn check_metadata(metadata: Option<&Value>) -> Result<()> {
    match metadata {
        Some(value) if !value.is_object() => {
            Err(Error::Params("'metadata' must be a JSON object".to_string()))
        }
        _ => Ok(()),
    }
}

/// Flatten a wire-case JSON object into multipart text fields. Strings go
/// verbatim; everything else is rendered as compact JSON, so nested values
/// survive the form encoding.
fn form_fields(value: Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map.into_iter().map(|(key, value)| (key, form_value(value))).collect(),
        _ => Vec::new(),
    }
}

fn form_value(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
