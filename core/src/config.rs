//! API environments and fixed per-operation timeouts.

use std::time::Duration;

use crate::error::Error;

pub const PRODUCTION_API_DOMAIN: &str = "https://api.pdfgate.com";
pub const SANDBOX_API_DOMAIN: &str = "https://api-sandbox.pdfgate.com";

/// Timeout for document and file retrieval, and for form-data extraction.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Rendering can take a while on large pages.
pub const GENERATE_PDF_TIMEOUT: Duration = Duration::from_secs(15 * 60);
pub const FLATTEN_PDF_TIMEOUT: Duration = Duration::from_secs(3 * 60);
pub const PROTECT_PDF_TIMEOUT: Duration = Duration::from_secs(3 * 60);
pub const COMPRESS_PDF_TIMEOUT: Duration = Duration::from_secs(3 * 60);
pub const WATERMARK_PDF_TIMEOUT: Duration = Duration::from_secs(3 * 60);

/// API environment, selected once at client construction from the key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Production,
    Sandbox,
}

impl Domain {
    /// Resolve the environment from the API key prefix.
    ///
    /// `live_` keys target production, `test_` keys target the sandbox.
    /// Anything else is rejected before any request is made.
    pub fn from_api_key(api_key: &str) -> Result<Self, Error> {
        if api_key.starts_with("live_") {
            Ok(Domain::Production)
        } else if api_key.starts_with("test_") {
            Ok(Domain::Sandbox)
        } else {
            Err(Error::InvalidApiKey)
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Domain::Production => PRODUCTION_API_DOMAIN,
            Domain::Sandbox => SANDBOX_API_DOMAIN,
        }
    }
}
