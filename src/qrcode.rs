//! QR code links.
//!
//! Images come from an external generator; this module only builds the
//! image URL, decides where a scanned code should lead, and downloads the
//! PNG on request.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::{Error, QrConfig, Result};

pub const EMPTY_TEXT_MESSAGE: &str = "Please enter text to generate QR Code!";
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Failed to download QR Code.";
pub const DEFAULT_FILE_NAME: &str = "qrcode.png";

/// URL of a QR image encoding `text`.
///
/// Only empty text is rejected; whitespace is encoded like any other input.
pub fn qr_code_url(config: &QrConfig, text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(Error::Validation(EMPTY_TEXT_MESSAGE.into()));
    }
    Ok(format!(
        "{}?size={size}x{size}&data={}",
        config.endpoint,
        urlencoding::encode(text),
        size = config.size
    ))
}

/// Whether `text` is an absolute URL.
pub fn is_valid_url(text: &str) -> bool {
    url::Url::parse(text).is_ok()
}

/// Where a scanned code should lead: the text itself when it is a URL,
/// otherwise a web search for it.
pub fn link_target(config: &QrConfig, text: &str) -> String {
    if is_valid_url(text) {
        text.to_string()
    } else {
        format!("{}{}", config.search_base_url, urlencoding::encode(text))
    }
}

/// `data:` URI embedding PNG bytes.
pub fn to_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

pub fn save_png(png: &[u8], path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, png)?;
    Ok(())
}

/// Blocking downloader for generated QR images
#[cfg(feature = "net")]
pub struct QrClient {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "net")]
impl QrClient {
    pub fn new(config: &crate::ToolkitConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn download(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("downloading QR image from {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                log::warn!("QR download failed: {}", e);
                Error::Network(DOWNLOAD_FAILED_MESSAGE.into())
            })?;
        let bytes = resp.bytes().map_err(|e| {
            log::warn!("QR download body failed: {}", e);
            Error::Network(DOWNLOAD_FAILED_MESSAGE.into())
        })?;
        Ok(bytes.to_vec())
    }
}
