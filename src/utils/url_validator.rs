//! Destination URL validation.
//!
//! Destinations are stored exactly as submitted; this module only decides
//! whether a submitted string is an acceptable absolute URL.

use url::Url;

/// Maximum accepted destination length in bytes.
pub const MAX_URL_LENGTH: usize = 8192;

/// Reasons a destination URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL is too long ({0} bytes, max {MAX_URL_LENGTH})")]
    TooLong(usize),

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// # Rules
///
/// 1. **Not empty**, at most [`MAX_URL_LENGTH`] bytes
/// 2. **Absolute**: parses without a base URL (`example.com` is rejected)
/// 3. **Protocol**: only `http` and `https`
/// 4. **Host**: must be present and non-empty
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] rule that fails.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_destination("https://example.com/page").is_ok());
/// assert!(validate_destination("not a url").is_err());
/// assert!(validate_destination("google.com").is_err());
/// ```
pub fn validate_destination(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong(input.len()));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
