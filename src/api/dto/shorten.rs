//! DTOs for link creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// `url` is optional at the serde level so a missing field is reported as a
/// validation error rather than a deserialization rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(required(message = "Field 'url' is required"))]
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,
}

/// Response for a newly created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
}
