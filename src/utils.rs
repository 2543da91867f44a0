//! Utility functions and helpers

use crate::error::{HttpError, Result};
use url::Url;

/// URL validation and parsing utilities
pub struct UrlUtils;

impl UrlUtils {
    /// Validate and normalize URL
    pub fn validate_url(input: &str) -> Result<Url> {
        let input = input.trim();
        // Add http:// if no scheme is provided
        let url_str = if input.contains("://") {
            input.to_string()
        } else {
            format!("http://{}", input)
        };

        Url::parse(&url_str)
            .map_err(|e| HttpError::InvalidUrl(format!("Invalid URL '{}': {}", input, e)))
    }

    /// Whether the URL uses an encrypted scheme
    pub fn is_secure(url: &Url) -> bool {
        url.scheme() == "https"
    }
}

/// String utilities
pub struct StringUtils;

impl StringUtils {
    /// True for empty or whitespace-only input
    pub fn is_blank(input: &str) -> bool {
        input.trim().is_empty()
    }
}
