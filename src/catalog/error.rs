//! Shared error type for catalog requests.

use thiserror::Error;

/// A GET against the catalog site that did not produce a usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body from {url}: {source}")]
    BodyRead { url: String, source: reqwest::Error },
}

impl FetchError {
    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::BodyRead { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_message_names_status_and_url() {
        let e = FetchError::HttpStatus {
            status: 404,
            url: "https://codernet.ru/media/x/".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "HTTP 404 when fetching: https://codernet.ru/media/x/"
        );
        assert_eq!(e.url(), "https://codernet.ru/media/x/");
    }
}
