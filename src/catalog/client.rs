//! Blocking HTTP client for the catalog site. One GET per call; no delay, no retries.

use std::time::Duration;

use crate::catalog::error::FetchError;

/// Source of page and document bytes. The orchestrator only needs this seam, so tests
/// can swap the network for an in-memory fake.
pub trait Fetch {
    /// GET `url` and return the full body. Non-success status is an error.
    fn get_bytes(&mut self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking reqwest client. Sends no custom headers unless a User-Agent is configured.
#[derive(Debug)]
pub struct CatalogClient {
    inner: reqwest::blocking::Client,
}

impl CatalogClient {
    /// Build a client with reqwest defaults.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::builder().build()
    }

    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::default()
    }
}

impl Fetch for CatalogClient {
    fn get_bytes(&mut self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .inner
            .get(url)
            .send()
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                source: e,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().map_err(|e| FetchError::BodyRead {
            url: url.to_string(),
            source: e,
        })?;
        Ok(body.to_vec())
    }
}

/// Builder for CatalogClient with optional User-Agent and timeout.
#[derive(Debug, Default)]
pub struct CatalogClientBuilder {
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
}

impl CatalogClientBuilder {
    /// Set a User-Agent header. If not set, none is sent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the request timeout. If not set, the reqwest default applies.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn build(self) -> Result<CatalogClient, reqwest::Error> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(ua) = self.user_agent {
            builder = builder.user_agent(ua);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(CatalogClient {
            inner: builder.build()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_bytes_returns_body_on_success() -> Result<(), FetchError> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/media/")
            .with_status(200)
            .with_body("<a href=\"x/\">x</a>")
            .create();
        let mut client = CatalogClient::new().expect("client");
        let body = client.get_bytes(&format!("{}/media/", server.url()))?;
        assert_eq!(body, b"<a href=\"x/\">x</a>");
        mock.assert();
        Ok(())
    }

    #[test]
    fn get_bytes_maps_non_success_status() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/missing").with_status(404).create();
        let mut client = CatalogClient::new().expect("client");
        let url = format!("{}/missing", server.url());
        match client.get_bytes(&url) {
            Err(FetchError::HttpStatus { status: 404, url: u }) => assert_eq!(u, url),
            other => panic!("expected HttpStatus 404, got {:?}", other),
        }
    }

    #[test]
    fn get_bytes_maps_connection_failure_to_network() {
        let mut client = CatalogClient::builder()
            .timeout_secs(5)
            .build()
            .expect("client");
        let result = client.get_bytes("http://127.0.0.1:1/");
        assert!(matches!(result, Err(FetchError::Network { .. })));
    }

    #[test]
    fn configured_user_agent_is_sent() -> Result<(), FetchError> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/ua")
            .match_header("user-agent", "mirror-test/1.0")
            .with_status(200)
            .with_body("ok")
            .create();
        let mut client = CatalogClient::builder()
            .user_agent("mirror-test/1.0")
            .build()
            .expect("client");
        client.get_bytes(&format!("{}/ua", server.url()))?;
        mock.assert();
        Ok(())
    }
}
