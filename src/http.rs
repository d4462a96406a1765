use std::time::Duration;

use reqwest::blocking;
use reqwest::header::CONTENT_TYPE;

use crate::credentials::Credentials;
use crate::error::Error;
use crate::Result;

/// Bound on a whole call, from connect to the last response byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers one encoded request and hands back the raw response body.
pub trait Transport: Send + Sync {
    fn send(&self, credentials: &Credentials, body: Vec<u8>) -> Result<Vec<u8>>;
}

/// Blocking HTTP POST with Basic authentication.
///
/// Status codes are not interpreted: nodes put JSON error envelopes in
/// non-2xx bodies, so every body goes to the codec. Must not be driven from
/// inside an async runtime.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = blocking::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::transport(&e))?;
        tracing::debug!("http transport ready, timeout {timeout:?}");
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn send(&self, credentials: &Credentials, body: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .http
            .post(credentials.url())
            .header(CONTENT_TYPE, "application/json")
            .basic_auth(&credentials.identity, Some(&credentials.secret))
            .body(body)
            .send()
            .map_err(|e| Error::transport(&e))?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("node answered with status {status}");
        }
        let bytes = response.bytes().map_err(|e| Error::transport(&e))?;
        Ok(bytes.to_vec())
    }
}
