//! # HTTP Transport
//!
//! The network half of a lookup, behind a trait so the widget can be driven
//! by [`HttpTransport`] in production and by
//! [`MockTransport`](crate::mock::MockTransport) in tests.
//!
//! A response is handed back *before* its body is read. The widget inspects
//! the status first and only calls [`TransportResponse::json`] on success, so
//! a non-2xx body is never downloaded or parsed.

use crate::config::LookupConfig;
use crate::error::LookupError;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

/// A response whose body has not been read yet.
#[async_trait]
pub trait TransportResponse: Send {
    /// HTTP status code.
    fn status(&self) -> u16;

    /// Reads the body and parses it as JSON, preserving key order.
    async fn json(self: Box<Self>) -> Result<Value, LookupError>;

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }
}

/// Issues a bare GET: no headers, no body, no query.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> Result<Box<dyn TransportResponse>, LookupError>;
}

/// [`Transport`] over a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Builds a client honouring the configured timeout. Without one the
    /// client's own defaults apply.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip_all, fields(url = %url))]
    async fn get(&self, url: Url) -> Result<Box<dyn TransportResponse>, LookupError> {
        let response = self.http.get(url).send().await?;
        debug!(status = response.status().as_u16(), "Response received");
        Ok(Box::new(HttpResponse { inner: response }))
    }
}

struct HttpResponse {
    inner: reqwest::Response,
}

#[async_trait]
impl TransportResponse for HttpResponse {
    fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    async fn json(self: Box<Self>) -> Result<Value, LookupError> {
        let body = self.inner.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
