//! # Mock Transport
//!
//! Utilities for testing the widget without a live order API.
//!
//! [`MockTransport`] answers requests from a queue of expectations. Each
//! expectation names the URL it expects and the canned response to give back;
//! a request consumes the oldest pending expectation for its URL, so lookups
//! running in parallel tasks can reach the mock in any order. After the test,
//! [`MockTransport::verify`] checks that nothing was left unconsumed.
//!
//! # Example
//! ```
//! use order_lookup::mock::MockTransport;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mock = MockTransport::new();
//! mock.expect_get("http://localhost:8081/order/abc")
//!     .return_json(json!({ "order_uid": "abc" }));
//! mock.expect_get("http://localhost:8081/order/missing")
//!     .return_status(404, "not found");
//! // hand `mock.clone()` to a widget, run lookups...
//! # }
//! ```
//!
//! The mock counts how many response bodies were actually read, so tests can
//! assert that a non-2xx body was never parsed.

use crate::error::LookupError;
use crate::transport::{Transport, TransportResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Reply {
    Response { status: u16, body: String },
    Fail(LookupError),
}

struct Expectation {
    url: String,
    delay: Option<Duration>,
    reply: Reply,
}

#[derive(Default)]
struct Shared {
    expectations: Mutex<VecDeque<Expectation>>,
    requests: Mutex<Vec<Url>>,
    bodies_read: AtomicUsize,
}

/// A transport with expectation tracking for fluent testing.
///
/// Clones share the same expectation queue and request log.
#[derive(Clone, Default)]
pub struct MockTransport {
    shared: Arc<Shared>,
}

impl MockTransport {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a GET for `url`. Repeated expectations for one URL answer in order.
    pub fn expect_get(&self, url: &str) -> GetExpectationBuilder {
        GetExpectationBuilder {
            url: url.to_string(),
            delay: None,
            shared: self.shared.clone(),
        }
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<Url> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// Number of response bodies the caller read.
    pub fn bodies_read(&self) -> usize {
        self.shared.bodies_read.load(Ordering::SeqCst)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.shared.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder {
    url: String,
    delay: Option<Duration>,
    shared: Arc<Shared>,
}

impl GetExpectationBuilder {
    /// Holds the reply back for `delay` after the request arrives.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replies 200 with `value` as the body.
    pub fn return_json(self, value: Value) {
        let body = value.to_string();
        self.push(Reply::Response { status: 200, body });
    }

    /// Replies 200 with a raw body, valid JSON or not.
    pub fn return_body(self, body: &str) {
        self.push(Reply::Response {
            status: 200,
            body: body.to_string(),
        });
    }

    /// Replies with an arbitrary status and body.
    pub fn return_status(self, status: u16, body: &str) {
        self.push(Reply::Response {
            status,
            body: body.to_string(),
        });
    }

    /// Fails the request before any response exists.
    pub fn return_err(self, error: LookupError) {
        self.push(Reply::Fail(error));
    }

    fn push(self, reply: Reply) {
        let mut exps = self.shared.expectations.lock().unwrap();
        exps.push_back(Expectation {
            url: self.url,
            delay: self.delay,
            reply,
        });
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: Url) -> Result<Box<dyn TransportResponse>, LookupError> {
        self.shared.requests.lock().unwrap().push(url.clone());

        let expectation = {
            let mut exps = self.shared.expectations.lock().unwrap();
            exps.iter()
                .position(|exp| exp.url == url.as_str())
                .and_then(|index| exps.remove(index))
        };
        let Some(expectation) = expectation else {
            panic!("Unexpected request: GET {url}");
        };

        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }

        match expectation.reply {
            Reply::Response { status, body } => Ok(Box::new(MockResponse {
                status,
                body,
                shared: self.shared.clone(),
            })),
            Reply::Fail(e) => Err(e),
        }
    }
}

struct MockResponse {
    status: u16,
    body: String,
    shared: Arc<Shared>,
}

#[async_trait]
impl TransportResponse for MockResponse {
    fn status(&self) -> u16 {
        self.status
    }

    async fn json(self: Box<Self>) -> Result<Value, LookupError> {
        self.shared.bodies_read.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::from_str(&self.body)?)
    }
}
