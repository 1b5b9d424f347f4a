//! # Order Lookup Widget
//!
//! Turns one trigger (a raw identifier) into exactly one rendered result.
//!
//! ## Flow
//!
//! ```text
//! idle -> loading -> { success | not found | error }
//! ```
//!
//! 1. The input is trimmed. Empty input renders a validation message and stops.
//! 2. The loading indicator is rendered.
//! 3. `GET {endpoint}{id}` is issued, the identifier percent-encoded as one path segment.
//! 4. A non-2xx status renders "Order not found" without reading the body.
//! 5. A 2xx body is parsed as JSON and rendered pretty-printed.
//! 6. Any transport or parse failure renders "Request failed: ..." instead.
//!
//! ## Overlapping Lookups
//!
//! Every call takes a sequence token. A render (loading indicator or final
//! result) happens only if no newer lookup has been triggered since; the
//! token check and the write are done under one lock. A dropped final result
//! makes the call return [`LookupOutcome::Superseded`]. The display therefore
//! always ends up showing the most recently *triggered* lookup, whatever order
//! the responses arrive in and however the tasks are scheduled.

use crate::config::LookupConfig;
use crate::display::{DisplaySurface, StatusClass};
use crate::error::LookupError;
use crate::transport::Transport;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const LOADING_TEXT: &str = "Loading...";

/// What a single [`OrderLookupWidget::lookup`] call did to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The final result was rendered with this status.
    Rendered(StatusClass),
    /// A newer lookup was triggered first; nothing final was rendered.
    Superseded,
}

/// Sequence token of one trigger. Newer triggers carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LookupToken(u64);

/// Looks up orders by identifier and renders the result.
///
/// Both the transport and the display are injected, so the widget can be
/// shared behind an `Arc` and triggered from many tasks at once.
pub struct OrderLookupWidget<T: Transport, D: DisplaySurface> {
    config: LookupConfig,
    transport: T,
    display: D,
    // Held across the token comparison *and* the render, so a stale lookup
    // can never write after a newer one.
    latest: Mutex<u64>,
}

impl<T: Transport, D: DisplaySurface> OrderLookupWidget<T, D> {
    pub fn new(config: LookupConfig, transport: T, display: D) -> Self {
        Self {
            config,
            transport,
            display,
            latest: Mutex::new(0),
        }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Claims the next sequence token.
    ///
    /// Call this at trigger time when the lookup itself runs later (for
    /// example in a spawned task), so trigger order decides which result wins.
    pub fn trigger(&self) -> LookupToken {
        let mut latest = self.lock_latest();
        *latest += 1;
        LookupToken(*latest)
    }

    /// Runs one lookup for `raw_input`. Never fails: every error ends up on the display.
    pub async fn lookup(&self, raw_input: &str) -> LookupOutcome {
        let token = self.trigger();
        self.lookup_with(token, raw_input).await
    }

    /// Runs a lookup for a token obtained earlier from [`trigger`](Self::trigger).
    #[instrument(skip(self, token), fields(seq = token.0))]
    pub async fn lookup_with(&self, token: LookupToken, raw_input: &str) -> LookupOutcome {
        let order_uid = raw_input.trim();
        if order_uid.is_empty() {
            debug!("Empty input");
            return self.finish(token, Err(LookupError::EmptyInput));
        }

        self.render_if_current(token, LOADING_TEXT, StatusClass::None);

        let result = self.fetch(order_uid).await;
        self.finish(token, result)
    }

    /// Request plus formatting. Any error here lands on the display.
    async fn fetch(&self, order_uid: &str) -> Result<String, LookupError> {
        let url = self.order_url(order_uid);
        debug!(%url, "Sending request");

        let response = self.transport.get(url).await?;
        if !response.is_success() {
            return Err(LookupError::NotFound {
                status: response.status(),
            });
        }

        let document: Value = response.json().await?;
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// `{endpoint}{order_uid}` with the identifier encoded as one path segment.
    pub fn order_url(&self, order_uid: &str) -> Url {
        let mut url = self.config.endpoint().clone();
        // LookupConfig only ever holds hierarchical http(s) URLs.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(order_uid);
        }
        url
    }

    fn lock_latest(&self) -> MutexGuard<'_, u64> {
        self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Renders only if `token` is still the newest trigger. The check and the
    /// write happen under one lock.
    fn render_if_current(&self, token: LookupToken, text: &str, status: StatusClass) -> bool {
        let latest = self.lock_latest();
        if *latest != token.0 {
            debug!(latest = *latest, "Superseded by a newer lookup");
            return false;
        }
        self.display.render(text, status);
        true
    }

    fn finish(&self, token: LookupToken, result: Result<String, LookupError>) -> LookupOutcome {
        let rendered = match &result {
            Ok(pretty) => self.render_if_current(token, pretty, StatusClass::Success),
            Err(e) => self.render_if_current(token, &e.to_string(), StatusClass::Error),
        };
        if !rendered {
            return LookupOutcome::Superseded;
        }

        match result {
            Ok(_) => {
                info!("Order found");
                LookupOutcome::Rendered(StatusClass::Success)
            }
            Err(e) => {
                match &e {
                    LookupError::EmptyInput => info!("Rejected empty input"),
                    LookupError::NotFound { .. } => warn!(status = e.status(), "Order not found"),
                    LookupError::Transport(detail) => warn!(error = %detail, "Request failed"),
                }
                LookupOutcome::Rendered(StatusClass::Error)
            }
        }
    }
}
