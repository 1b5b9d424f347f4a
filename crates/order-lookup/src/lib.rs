//! # Order Lookup
//!
//! > **Type an order id, see the order.**
//!
//! This crate provides the widget behind an order lookup form: it takes an
//! identifier, asks the order API for it, and renders the JSON document (or an
//! error message) onto a display surface.
//!
//! ## Architecture Overview
//!
//! The widget owns no I/O of its own. Everything it touches is injected:
//!
//! 1. **Configuration** ([`LookupConfig`]) - endpoint and timeout, defaulting to
//!    `http://localhost:8081/order/`
//! 2. **Network** ([`Transport`]) - a bare HTTP GET, [`HttpTransport`] in production
//! 3. **Output** ([`DisplaySurface`]) - one text region plus a [`StatusClass`]
//!
//! This keeps the widget testable without a network or a terminal: swap in
//! [`MockTransport`](mock::MockTransport) and [`MemorySurface`].
//!
//! ## Example
//!
//! ```no_run
//! use order_lookup::{HttpTransport, LookupConfig, MemorySurface, OrderLookupWidget};
//! use order_lookup::DisplaySurface;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LookupConfig::default();
//! let transport = HttpTransport::new(&config)?;
//! let surface = MemorySurface::new();
//! let widget = OrderLookupWidget::new(config, transport, surface.clone());
//!
//! widget.lookup("b563feb7b2b84b6test").await;
//! println!("{}", surface.snapshot().text);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! A lookup never returns an error. Empty input, a non-2xx response and any
//! transport or parse failure each end as a message on the display, with
//! [`StatusClass::Error`]. See [`LookupError`] for the exact texts.
//!
//! ## Concurrency Model
//!
//! Lookups may overlap. Each one takes a sequence token when triggered, and a
//! result whose token is no longer the latest is dropped instead of rendered.
//! There is no cancellation, no retry and no default timeout.
//!
//! ## Testing
//!
//! See the [`mock`] module for the expectation-based transport used by the
//! unit tests, and `tests/` for runs against a real local HTTP server.

pub mod config;
pub mod display;
pub mod error;
pub mod mock;
pub mod tracing;
pub mod transport;
pub mod widget;

// Re-export core types for convenience
pub use config::LookupConfig;
pub use display::{DisplaySnapshot, DisplaySurface, MemorySurface, StatusClass};
pub use error::{ConfigError, LookupError};
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use widget::{LookupOutcome, LookupToken, OrderLookupWidget, LOADING_TEXT};
