//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the binary that embeds
//! the widget. Library code only emits events; it never installs a subscriber.
//!
//! ## What Gets Traced
//!
//! Every [`lookup`](crate::widget::OrderLookupWidget::lookup) runs inside a span
//! carrying the raw input and its sequence token:
//!
//! ```text
//! DEBUG lookup{raw_input="abc" seq=1}: Sending request url=http://localhost:8081/order/abc
//! DEBUG lookup{raw_input="abc" seq=1}:get{url=http://localhost:8081/order/abc}: Response received status=200
//!  INFO lookup{raw_input="abc" seq=1}: Order found
//!  WARN lookup{raw_input="nope" seq=2}: Order not found status=404
//! DEBUG lookup{raw_input="old" seq=3}: Superseded by a newer lookup latest=4
//! ```
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info order-lookup abc          # outcomes only
//! RUST_LOG=debug order-lookup abc         # requests, statuses, superseded lookups
//! RUST_LOG=order_lookup=debug order-lookup
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Logs go to stderr so they never interleave with what the display surface
/// prints on stdout.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
