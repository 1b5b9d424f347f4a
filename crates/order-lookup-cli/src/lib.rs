//! # Order Lookup CLI
//!
//! Terminal front end for [`order_lookup`]. Every identifier typed on stdin
//! (or passed as an argument) is one trigger of the widget; the terminal is
//! its display surface.

use clap::Parser;
use order_lookup::{
    ConfigError, DisplaySnapshot, DisplaySurface, LookupConfig, LookupOutcome, OrderLookupWidget,
    StatusClass, Transport,
};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Look up orders by order_uid.
#[derive(Debug, Parser)]
#[command(name = "order-lookup", version, about)]
pub struct Cli {
    /// Order endpoint; the identifier is appended as the last path segment
    /// [default: $ORDER_API_URL, or http://localhost:$API_PORT/order/]
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds [default: none]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print every render as a JSON line instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Identifiers to look up in order. Reads stdin line by line when absent.
    pub ids: Vec<String>,
}

impl Cli {
    /// Environment first, then command-line flags on top.
    pub fn config(&self) -> Result<LookupConfig, ConfigError> {
        self.config_over(LookupConfig::from_env()?)
    }

    pub fn config_over(&self, base: LookupConfig) -> Result<LookupConfig, ConfigError> {
        let mut config = match &self.endpoint {
            Some(endpoint) => {
                let mut config = LookupConfig::new(endpoint)?;
                if let Some(timeout) = base.timeout() {
                    config = config.with_timeout(timeout);
                }
                config
            }
            None => base,
        };
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

/// How renders are written to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    JsonLines,
}

/// A display surface that echoes every render to a writer.
///
/// Only the latest render is kept for `snapshot`; everything earlier lives
/// in the terminal's scrollback, not in memory.
pub struct TerminalSurface<W: Write + Send> {
    state: Mutex<TerminalState<W>>,
    format: OutputFormat,
}

struct TerminalState<W> {
    out: W,
    current: DisplaySnapshot,
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                out,
                current: DisplaySnapshot::default(),
            }),
            format,
        }
    }

    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .out
    }

    fn lock(&self) -> MutexGuard<'_, TerminalState<W>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Renders one snapshot the way [`OutputFormat::Text`] prints it.
pub fn format_text(snapshot: &DisplaySnapshot) -> String {
    match snapshot.status {
        StatusClass::None => snapshot.text.clone(),
        StatusClass::Success => format!("[success]\n{}", snapshot.text),
        StatusClass::Error => format!("[error] {}", snapshot.text),
    }
}

impl<W: Write + Send> DisplaySurface for TerminalSurface<W> {
    fn render(&self, text: &str, status: StatusClass) {
        let snapshot = DisplaySnapshot {
            text: text.to_string(),
            status,
        };

        let line = match self.format {
            OutputFormat::Text => format_text(&snapshot),
            OutputFormat::JsonLines => match serde_json::to_string(&snapshot) {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Could not encode render");
                    return;
                }
            },
        };

        let mut state = self.lock();
        state.current = snapshot;
        if let Err(e) = writeln!(state.out, "{line}").and_then(|_| state.out.flush()) {
            warn!(error = %e, "Could not write render");
        }
    }

    fn snapshot(&self) -> DisplaySnapshot {
        self.lock().current.clone()
    }
}

/// Drives the widget from the command line.
///
/// With `ids`, looks each one up in turn and ignores `input`. Otherwise every
/// line of `input` is a trigger: its token is claimed as soon as the line is
/// read and the lookup runs in its own task, so a slow request never holds up
/// the next line. Returns the outcomes in completion order once `input` is
/// exhausted and every lookup has finished.
pub async fn run<T, D, R>(
    widget: Arc<OrderLookupWidget<T, D>>,
    ids: &[String],
    input: R,
) -> Vec<LookupOutcome>
where
    T: Transport + 'static,
    D: DisplaySurface + 'static,
    R: AsyncRead + Unpin,
{
    let mut outcomes = Vec::new();

    if !ids.is_empty() {
        for id in ids {
            outcomes.push(widget.lookup(id).await);
        }
        return outcomes;
    }

    let mut lines = BufReader::new(input).lines();
    let mut pending = JoinSet::new();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let token = widget.trigger();
                let widget = widget.clone();
                pending.spawn(async move { widget.lookup_with(token, &line).await });
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                break;
            }
        }
    }

    while let Some(joined) = pending.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => warn!(error = %e, "Lookup task panicked"),
        }
    }

    debug!(
        lookups = outcomes.len(),
        status = ?widget.display().snapshot().status,
        "Input closed"
    );
    outcomes
}
