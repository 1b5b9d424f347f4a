//! # Display Surface
//!
//! The single region a widget writes all of its feedback to: the loading
//! indicator, the formatted order, or an error message. Each render replaces
//! the previous content.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Presentation class of the current content. Used for styling only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    #[default]
    None,
    Success,
    Error,
}

/// What a surface is currently showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplaySnapshot {
    pub text: String,
    pub status: StatusClass,
}

/// A place the widget can write to.
///
/// Implementations must be cheap to call from any task. The widget renders
/// while holding its sequence lock, so `render` must not call back into the
/// widget.
pub trait DisplaySurface: Send + Sync {
    /// Replaces the current content.
    fn render(&self, text: &str, status: StatusClass);

    /// Returns the current content.
    fn snapshot(&self) -> DisplaySnapshot;
}

#[derive(Debug, Default)]
struct SurfaceState {
    current: DisplaySnapshot,
    history: Vec<DisplaySnapshot>,
}

/// In-memory surface that remembers every render.
///
/// Cloning shares the underlying state, so a test can hand one clone to the
/// widget and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All renders so far, oldest first.
    pub fn history(&self) -> Vec<DisplaySnapshot> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        // A panic while rendering cannot leave the state half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DisplaySurface for MemorySurface {
    fn render(&self, text: &str, status: StatusClass) {
        let snapshot = DisplaySnapshot {
            text: text.to_string(),
            status,
        };
        let mut state = self.lock();
        state.history.push(snapshot.clone());
        state.current = snapshot;
    }

    fn snapshot(&self) -> DisplaySnapshot {
        self.lock().current.clone()
    }
}
