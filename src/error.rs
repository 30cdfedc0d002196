//! Engine error type.
//!
//! Every variant here is a caller-side mistake (broken gesture ordering or a
//! bad configuration value). Degenerate geometry and out-of-range zoom steps
//! are not errors; they are skipped where they happen.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by engine and configuration operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InkError {
    /// A pen gesture was started while another one is still open.
    #[error("a gesture is already in progress")]
    GestureInProgress,

    /// `extend`/`finish` was called with no open gesture.
    #[error("no gesture in progress")]
    NoActiveGesture,

    /// The handle does not belong to the open gesture.
    #[error("stale gesture handle {got} (active is {expected})")]
    StaleHandle { expected: u64, got: u64 },

    /// A selection transform was requested with no selection group.
    #[error("no selection group")]
    NoSelection,

    /// A configuration value could not be parsed or is out of range.
    #[error("config parse failed: {0}")]
    ConfigParse(String),
}

impl InkError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::GestureInProgress => "E_GESTURE_IN_PROGRESS",
            Self::NoActiveGesture => "E_NO_ACTIVE_GESTURE",
            Self::StaleHandle { .. } => "E_STALE_HANDLE",
            Self::NoSelection => "E_NO_SELECTION",
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
        }
    }
}
