//! Error types for window control and configuration.

use std::path::PathBuf;

use crate::window::WindowHandle;

/// Result type alias for window control operations.
pub type Result<T> = std::result::Result<T, WindowError>;

/// Errors reported by a [`WindowControl`](crate::window::WindowControl) backend.
///
/// The window state manager never escalates these: a windowing glitch is
/// logged and the operation degrades.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// No active window could be resolved.
    #[error("Failed to get window handle: no active window")]
    NoActiveWindow,

    /// The handle no longer refers to a live window.
    #[error("Invalid window handle {0}")]
    InvalidHandle(WindowHandle),

    /// The placement query reported failure.
    #[error("Failed to get window placement for {window}: {reason}")]
    PlacementQuery { window: WindowHandle, reason: String },

    /// The combined position/size/z-order call reported failure.
    #[error("Failed to set window position for {window}: {reason}")]
    SetPosition { window: WindowHandle, reason: String },

    /// The handle or operation is not supported by this backend.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl WindowError {
    /// Create a placement query error.
    pub fn placement_query(window: WindowHandle, reason: impl Into<String>) -> Self {
        Self::PlacementQuery {
            window,
            reason: reason.into(),
        }
    }

    /// Create a set-position error.
    pub fn set_position(window: WindowHandle, reason: impl Into<String>) -> Self {
        Self::SetPosition {
            window,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
