//! Window Helper: reposition, resize and restyle the window hosting a running
//! application, then put it back.
//!
//! - [`window::WindowStateManager`]: fluent target state, apply with one
//!   delayed re-apply, restore on exit in development hosts
//! - [`window::WindowControl`]: the native-call port, with a Win32 backend
//!   and an in-memory [`window::HeadlessWindow`]
//! - [`config::WindowHelperConfig`]: re-apply delay, host kind, restore policy
//!
//! Scheduling and host-log forwarding live in `window_helper_core` and are
//! re-exported here.

pub mod config;
pub mod error;
pub mod window;

pub use config::{HostEnvironment, RestorePolicy, WindowHelperConfig};
pub use error::{ConfigError, Result, WindowError};
pub use window::{WindowControl, WindowState, WindowStateManager};

pub use window_helper_core::{
    HostLogForwarder, HostLogLevel, HostLogSink, ScheduledTaskId, SharedTaskScheduler,
};
