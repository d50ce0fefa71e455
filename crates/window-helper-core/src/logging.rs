//! Logging facilities for Window Helper.
//!
//! Window Helper uses the `tracing` crate for instrumentation. The libraries
//! never install a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("window_helper=debug,window_helper_core=info")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Scheduler target.
    pub const SCHEDULER: &str = "window_helper_core::scheduler";
    /// Host-log forwarding target.
    pub const HOST_LOG: &str = "window_helper_core::host_log";
    /// Window state manager target.
    pub const MANAGER: &str = "window_helper::manager";
    /// Native Win32 backend target.
    pub const WIN32: &str = "window_helper::win32";
    /// Headless window backend target.
    pub const HEADLESS: &str = "window_helper::headless";
    /// Configuration loading target.
    pub const CONFIG: &str = "window_helper::config";
}
