//! Core systems for Window Helper.
//!
//! This crate holds the pieces of the window helper that do not touch a
//! native window:
//!
//! - **Scheduler**: cooperative one-shot tasks pumped from the host's update loop
//! - **Logging**: target names for `tracing` filtering and the host-log forwarder
//!
//! # Host Log Forwarding
//!
//! ```
//! use window_helper_core::{HostLogForwarder, HostLogLevel, HostLogSink};
//!
//! struct Console;
//!
//! impl HostLogSink for Console {
//!     fn log(&self, level: HostLogLevel, message: &str) {
//!         println!("[{level:?}] {message}");
//!     }
//!
//!     fn log_exception(&self, message: &str, _stack_trace: &str) {
//!         println!("[Exception] {message}");
//!     }
//! }
//!
//! let forwarder = HostLogForwarder::new(Console);
//! forwarder.log_format(HostLogLevel::Warning, "low memory", "at Update()");
//! ```

mod error;
pub mod host_log;
pub mod logging;
mod scheduler;

pub use error::{CoreError, Result, SchedulerError};
pub use host_log::{HostLogForwarder, HostLogLevel, HostLogSink};
pub use scheduler::{ScheduledTaskId, SharedTaskScheduler, TaskScheduler};
