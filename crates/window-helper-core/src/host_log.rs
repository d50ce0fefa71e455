//! Forwarding of host engine log records into `tracing`.
//!
//! A game host usually owns its own log handler (console, editor panel). The
//! forwarder sits in front of it: every record is first emitted as a
//! `tracing` event under [`targets::HOST_LOG`] so a file-backed subscriber
//! can persist it, then handed unchanged to the host's default handler.
//!
//! Forwarding never fails and never swallows a record: if no subscriber is
//! installed the `tracing` event is simply dropped and the host handler
//! still runs.

use tracing::Level;

use crate::logging::targets;

/// Severity of a host log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostLogLevel {
    /// Informational message.
    Log,
    /// Warning.
    Warning,
    /// Error.
    Error,
    /// Exception reported through the formatted log path.
    Exception,
    /// Failed assertion.
    Assert,
}

impl HostLogLevel {
    /// The `tracing` level a record of this severity is forwarded at.
    ///
    /// Assertions are not forwarded; they only reach the host handler.
    pub fn forward_level(self) -> Option<Level> {
        match self {
            Self::Error | Self::Exception => Some(Level::ERROR),
            Self::Warning => Some(Level::WARN),
            Self::Log => Some(Level::INFO),
            Self::Assert => None,
        }
    }
}

/// The host's default log handler.
pub trait HostLogSink: Send + Sync {
    /// Handle a formatted log record.
    fn log(&self, level: HostLogLevel, message: &str);

    /// Handle an exception record.
    fn log_exception(&self, message: &str, stack_trace: &str);
}

/// Join a message and its stack trace the way forwarded records are written.
pub fn format_with_stack_trace(message: &str, stack_trace: &str) -> String {
    format!("{message}\nStackTrace:\n{stack_trace}")
}

/// Forwards host log records to `tracing`, then to the host's handler.
pub struct HostLogForwarder<S> {
    fallback: S,
}

impl<S: HostLogSink> HostLogForwarder<S> {
    /// Wrap the host's default handler.
    pub fn new(fallback: S) -> Self {
        Self { fallback }
    }

    /// The wrapped host handler.
    pub fn fallback(&self) -> &S {
        &self.fallback
    }

    /// Forward a formatted record.
    pub fn log_format(&self, level: HostLogLevel, message: &str, stack_trace: &str) {
        if let Some(forward) = level.forward_level() {
            let full = format_with_stack_trace(message, stack_trace);
            emit(forward, &full);
        }

        self.fallback.log(level, message);
    }

    /// Forward an exception record.
    pub fn log_exception(&self, message: &str, stack_trace: &str) {
        emit(Level::ERROR, &format_with_stack_trace(message, stack_trace));
        self.fallback.log_exception(message, stack_trace);
    }
}

fn emit(level: Level, full: &str) {
    match level {
        Level::ERROR => tracing::error!(target: targets::HOST_LOG, "{full}"),
        Level::WARN => tracing::warn!(target: targets::HOST_LOG, "{full}"),
        Level::INFO => tracing::info!(target: targets::HOST_LOG, "{full}"),
        Level::DEBUG => tracing::debug!(target: targets::HOST_LOG, "{full}"),
        _ => tracing::trace!(target: targets::HOST_LOG, "{full}"),
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<(HostLogLevel, String)>>,
        exceptions: Mutex<Vec<(String, String)>>,
    }

    impl HostLogSink for RecordingSink {
        fn log(&self, level: HostLogLevel, message: &str) {
            self.records.lock().push((level, message.to_string()));
        }

        fn log_exception(&self, message: &str, stack_trace: &str) {
            self.exceptions
                .lock()
                .push((message.to_string(), stack_trace.to_string()));
        }
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(HostLogLevel::Log.forward_level(), Some(Level::INFO));
        assert_eq!(HostLogLevel::Warning.forward_level(), Some(Level::WARN));
        assert_eq!(HostLogLevel::Error.forward_level(), Some(Level::ERROR));
        assert_eq!(HostLogLevel::Exception.forward_level(), Some(Level::ERROR));
        assert_eq!(HostLogLevel::Assert.forward_level(), None);
    }

    #[test]
    fn test_format_with_stack_trace() {
        assert_eq!(
            format_with_stack_trace("boom", "at Main()"),
            "boom\nStackTrace:\nat Main()"
        );
    }

    #[test]
    fn test_every_record_reaches_fallback() {
        let forwarder = HostLogForwarder::new(RecordingSink::default());

        forwarder.log_format(HostLogLevel::Log, "hello", "trace");
        forwarder.log_format(HostLogLevel::Assert, "assert failed", "trace");

        let records = forwarder.fallback().records.lock();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], (HostLogLevel::Log, "hello".to_string()));
        assert_eq!(records[1].0, HostLogLevel::Assert);
    }

    #[test]
    fn test_exception_reaches_fallback() {
        let forwarder = HostLogForwarder::new(RecordingSink::default());
        forwarder.log_exception("null reference", "at Update()");

        let exceptions = forwarder.fallback().exceptions.lock();
        assert_eq!(
            *exceptions,
            vec![("null reference".to_string(), "at Update()".to_string())]
        );
    }
}
