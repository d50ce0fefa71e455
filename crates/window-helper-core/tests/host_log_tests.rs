//! Host-log forwarding tests against a real `tracing` subscriber.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use window_helper_core::{HostLogForwarder, HostLogLevel, HostLogSink};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct NullSink;

impl HostLogSink for NullSink {
    fn log(&self, _level: HostLogLevel, _message: &str) {}
    fn log_exception(&self, _message: &str, _stack_trace: &str) {}
}

fn capture(f: impl FnOnce()) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

#[test]
fn test_warning_forwarded_with_stack_trace() {
    let forwarder = HostLogForwarder::new(NullSink);
    let output = capture(|| {
        forwarder.log_format(HostLogLevel::Warning, "low memory", "at Update()");
    });

    assert!(output.contains("WARN"), "output: {output}");
    assert!(output.contains("window_helper_core::host_log"), "output: {output}");
    assert!(output.contains("low memory\nStackTrace:\nat Update()"), "output: {output}");
}

#[test]
fn test_exception_forwarded_as_error() {
    let forwarder = HostLogForwarder::new(NullSink);
    let output = capture(|| forwarder.log_exception("division by zero", "at Tick()"));

    assert!(output.contains("ERROR"), "output: {output}");
    assert!(output.contains("division by zero"), "output: {output}");
}

#[test]
fn test_assert_not_forwarded() {
    let forwarder = HostLogForwarder::new(NullSink);
    let output = capture(|| {
        forwarder.log_format(HostLogLevel::Assert, "assert failed", "at Awake()");
    });

    assert!(!output.contains("assert failed"), "output: {output}");
}
