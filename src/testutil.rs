//! Shared fixtures for the unit tests.

use crate::context::Context;
use crate::handler::{Attr, HandlerError, LogHandler};
use crate::level::Level;
use crate::record::LogRecord;
use crate::span::ActiveSpan;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One delegated `handle` call as seen by a [`CapturingHandler`].
#[derive(Clone)]
pub struct CapturedCall {
    pub attrs: Vec<Attr>,
    pub groups: Vec<String>,
    pub record: LogRecord,
}

/// Innermost handler that records everything delegated to it.
///
/// Clones share the captured calls, so tests can hold one clone and
/// hand another to the handler chain under test.
#[derive(Clone)]
pub struct CapturingHandler {
    calls: Arc<Mutex<Vec<CapturedCall>>>,
    pub enabled_calls: Arc<AtomicUsize>,
    enabled_response: bool,
    fail_with: Option<String>,
    attrs: Vec<Attr>,
    groups: Vec<String>,
}

impl Default for CapturingHandler {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            enabled_calls: Arc::default(),
            enabled_response: true,
            fail_with: None,
            attrs: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl CapturingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled_response: enabled,
            ..Self::default()
        }
    }

    /// A handler whose `handle` always fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().clone()
    }
}

impl LogHandler for CapturingHandler {
    fn enabled(&self, _cx: &Context, _level: Level) -> bool {
        self.enabled_calls.fetch_add(1, Ordering::SeqCst);
        self.enabled_response
    }

    fn handle(&self, _cx: &Context, record: &mut LogRecord) -> Result<(), HandlerError> {
        self.calls.lock().push(CapturedCall {
            attrs: self.attrs.clone(),
            groups: self.groups.clone(),
            record: record.clone(),
        });
        match &self.fail_with {
            Some(message) => Err(HandlerError::Sink(message.clone())),
            None => Ok(()),
        }
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn LogHandler> {
        let mut derived = self.clone();
        derived.attrs.extend(attrs);
        Box::new(derived)
    }

    fn with_group(&self, name: &str) -> Box<dyn LogHandler> {
        let mut derived = self.clone();
        derived.groups.push(name.to_string());
        Box::new(derived)
    }
}

/// Span that counts `finish` calls instead of tracking state.
pub struct RecordingSpan {
    trace_id: u64,
    span_id: u64,
    finish_calls: AtomicUsize,
}

impl RecordingSpan {
    pub fn new(trace_id: u64, span_id: u64) -> Arc<Self> {
        Arc::new(Self {
            trace_id,
            span_id,
            finish_calls: AtomicUsize::new(0),
        })
    }

    pub fn finish_count(&self) -> usize {
        self.finish_calls.load(Ordering::SeqCst)
    }
}

impl ActiveSpan for RecordingSpan {
    fn trace_id(&self) -> u64 {
        self.trace_id
    }

    fn span_id(&self) -> u64 {
        self.span_id
    }

    fn finish(&self) {
        self.finish_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Cloneable in-memory writer for sink adapter tests.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("utf8 log output")
    }

    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.contents()
            .lines()
            .map(|line| serde_json::from_str(line).expect("json log line"))
            .collect()
    }
}

impl std::io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
