use crate::context::Context;
use crate::handler::{Attr, HandlerError, LogHandler};
use crate::level::Level;
use crate::record::LogRecord;
use crate::span::FinishGuard;
use serde_json::Value;

/// Name of the correlation group appended to enriched records.
///
/// A record that already carries a top-level field with this name is
/// forwarded untouched, and the active span is left alone.
pub const CORRELATION_GROUP: &str = "dd";

/// Decorator that stamps records with the ids of the active span.
///
/// Wraps exactly one inner [`LogHandler`]. When the per-request context
/// carries an active span, [`handle`](LogHandler::handle) appends a
/// `dd` group holding the span's `trace_id` and `span_id`, delegates,
/// and signals span completion once the delegate returns. Without a
/// span the record passes through untouched. Filtering and derivation
/// semantics are the inner handler's, unchanged.
pub struct TraceHandler {
    inner: Box<dyn LogHandler>,
}

impl TraceHandler {
    pub fn new(inner: Box<dyn LogHandler>) -> Self {
        Self { inner }
    }
}

impl LogHandler for TraceHandler {
    fn enabled(&self, cx: &Context, level: Level) -> bool {
        self.inner.enabled(cx, level)
    }

    fn handle(&self, cx: &Context, record: &mut LogRecord) -> Result<(), HandlerError> {
        let span = match cx.active_span() {
            Some(span) if !record.fields.contains_key(CORRELATION_GROUP) => span,
            // No span, or an outer wrapper already stamped this record.
            _ => return self.inner.handle(cx, record),
        };

        // The guard fires `finish` on every exit path, a delegate
        // error included.
        let _finish = FinishGuard::new(span.as_ref());
        record.add_group(
            CORRELATION_GROUP,
            [
                ("trace_id", Value::from(span.trace_id())),
                ("span_id", Value::from(span.span_id())),
            ],
        );
        self.inner.handle(cx, record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn LogHandler> {
        // Derive the wrapped handler, never self, then re-wrap.
        Box::new(TraceHandler {
            inner: self.inner.with_attrs(attrs),
        })
    }

    fn with_group(&self, name: &str) -> Box<dyn LogHandler> {
        Box::new(TraceHandler {
            inner: self.inner.with_group(name),
        })
    }
}
