use crate::context::Context;
use crate::level::Level;
use crate::record::LogRecord;
use serde_json::Value;

/// A key/value attribute attached to a derived handler.
pub type Attr = (String, Value);

/// Error surfaced by [`LogHandler::handle`].
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("failed to write log record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),

    /// Catch-all for handlers backed by sinks with their own error
    /// vocabulary.
    #[error("{0}")]
    Sink(String),
}

/// Destination for [`LogRecord`]s — the capability every sink adapter
/// and every decorating handler implements.
///
/// Implementations must be safe for unsynchronized concurrent use:
/// `handle` is called from many request threads at once with no
/// ordering between calls. A handler over a non-thread-safe sink must
/// bring its own synchronization (see the shared writer mutex in
/// [`JsonHandler`](crate::json::JsonHandler)); decorators inherit the
/// guarantee transitively from the handler they wrap.
pub trait LogHandler: Send + Sync {
    /// Report whether a record at `level` would be processed.
    ///
    /// **Parameters**
    /// - `cx`: per-request context of the prospective log call.
    /// - `level`: severity the caller is about to log at.
    ///
    /// **Returns**
    /// - `true` if [`handle`](Self::handle) should be called.
    ///
    /// Callers are expected to gate record construction on this;
    /// `handle` itself does not re-check.
    fn enabled(&self, cx: &Context, level: Level) -> bool;

    /// Process one record.
    ///
    /// **Parameters**
    /// - `cx`: per-request context; carries the active span, if any.
    /// - `record`: the record to emit. Handlers may append fields
    ///   before forwarding or encoding it.
    ///
    /// **Returns**
    /// - `Ok(())` once the record reached the underlying sink.
    /// - `Err(..)` if the sink failed. Errors propagate unchanged to
    ///   the log call site; no handler retries or logs about logging.
    fn handle(&self, cx: &Context, record: &mut LogRecord) -> Result<(), HandlerError>;

    /// Derive a handler that attaches `attrs` to every record it
    /// processes. The receiver is left untouched.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn LogHandler>;

    /// Derive a handler that nests subsequent attributes and record
    /// fields under a group named `name`. The receiver is left
    /// untouched.
    fn with_group(&self, name: &str) -> Box<dyn LogHandler>;
}
