use crate::context::Context;
use crate::handler::{Attr, HandlerError, LogHandler};
use crate::level::Level;
use crate::record::LogRecord;
use serde_json::Value;
use std::panic::Location;
use std::sync::Arc;

/// Cheap-to-clone logging facade over a [`LogHandler`].
///
/// Checks `enabled` before building a record, stamps the call site
/// onto it, and surfaces the handler's error to the caller.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn LogHandler>,
}

impl Logger {
    pub fn new(handler: impl LogHandler + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Wrap an already-shared handler.
    pub fn from_handler(handler: Arc<dyn LogHandler>) -> Self {
        Self { handler }
    }

    /// Whether a record at `level` would be processed.
    pub fn enabled(&self, cx: &Context, level: Level) -> bool {
        self.handler.enabled(cx, level)
    }

    /// Log `message` at `level` with extra structured fields.
    #[track_caller]
    pub fn log_with<K>(
        &self,
        cx: &Context,
        level: Level,
        message: &str,
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<(), HandlerError>
    where
        K: Into<String>,
    {
        if !self.handler.enabled(cx, level) {
            return Ok(());
        }
        let location = Location::caller();
        let mut record = LogRecord::new(level, message);
        record.file = Some(location.file());
        record.line = Some(location.line());
        for (key, value) in fields {
            record.add_field(key, value);
        }
        self.handler.handle(cx, &mut record)
    }

    #[track_caller]
    pub fn log(&self, cx: &Context, level: Level, message: &str) -> Result<(), HandlerError> {
        self.log_with(cx, level, message, std::iter::empty::<(String, Value)>())
    }

    #[track_caller]
    pub fn trace(&self, cx: &Context, message: &str) -> Result<(), HandlerError> {
        self.log(cx, Level::Trace, message)
    }

    #[track_caller]
    pub fn debug(&self, cx: &Context, message: &str) -> Result<(), HandlerError> {
        self.log(cx, Level::Debug, message)
    }

    #[track_caller]
    pub fn info(&self, cx: &Context, message: &str) -> Result<(), HandlerError> {
        self.log(cx, Level::Info, message)
    }

    #[track_caller]
    pub fn warn(&self, cx: &Context, message: &str) -> Result<(), HandlerError> {
        self.log(cx, Level::Warn, message)
    }

    #[track_caller]
    pub fn error(&self, cx: &Context, message: &str) -> Result<(), HandlerError> {
        self.log(cx, Level::Error, message)
    }

    /// Derive a logger whose handler attaches `attrs` to every record.
    ///
    /// Derivation goes through the handler's own `with_attrs`, so a
    /// decorating handler stays in place on the derived logger.
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Logger {
        Logger {
            handler: Arc::from(self.handler.with_attrs(attrs)),
        }
    }

    /// Derive a logger whose handler nests subsequent fields under
    /// `name`.
    pub fn with_group(&self, name: &str) -> Logger {
        Logger {
            handler: Arc::from(self.handler.with_group(name)),
        }
    }
}
