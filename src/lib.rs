//! Structured logging with trace correlation.
//!
//! A [`Logger`] writes [`LogRecord`]s through a chain of
//! [`LogHandler`]s. Wrapping any sink adapter in a [`TraceHandler`]
//! stamps every record emitted under an active request span with the
//! span's trace and span ids, so logs and traces can be joined in the
//! observability backend.

pub mod context;
pub mod env;
pub mod handler;
pub mod json;
pub mod level;
pub mod logger;
pub mod record;
pub mod span;
pub mod text;
pub mod trace_handler;

#[cfg(test)]
mod testutil;

pub use context::Context;
pub use handler::{Attr, HandlerError, LogHandler};
pub use json::{JsonHandler, JsonHandlerOptions};
pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use record::LogRecord;
pub use span::{ActiveSpan, FinishGuard, Span};
pub use text::TextHandler;
pub use trace_handler::{TraceHandler, CORRELATION_GROUP};
