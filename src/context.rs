use crate::span::ActiveSpan;
use std::fmt;
use std::sync::Arc;

/// Per-request context threaded explicitly through every handler call.
///
/// Carries at most one active span. The context is the only channel
/// through which handlers learn about the surrounding request; there is
/// no process-wide fallback, so concurrent requests stay isolated.
#[derive(Clone, Default)]
pub struct Context {
    span: Option<Arc<dyn ActiveSpan>>,
}

impl Context {
    /// An empty context with no active span.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context carrying `span` as the active span.
    pub fn with_span(&self, span: Arc<dyn ActiveSpan>) -> Self {
        Self { span: Some(span) }
    }

    /// The active span, if the surrounding request started one.
    pub fn active_span(&self) -> Option<&Arc<dyn ActiveSpan>> {
        self.span.as_ref()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field(
                "span",
                &self.span.as_ref().map(|s| (s.trace_id(), s.span_id())),
            )
            .finish()
    }
}
