use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Read-only handle to the active span of the surrounding request.
///
/// Implementations belong to the tracing side; log handlers only read
/// the two correlation ids and signal completion. `finish` is not
/// required to be idempotent, so callers must invoke it exactly once.
pub trait ActiveSpan: Send + Sync {
    /// Identifier shared by every span of one logical request.
    fn trace_id(&self) -> u64;

    /// Identifier of this span within its trace.
    fn span_id(&self) -> u64;

    /// Signal that the work covered by this span is complete.
    fn finish(&self);
}

/// Calls [`ActiveSpan::finish`] when dropped.
///
/// Tying one guard to one acquired span reference makes the completion
/// signal fire on every exit path, early returns and errors included.
pub struct FinishGuard<'a> {
    span: &'a dyn ActiveSpan,
}

impl<'a> FinishGuard<'a> {
    pub fn new(span: &'a dyn ActiveSpan) -> Self {
        Self { span }
    }
}

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        self.span.finish();
    }
}

/// In-process span used by request glue and the demos.
pub struct Span {
    name: String,
    trace_id: u64,
    span_id: u64,
    started_at: DateTime<Utc>,
    finished: AtomicBool,
}

impl Span {
    /// Start a span with fresh random ids.
    pub fn start(name: impl Into<String>) -> Arc<Self> {
        Self::with_ids(name, random_id(), random_id())
    }

    /// Start a span with caller-chosen ids, e.g. ids continued from an
    /// upstream request.
    pub fn with_ids(name: impl Into<String>, trace_id: u64, span_id: u64) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            trace_id,
            span_id,
            started_at: Utc::now(),
            finished: AtomicBool::new(false),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

impl ActiveSpan for Span {
    fn trace_id(&self) -> u64 {
        self.trace_id
    }

    fn span_id(&self) -> u64 {
        self.span_id
    }

    fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }
}

// 0 reads as "unset" in most trace backends, so never hand it out.
fn random_id() -> u64 {
    loop {
        let (hi, lo) = Uuid::new_v4().as_u64_pair();
        let id = hi ^ lo;
        if id != 0 {
            return id;
        }
    }
}
