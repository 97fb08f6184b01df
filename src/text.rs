use crate::context::Context;
use crate::handler::{Attr, HandlerError, LogHandler};
use crate::level::Level;
use crate::record::LogRecord;
use parking_lot::Mutex;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;

/// [`LogHandler`] that writes one human-readable line per record.
///
/// Nested groups flatten to dotted keys, so an enriched record renders
/// as `dd.trace_id=… dd.span_id=…`.
pub struct TextHandler<W> {
    writer: Arc<Mutex<W>>,
    min_level: Level,
    // Keys are already group-qualified at derivation time.
    attrs: Vec<(String, Value)>,
    groups: Vec<String>,
}

impl<W: Write + Send + 'static> TextHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            min_level: Level::Info,
            attrs: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    fn derive(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            min_level: self.min_level,
            attrs: self.attrs.clone(),
            groups: self.groups.clone(),
        }
    }

    fn qualify(&self, key: &str) -> String {
        if self.groups.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.groups.join("."), key)
        }
    }
}

impl<W: Write + Send + 'static> LogHandler for TextHandler<W> {
    fn enabled(&self, _cx: &Context, level: Level) -> bool {
        level >= self.min_level
    }

    fn handle(&self, _cx: &Context, record: &mut LogRecord) -> Result<(), HandlerError> {
        let mut line = format!(
            "{} {:5} {}",
            record.timestamp.to_rfc3339(),
            record.level,
            record.message
        );
        for (key, value) in &self.attrs {
            push_pair(&mut line, key, value);
        }
        for (key, value) in &record.fields {
            push_pair(&mut line, &self.qualify(key), value);
        }
        line.push('\n');
        self.writer.lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn LogHandler> {
        let mut derived = self.derive();
        for (key, value) in attrs {
            let key = derived.qualify(&key);
            derived.attrs.push((key, value));
        }
        Box::new(derived)
    }

    fn with_group(&self, name: &str) -> Box<dyn LogHandler> {
        let mut derived = self.derive();
        derived.groups.push(name.to_string());
        Box::new(derived)
    }
}

// Flattens nested objects to dotted keys. Strings render bare unless
// they contain whitespace or `=`.
fn push_pair(line: &mut String, key: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (nested_key, nested_value) in map {
                push_pair(line, &format!("{key}.{nested_key}"), nested_value);
            }
        }
        Value::String(s) if s.contains(|c: char| c.is_whitespace() || c == '=') => {
            line.push_str(&format!(" {key}={s:?}"));
        }
        Value::String(s) => line.push_str(&format!(" {key}={s}")),
        other => line.push_str(&format!(" {key}={other}")),
    }
}
