use crate::level::Level;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single structured log record.
///
/// Field order is preserved: fields appended later (the trace
/// correlation group included) serialize after earlier ones.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
    pub fields: Map<String, Value>,
}

impl LogRecord {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            file: None,
            line: None,
            fields: Map::new(),
        }
    }

    /// Append a single key/value field.
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Append a nested field group, preserving entry order.
    pub fn add_group<K>(
        &mut self,
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (K, Value)>,
    ) where
        K: Into<String>,
    {
        let mut group = Map::new();
        for (key, value) in entries {
            group.insert(key.into(), value);
        }
        self.fields.insert(name.into(), Value::Object(group));
    }
}
