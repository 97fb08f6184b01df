use crate::context::Context;
use crate::env;
use crate::handler::{Attr, HandlerError, LogHandler};
use crate::level::Level;
use crate::record::LogRecord;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::io::Write;
use std::sync::Arc;

/// Configuration for [`JsonHandler`].
#[derive(Clone, Debug)]
pub struct JsonHandlerOptions {
    /// Minimum severity the handler reports as enabled.
    pub min_level: Level,
    /// Emit the `file`/`line` of the log call site when the record
    /// carries them.
    pub add_source: bool,
    /// Logical service name emitted as a `service` field, for
    /// shared-stream setups.
    pub service_name: Option<String>,
}

impl Default for JsonHandlerOptions {
    fn default() -> Self {
        Self {
            min_level: Level::Info,
            add_source: false,
            service_name: None,
        }
    }
}

impl JsonHandlerOptions {
    /// Build options from the `SPANLOG_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            min_level: env::level_from_env(),
            add_source: false,
            service_name: std::env::var(env::SERVICE_NAME_ENV).ok(),
        }
    }
}

/// [`LogHandler`] that writes one JSON object per record to a shared
/// writer.
///
/// Derived handlers share the writer, so output from concurrent
/// requests interleaves per line, never within one. Handler attributes
/// are emitted after the built-in fields; the record's own fields come
/// last, nested under any open groups.
pub struct JsonHandler<W> {
    writer: Arc<Mutex<W>>,
    options: JsonHandlerOptions,
    attrs: Map<String, Value>,
    groups: Vec<String>,
}

impl<W: Write + Send + 'static> JsonHandler<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, JsonHandlerOptions::default())
    }

    pub fn with_options(writer: W, options: JsonHandlerOptions) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            options,
            attrs: Map::new(),
            groups: Vec::new(),
        }
    }

    fn derive(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            options: self.options.clone(),
            attrs: self.attrs.clone(),
            groups: self.groups.clone(),
        }
    }
}

impl<W: Write + Send + 'static> LogHandler for JsonHandler<W> {
    fn enabled(&self, _cx: &Context, level: Level) -> bool {
        level >= self.options.min_level
    }

    fn handle(&self, _cx: &Context, record: &mut LogRecord) -> Result<(), HandlerError> {
        let mut root = Map::new();
        root.insert(
            "timestamp".to_string(),
            Value::String(record.timestamp.to_rfc3339()),
        );
        root.insert(
            "level".to_string(),
            Value::String(record.level.as_str().to_string()),
        );
        root.insert("message".to_string(), Value::String(record.message.clone()));
        if let Some(service) = &self.options.service_name {
            root.insert("service".to_string(), Value::String(service.clone()));
        }
        if self.options.add_source {
            if let Some(file) = record.file {
                root.insert("file".to_string(), Value::String(file.to_string()));
            }
            if let Some(line) = record.line {
                root.insert("line".to_string(), Value::from(line));
            }
        }
        for (key, value) in &self.attrs {
            root.insert(key.clone(), value.clone());
        }
        for (key, value) in &record.fields {
            insert_at_path(&mut root, &self.groups, key.clone(), value.clone());
        }

        let mut line = serde_json::to_vec(&Value::Object(root))?;
        line.push(b'\n');
        self.writer.lock().write_all(&line)?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Box<dyn LogHandler> {
        let mut derived = self.derive();
        let groups = derived.groups.clone();
        for (key, value) in attrs {
            insert_at_path(&mut derived.attrs, &groups, key, value);
        }
        Box::new(derived)
    }

    fn with_group(&self, name: &str) -> Box<dyn LogHandler> {
        let mut derived = self.derive();
        derived.groups.push(name.to_string());
        Box::new(derived)
    }
}

// Descends through `path`, creating objects as needed, then inserts.
fn insert_at_path(root: &mut Map<String, Value>, path: &[String], key: String, value: Value) {
    let mut node = root;
    for segment in path {
        node = child(node, segment);
    }
    node.insert(key, value);
}

fn child<'a>(node: &'a mut Map<String, Value>, segment: &str) -> &'a mut Map<String, Value> {
    let slot = node
        .entry(segment.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        // A scalar squatting on the group name loses to the group.
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}
