//! Key-value telemetry shared with other processes.
//!
//! The synchronization service that mirrors the table over the network is
//! external; this module holds the local table, its change notifications,
//! and the publisher the vision loop writes through.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use parking_lot::RwLock;

use crate::models::TargetResult;

/// Telemetry entry value types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Double(f64),
    Int(i64),
    String(String),
}

impl Value {
    /// Numeric value, if this entry holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// Shared key-value store.
pub trait TelemetryStore: Send + Sync {
    /// Write several entries so that no reader sees only part of them.
    fn set_batch(&self, entries: Vec<(String, Value)>);

    /// Write `value` only if `key` has no value yet.
    fn set_default(&self, key: &str, value: Value);

    fn get(&self, key: &str) -> Option<Value>;

    /// Receive every new value written to `key`, starting with the
    /// current one if present.
    fn subscribe(&self, key: &str) -> Receiver<Value>;

    fn set(&self, key: &str, value: Value) {
        self.set_batch(vec![(key.to_string(), value)]);
    }
}

#[derive(Default)]
struct TableInner {
    values: HashMap<String, Value>,
    listeners: HashMap<String, Vec<Sender<Value>>>,
}

impl TableInner {
    fn notify(&mut self, key: &str, value: &Value) {
        if let Some(senders) = self.listeners.get_mut(key) {
            senders.retain(|tx| tx.send(value.clone()).is_ok());
        }
    }
}

/// In-process telemetry table.
#[derive(Default)]
pub struct TelemetryTable {
    inner: RwLock<TableInner>,
}

impl TelemetryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries whose key starts with `prefix`, sorted by key.
    pub fn entries(&self, prefix: &str) -> Vec<(String, Value)> {
        let inner = self.inner.read();
        let mut entries: Vec<_> = inner
            .values
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl TelemetryStore for TelemetryTable {
    fn set_batch(&self, entries: Vec<(String, Value)>) {
        let mut inner = self.inner.write();
        for (key, value) in entries {
            inner.notify(&key, &value);
            inner.values.insert(key, value);
        }
    }

    fn set_default(&self, key: &str, value: Value) {
        let mut inner = self.inner.write();
        if !inner.values.contains_key(key) {
            inner.notify(key, &value);
            inner.values.insert(key.to_string(), value);
        }
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().values.get(key).cloned()
    }

    fn subscribe(&self, key: &str) -> Receiver<Value> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.inner.write();
        if let Some(current) = inner.values.get(key) {
            // The receiver is alive, this cannot fail
            let _ = tx.send(current.clone());
        }
        inner.listeners.entry(key.to_string()).or_default().push(tx);
        rx
    }
}

pub const TABLE_NAME: &str = "Pi Vision";
pub const TARGET_COUNT: &str = "targetCount";
pub const CENTER_X: &str = "centerX";
pub const CENTER_Y: &str = "centerY";
pub const OFFSET_X: &str = "offsetX";
pub const OFFSET_Y: &str = "offsetY";

/// Full key of `entry` inside `table`.
pub fn table_key(table: &str, entry: &str) -> String {
    format!("{}/{}", table, entry)
}

/// Writes each frame's [`TargetResult`] into a telemetry table.
pub struct TargetPublisher {
    store: Arc<dyn TelemetryStore>,
    table: String,
}

impl TargetPublisher {
    /// Publisher for the default vision table, with every entry
    /// defaulted to zero.
    pub fn new(store: Arc<dyn TelemetryStore>) -> Self {
        Self::with_table(store, TABLE_NAME)
    }

    pub fn with_table(store: Arc<dyn TelemetryStore>, table: &str) -> Self {
        let publisher = Self {
            store,
            table: table.to_string(),
        };
        publisher
            .store
            .set_default(&publisher.key(TARGET_COUNT), Value::Int(0));
        for entry in [CENTER_X, CENTER_Y, OFFSET_X, OFFSET_Y] {
            publisher
                .store
                .set_default(&publisher.key(entry), Value::Double(0.0));
        }
        publisher
    }

    pub fn key(&self, entry: &str) -> String {
        table_key(&self.table, entry)
    }

    pub fn publish(&self, result: &TargetResult) {
        self.store.set_batch(vec![
            (self.key(TARGET_COUNT), Value::Int(result.count as i64)),
            (self.key(CENTER_X), Value::Double(result.center.x)),
            (self.key(CENTER_Y), Value::Double(result.center.y)),
            (self.key(OFFSET_X), Value::Double(result.offset.x)),
            (self.key(OFFSET_Y), Value::Double(result.offset.y)),
        ]);
    }
}
