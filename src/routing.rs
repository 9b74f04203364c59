//! Switched cameras: virtual camera feeds that follow a selector value.
//!
//! The camera list is fixed at startup and shared read-only. Each virtual
//! camera has one listener thread that is the only writer of its route.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use parking_lot::RwLock;

use crate::telemetry::Value;

/// Current physical camera index behind each virtual camera.
#[derive(Debug, Default)]
pub struct RoutingTable {
    routes: RwLock<HashMap<String, usize>>,
}

impl RoutingTable {
    pub fn get(&self, name: &str) -> Option<usize> {
        self.routes.read().get(name).copied()
    }

    fn set(&self, name: &str, index: usize) {
        self.routes.write().insert(name.to_string(), index);
    }
}

#[derive(Debug, Clone)]
pub struct CameraRouter {
    cameras: Arc<[String]>,
    table: Arc<RoutingTable>,
}

impl CameraRouter {
    pub fn new<I, S>(camera_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cameras: camera_names.into_iter().map(Into::<String>::into).collect(),
            table: Arc::new(RoutingTable::default()),
        }
    }

    pub fn cameras(&self) -> &[String] {
        &self.cameras
    }

    /// Physical camera a selector value points at.
    ///
    /// Numbers are truncated to an index and must be in range; strings
    /// match the first camera with that name.
    pub fn resolve(&self, value: &Value) -> Option<usize> {
        match value {
            Value::Double(_) | Value::Int(_) => {
                let index = value.as_f64()?.trunc();
                if index >= 0.0 && index < self.cameras.len() as f64 {
                    Some(index as usize)
                } else {
                    None
                }
            }
            Value::String(name) => self.cameras.iter().position(|c| c == name),
            Value::Bool(_) => None,
        }
    }

    /// Point `virtual_name` at the camera `value` selects. Values that
    /// select nothing leave the route unchanged.
    pub fn apply(&self, virtual_name: &str, value: &Value) -> Option<usize> {
        let index = self.resolve(value)?;
        self.table.set(virtual_name, index);
        Some(index)
    }

    pub fn source_for(&self, virtual_name: &str) -> Option<usize> {
        self.table.get(virtual_name)
    }

    pub fn source_name(&self, virtual_name: &str) -> Option<&str> {
        self.source_for(virtual_name)
            .and_then(|i| self.cameras.get(i))
            .map(String::as_str)
    }

    /// Apply selector values from `updates` on a dedicated thread until
    /// the sending side closes.
    pub fn listen(&self, virtual_name: String, updates: Receiver<Value>) -> std::io::Result<JoinHandle<()>> {
        let router = self.clone();
        thread::Builder::new()
            .name(format!("switch-{}", virtual_name))
            .spawn(move || {
                for value in updates {
                    match router.apply(&virtual_name, &value) {
                        Some(index) => tracing::info!(
                            "switched camera '{}' now showing '{}'",
                            virtual_name,
                            router.cameras[index]
                        ),
                        None => tracing::debug!(
                            "switched camera '{}' ignored selector {:?}",
                            virtual_name,
                            value
                        ),
                    }
                }
            })
    }
}
