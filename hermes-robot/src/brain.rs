//! Per-robot memory: arbitrary data keys plus user and room records.
//!
//! Records are created on first access, merged in place on later calls and never removed.
//! The whole brain can be snapshotted to JSON and restored.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use hermes_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Attributes of a user or room record.
pub type Attrs = serde_json::Map<String, Value>;

/// Serializable copy of a [`Brain`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrainSnapshot {
    #[serde(default)]
    pub data: BTreeMap<String, Value>,
    #[serde(default)]
    pub users: BTreeMap<String, Attrs>,
    #[serde(default)]
    pub rooms: BTreeMap<String, Attrs>,
}

#[derive(Default)]
pub struct Brain {
    state: RwLock<BrainSnapshot>,
}

impl Brain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self, key: &str) -> Option<Value> {
        self.read(|s| s.data.get(key).cloned())
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn set_data(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.write(|s| s.data.insert(key.into(), value))
    }

    pub fn remove_data(&self, key: &str) -> Option<Value> {
        self.write(|s| s.data.remove(key))
    }

    /// Returns the user record for `id`, creating it on first call and merging `attrs` into it.
    pub fn user(&self, id: &str, attrs: Option<Attrs>) -> Attrs {
        self.write(|s| upsert(&mut s.users, id, attrs))
    }

    /// Returns the room record for `id`, creating it on first call and merging `attrs` into it.
    pub fn room(&self, id: &str, attrs: Option<Attrs>) -> Attrs {
        self.write(|s| upsert(&mut s.rooms, id, attrs))
    }

    pub fn users(&self) -> BTreeMap<String, Attrs> {
        self.read(|s| s.users.clone())
    }

    pub fn rooms(&self) -> BTreeMap<String, Attrs> {
        self.read(|s| s.rooms.clone())
    }

    pub fn snapshot(&self) -> BrainSnapshot {
        self.read(Clone::clone)
    }

    pub fn restore(&self, snapshot: BrainSnapshot) {
        self.write(|s| *s = snapshot);
    }

    /// Writes the snapshot as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path.as_ref(), json)?;
        debug!(path = %path.as_ref().display(), "brain saved");
        Ok(())
    }

    /// Replaces the brain with the snapshot stored at `path`. A missing file leaves it untouched.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(false);
        }
        let snapshot: BrainSnapshot = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        self.restore(snapshot);
        debug!(path = %path.display(), "brain loaded");
        Ok(true)
    }

    fn read<T>(&self, f: impl FnOnce(&BrainSnapshot) -> T) -> T {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write<T>(&self, f: impl FnOnce(&mut BrainSnapshot) -> T) -> T {
        f(&mut self.state.write().unwrap_or_else(PoisonError::into_inner))
    }
}

fn upsert(records: &mut BTreeMap<String, Attrs>, id: &str, attrs: Option<Attrs>) -> Attrs {
    let record = records.entry(id.to_string()).or_insert_with(|| {
        let mut fresh = Attrs::new();
        fresh.insert("id".to_string(), Value::String(id.to_string()));
        fresh
    });
    if let Some(attrs) = attrs {
        record.extend(attrs);
    }
    record.clone()
}
