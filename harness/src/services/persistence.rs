//! Mock persistence capability.

use crate::capability::Capability;
use crate::error::Result;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::type_name;
use std::collections::HashMap;

/// In-memory entity store, keyed by entity type.
///
/// Entities are kept as JSON values so a test can read back exactly what the
/// flow persisted. The store lives only as long as its registry.
#[derive(Debug, Default)]
pub struct MockPersistence {
    entities: RwLock<HashMap<&'static str, Vec<Value>>>,
}

impl Capability for MockPersistence {
    const NAME: &'static str = "Persistence";
}

impl MockPersistence {
    /// Persist an entity.
    pub fn persist<T: Serialize>(&self, entity: &T) -> Result<()> {
        let value = serde_json::to_value(entity)?;
        self.entities
            .write()
            .entry(type_name::<T>())
            .or_default()
            .push(value);
        Ok(())
    }

    /// All persisted entities of type `T`, in insertion order.
    pub fn find_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let stored = self
            .entities
            .read()
            .get(type_name::<T>())
            .cloned()
            .unwrap_or_default();
        stored
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(Into::into))
            .collect()
    }

    /// Number of persisted entities of type `T`.
    pub fn count<T>(&self) -> usize {
        self.entities
            .read()
            .get(type_name::<T>())
            .map_or(0, Vec::len)
    }

    /// Check if nothing has been persisted.
    pub fn is_empty(&self) -> bool {
        self.entities.read().values().all(Vec::is_empty)
    }
}
