//! In-memory key-value store

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::{SpendlogError, SpendlogResult};

use super::kv::KeyValueStore;

/// Keeps values in a map; nothing is persisted
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_value(&self, key: &str) -> SpendlogResult<Option<Value>> {
        let values = self
            .values
            .read()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn set_value(&self, key: &str, value: Value) -> SpendlogResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> SpendlogResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| SpendlogError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get_value("accent").unwrap(), None);

        store.set_value("accent", json!("pink")).unwrap();
        assert_eq!(store.get_value("accent").unwrap(), Some(json!("pink")));

        store.remove("accent").unwrap();
        store.remove("accent").unwrap();
        assert_eq!(store.get_value("accent").unwrap(), None);
    }
}
