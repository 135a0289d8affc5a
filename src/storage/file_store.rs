//! Directory-backed key-value store
//!
//! Each key is a `<key>.json` file in the data directory, written atomically.

use serde_json::Value;

use crate::config::paths::SpendlogPaths;
use crate::error::{SpendlogError, SpendlogResult};

use super::file_io::{read_json_opt, remove_file_if_exists, write_json_atomic};
use super::kv::KeyValueStore;

/// Stores each key as a JSON file under the data directory
pub struct JsonFileStore {
    paths: SpendlogPaths,
}

impl JsonFileStore {
    /// Open the store, creating the data directory if needed
    pub fn open(paths: SpendlogPaths) -> SpendlogResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }
}

fn check_key(key: &str) -> SpendlogResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(SpendlogError::Storage(format!("Invalid store key: {:?}", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_value(&self, key: &str) -> SpendlogResult<Option<Value>> {
        check_key(key)?;
        read_json_opt(self.paths.key_file(key))
    }

    fn set_value(&self, key: &str, value: Value) -> SpendlogResult<()> {
        check_key(key)?;
        write_json_atomic(self.paths.key_file(key), &value)
    }

    fn remove(&self, key: &str) -> SpendlogResult<()> {
        check_key(key)?;
        remove_file_if_exists(self.paths.key_file(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonFileStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = JsonFileStore::open(paths).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_set_get_remove() {
        let (temp_dir, store) = create_test_store();

        assert_eq!(store.get_value("theme").unwrap(), None);

        store.set_value("theme", json!("light")).unwrap();
        assert_eq!(store.get_value("theme").unwrap(), Some(json!("light")));
        assert!(temp_dir.path().join("data").join("theme.json").exists());

        store.remove("theme").unwrap();
        assert_eq!(store.get_value("theme").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (_temp_dir, store) = create_test_store();
        assert!(store.set_value("../escape", json!(1)).is_err());
        assert!(store.get_value("").is_err());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());

        JsonFileStore::open(paths.clone())
            .unwrap()
            .set_value("onboardingComplete", json!(true))
            .unwrap();

        let reopened = JsonFileStore::open(paths).unwrap();
        assert_eq!(
            reopened.get_value("onboardingComplete").unwrap(),
            Some(json!(true))
        );
    }
}
