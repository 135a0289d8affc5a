//! Key-value persistence interface
//!
//! Every collection the application keeps is one JSON value under a stable
//! string key. Stores only move JSON values around; typing happens in
//! [`super::Storage`].

use serde_json::Value;

use crate::error::SpendlogResult;

/// A persistent mapping from string keys to JSON values
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get_value(&self, key: &str) -> SpendlogResult<Option<Value>>;

    /// Replace the value stored under `key`
    fn set_value(&self, key: &str, value: Value) -> SpendlogResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> SpendlogResult<()>;
}
