//! # Configuration Store
//!
//! Read-only, typed access to a key/value dictionary of persisted controller
//! settings.
//!
//! The store itself (how values are persisted, who writes them) lives
//! outside this crate. All the settings loader needs is a way to ask for a
//! boolean or an unsigned number by name. A key that is missing and a key
//! holding a value of the wrong type both come back as `None`.
//!
//! Implementations are provided for:
//!
//! - [`toml::Table`] - the `[settings]` table of the application config file
//! - `serde_json::Map` - property dictionaries pushed as JSON
//! - [`MemoryStore`] - an in-memory dictionary, handy for embedding and tests
//!
//! ## Usage
//!
//! ```
//! use pad_bridge::store::{ConfigStore, MemoryStore};
//!
//! let store = MemoryStore::new()
//!     .with_bool("InvertLeftX", true)
//!     .with_number("DeadzoneLeft", 5000);
//!
//! assert_eq!(store.get_bool("InvertLeftX"), Some(true));
//! assert_eq!(store.get_u32("DeadzoneLeft"), Some(5000));
//! assert_eq!(store.get_bool("DeadzoneLeft"), None); // wrong type
//! assert_eq!(store.get_u32("Missing"), None);
//! ```

use std::collections::HashMap;

/// Typed lookup into a settings dictionary.
pub trait ConfigStore {
    /// Returns the boolean stored under `key`, or `None` if absent or not a boolean.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Returns the number stored under `key`, or `None` if absent, not a number,
    /// or not representable as a `u32`.
    fn get_u32(&self, key: &str) -> Option<u32>;
}

impl ConfigStore for toml::Table {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(toml::Value::as_bool)
    }

    fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|n| u32::try_from(n).ok())
    }
}

impl ConfigStore for serde_json::Map<String, serde_json::Value> {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(serde_json::Value::as_bool)
    }

    fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }
}

/// A single value held by a [`MemoryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreValue {
    /// Boolean flag.
    Bool(bool),
    /// Unsigned number.
    Number(u32),
}

/// In-memory settings dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, StoreValue>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a boolean.
    #[must_use]
    pub fn with_bool(mut self, key: &str, value: bool) -> Self {
        self.insert(key, StoreValue::Bool(value));
        self
    }

    /// Builder-style insert of a number.
    #[must_use]
    pub fn with_number(mut self, key: &str, value: u32) -> Self {
        self.insert(key, StoreValue::Number(value));
        self
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: &str, value: StoreValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigStore for MemoryStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(StoreValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    fn get_u32(&self, key: &str) -> Option<u32> {
        match self.values.get(key) {
            Some(StoreValue::Number(value)) => Some(*value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_typed_lookup() {
        let store = MemoryStore::new()
            .with_bool("CombinedTriggers", true)
            .with_number("XoneRumbleType", 2);

        assert_eq!(store.get_bool("CombinedTriggers"), Some(true));
        assert_eq!(store.get_u32("XoneRumbleType"), Some(2));
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_memory_store_wrong_type_is_none() {
        let store = MemoryStore::new()
            .with_number("InvertLeftX", 1)
            .with_bool("DeadzoneLeft", true);

        assert_eq!(store.get_bool("InvertLeftX"), None);
        assert_eq!(store.get_u32("DeadzoneLeft"), None);
    }

    #[test]
    fn test_memory_store_insert_replaces() {
        let mut store = MemoryStore::new().with_number("DeadzoneLeft", 100);
        store.insert("DeadzoneLeft", StoreValue::Number(200));
        assert_eq!(store.get_u32("DeadzoneLeft"), Some(200));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_toml_table_store() {
        let table: toml::Table = toml::from_str(
            r#"
InvertLeftY = true
DeadzoneRight = 7000
BindingA = -3
RelativeLeft = "yes"
"#,
        )
        .unwrap();

        assert_eq!(table.get_bool("InvertLeftY"), Some(true));
        assert_eq!(table.get_u32("DeadzoneRight"), Some(7000));
        // Negative numbers do not fit a u32
        assert_eq!(table.get_u32("BindingA"), None);
        // Strings are neither booleans nor numbers
        assert_eq!(table.get_bool("RelativeLeft"), None);
        assert_eq!(table.get_u32("Missing"), None);
    }

    #[test]
    fn test_json_map_store() {
        let value: serde_json::Value = serde_json::json!({
            "DeadOffLeft": true,
            "DeadzoneLeft": 4096,
            "XoneRumbleType": 1.5,
            "BindingB": 5_000_000_000u64,
        });
        let map = value.as_object().unwrap();

        assert_eq!(map.get_bool("DeadOffLeft"), Some(true));
        assert_eq!(map.get_u32("DeadzoneLeft"), Some(4096));
        assert_eq!(map.get_u32("XoneRumbleType"), None);
        assert_eq!(map.get_u32("BindingB"), None);
    }
}
