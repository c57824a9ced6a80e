use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::contract::{stable_contract_json, StateMap};
use crate::error::{ScanError, ScanResult};

/// Accumulated world state: generated step instances plus baseline entries.
///
/// Insertion order is kept and entries are never removed; the whole map is
/// handed to the execution engine on build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanRegistry {
    state: StateMap,
}

impl ScanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: Value) -> ScanResult<()> {
        if self.state.contains_key(&key) {
            return Err(ScanError::DuplicateKey(key));
        }
        self.state.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.state.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.state.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.state.iter()
    }

    pub fn state(&self) -> &StateMap {
        &self.state
    }

    pub fn into_state(self) -> StateMap {
        self.state
    }

    /// SHA-256 over the stable JSON encoding of the state.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(stable_contract_json(&self.state));
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn insert_keeps_insertion_order() {
        let mut registry = ScanRegistry::new();
        registry.insert("b".to_string(), json!(1)).unwrap();
        registry.insert("a".to_string(), json!(2)).unwrap();
        registry.insert("c".to_string(), json!(3)).unwrap();

        let keys: Vec<&String> = registry.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn insert_rejects_duplicate_key_without_overwriting() {
        let mut registry = ScanRegistry::new();
        registry.insert("species_counts".to_string(), json!({"PX": 1})).unwrap();

        let error = registry
            .insert("species_counts".to_string(), json!({"PX": 2}))
            .expect_err("duplicate should fail");

        assert_eq!(error, ScanError::DuplicateKey("species_counts".to_string()));
        assert_eq!(registry.get("species_counts"), Some(&json!({"PX": 1})));
    }

    #[test]
    fn fingerprint_is_deterministic_and_content_sensitive() {
        let mut first = ScanRegistry::new();
        first.insert("k_0".to_string(), json!({"x": 1})).unwrap();
        let mut second = first.clone();

        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_eq!(first.fingerprint().len(), 64);

        second.insert("k_1".to_string(), json!({"x": 2})).unwrap();
        assert_ne!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn serializes_as_plain_state_map() {
        let mut registry = ScanRegistry::new();
        registry.insert("k_0".to_string(), json!({"results": {}})).unwrap();

        assert_eq!(
            serde_json::to_value(&registry).unwrap(),
            json!({"k_0": {"results": {}}})
        );
    }
}
