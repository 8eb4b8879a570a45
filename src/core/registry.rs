//! Write-once keyed lookup table shared by every registry in the engine.
//!
//! All registries follow one discipline:
//!
//! - `register` fails on a duplicate identifier.
//! - `get` fails on a missing identifier, naming it and listing what is
//!   available, so wiring mistakes surface immediately.
//! - `clear` exists for test harnesses only.

use std::fmt::Display;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use super::error::RegistryError;

/// A named, register-once table.
#[derive(Clone, Debug)]
pub struct Registry<K, V> {
    name: &'static str,
    entries: FxHashMap<K, V>,
}

impl<K, V> Registry<K, V>
where
    K: Copy + Eq + Hash + Ord + Display,
{
    /// Create an empty registry. `name` appears in error messages.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: FxHashMap::default(),
        }
    }

    /// Registry name used in error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a value under `id`.
    pub fn register(&mut self, id: K, value: V) -> Result<(), RegistryError> {
        if self.entries.contains_key(&id) {
            return Err(RegistryError::Duplicate {
                registry: self.name,
                id: id.to_string(),
            });
        }
        self.entries.insert(id, value);
        Ok(())
    }

    /// Look up `id`.
    pub fn get(&self, id: K) -> Result<&V, RegistryError> {
        self.entries.get(&id).ok_or_else(|| RegistryError::Unknown {
            registry: self.name,
            id: id.to_string(),
            available: self.available(),
        })
    }

    /// Look up `id` without treating absence as an error.
    #[must_use]
    pub fn find(&self, id: K) -> Option<&V> {
        self.entries.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: K) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered identifiers in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<K> {
        let mut ids: Vec<K> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over entries in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.ids().into_iter().filter_map(move |id| self.entries.get(&id).map(|v| (id, v)))
    }

    /// Remove every entry.
    #[cfg(any(test, feature = "testing"))]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn available(&self) -> String {
        self.ids()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry: Registry<u32, &str> = Registry::new("numbers");
        registry.register(1, "one").unwrap();
        registry.register(2, "two").unwrap();

        assert_eq!(registry.get(1), Ok(&"one"));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(2));
        assert_eq!(registry.find(3), None);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry: Registry<u32, &str> = Registry::new("numbers");
        registry.register(1, "one").unwrap();

        let err = registry.register(1, "uno").unwrap_err();
        assert_eq!(
            err,
            RegistryError::Duplicate {
                registry: "numbers",
                id: "1".to_string()
            }
        );
        assert_eq!(registry.get(1), Ok(&"one"));
    }

    #[test]
    fn test_unknown_lists_available() {
        let mut registry: Registry<u32, &str> = Registry::new("numbers");
        registry.register(3, "three").unwrap();
        registry.register(1, "one").unwrap();

        let err = registry.get(7).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Unknown {
                registry: "numbers",
                id: "7".to_string(),
                available: "1, 3".to_string(),
            }
        );
    }

    #[test]
    fn test_iter_is_ordered() {
        let mut registry: Registry<u32, u32> = Registry::new("squares");
        for n in [5, 2, 9] {
            registry.register(n, n * n).unwrap();
        }

        let keys: Vec<_> = registry.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![2, 5, 9]);
    }

    #[test]
    fn test_clear() {
        let mut registry: Registry<u32, &str> = Registry::new("numbers");
        registry.register(1, "one").unwrap();
        registry.clear();

        assert!(registry.is_empty());
        registry.register(1, "one again").unwrap();
    }
}
