//! Entity to RETS resource/class mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The two-level RETS namespace a search targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageName {
    /// RETS resource identifier (e.g. `Property`).
    pub resource: String,
    /// RETS class identifier (e.g. `RES`).
    pub class: String,
}

impl StorageName {
    /// Create a new storage name.
    pub fn new(resource: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            class: class.into(),
        }
    }
}

/// Registry of which RETS resource/class backs each entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageMap {
    entities: BTreeMap<String, StorageName>,
}

impl StorageMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity, replacing any previous mapping.
    pub fn register(&mut self, entity: impl Into<String>, storage: StorageName) {
        self.entities.insert(entity.into(), storage);
    }

    /// Register an entity (builder form).
    pub fn with_entity(
        mut self,
        entity: impl Into<String>,
        resource: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        self.register(entity, StorageName::new(resource, class));
        self
    }

    /// Look up the storage name of an entity.
    pub fn resolve(&self, entity: &str) -> Option<&StorageName> {
        self.entities.get(entity)
    }

    /// Number of mapped entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if no entity is mapped.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let map = StorageMap::new().with_entity("Heffalump", "Property", "RES");
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.resolve("Heffalump"),
            Some(&StorageName::new("Property", "RES"))
        );
        assert!(map.resolve("Woozle").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut map = StorageMap::new();
        map.register("Heffalump", StorageName::new("Property", "RES"));
        map.register("Heffalump", StorageName::new("Property", "LND"));
        assert_eq!(map.resolve("Heffalump").unwrap().class, "LND");
    }

    #[test]
    fn test_json_is_plain_object() {
        let map: StorageMap = serde_json::from_str(
            r#"{"Heffalump": {"resource": "Property", "class": "RES"}}"#,
        )
        .unwrap();
        assert_eq!(map.resolve("Heffalump").unwrap().resource, "Property");
    }
}
