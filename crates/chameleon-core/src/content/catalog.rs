use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Size class used by comparison questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Tiny,
    Small,
    Medium,
    Large,
}

/// One catchable creature. Only the fields distractor selection needs are
/// typed; everything else is display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntity {
    pub id: String,
    pub name: String,
    /// Level the entity is introduced at. Distractors never come from a
    /// higher tier than the correct answer.
    pub difficulty_tier: u32,
    pub habitat: String,
    pub size: SizeClass,
    pub color_category: String,
    #[serde(default)]
    pub facts: Vec<String>,
}

/// Flat entity table in insertion order, with id lookup.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entities: Vec<CatalogEntity>,
    index: HashMap<String, usize>,
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity. Returns false (and keeps the first) if the id exists.
    pub fn insert(&mut self, entity: CatalogEntity) -> bool {
        if self.index.contains_key(&entity.id) {
            return false;
        }
        self.index.insert(entity.id.clone(), self.entities.len());
        self.entities.push(entity);
        true
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntity> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    /// Position of `id` in insertion order. Stable for the catalog's lifetime.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get_index(&self, index: usize) -> Option<&CatalogEntity> {
        self.entities.get(index)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntity> {
        self.entities.iter()
    }

    /// Entities at or below `tier`.
    pub fn up_to_tier(&self, tier: u32) -> impl Iterator<Item = &CatalogEntity> {
        self.entities.iter().filter(move |e| e.difficulty_tier <= tier)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str, tier: u32) -> CatalogEntity {
        CatalogEntity {
            id: id.into(),
            name: id.to_uppercase(),
            difficulty_tier: tier,
            habitat: "canopy".into(),
            size: SizeClass::Small,
            color_category: "green".into(),
            facts: Vec::new(),
        }
    }

    #[test]
    fn insert_and_lookup() {
        let mut catalog = EntityCatalog::new();
        assert!(catalog.insert(entity("a", 1)));
        assert!(catalog.insert(entity("b", 2)));
        assert!(!catalog.insert(entity("a", 3)));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").map(|e| e.difficulty_tier), Some(1));
        assert!(catalog.get("z").is_none());
    }

    #[test]
    fn index_follows_insertion_order() {
        let mut catalog = EntityCatalog::new();
        catalog.insert(entity("a", 1));
        catalog.insert(entity("b", 1));
        catalog.insert(entity("a", 2));
        assert_eq!(catalog.index_of("b"), Some(1));
        assert_eq!(catalog.index_of("z"), None);
        assert_eq!(catalog.get_index(0).map(|e| e.difficulty_tier), Some(1));
        assert!(catalog.get_index(2).is_none());
    }

    #[test]
    fn tier_filter_is_inclusive() {
        let mut catalog = EntityCatalog::new();
        for (id, tier) in [("a", 1), ("b", 2), ("c", 3)] {
            catalog.insert(entity(id, tier));
        }
        let ids: Vec<_> = catalog.up_to_tier(2).map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn size_parses_lowercase() {
        let size: SizeClass = serde_json::from_str("\"large\"").unwrap();
        assert_eq!(size, SizeClass::Large);
    }
}
