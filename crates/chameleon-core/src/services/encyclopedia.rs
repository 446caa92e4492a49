use std::collections::BTreeSet;

/// Entities the player has caught correctly at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encyclopedia {
    unlocked: BTreeSet<String>,
}

impl Encyclopedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock an entity. Returns true the first time only.
    pub fn unlock(&mut self, entity_id: &str) -> bool {
        self.unlocked.insert(entity_id.to_string())
    }

    pub fn is_unlocked(&self, entity_id: &str) -> bool {
        self.unlocked.contains(entity_id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.unlocked.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_is_idempotent() {
        let mut book = Encyclopedia::new();
        assert!(book.unlock("titan-beetle"));
        assert!(!book.unlock("titan-beetle"));
        assert!(book.is_unlocked("titan-beetle"));
        assert_eq!(book.unlocked_count(), 1);
        assert_eq!(book.iter().collect::<Vec<_>>(), vec!["titan-beetle"]);
    }
}
