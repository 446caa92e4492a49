//! Entities and questions the game draws from.

mod builtin;
pub mod catalog;
pub mod questions;

use serde::Deserialize;
use thiserror::Error;

pub use catalog::{CatalogEntity, EntityCatalog, SizeClass};
pub use questions::{DistractorStrategy, Question, QuestionKind, QuestionPool};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed content: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate entity id `{0}`")]
    DuplicateEntity(String),
    #[error("question `{question}` names unknown entity `{entity}`")]
    UnknownEntity { question: String, entity: String },
}

/// A validated catalog plus the questions about it.
#[derive(Debug, Clone)]
pub struct Content {
    pub catalog: EntityCatalog,
    pub questions: Vec<Question>,
}

#[derive(Deserialize)]
struct ContentFile {
    entities: Vec<CatalogEntity>,
    questions: Vec<Question>,
}

impl Content {
    /// Build content, rejecting duplicate ids and questions whose correct
    /// answer is not in the catalog.
    pub fn new(entities: Vec<CatalogEntity>, questions: Vec<Question>) -> Result<Self, ContentError> {
        let mut catalog = EntityCatalog::new();
        for entity in entities {
            let id = entity.id.clone();
            if !catalog.insert(entity) {
                return Err(ContentError::DuplicateEntity(id));
            }
        }
        if let Some(q) = questions.iter().find(|q| !catalog.contains(&q.correct_entity_id)) {
            return Err(ContentError::UnknownEntity {
                question: q.id.clone(),
                entity: q.correct_entity_id.clone(),
            });
        }
        Ok(Self { catalog, questions })
    }

    /// Parse `{ "entities": [...], "questions": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let file: ContentFile = serde_json::from_str(json)?;
        let content = Self::new(file.entities, file.questions)?;
        log::info!(
            "loaded {} entities and {} questions",
            content.catalog.len(),
            content.questions.len()
        );
        Ok(content)
    }

    /// The built-in rainforest set.
    pub fn builtin() -> Self {
        let mut catalog = EntityCatalog::new();
        for entity in builtin::entities() {
            catalog.insert(entity);
        }
        Self {
            catalog,
            questions: builtin::questions(),
        }
    }

    pub fn questions_for_level(&self, level: u32) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.level == level)
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::builtin()
    }
}
