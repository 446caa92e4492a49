//! Distractor selection.
//!
//! Start from every entity at or below the correct answer's tier, then
//! narrow the pool once per applicable strategy. A narrowing step that would
//! leave fewer candidates than requested is skipped. If the pool is still too
//! small at the end, all narrowing is dropped and the base pool is used.

use crate::content::{CatalogEntity, DistractorStrategy, EntityCatalog, Question};

fn keeps(strategy: DistractorStrategy, correct: &CatalogEntity, candidate: &CatalogEntity) -> bool {
    match strategy {
        DistractorStrategy::DifferentHabitat => candidate.habitat != correct.habitat,
        DistractorStrategy::SameSize => candidate.size == correct.size,
        DistractorStrategy::SameColor => candidate.color_category == correct.color_category,
        DistractorStrategy::SameHabitat => candidate.habitat == correct.habitat,
    }
}

/// Candidates after the cascade, before shuffling.
pub fn candidate_pool<'a>(
    catalog: &'a EntityCatalog,
    correct: &CatalogEntity,
    strategies: &[DistractorStrategy],
    count: usize,
) -> Vec<&'a CatalogEntity> {
    let base: Vec<&CatalogEntity> = catalog
        .up_to_tier(correct.difficulty_tier)
        .filter(|e| e.id != correct.id)
        .collect();

    let mut pool = base.clone();
    for &strategy in strategies {
        let narrowed: Vec<&CatalogEntity> = pool
            .iter()
            .copied()
            .filter(|e| keeps(strategy, correct, e))
            .collect();
        if narrowed.len() >= count {
            pool = narrowed;
        }
    }

    if pool.len() < count {
        pool = base;
    }
    pool
}

/// Pick `question.distractor_count` wrong answers. Returns fewer if the
/// catalog cannot supply them, and none if the correct entity is unknown.
pub fn select_distractors<'a>(
    catalog: &'a EntityCatalog,
    question: &Question,
    rng: &mut fastrand::Rng,
) -> Vec<&'a CatalogEntity> {
    let Some(correct) = catalog.get(&question.correct_entity_id) else {
        log::warn!(
            "question {} names unknown entity {}",
            question.id,
            question.correct_entity_id
        );
        return Vec::new();
    };

    let count = question.distractor_count;
    let mut pool = candidate_pool(catalog, correct, &question.strategies(), count);
    if pool.len() < count {
        log::warn!(
            "question {} wants {} distractors, catalog has {}",
            question.id,
            count,
            pool.len()
        );
    }

    rng.shuffle(&mut pool);
    pool.truncate(count);
    pool
}
