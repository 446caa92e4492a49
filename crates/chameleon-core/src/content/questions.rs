use serde::{Deserialize, Serialize};

/// What a question asks about. Drives which distractors make it hard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Identification,
    Behavior,
    Habitat,
    Comparison,
}

/// A narrowing step of distractor selection, listed in the order they are
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistractorStrategy {
    /// Habitat questions: wrong answers live somewhere else.
    DifferentHabitat,
    /// Comparison questions: wrong answers are the same size.
    SameSize,
    /// Identification questions: wrong answers share the colour.
    SameColor,
    /// Behavior questions: wrong answers share the habitat.
    SameHabitat,
}

impl DistractorStrategy {
    pub const CASCADE: [DistractorStrategy; 4] = [
        DistractorStrategy::DifferentHabitat,
        DistractorStrategy::SameSize,
        DistractorStrategy::SameColor,
        DistractorStrategy::SameHabitat,
    ];

    fn for_kind(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Habitat => DistractorStrategy::DifferentHabitat,
            QuestionKind::Comparison => DistractorStrategy::SameSize,
            QuestionKind::Identification => DistractorStrategy::SameColor,
            QuestionKind::Behavior => DistractorStrategy::SameHabitat,
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            DistractorStrategy::DifferentHabitat => &["habitat", "live", "found in", "where"],
            DistractorStrategy::SameSize => &["biggest", "largest", "smallest", "bigger", "smaller", "size"],
            DistractorStrategy::SameColor => &["color", "colour", "shine", "look", "pattern"],
            DistractorStrategy::SameHabitat => &["eat", "hunt", "behav", "defend"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub correct_entity_id: String,
    pub distractor_count: usize,
    #[serde(default)]
    pub kind: QuestionKind,
    pub level: u32,
    /// Explicit strategy. When set, it replaces both the kind and the
    /// keyword match.
    #[serde(default)]
    pub distractor_strategy: Option<DistractorStrategy>,
}

impl Question {
    /// Strategies that apply to this question, in cascade order.
    pub fn strategies(&self) -> Vec<DistractorStrategy> {
        if let Some(strategy) = self.distractor_strategy {
            return vec![strategy];
        }
        let text = self.text.to_lowercase();
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let from_kind = DistractorStrategy::for_kind(self.kind);
        DistractorStrategy::CASCADE
            .into_iter()
            .filter(|s| *s == from_kind || s.keywords().iter().any(|k| mentions(&words, k)))
            .collect()
    }
}

/// Whether `keyword` starts a run of words in `words`. Each keyword word
/// must begin a text word, so "eat" matches "eats" but not "great".
fn mentions(words: &[&str], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword.split_whitespace().collect();
    if parts.is_empty() || parts.len() > words.len() {
        return false;
    }
    words
        .windows(parts.len())
        .any(|window| window.iter().zip(&parts).all(|(word, part)| word.starts_with(part)))
}

/// Rotation of a level's questions: random order without repeats until the
/// level is exhausted, then a fresh rotation.
#[derive(Debug, Clone)]
pub struct QuestionPool {
    questions: Vec<Question>,
    level: u32,
    available: Vec<usize>,
    rng: fastrand::Rng,
}

impl QuestionPool {
    pub fn new(level: u32, questions: Vec<Question>, seed: u64) -> Self {
        let mut pool = Self {
            questions,
            level,
            available: Vec::new(),
            rng: fastrand::Rng::with_seed(seed),
        };
        pool.reset();
        pool
    }

    /// Next unseen question of the current level. `None` only when the level
    /// has no questions at all.
    pub fn get_next(&mut self) -> Option<Question> {
        if self.available.is_empty() {
            self.reset();
            if self.available.is_empty() {
                log::warn!("no questions available for level {}", self.level);
                return None;
            }
        }
        let slot = self.rng.usize(..self.available.len());
        let index = self.available.swap_remove(slot);
        Some(self.questions[index].clone())
    }

    /// Start a fresh rotation of the current level.
    pub fn reset(&mut self) {
        let level = self.level;
        self.available = self
            .questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.level == level)
            .map(|(i, _)| i)
            .collect();
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
        self.reset();
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Questions left in the current rotation.
    pub fn remaining(&self) -> usize {
        self.available.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn question(id: &str, level: u32, kind: QuestionKind, text: &str) -> Question {
        Question {
            id: id.into(),
            text: text.into(),
            correct_entity_id: "x".into(),
            distractor_count: 2,
            kind,
            level,
            distractor_strategy: None,
        }
    }

    fn pool() -> QuestionPool {
        let questions = vec![
            question("a", 1, QuestionKind::Identification, "?"),
            question("b", 1, QuestionKind::Identification, "?"),
            question("c", 1, QuestionKind::Identification, "?"),
            question("d", 2, QuestionKind::Identification, "?"),
        ];
        QuestionPool::new(1, questions, 7)
    }

    #[test]
    fn full_rotation_before_repeat() {
        let mut pool = pool();
        for _ in 0..4 {
            let ids: HashSet<_> = (0..3).filter_map(|_| pool.get_next()).map(|q| q.id).collect();
            assert_eq!(ids.len(), 3);
            assert!(!ids.contains("d"));
        }
    }

    #[test]
    fn never_permanently_empty() {
        let mut pool = pool();
        for _ in 0..20 {
            assert!(pool.get_next().is_some());
        }
    }

    #[test]
    fn empty_level_yields_none() {
        let mut pool = pool();
        pool.set_level(9);
        assert_eq!(pool.get_next(), None);
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn set_level_switches_rotation() {
        let mut pool = pool();
        pool.set_level(2);
        assert_eq!(pool.get_next().map(|q| q.id), Some("d".to_string()));
    }

    #[test]
    fn same_seed_same_order() {
        let mut a = pool();
        let mut b = pool();
        for _ in 0..6 {
            assert_eq!(a.get_next(), b.get_next());
        }
    }

    #[test]
    fn strategies_from_kind_and_keywords() {
        let q = question("a", 1, QuestionKind::Habitat, "Which beetle is the biggest?");
        assert_eq!(
            q.strategies(),
            vec![DistractorStrategy::DifferentHabitat, DistractorStrategy::SameSize]
        );

        let q = question("b", 1, QuestionKind::Behavior, "Which beetle can snap a pencil?");
        assert_eq!(q.strategies(), vec![DistractorStrategy::SameHabitat]);
    }

    #[test]
    fn keywords_match_word_starts_only() {
        let q = question("a", 1, QuestionKind::Comparison, "Which great beetle can deliver a bite?");
        assert_eq!(q.strategies(), vec![DistractorStrategy::SameSize]);

        let q = question("b", 1, QuestionKind::Comparison, "What does it eat, and where is it found in the forest?");
        assert_eq!(
            q.strategies(),
            vec![
                DistractorStrategy::DifferentHabitat,
                DistractorStrategy::SameSize,
                DistractorStrategy::SameHabitat,
            ]
        );

        let q = question("c", 1, QuestionKind::Comparison, "Which ant lives underground?");
        assert!(q.strategies().contains(&DistractorStrategy::DifferentHabitat));
    }

    #[test]
    fn explicit_strategy_wins() {
        let mut q = question("a", 1, QuestionKind::Identification, "Where does it live?");
        q.distractor_strategy = Some(DistractorStrategy::SameSize);
        assert_eq!(q.strategies(), vec![DistractorStrategy::SameSize]);
    }

    #[test]
    fn parses_with_defaults() {
        let json = r#"{
            "id": "q", "text": "?", "correct_entity_id": "x",
            "distractor_count": 3, "level": 1
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.kind, QuestionKind::Identification);
        assert_eq!(q.distractor_strategy, None);

        let json = r#"{
            "id": "q", "text": "?", "correct_entity_id": "x", "distractor_count": 1,
            "level": 1, "kind": "comparison", "distractor_strategy": "different_habitat"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.kind, QuestionKind::Comparison);
        assert_eq!(q.distractor_strategy, Some(DistractorStrategy::DifferentHabitat));
    }
}
