//! Content shipped with the game: the rainforest insects of levels 1 and 2.

use super::catalog::{CatalogEntity, SizeClass};
use super::questions::{Question, QuestionKind};

fn entity(
    id: &str,
    name: &str,
    tier: u32,
    habitat: &str,
    size: SizeClass,
    color: &str,
    facts: &[&str],
) -> CatalogEntity {
    CatalogEntity {
        id: id.to_string(),
        name: name.to_string(),
        difficulty_tier: tier,
        habitat: habitat.to_string(),
        size,
        color_category: color.to_string(),
        facts: facts.iter().map(|f| f.to_string()).collect(),
    }
}

fn question(id: &str, text: &str, correct: &str, kind: QuestionKind, level: u32) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        correct_entity_id: correct.to_string(),
        distractor_count: 2,
        kind,
        level,
        distractor_strategy: None,
    }
}

pub fn entities() -> Vec<CatalogEntity> {
    use SizeClass::*;
    vec![
        entity(
            "hercules-beetle",
            "Hercules Beetle",
            1,
            "forest floor",
            Large,
            "blue",
            &[
                "This incredible beetle can lift 850 times its own weight!",
                "Male hercules beetles have giant horns for fighting.",
            ],
        ),
        entity(
            "glass-wing-butterfly",
            "Glass-winged Butterfly",
            1,
            "canopy",
            Medium,
            "violet",
            &["Wings are completely transparent!"],
        ),
        entity(
            "titan-beetle",
            "Titan Beetle",
            1,
            "forest floor",
            Large,
            "blue",
            &[
                "Titan beetles are the largest beetles in the Amazon!",
                "They can snap a pencil with their strong jaws.",
            ],
        ),
        entity(
            "blue-morpho-butterfly",
            "Blue Morpho Butterfly",
            1,
            "canopy",
            Medium,
            "violet",
            &["Their blue color comes from reflected light, not pigment."],
        ),
        entity(
            "rainbow-scarab",
            "Rainbow Scarab",
            1,
            "forest floor",
            Small,
            "blue",
            &["They help the forest by eating waste."],
        ),
        entity(
            "leafcutter-ant",
            "Leafcutter Ant",
            2,
            "understory",
            Tiny,
            "red",
            &["Leafcutter ants farm fungus on the leaves they carry."],
        ),
        entity(
            "bullet-ant",
            "Bullet Ant",
            2,
            "forest floor",
            Small,
            "black",
            &["Its sting is one of the most painful in the insect world."],
        ),
        entity(
            "army-ant",
            "Army Ant",
            2,
            "forest floor",
            Tiny,
            "red",
            &["Army ants build living bridges out of their own bodies."],
        ),
        entity(
            "orchid-bee",
            "Orchid Bee",
            2,
            "canopy",
            Small,
            "green",
            &["Male orchid bees collect perfume from flowers."],
        ),
    ]
}

pub fn questions() -> Vec<Question> {
    use QuestionKind::*;
    vec![
        question(
            "hercules-1",
            "Which insect can lift 850 times its own weight?",
            "hercules-beetle",
            Identification,
            1,
        ),
        question(
            "glass-wing-1",
            "Which insect has wings you can see through?",
            "glass-wing-butterfly",
            Identification,
            1,
        ),
        question(
            "titan-1",
            "Which beetle can snap a pencil with its jaws?",
            "titan-beetle",
            Behavior,
            1,
        ),
        question(
            "morpho-1",
            "Which butterfly's blue color comes from reflected light?",
            "blue-morpho-butterfly",
            Behavior,
            1,
        ),
        question(
            "scarab-1",
            "Which beetle shines like a rainbow?",
            "rainbow-scarab",
            Identification,
            1,
        ),
        question(
            "leafcutter-1",
            "Which ant grows its own food from leaves?",
            "leafcutter-ant",
            Behavior,
            2,
        ),
        question(
            "bullet-1",
            "Which ant has the most painful sting?",
            "bullet-ant",
            Identification,
            2,
        ),
        question(
            "army-1",
            "Which ant builds bridges with its body?",
            "army-ant",
            Behavior,
            2,
        ),
        question(
            "orchid-1",
            "Which insect lives high in the canopy collecting perfume?",
            "orchid-bee",
            Habitat,
            2,
        ),
    ]
}
