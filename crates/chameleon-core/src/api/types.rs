use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::objects::chameleon::Expression;

/// Unique identifier of a falling answer card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerId(pub u32);

/// Unique identifier of a question group (one question plus its answers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

/// A sound event emitted by the game logic.
/// The numeric value maps to a sound in the browser's audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    pub const TONGUE_SHOOT: SoundEvent = SoundEvent(1);
    pub const CATCH_CORRECT: SoundEvent = SoundEvent(2);
    pub const CATCH_WRONG: SoundEvent = SoundEvent(3);
    pub const HELP_ACTIVATE: SoundEvent = SoundEvent(4);
}

/// Observable hooks. The game loop forwards these to the UI, camera and
/// particle layers; the core never reacts to them itself.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A tongue left the mouth. Fired exactly once per tongue.
    TongueShot { origin: Vec2, angle_deg: f32 },
    /// A tongue stuck to an answer card.
    TongueCapture { answer: AnswerId, tip: Vec2 },
    /// The chameleon's face changed.
    ExpressionChanged(Expression),
    /// Help revealed the correct answer of a group.
    HelpHighlight { answer: AnswerId },
    /// A question card started falling.
    QuestionSpawned { group: GroupId },
    /// A group's answer set was built and its cards are being dropped.
    AnswersRevealed { group: GroupId, count: usize },
    /// A caught card was reeled in and scored. `entity_index` is the
    /// entity's position in the catalog.
    CatchResolved {
        entity_id: String,
        entity_index: Option<u32>,
        correct: bool,
    },
    /// A question fell off screen without any of its answers being caught.
    QuestionMissed { group: GroupId },
    /// First correct catch of an entity in this session.
    EntityDiscovered {
        entity_id: String,
        entity_index: Option<u32>,
    },
    /// Strikes reached the limit.
    GameOver { score: u32 },
}

impl GameEvent {
    pub const KIND_TONGUE_SHOT: f32 = 1.0;
    pub const KIND_TONGUE_CAPTURE: f32 = 2.0;
    pub const KIND_EXPRESSION: f32 = 3.0;
    pub const KIND_HELP_HIGHLIGHT: f32 = 4.0;
    pub const KIND_QUESTION_SPAWNED: f32 = 5.0;
    pub const KIND_ANSWERS_REVEALED: f32 = 6.0;
    pub const KIND_CATCH_RESOLVED: f32 = 7.0;
    pub const KIND_QUESTION_MISSED: f32 = 8.0;
    pub const KIND_ENTITY_DISCOVERED: f32 = 9.0;
    pub const KIND_GAME_OVER: f32 = 10.0;

    /// Flatten into the fixed-size form read by the browser.
    /// String payloads do not cross the buffer. Entities travel as their
    /// catalog index (-1 if unknown), which the UI resolves through
    /// `get_entity_id`.
    pub fn to_wire(&self) -> WireEvent {
        match self {
            GameEvent::TongueShot { origin, angle_deg } => {
                WireEvent::new(Self::KIND_TONGUE_SHOT, origin.x, origin.y, *angle_deg)
            }
            GameEvent::TongueCapture { answer, tip } => {
                WireEvent::new(Self::KIND_TONGUE_CAPTURE, answer.0 as f32, tip.x, tip.y)
            }
            GameEvent::ExpressionChanged(expression) => {
                WireEvent::new(Self::KIND_EXPRESSION, expression.index() as f32, 0.0, 0.0)
            }
            GameEvent::HelpHighlight { answer } => {
                WireEvent::new(Self::KIND_HELP_HIGHLIGHT, answer.0 as f32, 0.0, 0.0)
            }
            GameEvent::QuestionSpawned { group } => {
                WireEvent::new(Self::KIND_QUESTION_SPAWNED, group.0 as f32, 0.0, 0.0)
            }
            GameEvent::AnswersRevealed { group, count } => {
                WireEvent::new(Self::KIND_ANSWERS_REVEALED, group.0 as f32, *count as f32, 0.0)
            }
            GameEvent::CatchResolved {
                entity_index, correct, ..
            } => {
                let flag = if *correct { 1.0 } else { 0.0 };
                WireEvent::new(Self::KIND_CATCH_RESOLVED, flag, wire_index(*entity_index), 0.0)
            }
            GameEvent::QuestionMissed { group } => {
                WireEvent::new(Self::KIND_QUESTION_MISSED, group.0 as f32, 0.0, 0.0)
            }
            GameEvent::EntityDiscovered { entity_index, .. } => {
                WireEvent::new(Self::KIND_ENTITY_DISCOVERED, wire_index(*entity_index), 0.0, 0.0)
            }
            GameEvent::GameOver { score } => {
                WireEvent::new(Self::KIND_GAME_OVER, *score as f32, 0.0, 0.0)
            }
        }
    }
}

fn wire_index(index: Option<u32>) -> f32 {
    index.map_or(-1.0, |i| i as f32)
}

/// A game event as written to the shared buffer: `kind` identifies the
/// event, `a/b/c` carry its payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
