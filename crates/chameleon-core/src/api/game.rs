use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{GameEvent, SoundEvent};
use crate::core::time::{Clock, FrameTime};
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;

/// Tongue timing and reach. Durations in milliseconds, lengths in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TongueConfig {
    /// Reach at the end of extension, before overshoot.
    pub max_length: f32,
    /// Ease-out extension duration.
    pub extension_ms: f64,
    /// Retraction duration, measured from the peak.
    pub retraction_ms: f64,
    /// Length multiplier applied at the extension peak.
    pub overshoot: f32,
    /// Minimum time between two shots.
    pub cooldown_ms: f64,
    /// Collision radius of the sticky tip.
    pub tip_radius: f32,
    /// Per-frame lerp factor of a caught card chasing the tip.
    pub follow_factor: f32,
}

impl Default for TongueConfig {
    fn default() -> Self {
        Self {
            max_length: 400.0,
            extension_ms: 180.0,
            retraction_ms: 250.0,
            overshoot: 1.05,
            cooldown_ms: 1000.0,
            tip_radius: 12.0,
            follow_factor: 0.3,
        }
    }
}

/// Aiming limits and the rotation response curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    pub min_angle: f32,
    pub max_angle: f32,
    /// Degrees added per aim-left/aim-right step.
    pub step_deg: f32,
    /// Lerp factor pulling angular velocity toward the eased target velocity.
    pub damping: f32,
    /// Frame length the velocity is expressed in (60 fps).
    pub baseline_frame_ms: f32,
    /// Remaining angle above which the chameleon counts as aiming.
    pub aiming_threshold_deg: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            min_angle: -90.0,
            max_angle: 90.0,
            step_deg: 5.0,
            damping: 0.15,
            baseline_frame_ms: 16.67,
            aiming_threshold_deg: 2.0,
        }
    }
}

/// Question scheduling and answer layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Delay before the first question after `start`.
    pub first_question_delay_ms: f64,
    /// Period of the repeating spawn attempt.
    pub question_interval_ms: f64,
    /// Delay between a question appearing and its answers being built.
    pub answer_reveal_delay_ms: f64,
    /// Gap between consecutive answer cards dropping in.
    pub answer_stagger_ms: f64,
    pub max_active_questions: usize,
    /// Horizontal position of question cards.
    pub question_x: f32,
    /// Horizontal band answer cards are spread across.
    pub answer_band_min_x: f32,
    pub answer_band_max_x: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            first_question_delay_ms: 2000.0,
            question_interval_ms: 8000.0,
            answer_reveal_delay_ms: 1500.0,
            answer_stagger_ms: 400.0,
            max_active_questions: 2,
            question_x: 960.0,
            answer_band_min_x: 300.0,
            answer_band_max_x: 1620.0,
        }
    }
}

/// Falling card motion. Speeds in world units per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub question_fall_speed: f32,
    pub answer_fall_speed: f32,
    pub question_start_y: f32,
    pub answer_start_y: f32,
    /// Collision radius of an answer card.
    pub answer_radius: f32,
    /// Per-frame horizontal sway of a falling answer card.
    pub drift_amplitude: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            question_fall_speed: 30.0,
            answer_fall_speed: 40.0,
            question_start_y: -100.0,
            answer_start_y: -50.0,
            answer_radius: 40.0,
            drift_amplitude: 0.3,
        }
    }
}

/// Configuration for a session. Every field has a default; a JSON document
/// only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units. Cards below it are off screen.
    pub world_height: f32,
    /// Where the chameleon sits; also the tongue origin.
    pub chameleon_origin: Vec2,
    pub tongue: TongueConfig,
    pub aim: AimConfig,
    pub spawn: SpawnConfig,
    pub cards: CardConfig,
    pub max_helps_per_level: u32,
    /// Strikes (wrong catches plus missed questions) that end the session.
    pub max_strikes: u32,
    pub points_per_correct: u32,
    /// Seed for every random choice (question order, distractors, shuffles).
    pub seed: u64,
    /// Maximum number of render instances (default: 256).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 1920.0,
            world_height: 1080.0,
            chameleon_origin: Vec2::new(960.0, 950.0),
            tongue: TongueConfig::default(),
            aim: AimConfig::default(),
            spawn: SpawnConfig::default(),
            cards: CardConfig::default(),
            max_helps_per_level: 3,
            max_strikes: 3,
            points_per_correct: 10,
            seed: 42,
            max_instances: 256,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The contract a game fulfils for the runner.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and start schedules.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One frame. The runner has already advanced `ctx.clock`.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only projection into the render buffer.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable engine state passed to `Game::init` and `Game::update`.
pub struct EngineContext {
    pub clock: Clock,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            clock: Clock::new(),
            sounds: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Current frame timing.
    pub fn frame(&self) -> FrameTime {
        self.clock.frame()
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Emit a sound event to be forwarded to the browser.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the browser.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for the read-only render pass.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}
