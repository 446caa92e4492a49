//! One play session: the frame loop that ties the chameleon, the spawner and
//! the bookkeeping services together.

use glam::Vec2;

use crate::api::game::{EngineContext, Game, GameConfig, RenderContext};
use crate::api::types::{GameEvent, GroupId, SoundEvent};
use crate::content::{Content, QuestionPool};
use crate::input::queue::{keys, HeldKeys, InputEvent, InputQueue};
use crate::objects::chameleon::{Chameleon, Expression};
use crate::renderer::projection::build_render_buffer;
use crate::services::{Encyclopedia, HelpState, Outcome, ScoreBoard};
use crate::spawn::{CatchResolution, SpawnCoordinator};

/// `kind` values of `InputEvent::Custom` sent by the UI overlay.
pub mod custom {
    pub const USE_HELP: u32 = 1;
    pub const RESTART: u32 = 2;
}

pub struct ChameleonQuest {
    config: GameConfig,
    content: Content,
    level: u32,
    chameleon: Chameleon,
    spawner: SpawnCoordinator,
    /// Card stuck to the tongue, scored when the tongue is reeled in.
    caught: Option<CatchResolution>,
    held: HeldKeys,
    score: ScoreBoard,
    help: HelpState,
    encyclopedia: Encyclopedia,
    game_over: bool,
    /// Clock reading of the last update.
    now: f64,
}

impl ChameleonQuest {
    pub fn new(config: GameConfig, content: Content, level: u32) -> Self {
        let chameleon = new_chameleon(&config);
        let spawner = new_spawner(&config, &content, level);
        Self {
            score: ScoreBoard::new(config.points_per_correct, config.max_strikes),
            help: HelpState::new(config.max_helps_per_level),
            config,
            content,
            level,
            chameleon,
            spawner,
            caught: None,
            held: HeldKeys::default(),
            encyclopedia: Encyclopedia::new(),
            game_over: false,
            now: 0.0,
        }
    }

    /// Reset everything but the encyclopedia and start spawning again.
    pub fn restart(&mut self, now: f64) {
        self.spawner.destroy();
        self.spawner = new_spawner(&self.config, &self.content, self.level);
        self.chameleon = new_chameleon(&self.config);
        self.caught = None;
        self.held.release_all();
        self.score.reset();
        self.help.reset();
        self.game_over = false;
        self.spawner.start(now);
        log::info!("session restarted at level {}", self.level);
    }

    /// Swap in new content and restart on it.
    pub fn replace_content(&mut self, content: Content, now: f64) {
        self.content = content;
        self.restart(now);
    }

    /// Switch level. Takes effect from the next spawned question.
    pub fn set_level(&mut self, level: u32) {
        self.level = level;
        self.spawner.set_level(level);
        self.help.reset();
    }

    // -- Input --

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        if let InputEvent::Custom { kind: custom::RESTART, .. } = event {
            self.restart(ctx.now());
            return;
        }
        if self.game_over {
            return;
        }
        if self.held.apply(event) {
            return;
        }
        match *event {
            InputEvent::PointerMove { x, y } => self.chameleon.aim_at_point(Vec2::new(x, y)),
            InputEvent::PointerDown { x, y } => {
                self.chameleon.aim_at_point(Vec2::new(x, y));
                self.request_shot(ctx.now());
            }
            InputEvent::KeyDown { key_code: keys::SPACE } => self.request_shot(ctx.now()),
            InputEvent::Custom { kind: custom::USE_HELP, .. } => self.use_help(ctx),
            _ => {}
        }
    }

    fn request_shot(&mut self, now: f64) {
        if self.chameleon.is_cooling_down(now) {
            self.chameleon.buffer_input();
        } else {
            self.chameleon.shoot_tongue(now);
        }
    }

    fn use_help(&mut self, ctx: &mut EngineContext) {
        if !self.help.use_help() {
            log::debug!("help exhausted");
            return;
        }
        if self.spawner.highlight_correct().is_some() {
            ctx.emit_sound(SoundEvent::HELP_ACTIVATE);
        } else {
            self.help.refund();
            log::debug!("help refunded: no answers on screen");
        }
    }

    fn apply_held_keys(&mut self) {
        match (self.held.left, self.held.right) {
            (true, false) => self.chameleon.aim_left(),
            (false, true) => self.chameleon.aim_right(),
            _ => {}
        }
    }

    // -- Catching --

    fn check_capture(&mut self, now: f64) {
        if self.caught.is_some() {
            return;
        }
        let Some(tongue) = self.chameleon.tongue() else {
            return;
        };
        if !tongue.is_extending() || tongue.captured().is_some() {
            return;
        }
        let Some(answer) = self.spawner.find_overlap(tongue.tip(), tongue.tip_radius()) else {
            return;
        };
        if self.chameleon.catch_target(answer, now) {
            self.caught = self.spawner.resolve_catch(answer);
        }
    }

    fn follow_tip(&mut self) {
        let (Some(caught), Some(tongue)) = (self.caught.as_mut(), self.chameleon.tongue()) else {
            return;
        };
        caught.card.follow(tongue.tip(), self.config.tongue.follow_factor);
    }

    fn settle_catch(&mut self, ctx: &mut EngineContext) {
        let Some(resolution) = self.caught.take() else {
            return;
        };
        let correct = resolution.is_correct();
        let entity_id = resolution.card.entity_id;
        let entity_index = self.entity_index(&entity_id);

        let ended = if correct {
            self.chameleon.set_expression(Expression::Happy);
            ctx.emit_sound(SoundEvent::CATCH_CORRECT);
            if self.encyclopedia.unlock(&entity_id) {
                ctx.emit_event(GameEvent::EntityDiscovered {
                    entity_id: entity_id.clone(),
                    entity_index,
                });
            }
            self.score.record(Outcome::Correct)
        } else {
            self.chameleon.set_expression(Expression::Sad);
            ctx.emit_sound(SoundEvent::CATCH_WRONG);
            self.score.record(Outcome::Incorrect)
        };
        log::debug!("caught {} ({})", entity_id, if correct { "correct" } else { "wrong" });
        ctx.emit_event(GameEvent::CatchResolved {
            entity_id,
            entity_index,
            correct,
        });

        if ended {
            self.end_game(ctx);
        }
    }

    fn entity_index(&self, entity_id: &str) -> Option<u32> {
        self.content.catalog.index_of(entity_id).map(|i| i as u32)
    }

    fn record_miss(&mut self, ctx: &mut EngineContext, group: GroupId) {
        self.chameleon.set_expression(Expression::Sad);
        ctx.emit_event(GameEvent::QuestionMissed { group });
        if self.score.record(Outcome::Missed) {
            self.end_game(ctx);
        }
    }

    fn end_game(&mut self, ctx: &mut EngineContext) {
        self.game_over = true;
        self.spawner.stop();
        self.held.release_all();
        self.chameleon.clear_buffered_input();
        log::info!("game over with score {}", self.score.score());
        ctx.emit_event(GameEvent::GameOver {
            score: self.score.score(),
        });
    }

    fn forward_events(&mut self, ctx: &mut EngineContext) {
        for event in self.chameleon.drain_events() {
            if let GameEvent::TongueShot { .. } = event {
                ctx.emit_sound(SoundEvent::TONGUE_SHOOT);
            }
            ctx.emit_event(event);
        }
        for event in self.spawner.drain_events() {
            ctx.emit_event(event);
        }
    }

    // -- Accessors --

    pub fn chameleon(&self) -> &Chameleon {
        &self.chameleon
    }

    pub fn spawner(&self) -> &SpawnCoordinator {
        &self.spawner
    }

    /// The card currently stuck to the tongue.
    pub fn caught(&self) -> Option<&CatchResolution> {
        self.caught.as_ref()
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn help(&self) -> &HelpState {
        &self.help
    }

    pub fn encyclopedia(&self) -> &Encyclopedia {
        &self.encyclopedia
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Timestamp of the last update.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn content(&self) -> &Content {
        &self.content
    }
}

impl Default for ChameleonQuest {
    fn default() -> Self {
        Self::new(GameConfig::default(), Content::builtin(), 1)
    }
}

impl Game for ChameleonQuest {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.now = ctx.now();
        self.spawner.start(self.now);
        log::info!("session started at level {}", self.level);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let frame = ctx.frame();
        self.now = frame.now;

        for event in input.iter() {
            self.handle_input(ctx, event);
        }
        if !self.game_over {
            self.apply_held_keys();
        }

        // Rotation, buffered shot and the tongue itself, before any collision.
        if self.chameleon.update(frame).is_some() {
            self.settle_catch(ctx);
        }
        if !self.game_over {
            self.check_capture(frame.now);
        }
        self.follow_tip();

        for group in self.spawner.update(frame.now, frame.delta) {
            if self.game_over {
                break;
            }
            self.record_miss(ctx, group);
        }

        self.forward_events(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        build_render_buffer(self, ctx.render_buffer);
    }
}

fn new_chameleon(config: &GameConfig) -> Chameleon {
    Chameleon::new(config.chameleon_origin, config.aim.clone(), config.tongue.clone())
}

fn new_spawner(config: &GameConfig, content: &Content, level: u32) -> SpawnCoordinator {
    let pool = QuestionPool::new(level, content.questions.clone(), config.seed);
    SpawnCoordinator::new(
        config.spawn.clone(),
        config.cards.clone(),
        config.world_height,
        content.catalog.clone(),
        pool,
        config.seed.wrapping_add(1),
    )
}
