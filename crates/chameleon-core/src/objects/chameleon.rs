//! The chameleon: eased aiming, shot cooldown and input buffering.
//!
//! Angles are in degrees and clamped to the configured range on every
//! mutation. The current angle is never assigned directly after
//! construction; it chases the target through a damped velocity so the head
//! swings quickly toward far targets and settles softly on near ones.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::game::{AimConfig, TongueConfig};
use crate::api::types::{AnswerId, GameEvent};
use crate::core::time::FrameTime;
use crate::extensions::easing::lerp;
use crate::objects::tongue::Tongue;

/// Facial expression shown on the head sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    #[default]
    Neutral,
    Happy,
    Sad,
    Thinking,
}

impl Expression {
    /// Stable index used by the render and event buffers.
    pub fn index(self) -> u32 {
        match self {
            Expression::Neutral => 0,
            Expression::Happy => 1,
            Expression::Sad => 2,
            Expression::Thinking => 3,
        }
    }
}

/// Aiming state. Both angles stay within the configured limits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AimState {
    pub current_deg: f32,
    pub target_deg: f32,
    pub angular_velocity: f32,
}

pub struct Chameleon {
    position: Vec2,
    aim: AimState,
    aim_config: AimConfig,
    tongue_config: TongueConfig,
    tongue: Option<Tongue>,
    /// `None` until the first shot, which behaves like a shot at -infinity.
    last_shot_at: Option<f64>,
    input_buffer: bool,
    aiming: bool,
    cooling_down: bool,
    expression: Expression,
    events: Vec<GameEvent>,
}

impl Chameleon {
    pub fn new(position: Vec2, aim_config: AimConfig, tongue_config: TongueConfig) -> Self {
        Self {
            position,
            aim: AimState::default(),
            aim_config,
            tongue_config,
            tongue: None,
            last_shot_at: None,
            input_buffer: false,
            aiming: false,
            cooling_down: false,
            expression: Expression::Neutral,
            events: Vec::new(),
        }
    }

    fn clamp_angle(&self, degrees: f32) -> f32 {
        degrees.clamp(self.aim_config.min_angle, self.aim_config.max_angle)
    }

    // -- Aiming --

    pub fn aim_left(&mut self) {
        self.aim.target_deg = self.clamp_angle(self.aim.target_deg - self.aim_config.step_deg);
    }

    pub fn aim_right(&mut self) {
        self.aim.target_deg = self.clamp_angle(self.aim.target_deg + self.aim_config.step_deg);
    }

    /// Aim at a world point: the bearing from the chameleon in degrees, less
    /// 90, clamped. Non-finite input leaves the target untouched.
    pub fn aim_at_point(&mut self, point: Vec2) {
        let to = point - self.position;
        let degrees = to.y.atan2(to.x).to_degrees() - 90.0;
        if degrees.is_finite() {
            self.aim.target_deg = self.clamp_angle(degrees);
        }
    }

    // -- Frame update --

    /// Advance one frame: rotation first, then a buffered shot if one is now
    /// legal, then the live tongue. Returns the card a tongue finished
    /// reeling in on this frame, if any.
    pub fn update(&mut self, frame: FrameTime) -> Option<AnswerId> {
        self.update_rotation(frame.delta);
        self.update_aiming_state();

        if self.input_buffer && self.tongue.is_none() && !self.is_cooling_down(frame.now) {
            log::debug!("firing buffered shot at {:.0}ms", frame.now);
            self.shoot_tongue(frame.now);
        }

        let tongue = self.tongue.as_mut()?;
        tongue.update(frame.now);
        if !tongue.is_finished() {
            return None;
        }

        let reeled_in = tongue.captured();
        self.tongue = None;
        self.set_cooling_down(false);
        reeled_in
    }

    fn update_rotation(&mut self, delta: f64) {
        let diff = self.aim.target_deg - self.aim.current_deg;
        let ease = rotation_ease(diff.abs());

        self.aim.angular_velocity = lerp(self.aim.angular_velocity, diff * ease, self.aim_config.damping);

        let frame_velocity = self.aim.angular_velocity * (delta as f32 / self.aim_config.baseline_frame_ms);
        self.aim.current_deg = self.clamp_angle(self.aim.current_deg + frame_velocity);
    }

    fn update_aiming_state(&mut self) {
        self.aiming = (self.aim.target_deg - self.aim.current_deg).abs() > self.aim_config.aiming_threshold_deg;
    }

    // -- Shooting --

    /// Fire a tongue at the current angle. Rejected (and remembered in the
    /// input buffer) while a tongue is live or the cooldown is running.
    pub fn shoot_tongue(&mut self, now: f64) -> bool {
        if self.tongue.is_some() || self.is_cooling_down(now) {
            self.input_buffer = true;
            return false;
        }

        self.input_buffer = false;
        let tongue = Tongue::new(self.position, self.aim.current_deg, now, &self.tongue_config);
        self.events.push(GameEvent::TongueShot {
            origin: tongue.origin(),
            angle_deg: tongue.angle_deg(),
        });
        self.tongue = Some(tongue);
        self.last_shot_at = Some(now);
        self.set_cooling_down(true);
        true
    }

    /// Remember a shot request so the next legal frame fires it.
    pub fn buffer_input(&mut self) {
        self.input_buffer = true;
    }

    /// Forget a pending shot request.
    pub fn clear_buffered_input(&mut self) {
        self.input_buffer = false;
    }

    pub fn is_cooling_down(&self, now: f64) -> bool {
        self.last_shot_at
            .is_some_and(|shot| now - shot < self.tongue_config.cooldown_ms)
    }

    /// Milliseconds until the next shot is allowed (zero when ready).
    pub fn cooldown_remaining(&self, now: f64) -> f64 {
        self.last_shot_at
            .map_or(0.0, |shot| (self.tongue_config.cooldown_ms - (now - shot)).max(0.0))
    }

    /// Remaining cooldown as a fraction of the full cooldown, in [0, 1].
    pub fn cooldown_fraction(&self, now: f64) -> f32 {
        if self.tongue_config.cooldown_ms <= 0.0 {
            return 0.0;
        }
        (self.cooldown_remaining(now) / self.tongue_config.cooldown_ms).clamp(0.0, 1.0) as f32
    }

    /// Stick `answer` to the live tongue. Emits the capture hook on success.
    pub fn catch_target(&mut self, answer: AnswerId, now: f64) -> bool {
        let Some(tongue) = self.tongue.as_mut() else {
            return false;
        };
        if !tongue.catch_target(answer, now) {
            return false;
        }
        self.events.push(GameEvent::TongueCapture { answer, tip: tongue.tip() });
        true
    }

    // -- Expression --

    fn set_cooling_down(&mut self, cooling: bool) {
        self.cooling_down = cooling;
        if cooling {
            self.set_expression(Expression::Thinking);
        } else {
            self.set_expression(Expression::Neutral);
        }
    }

    /// Change expression. Returns false (and emits nothing) if unchanged.
    pub fn set_expression(&mut self, expression: Expression) -> bool {
        if self.expression == expression {
            return false;
        }
        self.expression = expression;
        self.events.push(GameEvent::ExpressionChanged(expression));
        true
    }

    /// Take the hooks emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Accessors --

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn aim(&self) -> AimState {
        self.aim
    }

    pub fn current_angle(&self) -> f32 {
        self.aim.current_deg
    }

    pub fn target_angle(&self) -> f32 {
        self.aim.target_deg
    }

    pub fn is_aiming(&self) -> bool {
        self.aiming
    }

    /// Whether the cooldown visual (thinking face, ring) is showing. Lasts
    /// from a shot until its tongue finishes, not for the full cooldown.
    pub fn shows_cooldown(&self) -> bool {
        self.cooling_down
    }

    pub fn expression(&self) -> Expression {
        self.expression
    }

    pub fn tongue(&self) -> Option<&Tongue> {
        self.tongue.as_ref()
    }

    pub fn has_buffered_input(&self) -> bool {
        self.input_buffer
    }

    pub fn last_shot_at(&self) -> Option<f64> {
        self.last_shot_at
    }
}

/// Quadratic response: up to twice the pull for differences of 90 degrees or more.
fn rotation_ease(abs_diff: f32) -> f32 {
    let normalized = (abs_diff / 90.0).min(1.0);
    1.0 + normalized * normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::tongue::TonguePhase;

    fn chameleon() -> Chameleon {
        Chameleon::new(Vec2::new(960.0, 950.0), AimConfig::default(), TongueConfig::default())
    }

    fn frame(now: f64, delta: f64) -> FrameTime {
        FrameTime::new(now, delta)
    }

    #[test]
    fn starts_at_rest() {
        let c = chameleon();
        assert_eq!(c.aim(), AimState::default());
        assert_eq!(c.expression(), Expression::Neutral);
        assert!(c.tongue().is_none());
        assert!(!c.is_cooling_down(0.0));
    }

    #[test]
    fn aim_steps_and_clamps() {
        let mut c = chameleon();
        for _ in 0..3 {
            c.aim_left();
        }
        assert_eq!(c.target_angle(), -15.0);
        for _ in 0..20 {
            c.aim_left();
        }
        assert_eq!(c.target_angle(), -90.0);
        c.aim_left();
        assert_eq!(c.target_angle(), -90.0);
        for _ in 0..40 {
            c.aim_right();
        }
        assert_eq!(c.target_angle(), 90.0);
    }

    #[test]
    fn aim_at_point_bearing() {
        let mut c = chameleon();
        c.aim_at_point(Vec2::new(960.0, 1200.0));
        assert!(c.target_angle().abs() < 1e-4);

        c.aim_at_point(Vec2::new(1200.0, 950.0 + 240.0));
        assert!((c.target_angle() + 45.0).abs() < 1e-3);

        c.aim_at_point(Vec2::new(960.0, 100.0));
        assert_eq!(c.target_angle(), -90.0);

        // Slightly below and far left: just under the right-hand limit.
        c.aim_at_point(Vec2::new(100.0, 951.0));
        assert!((c.target_angle() - 90.0).abs() < 0.1);

        // Slightly above and far left wraps past -180 and clamps left.
        c.aim_at_point(Vec2::new(100.0, 940.0));
        assert_eq!(c.target_angle(), -90.0);
    }

    #[test]
    fn aim_at_point_ignores_nan() {
        let mut c = chameleon();
        c.aim_right();
        c.aim_at_point(Vec2::new(f32::NAN, 3.0));
        assert_eq!(c.target_angle(), 5.0);
    }

    #[test]
    fn angles_stay_clamped_through_updates() {
        let mut c = chameleon();
        let mut now = 0.0;
        let points = [
            Vec2::new(0.0, 2000.0),
            Vec2::new(5000.0, 960.0),
            Vec2::new(-4000.0, 940.0),
            Vec2::new(960.0, -5000.0),
        ];
        for (i, point) in points.iter().cycle().take(200).enumerate() {
            if i % 3 == 0 {
                c.aim_at_point(*point);
            } else if i % 3 == 1 {
                c.aim_left();
            } else {
                c.aim_right();
            }
            now += 50.0;
            c.update(frame(now, 50.0));
            let aim = c.aim();
            assert!((-90.0..=90.0).contains(&aim.current_deg), "{:?}", aim);
            assert!((-90.0..=90.0).contains(&aim.target_deg), "{:?}", aim);
        }
    }

    #[test]
    fn first_frame_matches_reference_curve() {
        let mut c = chameleon();
        for _ in 0..6 {
            c.aim_right();
        }
        c.update(frame(16.67, 16.67));
        // diff 30 -> ease 1 + (1/3)^2, velocity = 0.15 * 30 * ease
        let ease = 1.0 + (30.0f32 / 90.0).powi(2);
        let expected = 0.15 * 30.0 * ease;
        assert!((c.current_angle() - expected).abs() < 1e-3, "got {}", c.current_angle());
        assert!((c.aim().angular_velocity - expected).abs() < 1e-3);
    }

    #[test]
    fn frame_rate_independent_displacement() {
        let mut slow = chameleon();
        let mut fast = chameleon();
        for c in [&mut slow, &mut fast] {
            for _ in 0..9 {
                c.aim_right();
            }
        }
        slow.update(frame(33.33, 33.33));
        fast.update(frame(16.67, 16.67));
        let ratio = slow.current_angle() / fast.current_angle();
        assert!((ratio - 2.0).abs() < 0.2, "ratio {}", ratio);
    }

    #[test]
    fn converges_on_target() {
        let mut c = chameleon();
        for _ in 0..6 {
            c.aim_right();
        }
        let mut now = 0.0;
        for _ in 0..300 {
            now += 16.67;
            c.update(frame(now, 16.67));
        }
        assert!((c.current_angle() - 30.0).abs() < 0.1, "got {}", c.current_angle());
        assert!(!c.is_aiming());
    }

    #[test]
    fn aiming_flag_tracks_remaining_angle() {
        let mut c = chameleon();
        c.update(frame(16.67, 16.67));
        assert!(!c.is_aiming());
        for _ in 0..8 {
            c.aim_left();
        }
        c.update(frame(33.34, 16.67));
        assert!(c.is_aiming());
    }

    #[test]
    fn shoot_starts_cooldown_and_thinking() {
        let mut c = chameleon();
        assert!(c.shoot_tongue(0.0));
        assert!(c.tongue().is_some());
        assert_eq!(c.expression(), Expression::Thinking);
        assert!(c.shows_cooldown());
        let events = c.drain_events();
        assert!(matches!(events[0], GameEvent::TongueShot { .. }));
        assert_eq!(events[1], GameEvent::ExpressionChanged(Expression::Thinking));
    }

    #[test]
    fn shot_hook_fires_once_per_tongue() {
        let mut c = chameleon();
        c.shoot_tongue(0.0);
        c.shoot_tongue(10.0);
        c.shoot_tongue(20.0);
        let shots = c
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::TongueShot { .. }))
            .count();
        assert_eq!(shots, 1);
    }

    #[test]
    fn cooldown_boundary_is_exact() {
        for t0 in [0.0, 777.0, 1_000_000.0, 123_456_789.0] {
            let mut c = chameleon();
            assert!(c.shoot_tongue(t0));
            assert!(c.is_cooling_down(t0 + 999.0));
            assert!(!c.is_cooling_down(t0 + 1000.0));
        }
    }

    #[test]
    fn shooting_with_live_tongue_buffers() {
        let mut c = chameleon();
        assert!(c.shoot_tongue(0.0));
        assert!(!c.has_buffered_input());
        assert!(!c.shoot_tongue(100.0));
        assert!(c.has_buffered_input());
    }

    #[test]
    fn buffered_shot_fires_after_cooldown() {
        let mut c = chameleon();
        assert!(c.shoot_tongue(0.0));
        assert!(!c.shoot_tongue(500.0));

        c.update(frame(180.0, 180.0));
        c.update(frame(430.0, 250.0));
        assert!(c.tongue().is_none());
        assert_eq!(c.expression(), Expression::Neutral);
        assert!(c.has_buffered_input());

        c.update(frame(999.0, 569.0));
        assert!(c.tongue().is_none());

        c.update(frame(1000.0, 1.0));
        let tongue = c.tongue().expect("buffered shot should fire");
        assert_eq!(tongue.extension_start(), 1000.0);
        assert_eq!(c.last_shot_at(), Some(1000.0));
        assert!(!c.has_buffered_input());
    }

    #[test]
    fn buffer_waits_for_live_tongue() {
        let mut c = chameleon();
        c.shoot_tongue(0.0);
        c.buffer_input();
        // Cooldown has elapsed, but the tongue was never advanced past extension.
        c.update(frame(1500.0, 16.0));
        assert!(c.has_buffered_input());
        assert_eq!(c.last_shot_at(), Some(0.0));
    }

    #[test]
    fn manual_buffer_fires_on_next_update() {
        let mut c = chameleon();
        c.buffer_input();
        c.update(frame(16.0, 16.0));
        assert!(c.tongue().is_some());
        assert_eq!(c.tongue().map(|t| t.phase()), Some(TonguePhase::Extending));
    }

    #[test]
    fn tongue_keeps_angle_while_head_turns() {
        let mut c = chameleon();
        c.shoot_tongue(0.0);
        for _ in 0..10 {
            c.aim_left();
        }
        c.update(frame(16.0, 16.0));
        assert!(c.current_angle() < 0.0);
        assert_eq!(c.tongue().map(|t| t.angle_deg()), Some(0.0));
    }

    #[test]
    fn capture_is_reported_when_reeled_in() {
        let mut c = chameleon();
        c.shoot_tongue(0.0);
        c.update(frame(60.0, 60.0));
        assert!(c.catch_target(AnswerId(4), 60.0));
        assert!(!c.catch_target(AnswerId(5), 61.0));
        assert!(c
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::TongueCapture { answer: AnswerId(4), .. })));

        assert_eq!(c.update(frame(200.0, 140.0)), None);
        assert_eq!(c.update(frame(310.0, 110.0)), Some(AnswerId(4)));
        assert!(c.tongue().is_none());
    }

    #[test]
    fn catch_without_tongue_is_rejected() {
        let mut c = chameleon();
        assert!(!c.catch_target(AnswerId(1), 0.0));
    }

    #[test]
    fn expression_change_is_idempotent() {
        let mut c = chameleon();
        assert!(c.set_expression(Expression::Happy));
        assert!(!c.set_expression(Expression::Happy));
        assert_eq!(c.drain_events(), vec![GameEvent::ExpressionChanged(Expression::Happy)]);
    }

    #[test]
    fn cooldown_remaining_counts_down() {
        let mut c = chameleon();
        assert_eq!(c.cooldown_remaining(0.0), 0.0);
        c.shoot_tongue(100.0);
        assert_eq!(c.cooldown_remaining(600.0), 500.0);
        assert_eq!(c.cooldown_remaining(5000.0), 0.0);
    }
}
