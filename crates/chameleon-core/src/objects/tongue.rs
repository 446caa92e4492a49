//! The tongue projectile.
//!
//! A tongue has a fixed origin and angle for its whole life and moves through
//! three phases: it extends along an ease-out curve, snaps to a small
//! overshoot at the peak, then retracts along a sine curve back to zero.
//! Catching a card cuts the extension short and retracts from wherever the
//! tip happens to be.

use glam::Vec2;

use crate::api::game::TongueConfig;
use crate::api::types::AnswerId;
use crate::extensions::easing::Easing;

/// Lifecycle phase. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TonguePhase {
    Extending,
    Retracting,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Tongue {
    origin: Vec2,
    angle_deg: f32,
    max_length: f32,
    overshoot: f32,
    extension_ms: f64,
    retraction_ms: f64,
    tip_radius: f32,
    phase: TonguePhase,
    length: f32,
    /// Length retraction starts from: the overshoot peak, or the length at capture.
    peak_length: f32,
    extension_start: f64,
    peak_reached_at: f64,
    captured: Option<AnswerId>,
}

impl Tongue {
    /// Create a tongue already extending from `origin` at `angle_deg`.
    pub fn new(origin: Vec2, angle_deg: f32, now: f64, config: &TongueConfig) -> Self {
        Self {
            origin,
            angle_deg,
            max_length: config.max_length,
            overshoot: config.overshoot,
            extension_ms: config.extension_ms,
            retraction_ms: config.retraction_ms,
            tip_radius: config.tip_radius,
            phase: TonguePhase::Extending,
            length: 0.0,
            peak_length: 0.0,
            extension_start: now,
            peak_reached_at: now,
            captured: None,
        }
    }

    /// Recompute length and phase for timestamp `now`.
    pub fn update(&mut self, now: f64) {
        match self.phase {
            TonguePhase::Extending => self.update_extension(now),
            TonguePhase::Retracting => self.update_retraction(now),
            TonguePhase::Finished => {}
        }
    }

    fn update_extension(&mut self, now: f64) {
        let progress = progress(now - self.extension_start, self.extension_ms);
        self.length = self.max_length * Easing::QuadOut.apply(progress);

        if progress >= 1.0 {
            self.length = self.max_length * self.overshoot;
            self.begin_retraction(now);
            log::trace!("tongue peaked at {:.1}", self.length);
        }
    }

    fn update_retraction(&mut self, now: f64) {
        let progress = progress(now - self.peak_reached_at, self.retraction_ms);
        self.length = self.peak_length * (1.0 - Easing::SineOut.apply(progress));

        if progress >= 1.0 {
            self.length = 0.0;
            self.phase = TonguePhase::Finished;
        }
    }

    fn begin_retraction(&mut self, now: f64) {
        self.phase = TonguePhase::Retracting;
        self.peak_reached_at = now;
        self.peak_length = self.length;
    }

    /// Stick `answer` to the tip. Only the first capture counts, and a
    /// finished tongue catches nothing. Retraction starts at once from the
    /// current length. Returns true if the target was taken.
    pub fn catch_target(&mut self, answer: AnswerId, now: f64) -> bool {
        if self.captured.is_some() || self.phase == TonguePhase::Finished {
            return false;
        }
        self.captured = Some(answer);
        self.begin_retraction(now);
        true
    }

    /// Unit vector along the tongue.
    pub fn direction(&self) -> Vec2 {
        let radians = self.angle_deg.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }

    /// Tip position for the current length.
    pub fn tip(&self) -> Vec2 {
        self.origin + self.direction() * self.length
    }

    /// Whether a circle at `center` with `radius` touches the tip.
    /// Touching exactly at the combined radius does not count.
    pub fn tip_touches(&self, center: Vec2, radius: f32) -> bool {
        self.tip().distance(center) < self.tip_radius + radius
    }

    pub fn phase(&self) -> TonguePhase {
        self.phase
    }

    pub fn is_extending(&self) -> bool {
        self.phase == TonguePhase::Extending
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TonguePhase::Finished
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn max_length(&self) -> f32 {
        self.max_length
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    pub fn tip_radius(&self) -> f32 {
        self.tip_radius
    }

    pub fn captured(&self) -> Option<AnswerId> {
        self.captured
    }

    pub fn extension_start(&self) -> f64 {
        self.extension_start
    }

    pub fn peak_reached_at(&self) -> f64 {
        self.peak_reached_at
    }
}

/// Saturating `elapsed / duration`.
fn progress(elapsed: f64, duration: f64) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0) as f32
}
