//! Falling question and answer cards.

use glam::Vec2;

use crate::api::types::{AnswerId, GroupId};
use crate::extensions::easing::lerp_vec2;

/// The falling question text. Purely visual apart from its off-screen
/// position, which expires its whole group.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCard {
    pub group: GroupId,
    pub question_id: String,
    pub text: String,
    pub position: Vec2,
    pub fall_speed: f32,
}

impl QuestionCard {
    /// Move down by `fall_speed` units per second.
    pub fn fall(&mut self, delta_ms: f64) {
        self.position.y += self.fall_speed * (delta_ms / 1000.0) as f32;
    }

    pub fn is_off_screen(&self, world_height: f32) -> bool {
        self.position.y > world_height
    }
}

/// One answer choice.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerCard {
    pub id: AnswerId,
    pub group: GroupId,
    pub entity_id: String,
    pub label: String,
    pub is_correct: bool,
    pub position: Vec2,
    pub radius: f32,
    pub fall_speed: f32,
    pub highlighted: bool,
    attached: bool,
}

impl AnswerCard {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AnswerId,
        group: GroupId,
        entity_id: impl Into<String>,
        label: impl Into<String>,
        is_correct: bool,
        position: Vec2,
        radius: f32,
        fall_speed: f32,
    ) -> Self {
        Self {
            id,
            group,
            entity_id: entity_id.into(),
            label: label.into(),
            is_correct,
            position,
            radius,
            fall_speed,
            highlighted: false,
            attached: false,
        }
    }

    /// Fall and sway. Attached cards ignore this; they follow the tongue.
    pub fn fall(&mut self, now: f64, delta_ms: f64, drift_amplitude: f32) {
        if self.attached {
            return;
        }
        self.position.y += self.fall_speed * (delta_ms / 1000.0) as f32;
        let phase = (now / 1000.0) as f32 + self.position.y;
        self.position.x += phase.sin() * drift_amplitude;
    }

    /// Take the card off the falling path for good.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Trail toward `tip` by `factor` of the remaining distance.
    pub fn follow(&mut self, tip: Vec2, factor: f32) {
        self.position = lerp_vec2(self.position, tip, factor);
    }

    pub fn is_off_screen(&self, world_height: f32) -> bool {
        self.position.y > world_height
    }

    /// Circle-circle contact; equal distance is a miss.
    pub fn overlaps(&self, center: Vec2, radius: f32) -> bool {
        self.position.distance(center) < self.radius + radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> AnswerCard {
        AnswerCard::new(
            AnswerId(1),
            GroupId(1),
            "hercules",
            "Hercules Beetle",
            true,
            Vec2::new(500.0, 0.0),
            40.0,
            40.0,
        )
    }

    #[test]
    fn question_falls_at_speed() {
        let mut q = QuestionCard {
            group: GroupId(1),
            question_id: "q1".into(),
            text: "?".into(),
            position: Vec2::new(960.0, -100.0),
            fall_speed: 30.0,
        };
        q.fall(1000.0);
        assert!((q.position.y + 70.0).abs() < 1e-4);
        assert!(!q.is_off_screen(1080.0));
        q.position.y = 1080.0;
        assert!(!q.is_off_screen(1080.0));
        q.fall(100.0);
        assert!(q.is_off_screen(1080.0));
    }

    #[test]
    fn answer_falls_and_drifts() {
        let mut a = card();
        a.fall(0.0, 500.0, 0.3);
        assert!((a.position.y - 20.0).abs() < 1e-4);
        let expected_x = 500.0 + (20.0f32).sin() * 0.3;
        assert!((a.position.x - expected_x).abs() < 1e-3);
    }

    #[test]
    fn attached_card_stops_falling() {
        let mut a = card();
        a.attach();
        a.fall(0.0, 1000.0, 0.3);
        assert_eq!(a.position, Vec2::new(500.0, 0.0));
    }

    #[test]
    fn follow_trails_the_tip() {
        let mut a = card();
        a.follow(Vec2::new(600.0, 100.0), 0.3);
        assert!((a.position - Vec2::new(530.0, 30.0)).length() < 1e-3);
    }

    #[test]
    fn overlap_is_strict() {
        let a = card();
        assert!(a.overlaps(Vec2::new(540.0, 10.0), 12.0));
        assert!(!a.overlaps(Vec2::new(552.0, 0.0), 12.0));
    }
}
