// extensions/easing.rs
//
// Timing curves for the tongue and interpolation helpers for aiming and
// card following. Pure math, no game state.

use std::f32::consts::FRAC_PI_2;

/// Easing curve applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// `1 - (1 - t)^2`: starts fast, decelerates. Drives tongue extension.
    QuadOut,
    /// `sin(t * PI / 2)`. Drives tongue retraction.
    SineOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1] first.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::SineOut => (t * FRAC_PI_2).sin(),
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: glam::Vec2, b: glam::Vec2, t: f32) -> glam::Vec2 {
    a + (b - a) * t
}
