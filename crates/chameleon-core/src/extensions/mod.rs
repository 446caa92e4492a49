// extensions/mod.rs
//
// Small math helpers shared by the game objects.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec2};
