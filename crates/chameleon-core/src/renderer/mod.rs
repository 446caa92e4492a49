pub mod instance;
pub mod projection;

pub use instance::{RenderBuffer, RenderInstance, SpriteKind};
pub use projection::build_render_buffer;
