pub mod api;
pub mod bridge;
pub mod content;
pub mod core;
pub mod extensions;
pub mod input;
pub mod objects;
pub mod renderer;
pub mod services;
pub mod session;
pub mod spawn;

// Re-export key types at crate root for convenience
pub use api::game::{
    AimConfig, CardConfig, EngineContext, Game, GameConfig, RenderContext, SpawnConfig, TongueConfig,
};
pub use api::types::{AnswerId, GameEvent, GroupId, SoundEvent, WireEvent};
pub use bridge::protocol::{FrameHeader, ProtocolLayout, HEADER_FLOATS};
pub use content::{CatalogEntity, Content, ContentError, EntityCatalog, Question, QuestionPool};
pub use core::time::{Clock, FrameTime};
pub use core::timer::{Scheduler, TimerId};
pub use extensions::{lerp, lerp_vec2, Easing};
pub use input::queue::{InputEvent, InputQueue};
pub use objects::{AnswerCard, Chameleon, Expression, QuestionCard, Tongue, TonguePhase};
pub use renderer::instance::{RenderBuffer, RenderInstance, SpriteKind};
pub use session::ChameleonQuest;
pub use spawn::{CatchResolution, SpawnCoordinator};
