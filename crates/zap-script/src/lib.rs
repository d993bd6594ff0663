pub mod api;
pub mod core;
pub mod components;
pub mod input;
pub mod script;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::RunnerConfig;
pub use api::error::{Result, ScriptError, ScriptFault};
pub use api::stage::{Stage, Target};
pub use api::types::{Channel, EntityId, OnFinished, ScriptId};
pub use components::entity::Entity;
pub use crate::core::rng::Rng;
pub use crate::core::scene::Scene;
pub use crate::core::time::{Clock, FixedTimestep};
pub use input::queue::{InputEvent, InputQueue, InputState};
pub use script::{ActionChain, Frame, Script, ScriptRunner, Step};

// Extensions
pub use extensions::{Easing, EaseFn, lerp, ease};
