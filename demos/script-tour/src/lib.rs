//! Headless tour of the scripting engine: a tiny host loop and a handful of
//! scenes that exercise chains, tweens, waits and input.

pub mod host;
pub mod scenes;

pub use host::{Demo, DemoContext, DemoRunner};
