// extensions/mod.rs
//
// Step catalogue layered on the core builder.
// Easing is pure math; tweens and actions add `Script` methods that drive
// targets through the `Stage` interface.

pub mod actions;
pub mod easing;
pub mod tween;

pub use easing::{Easing, EaseFn, lerp, ease};
