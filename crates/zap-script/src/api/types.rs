use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

/// Unique identifier for a target in the host stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

new_key_type! {
    /// Handle to an action chain registered with a `ScriptRunner`.
    pub struct ScriptId;
}

/// Which per-frame phase drives a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Variable-rate phase, once per rendered frame.
    Update,
    /// Fixed-rate phase, zero or more times per frame.
    #[default]
    FixedUpdate,
}

/// What a chain does once its cursor reaches the end of its steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnFinished {
    /// Remove the chain from the runner.
    #[default]
    DestroyScript,
    /// Keep the chain registered but stop ticking it.
    DisableScript,
    /// Deactivate the owning target. Chains without an owner disable themselves.
    DeactivateOwner,
    /// Destroy the owning target together with every chain it owns.
    DestroyOwner,
    /// Rewind the cursor to the first step.
    Loop,
}
