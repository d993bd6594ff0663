//! Script error types

use thiserror::Error;

use crate::api::types::{EntityId, ScriptId};

/// Errors raised while building or running scripts.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// A step asked for a target the stage cannot resolve.
    #[error("target {0:?} does not exist in the stage")]
    MissingTarget(EntityId),

    /// A fault raised from user step code.
    #[error("step failed: {0}")]
    Step(String),

    /// Runner configuration could not be parsed.
    #[error("malformed runner config: {0}")]
    Config(#[from] serde_json::Error),

    /// Runner configuration parsed but holds an unusable value.
    #[error("invalid runner config: {0}")]
    InvalidConfig(String),
}

impl ScriptError {
    /// Convenience constructor for user step faults.
    pub fn step(message: impl Into<String>) -> Self {
        ScriptError::Step(message.into())
    }
}

/// Result type for script operations.
pub type Result<T> = std::result::Result<T, ScriptError>;

/// A step fault caught by the tick driver. The faulted chain has been removed.
#[derive(Error, Debug)]
#[error("script '{name}' ({script:?}) faulted: {error}")]
pub struct ScriptFault {
    pub script: ScriptId,
    pub name: String,
    pub error: ScriptError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    #[test]
    fn fault_message_names_the_chain_and_cause() {
        let fault = ScriptFault {
            script: ScriptId::from(KeyData::from_ffi(1)),
            name: "Script - door".to_string(),
            error: ScriptError::MissingTarget(EntityId(4)),
        };
        let message = fault.to_string();
        assert!(message.starts_with("script 'Script - door' ("), "{}", message);
        assert!(message.ends_with("faulted: target EntityId(4) does not exist in the stage"), "{}", message);
    }
}
