use serde::{Deserialize, Serialize};
use crate::api::error::ScriptError;
use crate::api::types::Channel;

/// Configuration for a `ScriptRunner`, provided by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum fixed steps run per frame (default: 10).
    pub max_fixed_steps: u32,
    /// Channel new chains start on (default: fixed update).
    pub default_channel: Channel,
    /// Name given to forked chains (default: "Async").
    pub fork_name: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_fixed_steps: 10,
            default_channel: Channel::FixedUpdate,
            fork_name: "Async".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the runner cannot tick with.
    pub fn validate(&self) -> Result<(), ScriptError> {
        if !self.fixed_dt.is_finite() || self.fixed_dt <= 0.0 {
            return Err(ScriptError::InvalidConfig(format!(
                "fixed_dt must be a positive number of seconds, got {}",
                self.fixed_dt
            )));
        }
        Ok(())
    }
}
