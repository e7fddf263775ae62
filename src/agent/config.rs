// Agent configuration

use super::AgentConfig;
use super::prompt::Prompts;
use std::path::PathBuf;
use tracing::warn;

/// Parse an environment variable, logging a warning if the value is present but invalid.
fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(v) => parse_value(name, &v, default),
        Err(_) => default,
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str, default: T) -> T {
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(var = name, value = %value, "Invalid env var value, using default");
            default
        }
    }
}

/// Keep a temperature the completion endpoint accepts, otherwise fall back.
fn checked_temperature(name: &str, value: f32, default: f32) -> f32 {
    if (0.0..=2.0).contains(&value) {
        value
    } else {
        warn!(var = name, value = %value, "Temperature out of range 0.0..=2.0, using default");
        default
    }
}

/// Default prompts file location
fn default_prompts_path() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".sweagent").join("prompts.toml"))
        .unwrap_or_else(|| PathBuf::from(".sweagent/prompts.toml"))
}

impl AgentConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, AgentConfigError> {
        dotenvy::dotenv().ok();

        let mut config = AgentConfig::default();

        config.memory_window = parse_env_var("AGENT_MEMORY_WINDOW", config.memory_window);
        config.max_retries = parse_env_var("AGENT_MAX_RETRIES", config.max_retries);
        config.temperature = checked_temperature(
            "AGENT_TEMPERATURE",
            parse_env_var("AGENT_TEMPERATURE", config.temperature),
            config.temperature,
        );

        let prompts_path = std::env::var("AGENT_PROMPTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_prompts_path());

        config.prompts =
            Prompts::load(&prompts_path).map_err(|e| AgentConfigError::PromptsFile {
                path: prompts_path.clone(),
                reason: e.to_string(),
            })?;

        Ok(config)
    }
}

#[derive(Debug)]
pub enum AgentConfigError {
    PromptsFile { path: PathBuf, reason: String },
}

impl std::fmt::Display for AgentConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentConfigError::PromptsFile { path, reason } => {
                write!(f, "Invalid prompts file {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for AgentConfigError {}
