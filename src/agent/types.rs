// Agent types

use super::prompt::Prompts;

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Number of recent memory entries included in each prompt
    pub memory_window: usize,
    /// Extra completion attempts after an unparseable response
    pub max_retries: u32,
    /// Sampling temperature for every completion call
    pub temperature: f32,
    /// Prompt templates
    pub prompts: Prompts,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            memory_window: 4,
            max_retries: 2,
            temperature: 0.05,
            prompts: Prompts::default(),
        }
    }
}
