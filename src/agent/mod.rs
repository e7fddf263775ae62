// Agent module - step orchestration: memory, prompt, completion, retry, cursor

pub mod config;
pub mod cursor;
pub mod error;
pub mod inference;
pub mod loop_;
pub mod prompt;
pub mod resolver;
pub mod state;
pub mod types;

pub use config::AgentConfigError;
pub use cursor::Cursor;
pub use error::AgentError;
pub use inference::{BrainRef, invoke};
pub use loop_::SweAgent;
pub use prompt::{Prompts, PromptsError, assemble};
pub use resolver::{Outcome, Resolution, Resolver};
pub use state::{Agent, AgentBase, Plan, State};
pub use types::AgentConfig;
