// sweagent - a step-decision agent that asks an LLM for one command per step

pub mod action;
pub mod agent;
pub mod brain;
pub mod memory;

pub use action::{Action, ActionParser, CommandParser, Observation, ParseError, ParsedOutput};
pub use agent::{Agent, AgentConfig, AgentError, Cursor, State, SweAgent};
pub use brain::{Brain, BrainConfig};
pub use memory::RunningMemory;
