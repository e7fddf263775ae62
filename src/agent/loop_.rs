// Agent loop implementation - one action per host step

use crate::action::{Action, ActionParser, CommandParser};
use crate::memory::RunningMemory;

use super::cursor::Cursor;
use super::error::AgentError;
use super::inference::BrainRef;
use super::prompt;
use super::resolver::Resolver;
use super::state::{Agent, AgentBase, State};
use super::types::AgentConfig;

use tracing::info;

/// Step-decision agent: remembers past steps, tracks a cursor, and asks the
/// model for one command per step.
pub struct SweAgent<B: BrainRef, P: ActionParser = CommandParser> {
    brain: B,
    parser: P,
    config: AgentConfig,
    memory: RunningMemory,
    cursor: Cursor,
    base: AgentBase,
}

impl<B: BrainRef> SweAgent<B> {
    /// Create new agent with the fenced command parser
    pub fn new(brain: B, config: AgentConfig) -> Self {
        Self::with_parser(brain, CommandParser::new(), config)
    }
}

impl<B: BrainRef, P: ActionParser> SweAgent<B, P> {
    pub fn with_parser(brain: B, parser: P, config: AgentConfig) -> Self {
        Self {
            brain,
            parser,
            config,
            memory: RunningMemory::new(),
            cursor: Cursor::default(),
            base: AgentBase::default(),
        }
    }

    pub fn brain(&self) -> &B {
        &self.brain
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn memory(&self) -> &RunningMemory {
        &self.memory
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn latest_action(&self) -> Option<&Action> {
        self.base.latest_action()
    }

    pub fn is_complete(&self) -> bool {
        self.base.is_complete()
    }
}

#[async_trait::async_trait]
impl<B: BrainRef, P: ActionParser> Agent for SweAgent<B, P> {
    async fn step(&mut self, state: &State) -> Result<Action, AgentError> {
        for (action, observation) in &state.updated_info {
            self.memory.remember(action, observation);
        }

        info!(
            goal = %state.plan.main_goal,
            new_entries = state.updated_info.len(),
            memory_entries = self.memory.len(),
            file = %self.cursor.file,
            line = self.cursor.line,
            "starting step"
        );

        let mut messages = prompt::assemble(
            &self.config.prompts,
            &state.plan.main_goal,
            &self.cursor,
            self.memory.window(self.config.memory_window),
        );

        let resolver = Resolver {
            brain: &self.brain,
            parser: &self.parser,
            prompts: &self.config.prompts,
            max_retries: self.config.max_retries,
            temperature: self.config.temperature,
        };
        let resolution = resolver.resolve(&mut messages, &self.cursor).await?;

        self.cursor.update(&resolution.action);
        self.base.record(&resolution.action);

        info!(
            action = resolution.action.kind(),
            outcome = ?resolution.outcome,
            attempts = resolution.attempts,
            file = %self.cursor.file,
            line = self.cursor.line,
            "step completed"
        );

        Ok(resolution.action)
    }

    fn search_memory(&self, query: &str) -> Vec<String> {
        self.memory.search(query)
    }

    fn reset(&mut self) {
        self.memory.clear();
        self.base.reset();
    }
}
