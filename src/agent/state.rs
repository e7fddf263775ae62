// Host contract - state handed to the agent and the agent interface

use crate::action::{Action, Observation};

use super::error::AgentError;

/// What the host is trying to achieve
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub main_goal: String,
}

/// Host state for one step
#[derive(Debug, Clone, Default)]
pub struct State {
    pub plan: Plan,
    /// Pairs produced since the previous step; the host never repeats them
    pub updated_info: Vec<(Action, Observation)>,
}

impl State {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            plan: Plan {
                main_goal: goal.into(),
            },
            updated_info: Vec::new(),
        }
    }

    pub fn with_update(mut self, action: Action, observation: Observation) -> Self {
        self.updated_info.push((action, observation));
        self
    }
}

/// Interface the host drives once per tick
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Produce the next action; never fails for unparseable model output
    async fn step(&mut self, state: &State) -> Result<Action, AgentError>;

    fn search_memory(&self, query: &str) -> Vec<String>;

    fn reset(&mut self);
}

/// Bookkeeping shared by every agent
#[derive(Debug, Clone, Default)]
pub struct AgentBase {
    latest_action: Option<Action>,
    complete: bool,
}

impl AgentBase {
    /// Record the action returned to the host
    pub fn record(&mut self, action: &Action) {
        if action.is_finish() {
            self.complete = true;
        }
        self.latest_action = Some(action.clone());
    }

    pub fn latest_action(&self) -> Option<&Action> {
        self.latest_action.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn reset(&mut self) {
        self.latest_action = None;
        self.complete = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_reset() {
        let mut base = AgentBase::default();
        base.record(&Action::think("plan"));
        assert_eq!(base.latest_action(), Some(&Action::think("plan")));
        assert!(!base.is_complete());

        base.record(&Action::Finish);
        assert!(base.is_complete());

        base.reset();
        assert!(base.latest_action().is_none());
        assert!(!base.is_complete());
    }

    #[test]
    fn test_state_builder() {
        let state = State::new("ship it").with_update(Action::Finish, Observation::Null);
        assert_eq!(state.plan.main_goal, "ship it");
        assert_eq!(state.updated_info.len(), 1);
    }
}
