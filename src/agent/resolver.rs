// Action resolver - bounded retry loop for eliciting a parseable action
//
// Start -> Invoked -> Parsed
//                  -> Unparsed -> Invoked   (while attempts remain)
//                              -> Fallback  (attempts exhausted)

use crate::action::{Action, ActionParser};
use crate::brain::ChatMessage;

use super::cursor::Cursor;
use super::error::AgentError;
use super::inference::{BrainRef, invoke};
use super::prompt::Prompts;
use tracing::{info, warn};

/// How the resolver ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The parser produced an action
    Parsed,
    /// Every attempt was unparseable; the action is a think action
    Fallback,
}

/// Resolved action with the rationale of the attempt that produced it
#[derive(Debug, Clone)]
pub struct Resolution {
    pub action: Action,
    pub thought: String,
    /// Completion calls issued
    pub attempts: u32,
    pub outcome: Outcome,
}

/// Drives completion + parsing until an action is found or attempts run out
pub struct Resolver<'a, B: BrainRef, P: ActionParser> {
    pub brain: &'a B,
    pub parser: &'a P,
    pub prompts: &'a Prompts,
    /// Extra attempts after the first
    pub max_retries: u32,
    pub temperature: f32,
}

impl<B: BrainRef, P: ActionParser> Resolver<'_, B, P> {
    /// Resolve one action.
    ///
    /// `messages` is only ever appended to: each unparseable reply adds one
    /// feedback message, and those stay in place even when a later attempt
    /// succeeds. Completion and parser errors propagate unchanged.
    pub async fn resolve(
        &self,
        messages: &mut Vec<ChatMessage>,
        cursor: &Cursor,
    ) -> Result<Resolution, AgentError> {
        let max_attempts = self.max_retries.saturating_add(1);
        let mut thought = String::new();

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                messages.push(ChatMessage::user(self.prompts.render_no_action(&thought)));
            }

            info!(attempt = attempt, messages = messages.len(), "requesting action");
            let raw = invoke(self.brain, messages, self.temperature).await?;
            let parsed = self.parser.parse(&raw, &cursor.file, cursor.line)?;
            thought = parsed.thought;

            if let Some(action) = parsed.action {
                info!(attempt = attempt, action = action.kind(), "action parsed");
                return Ok(Resolution {
                    action,
                    thought,
                    attempts: attempt,
                    outcome: Outcome::Parsed,
                });
            }

            warn!(
                attempt = attempt,
                max_attempts = max_attempts,
                "no valid action in completion"
            );
        }

        warn!(attempts = max_attempts, "falling back to think action");
        Ok(Resolution {
            action: Action::think(thought.clone()),
            thought,
            attempts: max_attempts,
            outcome: Outcome::Fallback,
        })
    }
}
