// Agent errors

use crate::action::ParseError;
use crate::brain::BrainError;
use thiserror::Error;

/// Errors that abort a step.
///
/// An unparseable model reply is not one of them; it ends in a think action.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Completion failed: {0}")]
    Completion(#[from] BrainError),

    #[error("Completion returned no choices")]
    EmptyCompletion,

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Request build error: {0}")]
    RequestBuild(&'static str),
}
