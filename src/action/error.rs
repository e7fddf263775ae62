// Parser errors

use thiserror::Error;

/// Failures of a parser that are not "the output held no action".
///
/// A missing action is reported through `ParsedOutput::action == None` instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parser failed: {0}")]
    Failed(String),
}
