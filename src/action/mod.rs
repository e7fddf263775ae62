// Action module - step decisions, their observations, and the command parser

pub mod error;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use parser::{ActionParser, CommandParser, ParsedOutput};
pub use types::{Action, Observation};
