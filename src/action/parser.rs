// Command parser - turns raw model output into an action and a thought

use super::error::ParseError;
use super::types::Action;

const FENCE: &str = "```";

/// Lines shown by goto/scroll commands
const DEFAULT_WINDOW: u32 = 100;

/// Words that start a command and are never read as a fence language tag
const COMMANDS: &[&str] = &[
    "exit",
    "read",
    "write",
    "goto",
    "scroll_up",
    "scroll_down",
    "edit",
    "browse",
];

/// Parser output: the action, if one was found, and the free-text rationale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOutput {
    pub action: Option<Action>,
    pub thought: String,
}

/// Turns raw model text into an action
pub trait ActionParser: Send + Sync {
    fn parse(
        &self,
        raw: &str,
        cur_file: &str,
        cur_line: u32,
    ) -> Result<ParsedOutput, ParseError>;
}

/// Parser for the fenced command grammar taught by the default system prompt.
///
/// The first fenced block holds the command and everything outside it is the
/// thought. Output that holds no usable command yields `action: None`; this
/// parser never returns `Err`.
#[derive(Debug, Clone)]
pub struct CommandParser {
    window: u32,
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    pub fn with_window(window: u32) -> Self {
        Self { window }
    }

    fn parse_block(&self, block: &str, cur_file: &str, cur_line: u32) -> Option<Action> {
        let block = block.trim();
        if block.is_empty() {
            return None;
        }

        let (head, body) = block.split_once('\n').unwrap_or((block, ""));
        let mut words = head.split_whitespace();
        let command = words.next()?;
        let args: Vec<&str> = words.collect();

        match command {
            "exit" => Some(Action::Finish),
            "read" => Some(Action::Read {
                path: args.first()?.to_string(),
                start: line_arg(args.get(1))?.unwrap_or(0),
                end: line_arg(args.get(2))?,
            }),
            "write" => Some(Action::Write {
                path: args.first()?.to_string(),
                content: body.to_string(),
                start: line_arg(args.get(1))?.unwrap_or(0),
                end: line_arg(args.get(2))?,
            }),
            "goto" => {
                let path = current_file(cur_file)?;
                let line: u32 = args.first()?.parse().ok()?;
                Some(Action::Read {
                    path,
                    start: line,
                    end: Some(line.saturating_add(self.window)),
                })
            }
            "scroll_up" | "scroll_down" => {
                let path = current_file(cur_file)?;
                let start = if command == "scroll_up" {
                    cur_line.saturating_sub(self.window)
                } else {
                    cur_line.saturating_add(self.window)
                };
                Some(Action::Read {
                    path,
                    start,
                    end: Some(start.saturating_add(self.window)),
                })
            }
            "edit" => {
                let path = current_file(cur_file)?;
                let start: u32 = args.first()?.parse().ok()?;
                let end: u32 = args.get(1)?.parse().ok()?;
                if start > end {
                    return None;
                }
                Some(Action::Write {
                    path,
                    content: body.to_string(),
                    start,
                    end: Some(end),
                })
            }
            "browse" => Some(Action::Browse {
                url: args.first()?.to_string(),
            }),
            _ => Some(Action::Run {
                command: block.to_string(),
            }),
        }
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionParser for CommandParser {
    fn parse(
        &self,
        raw: &str,
        cur_file: &str,
        cur_line: u32,
    ) -> Result<ParsedOutput, ParseError> {
        let (thought, block) = split_fenced_block(raw);
        let action = block.and_then(|b| self.parse_block(strip_language_tag(b), cur_file, cur_line));
        Ok(ParsedOutput { action, thought })
    }
}

/// Split output into (text outside the first fenced block, block contents)
fn split_fenced_block(raw: &str) -> (String, Option<&str>) {
    let Some(open) = raw.find(FENCE) else {
        return (raw.trim().to_string(), None);
    };
    let inner_start = open + FENCE.len();
    let Some(len) = raw[inner_start..].find(FENCE) else {
        return (raw.trim().to_string(), None);
    };

    let inner = &raw[inner_start..inner_start + len];
    let before = raw[..open].trim();
    let after = raw[inner_start + len + FENCE.len()..].trim();
    let thought = [before, after]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    (thought, Some(inner))
}

fn strip_language_tag(inner: &str) -> &str {
    let Some((first, rest)) = inner.split_once('\n') else {
        return inner;
    };
    let tag = first.trim();
    let is_tag = !tag.contains(char::is_whitespace)
        && !COMMANDS.contains(&tag)
        && !rest.trim().is_empty();

    if tag.is_empty() || is_tag { rest } else { inner }
}

/// Optional numeric argument: absent is `Some(None)`, malformed is `None`
fn line_arg(arg: Option<&&str>) -> Option<Option<u32>> {
    match arg {
        None => Some(None),
        Some(s) => s.parse().ok().map(Some),
    }
}

fn current_file(cur_file: &str) -> Option<String> {
    (!cur_file.is_empty()).then(|| cur_file.to_string())
}
