// Prompt templates and message assembly

use super::cursor::Cursor;
use crate::brain::ChatMessage;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const SYSTEM_MESSAGE: &str = r#"You are a software engineering agent working inside a code repository. Each turn you receive your goal, your current file and line, and a summary of your most recent steps. Think about what to do next, explain your reasoning briefly, then give exactly one command inside a fenced code block.

Commands:
  read <file> [start] [end]    show lines of a file
  write <file> [start] [end]   replace lines of a file with the lines that follow the command
  goto <line>                  show the current file from a line
  scroll_up                    show the previous window of the current file
  scroll_down                  show the next window of the current file
  edit <start> <end>           replace lines of the current file with the lines that follow the command
  browse <url>                 fetch a web page
  exit                         stop, the goal is reached
Anything else inside the block is run as a shell command.

Only the first code block in your reply is used."#;

const CONTEXT_PROMPT: &str = "These are your most recent steps, oldest first:\n\n{memory}";

const STEP_PROMPT: &str = "Goal: {goal}\nCurrent file: {file}\nCurrent line: {line}\n\nWhat is your next command?";

const NO_ACTION: &str = "Your last reply did not contain a valid command.\n\nYour reasoning was:\n{thought}\n\nReply again with exactly one command inside a fenced code block.";

/// Prompt templates used to build each step's messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    pub system: String,
    /// Wraps the memory window; `{memory}`
    pub context: String,
    /// Current task; `{goal}`, `{file}`, `{line}`
    pub step: String,
    /// Feedback after an unparseable reply; `{thought}`
    pub no_action: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            system: SYSTEM_MESSAGE.to_string(),
            context: CONTEXT_PROMPT.to_string(),
            step: STEP_PROMPT.to_string(),
            no_action: NO_ACTION.to_string(),
        }
    }
}

/// Partial prompt set read from a TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PromptOverrides {
    system: Option<String>,
    context: Option<String>,
    step: Option<String>,
    no_action: Option<String>,
}

/// Errors reading a prompts file
#[derive(Debug, thiserror::Error)]
pub enum PromptsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Prompts {
    /// Load overrides from a TOML file on top of the built-in prompts.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, PromptsError> {
        if !path.exists() {
            debug!(path = %path.display(), "prompts file not found, using built-in prompts");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let prompts = Self::from_toml(&content)?;
        debug!(path = %path.display(), "loaded prompt overrides");
        Ok(prompts)
    }

    pub fn from_toml(content: &str) -> Result<Self, PromptsError> {
        let overrides: PromptOverrides = toml::from_str(content)?;
        let mut prompts = Self::default();
        if let Some(s) = overrides.system {
            prompts.system = s;
        }
        if let Some(s) = overrides.context {
            prompts.context = s;
        }
        if let Some(s) = overrides.step {
            prompts.step = s;
        }
        if let Some(s) = overrides.no_action {
            prompts.no_action = s;
        }
        Ok(prompts)
    }

    pub fn render_context(&self, window: &[String]) -> String {
        fill(&self.context, &[("memory", &window.join("\n"))])
    }

    pub fn render_step(&self, goal: &str, cursor: &Cursor) -> String {
        let file = if cursor.file.is_empty() {
            "none"
        } else {
            cursor.file.as_str()
        };
        let line = cursor.line.to_string();
        fill(
            &self.step,
            &[("goal", goal), ("file", file), ("line", &line)],
        )
    }

    pub fn render_no_action(&self, thought: &str) -> String {
        fill(&self.no_action, &[("thought", thought)])
    }
}

/// Substitute `{name}` placeholders in a single scan of the template.
/// Substituted values are copied through as-is; unknown braces are kept.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = values.iter().find_map(|&(name, value)| {
            tail.strip_prefix(name)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Build the opening messages for a step: system, optional context, task
pub fn assemble(
    prompts: &Prompts,
    goal: &str,
    cursor: &Cursor,
    window: &[String],
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(prompts.system.clone())];

    if !window.is_empty() {
        messages.push(ChatMessage::user(prompts.render_context(window)));
    }

    messages.push(ChatMessage::user(prompts.render_step(goal, cursor)));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Role;

    #[test]
    fn test_assemble_without_memory() {
        let messages = assemble(&Prompts::default(), "fix the bug", &Cursor::default(), &[]);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("Goal: fix the bug"));
        assert!(messages[1].content.contains("Current file: none"));
        assert!(messages[1].content.contains("Current line: 0"));
    }

    #[test]
    fn test_assemble_with_memory() {
        let cursor = Cursor {
            file: "a.py".to_string(),
            line: 10,
        };
        let window = vec!["first step".to_string(), "second step".to_string()];
        let messages = assemble(&Prompts::default(), "goal", &cursor, &window);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);

        let context = &messages[1].content;
        let first = context.find("first step").unwrap();
        let second = context.find("second step").unwrap();
        assert!(first < second);

        assert!(messages[2].content.contains("Current file: a.py"));
        assert!(messages[2].content.contains("Current line: 10"));
    }

    #[test]
    fn test_goal_and_file_text_are_not_rescanned() {
        let goal = "support {file} and {line} in log format";
        let cursor = Cursor {
            file: "src/{line}.rs".to_string(),
            line: 7,
        };
        let messages = assemble(&Prompts::default(), goal, &cursor, &[]);

        let task = &messages[1].content;
        assert!(task.contains("Goal: support {file} and {line} in log format"));
        assert!(task.contains("Current file: src/{line}.rs"));
        assert!(task.contains("Current line: 7"));
    }

    #[test]
    fn test_fill_keeps_unknown_braces() {
        assert_eq!(fill("{a} {b} {", &[("a", "{b}")]), "{b} {b} {");
        assert_eq!(fill("{{a}}", &[("a", "x")]), "{x}");
        assert_eq!(fill("no placeholders", &[("a", "x")]), "no placeholders");
    }

    #[test]
    fn test_render_context_keeps_memory_verbatim() {
        let window = vec!["ran `echo {thought}`".to_string()];
        let text = Prompts::default().render_context(&window);
        assert!(text.ends_with("ran `echo {thought}`"));
    }

    #[test]
    fn test_render_no_action() {
        let text = Prompts::default().render_no_action("maybe grep for it");
        assert!(text.contains("maybe grep for it"));
        assert!(!text.contains("{thought}"));
    }

    #[test]
    fn test_from_toml_overrides_some() {
        let prompts = Prompts::from_toml(
            r#"
            system = "be brief"
            step = "do {goal}"
            "#,
        )
        .unwrap();

        assert_eq!(prompts.system, "be brief");
        assert_eq!(prompts.step, "do {goal}");
        assert_eq!(prompts.context, Prompts::default().context);
        assert_eq!(prompts.render_step("it", &Cursor::default()), "do it");
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        assert!(Prompts::from_toml("sytem = \"typo\"").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("sweagent-no-such-prompts.toml");
        assert_eq!(Prompts::load(&path).unwrap(), Prompts::default());
    }
}
