// Action and observation types exchanged with the host

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One step's decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Show lines of a file
    Read {
        path: String,
        #[serde(default)]
        start: u32,
        #[serde(default)]
        end: Option<u32>,
    },
    /// Replace lines of a file
    Write {
        path: String,
        content: String,
        #[serde(default)]
        start: u32,
        #[serde(default)]
        end: Option<u32>,
    },
    /// Run a shell command
    Run { command: String },
    /// Fetch a web page
    Browse { url: String },
    /// Record reasoning without side effects
    Think { thought: String },
    /// Task is done
    Finish,
}

impl Action {
    pub fn think(thought: impl Into<String>) -> Self {
        Action::Think {
            thought: thought.into(),
        }
    }

    /// File and start line for the variants that target a file position
    pub fn cursor_position(&self) -> Option<(&str, u32)> {
        match self {
            Action::Read { path, start, .. } | Action::Write { path, start, .. } => {
                Some((path.as_str(), *start))
            }
            _ => None,
        }
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, Action::Finish)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::Read { .. } => "read",
            Action::Write { .. } => "write",
            Action::Run { .. } => "run",
            Action::Browse { .. } => "browse",
            Action::Think { .. } => "think",
            Action::Finish => "finish",
        }
    }

    /// Summary form stored in running memory
    pub fn to_memory(&self) -> Value {
        match self {
            Action::Read { path, start, end } => {
                json!({"action": "read", "path": path, "start": start, "end": end})
            }
            Action::Write {
                path,
                content,
                start,
                end,
            } => json!({
                "action": "write",
                "path": path,
                "content": content,
                "start": start,
                "end": end,
            }),
            Action::Run { command } => json!({"action": "run", "command": command}),
            Action::Browse { url } => json!({"action": "browse", "url": url}),
            Action::Think { thought } => json!({"action": "think", "thought": thought}),
            Action::Finish => json!({"action": "finish"}),
        }
    }
}

/// Result of executing an action, produced by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "observation", rename_all = "snake_case")]
pub enum Observation {
    Run {
        command: String,
        exit_code: i32,
        content: String,
    },
    Read {
        path: String,
        content: String,
    },
    Write {
        path: String,
        content: String,
    },
    Browse {
        url: String,
        status_code: u16,
        content: String,
    },
    Error {
        content: String,
    },
    Null,
}

impl Observation {
    /// Summary form stored in running memory
    pub fn to_memory(&self) -> Value {
        match self {
            Observation::Run {
                command,
                exit_code,
                content,
            } => json!({
                "observation": "run",
                "command": command,
                "exit_code": exit_code,
                "content": content,
            }),
            Observation::Read { path, content } => {
                json!({"observation": "read", "path": path, "content": content})
            }
            Observation::Write { path, content } => {
                json!({"observation": "write", "path": path, "content": content})
            }
            Observation::Browse {
                url,
                status_code,
                content,
            } => json!({
                "observation": "browse",
                "url": url,
                "status_code": status_code,
                "content": content,
            }),
            Observation::Error { content } => json!({"observation": "error", "content": content}),
            Observation::Null => json!({"observation": "null"}),
        }
    }
}
