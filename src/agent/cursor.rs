// Cursor tracking - the agent's current file and line

use crate::action::Action;

/// Current file (empty = none) and line (0 = none)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub file: String,
    pub line: u32,
}

impl Cursor {
    /// Move to the target of a file read or write; other actions leave it alone
    pub fn update(&mut self, action: &Action) {
        if let Some((path, start)) = action.cursor_position() {
            self.file = path.to_string();
            self.line = start;
        }
    }
}
