// Memory module - rolling record of past steps

use crate::action::{Action, Observation};
use serde_json::Value;

/// Format one memory entry from action and observation summaries
pub fn format_entry(action: &Value, observation: &Value) -> String {
    format!(
        "Previous action:\n{}\n\nOutput from action:\n{}\n",
        action, observation
    )
}

/// Append-only log of formatted steps.
///
/// Storage is unbounded; callers choose how many recent entries to read with
/// [`RunningMemory::window`].
#[derive(Debug, Clone, Default)]
pub struct RunningMemory {
    entries: Vec<String>,
}

impl RunningMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one (action, observation) pair
    pub fn remember(&mut self, action: &Action, observation: &Observation) {
        self.push(format_entry(&action.to_memory(), &observation.to_memory()));
    }

    /// Append an already formatted entry
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Last `n` entries, oldest first
    pub fn window(&self, n: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Entries containing `query` (case-sensitive), in insertion order
    pub fn search(&self, query: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.contains(query))
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
