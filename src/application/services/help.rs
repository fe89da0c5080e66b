//! Help registry - Catalog of top-level and per-command help strings

use std::collections::HashMap;

/// Help for one command: a single line or an ordered sequence of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpText {
    Line(String),
    Lines(Vec<String>),
}

impl From<&str> for HelpText {
    fn from(s: &str) -> Self {
        HelpText::Line(s.to_string())
    }
}

impl From<String> for HelpText {
    fn from(s: String) -> Self {
        HelpText::Line(s)
    }
}

impl From<Vec<String>> for HelpText {
    fn from(lines: Vec<String>) -> Self {
        HelpText::Lines(lines)
    }
}

impl From<Vec<&str>> for HelpText {
    fn from(lines: Vec<&str>) -> Self {
        HelpText::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

/// Populated additively while plugins load; read-only afterwards.
#[derive(Debug, Default)]
pub struct HelpRegistry {
    top_level: Vec<String>,
    commands: HashMap<String, HelpText>,
}

impl HelpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level summary, keeping the listing sorted
    pub fn add_top_level(&mut self, summary: impl Into<String>) {
        self.top_level.push(summary.into());
        self.top_level.sort();
    }

    /// Register help for a command, overwriting any prior registration
    pub fn add_command(&mut self, command: impl Into<String>, help: impl Into<HelpText>) {
        self.commands.insert(command.into(), help.into());
    }

    /// All top-level summaries, sorted
    pub fn top_level(&self) -> &[String] {
        &self.top_level
    }

    /// Help for one command; `None` means nothing is registered
    pub fn command(&self, name: &str) -> Option<&HelpText> {
        self.commands.get(name)
    }
}
