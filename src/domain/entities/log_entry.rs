use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// One line destined for a channel's per-day log file
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub channel: String,
    pub text: String,
}

impl LogEntry {
    pub fn new(
        sender: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            sender: sender.into(),
            channel: channel.into(),
            text: text.into(),
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Target file: `<root>/<channel>/<YYYYMMDD>.txt`
    pub fn file(&self, root: &Path) -> PathBuf {
        root.join(&self.channel)
            .join(format!("{}.txt", self.timestamp.format("%Y%m%d")))
    }

    /// Rendered log line, `[<UTC timestamp>] <sender> text`
    pub fn line(&self) -> String {
        format!(
            "[{}] <{}> {}\n",
            self.timestamp.format("%a, %d %b %Y %H:%M:%S GMT"),
            self.sender,
            self.text
        )
    }
}
