//! Channel logger - ordered, non-blocking append-only channel logs
//!
//! Log calls push onto an in-memory FIFO and return immediately; a
//! single drain task owns the queue and writes entries one at a time,
//! so entries for the same (channel, day) file land in enqueue order
//! and no two writes ever interleave. A failed write is reported and
//! the drain moves on; it's just logging.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::application::errors::StorageError;
use crate::domain::entities::LogEntry;

enum QueueItem {
    Entry(LogEntry),
    Flush(oneshot::Sender<()>),
}

pub struct ChannelLogger {
    root: PathBuf,
    queue: mpsc::UnboundedSender<QueueItem>,
}

impl ChannelLogger {
    /// Must be called from within a tokio runtime; spawns the drain task.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(drain(root.clone(), rx));
        Self { root, queue: tx }
    }

    /// Enqueue one log line. Never waits for disk I/O.
    pub fn log(&self, sender: &str, channel: &str, text: &str) {
        let entry = LogEntry::new(sender, channel, text);
        if self.queue.send(QueueItem::Entry(entry)).is_err() {
            warn!("channel logger drain is gone; dropping log entry");
        }
    }

    /// Wait until everything enqueued before this call has been written.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.queue.send(QueueItem::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    /// Per-day log files for a channel, oldest first. Filenames that do
    /// not look like `YYYYMMDD.txt` are ignored; a channel with no log
    /// directory simply has no logs.
    pub async fn logs_for_channel(&self, channel: &str) -> Result<Vec<PathBuf>, StorageError> {
        let dir = self.root.join(channel);
        let mut reader = match tokio::fs::read_dir(&dir).await {
            Ok(reader) => reader,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        static DAY_FILE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^\d{8}\.txt$").expect("day-file pattern"));

        let mut names = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            let name = entry.file_name();
            if let Some(name) = name.to_str() {
                if DAY_FILE.is_match(name) {
                    names.push(name.to_string());
                }
            }
        }
        // YYYYMMDD sorts chronologically as text
        names.sort();
        Ok(names.into_iter().map(|n| dir.join(n)).collect())
    }
}

async fn drain(root: PathBuf, mut rx: mpsc::UnboundedReceiver<QueueItem>) {
    while let Some(item) = rx.recv().await {
        match item {
            QueueItem::Entry(entry) => {
                if let Err(e) = append(&root, &entry).await {
                    warn!(channel = %entry.channel, "failed to write log entry: {e}");
                }
            }
            QueueItem::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

async fn append(root: &Path, entry: &LogEntry) -> std::io::Result<()> {
    let path = entry.file(root);
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    file.write_all(entry.line().as_bytes()).await?;
    Ok(())
}
