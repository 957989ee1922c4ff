//! Session state as delivered by the agent runtime.
//!
//! A session is a snapshot of tasks, notes, inbox messages, logs and agent
//! output. Snapshots are read from `{sessions_dir}/{session_id}.json` at
//! startup and replaced wholesale by `state` events from the feed.

use crate::{DeckError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Priority levels for tasks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

/// Kind of note the agent (or the user) wrote down
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    #[default]
    Observation,
    Decision,
    Blocker,
    Todo,
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Observation => write!(f, "observation"),
            Self::Decision => write!(f, "decision"),
            Self::Blocker => write!(f, "blocker"),
            Self::Todo => write!(f, "todo"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

/// A delegated agent working on one task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subagent {
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub output: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subagent: Option<Subagent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub note_type: NoteType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InboxMessage {
    pub id: String,
    pub from: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub read: bool,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub level: LogLevel,
    pub message: String,
}

/// Full session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub inbox: Vec<InboxMessage>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub output: Vec<String>,
}

/// One message from the event feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Replace everything
    State(SessionSnapshot),
    /// A chunk of agent output
    Output { text: String },
    Log(LogEntry),
    Inbox(InboxMessage),
}

/// Read a snapshot file. A missing file yields an empty session.
pub async fn load_snapshot(path: &Path) -> Result<SessionSnapshot> {
    if !fs::try_exists(path).await? {
        debug!("No session file at {:?}, starting empty", path);
        return Ok(SessionSnapshot::default());
    }
    let content = fs::read_to_string(path).await?;
    let snapshot: SessionSnapshot = serde_json::from_str(&content)
        .map_err(|e| DeckError::Session(format!("{}: {}", path.display(), e)))?;
    info!(
        "Loaded session {} ({} tasks, {} notes)",
        snapshot.session_id,
        snapshot.tasks.len(),
        snapshot.notes.len()
    );
    Ok(snapshot)
}

/// Locates session files.
///
/// Directory layout:
///   {sessions_dir}/{session_id}.json
pub struct SessionStore {
    sessions_dir: PathBuf,
}

impl SessionStore {
    pub fn new(sessions_dir: impl Into<PathBuf>) -> Self {
        Self {
            sessions_dir: sessions_dir.into(),
        }
    }

    pub fn path_for(&self, session_id: &str) -> PathBuf {
        self.sessions_dir.join(format!("{session_id}.json"))
    }

    /// Most recently modified session file, if any.
    pub fn latest(&self) -> Result<Option<PathBuf>> {
        let pattern = self.sessions_dir.join("*.json");
        let pattern = pattern.to_string_lossy();
        let entries = glob::glob(&pattern)
            .map_err(|e| DeckError::Session(format!("bad session pattern: {e}")))?;

        let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
        for path in entries.flatten() {
            let Ok(modified) = std::fs::metadata(&path).and_then(|m| m.modified()) else {
                continue;
            };
            if newest.as_ref().map_or(true, |(time, _)| modified > *time) {
                newest = Some((modified, path));
            }
        }
        Ok(newest.map(|(_, path)| path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_event_tags() {
        let event: SessionEvent =
            serde_json::from_str(r#"{"type":"output","text":"hello"}"#).unwrap();
        assert_eq!(
            event,
            SessionEvent::Output {
                text: "hello".to_string()
            }
        );

        let event: SessionEvent = serde_json::from_str(
            r#"{"type":"state","session_id":"s1","tasks":[{"id":"t1","content":"do it"}]}"#,
        )
        .unwrap();
        match event {
            SessionEvent::State(snapshot) => {
                assert_eq!(snapshot.session_id, "s1");
                assert_eq!(snapshot.tasks[0].priority, Priority::Medium);
                assert_eq!(snapshot.tasks[0].status, TaskStatus::Pending);
            }
            other => panic!("Expected state event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_session() {
        let dir = TempDir::new().unwrap();
        let snapshot = load_snapshot(&dir.path().join("nope.json")).await.unwrap();
        assert_eq!(snapshot, SessionSnapshot::default());
    }

    #[tokio::test]
    async fn test_store_path_and_latest() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        std::fs::write(
            store.path_for("abc"),
            r#"{"session_id":"abc","notes":[{"id":"n1","content":"x","note_type":"blocker"}]}"#,
        )
        .unwrap();

        let snapshot = load_snapshot(&store.path_for("abc")).await.unwrap();
        assert_eq!(snapshot.notes[0].note_type, NoteType::Blocker);
        assert_eq!(store.latest().unwrap(), Some(store.path_for("abc")));
    }

    #[tokio::test]
    async fn test_malformed_file_is_session_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, DeckError::Session(_)));
    }
}
