//! Outbound messages produced by validated user actions.

use crate::session::{NoteType, Priority};
use serde::{Deserialize, Serialize};

/// Emitted only after a modal (or the chat prompt) passes validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    CreateTask {
        content: String,
        priority: Priority,
    },
    UpdateTask {
        id: String,
        content: String,
        priority: Priority,
    },
    RequestDeleteTask {
        id: String,
    },
    CreateNote {
        content: String,
        note_type: NoteType,
    },
    UpdateNoteType {
        id: String,
        note_type: NoteType,
    },
    UpdateNoteContent {
        id: String,
        content: String,
    },
    RequestDeleteNote {
        id: String,
    },
    /// Chat prompt submitted to the agent
    SendMessage {
        content: String,
    },
    MarkInboxRead {
        id: String,
    },
}

impl Action {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateTask { .. } => "create_task",
            Self::UpdateTask { .. } => "update_task",
            Self::RequestDeleteTask { .. } => "request_delete_task",
            Self::CreateNote { .. } => "create_note",
            Self::UpdateNoteType { .. } => "update_note_type",
            Self::UpdateNoteContent { .. } => "update_note_content",
            Self::RequestDeleteNote { .. } => "request_delete_note",
            Self::SendMessage { .. } => "send_message",
            Self::MarkInboxRead { .. } => "mark_inbox_read",
        }
    }
}
