//! Input focus routing
//!
//! The focus target is never stored. It is derived from the visibility of
//! each surface in a fixed priority order, so two surfaces can never both
//! believe they own the keyboard.

/// The single UI region that receives keys and pastes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    NoteModal,
    TaskModal,
    SubagentModal,
    LogsOverlay,
    PrimaryView,
}

/// Visibility of every surface that can take focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    pub note_modal: bool,
    pub task_modal: bool,
    /// Instantiated and visible
    pub subagent_modal: bool,
    pub logs_overlay: bool,
}

/// Pick the focus target. Pure; the first visible surface wins.
pub fn route(visibility: Visibility) -> FocusTarget {
    if visibility.note_modal {
        FocusTarget::NoteModal
    } else if visibility.task_modal {
        FocusTarget::TaskModal
    } else if visibility.subagent_modal {
        FocusTarget::SubagentModal
    } else if visibility.logs_overlay {
        FocusTarget::LogsOverlay
    } else {
        FocusTarget::PrimaryView
    }
}

impl FocusTarget {
    /// Whether pasted text can land somewhere in this region.
    pub fn accepts_text(self) -> bool {
        matches!(
            self,
            FocusTarget::NoteModal | FocusTarget::TaskModal | FocusTarget::PrimaryView
        )
    }
}
