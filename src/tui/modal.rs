//! Task and note forms
//!
//! Both forms share one state machine: a choice selector (priority or note
//! type), a bounded multi-line body, a submit button and, when editing, a
//! delete button. `tab`/`shift+tab` walk the focus ring with wraparound.
//! Only the body accepts characters, and only while it holds focus.

use ratatui::layout::Rect;
use tracing::debug;

use super::input::{BoundedInput, Truncation};
use super::sanitize::sanitize;
use crate::session::{NoteType, Priority};

/// A value picked with the selector row.
pub trait Choice: Copy + PartialEq + std::fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn position(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }
}

impl Choice for Priority {
    const ALL: &'static [Self] = &[
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl Choice for NoteType {
    const ALL: &'static [Self] = &[
        NoteType::Observation,
        NoteType::Decision,
        NoteType::Blocker,
        NoteType::Todo,
    ];

    fn label(&self) -> &'static str {
        match self {
            NoteType::Observation => "Observation",
            NoteType::Decision => "Decision",
            NoteType::Blocker => "Blocker",
            NoteType::Todo => "Todo",
        }
    }
}

/// Sub-element of a form that owns key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Selector,
    Body,
    Submit,
    Delete,
}

const CREATE_RING: &[FormField] = &[FormField::Selector, FormField::Body, FormField::Submit];
const EDIT_RING: &[FormField] = &[
    FormField::Selector,
    FormField::Body,
    FormField::Submit,
    FormField::Delete,
];

/// The item a form was opened to edit, as it was at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget<C> {
    pub id: String,
    pub content: String,
    pub choice: C,
}

/// A validated form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<C> {
    pub content: String,
    pub choice: C,
    pub editing: Option<EditTarget<C>>,
}

/// What a key press did to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent<C> {
    /// Nothing observable outside the form
    None,
    Submitted(Submission<C>),
    DeleteRequested(String),
    Closed,
    /// The caller should read the system clipboard and paste it
    PasteClipboard,
}

#[derive(Debug, Clone)]
pub struct FormModal<C: Choice> {
    title: &'static str,
    visible: bool,
    body: BoundedInput,
    choice: C,
    focus: FormField,
    editing: Option<EditTarget<C>>,
}

pub type TaskModal = FormModal<Priority>;
pub type NoteModal = FormModal<NoteType>;

impl<C: Choice> FormModal<C> {
    pub fn new(title: &'static str, limit: usize) -> Self {
        Self {
            title,
            visible: false,
            body: BoundedInput::new(limit),
            choice: C::ALL[0],
            focus: FormField::Body,
            editing: None,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn body(&self) -> &BoundedInput {
        &self.body
    }

    pub fn choice(&self) -> C {
        self.choice
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn editing(&self) -> Option<&EditTarget<C>> {
        self.editing.as_ref()
    }

    /// Whether the body currently accepts character input.
    pub fn body_active(&self) -> bool {
        self.visible && self.focus == FormField::Body
    }

    /// Focus ring for the current mode.
    pub fn fields(&self) -> &'static [FormField] {
        if self.editing.is_some() {
            EDIT_RING
        } else {
            CREATE_RING
        }
    }

    /// Open an empty form with `choice` preselected.
    pub fn show_create(&mut self, choice: C) {
        self.reset();
        self.choice = choice;
        self.visible = true;
    }

    /// Open the form prefilled from an existing item.
    ///
    /// Content over the body limit is cut; the stored edit target holds the
    /// cut text so saving an untouched form is still a no-op.
    pub fn show_edit(
        &mut self,
        id: impl Into<String>,
        content: &str,
        choice: C,
    ) -> Option<Truncation> {
        self.reset();
        let report = self.body.set_content(content);
        self.choice = choice;
        self.editing = Some(EditTarget {
            id: id.into(),
            content: self.body.content().to_string(),
            choice,
        });
        self.visible = true;
        report
    }

    /// Hide and reset. The instance is reused by the next `show_*`.
    pub fn close(&mut self) {
        self.reset();
        self.visible = false;
    }

    fn reset(&mut self) {
        self.body.clear();
        self.choice = C::ALL[0];
        self.focus = FormField::Body;
        self.editing = None;
    }

    pub fn focus_next(&mut self) {
        let ring = self.fields();
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(pos + 1) % ring.len()];
    }

    pub fn focus_prev(&mut self) {
        let ring = self.fields();
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(pos + ring.len() - 1) % ring.len()];
    }

    fn cycle_choice(&mut self, forward: bool) {
        let len = C::ALL.len();
        let pos = self.choice.position();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.choice = C::ALL[next];
    }

    /// Sanitize and insert a paste into the body.
    ///
    /// Ignored unless the body has focus. Returns the truncation, if any,
    /// which the caller must surface to the user.
    pub fn paste(&mut self, raw: &str) -> Option<Truncation> {
        if !self.body_active() {
            return None;
        }
        self.body.insert_bounded(&sanitize(raw))
    }

    /// Validate and, on success, close the form.
    ///
    /// Whitespace-only bodies are rejected and the form stays as it is.
    pub fn submit(&mut self) -> Option<Submission<C>> {
        if self.body.is_blank() {
            debug!("Rejected empty {} submission", self.title);
            return None;
        }
        let submission = Submission {
            content: self.body.content().trim().to_string(),
            choice: self.choice,
            editing: self.editing.clone(),
        };
        self.close();
        Some(submission)
    }

    /// Route one key press. `typed` is the printable character, if any.
    pub fn handle_key(&mut self, key: &str, typed: Option<char>) -> FormEvent<C> {
        if !self.visible {
            return FormEvent::None;
        }

        match key {
            "esc" => {
                self.close();
                return FormEvent::Closed;
            }
            "tab" => {
                self.focus_next();
                return FormEvent::None;
            }
            "shift+tab" => {
                self.focus_prev();
                return FormEvent::None;
            }
            "ctrl+enter" | "ctrl+s" => {
                return self
                    .submit()
                    .map_or(FormEvent::None, FormEvent::Submitted);
            }
            "ctrl+v" => {
                return if self.body_active() {
                    FormEvent::PasteClipboard
                } else {
                    FormEvent::None
                };
            }
            _ => {}
        }

        match self.focus {
            FormField::Selector => {
                match key {
                    "left" | "h" => self.cycle_choice(false),
                    "right" | "l" | "space" => self.cycle_choice(true),
                    "enter" => self.focus = FormField::Body,
                    _ => {}
                }
                FormEvent::None
            }
            FormField::Body => {
                match key {
                    "enter" => {
                        self.body.insert_char('\n');
                    }
                    "backspace" => self.body.backspace(),
                    "delete" => self.body.delete(),
                    "left" => self.body.move_left(),
                    "right" => self.body.move_right(),
                    "home" => self.body.move_home(),
                    "end" => self.body.move_end(),
                    "space" => {
                        self.body.insert_char(' ');
                    }
                    _ => {
                        if let Some(c) = typed {
                            self.body.insert_char(c);
                        }
                    }
                }
                FormEvent::None
            }
            FormField::Submit => match key {
                "enter" | "space" => self
                    .submit()
                    .map_or(FormEvent::None, FormEvent::Submitted),
                _ => FormEvent::None,
            },
            FormField::Delete => match key {
                "enter" | "space" => match self.editing.as_ref().map(|t| t.id.clone()) {
                    Some(id) => {
                        self.close();
                        FormEvent::DeleteRequested(id)
                    }
                    None => FormEvent::None,
                },
                _ => FormEvent::None,
            },
        }
    }
}

/// Centered area used by the forms, also used for hit-testing clicks.
pub fn form_area(screen: Rect) -> Rect {
    let width = (screen.width * 3 / 5).clamp(40.min(screen.width), 90.min(screen.width));
    let height = 16.min(screen.height);
    Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_modal() -> TaskModal {
        let mut modal = TaskModal::new("Task", 500);
        modal.show_create(Priority::Medium);
        modal
    }

    fn type_text(modal: &mut TaskModal, text: &str) {
        for c in text.chars() {
            modal.handle_key(&c.to_string(), Some(c));
        }
    }

    #[test]
    fn test_opens_with_body_focused() {
        let modal = task_modal();
        assert!(modal.is_visible());
        assert_eq!(modal.focus(), FormField::Body);
        assert!(modal.body_active());
    }

    #[test]
    fn test_focus_ring_wraps_both_ways() {
        let mut modal = task_modal();
        modal.handle_key("tab", None);
        assert_eq!(modal.focus(), FormField::Submit);
        modal.handle_key("tab", None);
        assert_eq!(modal.focus(), FormField::Selector);
        modal.handle_key("shift+tab", None);
        assert_eq!(modal.focus(), FormField::Submit);
    }

    #[test]
    fn test_edit_mode_adds_delete() {
        let mut modal = TaskModal::new("Task", 500);
        modal.show_edit("t1", "existing", Priority::High);
        modal.handle_key("shift+tab", None);
        modal.handle_key("shift+tab", None);
        assert_eq!(modal.focus(), FormField::Delete);
        assert_eq!(
            modal.handle_key("enter", None),
            FormEvent::DeleteRequested("t1".to_string())
        );
        assert!(!modal.is_visible());
    }

    #[test]
    fn test_blurred_body_ignores_characters_and_paste() {
        let mut modal = task_modal();
        modal.handle_key("tab", None);
        type_text(&mut modal, "abc");
        assert_eq!(modal.paste("pasted"), None);
        assert!(modal.body().is_empty());

        modal.handle_key("shift+tab", None);
        type_text(&mut modal, "abc");
        assert_eq!(modal.body().content(), "abc");
    }

    #[test]
    fn test_whitespace_only_submission_rejected() {
        let mut modal = task_modal();
        modal.paste("   \n\t  \n  x");
        modal.handle_key("backspace", None);
        assert_eq!(modal.handle_key("ctrl+enter", None), FormEvent::None);
        assert!(modal.is_visible());
        assert_eq!(modal.body().content(), "   \n\t  \n  ");
    }

    #[test]
    fn test_submit_trims_and_closes() {
        let mut modal = task_modal();
        type_text(&mut modal, "  ship it ");
        modal.handle_key("shift+tab", None);
        modal.handle_key("right", None);
        match modal.handle_key("ctrl+s", None) {
            FormEvent::Submitted(submission) => {
                assert_eq!(submission.content, "ship it");
                assert_eq!(submission.choice, Priority::High);
                assert!(submission.editing.is_none());
            }
            other => panic!("Expected submission, got {:?}", other),
        }
        assert!(!modal.is_visible());
        assert!(modal.body().is_empty());
    }

    #[test]
    fn test_selector_cycles_with_wraparound() {
        let mut modal = task_modal();
        modal.handle_key("shift+tab", None);
        assert_eq!(modal.focus(), FormField::Selector);
        modal.handle_key("left", None);
        assert_eq!(modal.choice(), Priority::Low);
        modal.handle_key("left", None);
        assert_eq!(modal.choice(), Priority::Urgent);
        modal.handle_key("right", None);
        assert_eq!(modal.choice(), Priority::Low);
    }

    #[test]
    fn test_submit_button_with_enter() {
        let mut modal = task_modal();
        type_text(&mut modal, "x");
        modal.handle_key("tab", None);
        assert!(matches!(modal.handle_key("enter", None), FormEvent::Submitted(_)));
    }

    #[test]
    fn test_enter_in_body_inserts_newline() {
        let mut modal = task_modal();
        type_text(&mut modal, "a");
        modal.handle_key("enter", None);
        type_text(&mut modal, "b");
        assert_eq!(modal.body().content(), "a\nb");
    }

    #[test]
    fn test_edit_prefill_over_limit_is_cut_and_reported() {
        let mut modal = TaskModal::new("Task", 4);
        let report = modal.show_edit("t1", "abcdef", Priority::Low);
        assert_eq!(report, Some(Truncation { dropped: 2 }));
        assert_eq!(modal.body().content(), "abcd");
        assert_eq!(modal.editing().map(|e| e.content.as_str()), Some("abcd"));
    }

    #[test]
    fn test_close_resets_but_keeps_instance() {
        let mut modal = TaskModal::new("Task", 500);
        modal.show_edit("t1", "text", Priority::Urgent);
        assert_eq!(modal.handle_key("esc", None), FormEvent::Closed);
        assert!(modal.body().is_empty());
        assert!(modal.editing().is_none());
        modal.show_create(Priority::Medium);
        assert_eq!(modal.fields().len(), 3);
    }

    #[test]
    fn test_paste_sanitizes_and_reports_truncation() {
        let mut modal = TaskModal::new("Task", 5);
        modal.show_create(Priority::Low);
        let report = modal.paste("\x1b[1mhello world\x1b[0m\r\n");
        assert_eq!(modal.body().content(), "hello");
        assert_eq!(report, Some(Truncation { dropped: 6 }));
    }

    #[test]
    fn test_form_area_fits_small_screens() {
        let area = form_area(Rect::new(0, 0, 30, 10));
        assert!(area.width <= 30 && area.height <= 10);
    }
}
