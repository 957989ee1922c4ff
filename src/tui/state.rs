//! Application state and the single transition function.
//!
//! `AppState::update` consumes one [`AppMessage`], mutates state
//! synchronously and returns the side effects the caller has to perform
//! (emit actions, schedule a toast dismissal, read the clipboard, quit).
//! Nothing here touches the terminal.

use std::time::Duration;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{debug, warn};

use super::cursor::ScrollCursor;
use super::focus::{route, FocusTarget, Visibility};
use super::input::{BoundedInput, Truncation};
use super::keys::{key_name, typed_char};
use super::layout::{ScreenLayout, View};
use super::modal::{FormEvent, NoteModal, Submission, TaskModal};
use super::overlay::{LogsOverlay, OverlayEvent, SubagentModal};
use super::sanitize::sanitize_single_line;
use super::toast::{Toast, Toaster};
use crate::action::Action;
use crate::session::{NoteType, Priority, SessionEvent, SessionSnapshot};
use crate::Limits;

/// Cap on retained agent output lines
const MAX_OUTPUT_LINES: usize = 5000;

/// Every message the event loop can deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    Mouse(MouseEvent),
    Session(SessionEvent),
    DismissToast(u64),
    FeedClosed,
}

/// Work the event loop performs on behalf of `update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Emit(Action),
    ScheduleDismiss { generation: u64, after: Duration },
    ReadClipboard,
    Quit,
}

pub struct AppState {
    session: SessionSnapshot,
    view: View,
    tasks_cursor: ScrollCursor,
    notes_cursor: ScrollCursor,
    inbox_cursor: ScrollCursor,
    /// Lines scrolled up from the bottom of the output view
    output_scroll: usize,
    chat: BoundedInput,
    chat_active: bool,
    note_modal: NoteModal,
    task_modal: TaskModal,
    subagent_modal: Option<SubagentModal>,
    logs: LogsOverlay,
    toaster: Toaster,
    screen: Rect,
    feed_closed: bool,
    should_quit: bool,
}

impl AppState {
    pub fn new(session: SessionSnapshot, limits: Limits, toast_duration: Duration) -> Self {
        let mut state = Self {
            session: SessionSnapshot::default(),
            view: View::default(),
            tasks_cursor: ScrollCursor::default(),
            notes_cursor: ScrollCursor::default(),
            inbox_cursor: ScrollCursor::default(),
            output_scroll: 0,
            chat: BoundedInput::new(limits.chat),
            chat_active: false,
            note_modal: NoteModal::new("Note", limits.note),
            task_modal: TaskModal::new("Task", limits.task),
            subagent_modal: None,
            logs: LogsOverlay::default(),
            toaster: Toaster::new(toast_duration),
            screen: Rect::new(0, 0, 80, 24),
            feed_closed: false,
            should_quit: false,
        };
        state.set_state(session);
        state
    }

    // ── Read access for rendering ─────────────────────────────

    pub fn session(&self) -> &SessionSnapshot {
        &self.session
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn tasks_cursor(&self) -> &ScrollCursor {
        &self.tasks_cursor
    }

    pub fn notes_cursor(&self) -> &ScrollCursor {
        &self.notes_cursor
    }

    pub fn inbox_cursor(&self) -> &ScrollCursor {
        &self.inbox_cursor
    }

    pub fn output_scroll(&self) -> usize {
        self.output_scroll
    }

    pub fn chat(&self) -> &BoundedInput {
        &self.chat
    }

    pub fn chat_active(&self) -> bool {
        self.chat_active
    }

    pub fn note_modal(&self) -> &NoteModal {
        &self.note_modal
    }

    pub fn task_modal(&self) -> &TaskModal {
        &self.task_modal
    }

    pub fn subagent_modal(&self) -> Option<&SubagentModal> {
        self.subagent_modal.as_ref()
    }

    pub fn logs(&self) -> &LogsOverlay {
        &self.logs
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toaster.current()
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn feed_closed(&self) -> bool {
        self.feed_closed
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.screen, self.view)
    }

    /// Current visibility flags of every focusable surface.
    pub fn visibility(&self) -> Visibility {
        Visibility {
            note_modal: self.note_modal.is_visible(),
            task_modal: self.task_modal.is_visible(),
            subagent_modal: self
                .subagent_modal
                .as_ref()
                .is_some_and(SubagentModal::is_visible),
            logs_overlay: self.logs.is_visible(),
        }
    }

    pub fn focus(&self) -> FocusTarget {
        route(self.visibility())
    }

    // ── Transitions ───────────────────────────────────────────

    pub fn update(&mut self, msg: AppMessage) -> Vec<Effect> {
        match msg {
            AppMessage::Key(key) => self.handle_key(&key),
            AppMessage::Paste(raw) => self.handle_paste(&raw),
            AppMessage::Resize(width, height) => {
                self.screen = Rect::new(0, 0, width, height);
                Vec::new()
            }
            AppMessage::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Vec::new()
            }
            AppMessage::Session(event) => self.handle_session_event(event),
            AppMessage::DismissToast(generation) => {
                self.toaster.dismiss(generation);
                Vec::new()
            }
            AppMessage::FeedClosed => {
                self.feed_closed = true;
                self.notify("Event feed closed")
            }
        }
    }

    /// Show a toast and ask for its dismissal to be scheduled.
    pub fn notify(&mut self, text: impl Into<String>) -> Vec<Effect> {
        let generation = self.toaster.show(text);
        vec![Effect::ScheduleDismiss {
            generation,
            after: self.toaster.duration(),
        }]
    }

    fn report_truncation(&mut self, truncation: Option<Truncation>) -> Vec<Effect> {
        match truncation {
            Some(t) => {
                warn!("Input truncated: {}", t);
                self.notify(t.to_string())
            }
            None => Vec::new(),
        }
    }

    /// Replace the session and re-clamp every cursor.
    pub fn set_state(&mut self, snapshot: SessionSnapshot) {
        self.session = snapshot;
        self.tasks_cursor.set_len(self.session.tasks.len());
        self.notes_cursor.set_len(self.session.notes.len());
        self.inbox_cursor.set_len(self.session.inbox.len());
        self.logs.set_len(self.session.logs.len());
        self.output_scroll = self.output_scroll.min(self.session.output.len());

        if let Some(modal) = self.subagent_modal.as_mut() {
            let current = self
                .session
                .tasks
                .iter()
                .find(|t| t.id == modal.task_id)
                .and_then(|t| t.subagent.clone());
            match current {
                Some(subagent) => modal.refresh(subagent),
                None => self.subagent_modal = None,
            }
        }
    }

    fn handle_session_event(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::State(snapshot) => {
                self.set_state(snapshot);
                Vec::new()
            }
            SessionEvent::Output { text } => {
                self.append_output(&text);
                Vec::new()
            }
            SessionEvent::Log(entry) => {
                self.session.logs.push(entry);
                self.logs.set_len(self.session.logs.len());
                Vec::new()
            }
            SessionEvent::Inbox(message) => {
                match self.session.inbox.iter_mut().find(|m| m.id == message.id) {
                    Some(existing) => {
                        *existing = message;
                        Vec::new()
                    }
                    None => {
                        let from = message.from.clone();
                        self.session.inbox.push(message);
                        self.inbox_cursor.set_len(self.session.inbox.len());
                        self.notify(format!("New message from {from}"))
                    }
                }
            }
        }
    }

    fn append_output(&mut self, text: &str) {
        let output = &mut self.session.output;
        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            match output.last_mut() {
                Some(last) => last.push_str(first),
                None => output.push(first.to_string()),
            }
        }
        output.extend(pieces.map(str::to_string));
        if output.len() > MAX_OUTPUT_LINES {
            let excess = output.len() - MAX_OUTPUT_LINES;
            output.drain(..excess);
        }
        self.output_scroll = self.output_scroll.min(output.len());
    }

    fn handle_paste(&mut self, raw: &str) -> Vec<Effect> {
        let focus = self.focus();
        if !focus.accepts_text() {
            debug!("Paste ignored while {:?} has focus", focus);
            return Vec::new();
        }
        let truncation = match focus {
            FocusTarget::NoteModal => self.note_modal.paste(raw),
            FocusTarget::TaskModal => self.task_modal.paste(raw),
            FocusTarget::PrimaryView if self.view == View::Output && self.chat_active => {
                self.chat.insert_bounded(&sanitize_single_line(raw))
            }
            _ => None,
        };
        self.report_truncation(truncation)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Vec<Effect> {
        let name = key_name(key);
        let typed = typed_char(key);

        if name == "ctrl+c" {
            self.should_quit = true;
            return vec![Effect::Quit];
        }

        match self.focus() {
            FocusTarget::NoteModal => {
                let event = self.note_modal.handle_key(&name, typed);
                self.note_form_event(event)
            }
            FocusTarget::TaskModal => {
                let event = self.task_modal.handle_key(&name, typed);
                self.task_form_event(event)
            }
            FocusTarget::SubagentModal => {
                if let Some(modal) = self.subagent_modal.as_mut() {
                    if modal.handle_key(&name) == OverlayEvent::Closed {
                        self.subagent_modal = None;
                    }
                }
                Vec::new()
            }
            FocusTarget::LogsOverlay => {
                self.logs.handle_key(&name);
                Vec::new()
            }
            FocusTarget::PrimaryView => self.primary_key(&name, typed),
        }
    }

    fn note_form_event(&mut self, event: FormEvent<NoteType>) -> Vec<Effect> {
        match event {
            FormEvent::Submitted(submission) => note_actions(submission)
                .into_iter()
                .map(Effect::Emit)
                .collect(),
            FormEvent::DeleteRequested(id) => vec![Effect::Emit(Action::RequestDeleteNote { id })],
            FormEvent::PasteClipboard => vec![Effect::ReadClipboard],
            FormEvent::None | FormEvent::Closed => Vec::new(),
        }
    }

    fn task_form_event(&mut self, event: FormEvent<Priority>) -> Vec<Effect> {
        match event {
            FormEvent::Submitted(submission) => task_actions(submission)
                .into_iter()
                .map(Effect::Emit)
                .collect(),
            FormEvent::DeleteRequested(id) => vec![Effect::Emit(Action::RequestDeleteTask { id })],
            FormEvent::PasteClipboard => vec![Effect::ReadClipboard],
            FormEvent::None | FormEvent::Closed => Vec::new(),
        }
    }

    fn primary_key(&mut self, name: &str, typed: Option<char>) -> Vec<Effect> {
        if self.view == View::Output && self.chat_active {
            return self.chat_key(name, typed);
        }

        if let Some(view) = View::from_digit(name) {
            self.view = view;
            return Vec::new();
        }

        match name {
            "q" => {
                self.should_quit = true;
                return vec![Effect::Quit];
            }
            "tab" => self.view = self.view.next(),
            "shift+tab" => self.view = self.view.prev(),
            "t" => self.task_modal.show_create(Priority::Medium),
            "n" => self.note_modal.show_create(NoteType::Observation),
            "L" => self.logs.show(self.session.logs.len()),
            "i" if self.view == View::Output => self.chat_active = true,
            "e" => return self.open_editor(),
            "enter" => return self.activate_selection(),
            _ => self.navigate(name),
        }
        Vec::new()
    }

    fn chat_key(&mut self, name: &str, typed: Option<char>) -> Vec<Effect> {
        match name {
            "esc" => self.chat_active = false,
            "enter" => {
                if self.chat.is_blank() {
                    debug!("Rejected empty chat message");
                    return Vec::new();
                }
                let content = self.chat.content().trim().to_string();
                self.chat.clear();
                return vec![Effect::Emit(Action::SendMessage { content })];
            }
            "ctrl+v" => return vec![Effect::ReadClipboard],
            "backspace" => self.chat.backspace(),
            "delete" => self.chat.delete(),
            "left" => self.chat.move_left(),
            "right" => self.chat.move_right(),
            "home" => self.chat.move_home(),
            "end" => self.chat.move_end(),
            "space" => {
                self.chat.insert_char(' ');
            }
            _ => {
                if let Some(c) = typed {
                    self.chat.insert_char(c);
                }
            }
        }
        Vec::new()
    }

    fn current_cursor(&mut self) -> Option<&mut ScrollCursor> {
        match self.view {
            View::Output => None,
            View::Tasks => Some(&mut self.tasks_cursor),
            View::Notes => Some(&mut self.notes_cursor),
            View::Inbox => Some(&mut self.inbox_cursor),
        }
    }

    fn navigate(&mut self, name: &str) {
        if self.view == View::Output {
            let max = self.session.output.len();
            self.output_scroll = match name {
                "k" | "up" => (self.output_scroll + 1).min(max),
                "j" | "down" => self.output_scroll.saturating_sub(1),
                "pgup" => (self.output_scroll + 10).min(max),
                "pgdown" => self.output_scroll.saturating_sub(10),
                "g" | "home" => max,
                "G" | "end" => 0,
                _ => self.output_scroll,
            };
            return;
        }

        if let Some(cursor) = self.current_cursor() {
            match name {
                "j" | "down" => cursor.next(),
                "k" | "up" => cursor.prev(),
                "g" | "home" => cursor.first(),
                "G" | "end" => cursor.last(),
                _ => {}
            }
        }
    }

    fn open_editor(&mut self) -> Vec<Effect> {
        let truncation = match self.view {
            View::Tasks => self
                .tasks_cursor
                .selected()
                .and_then(|i| self.session.tasks.get(i))
                .and_then(|task| {
                    self.task_modal
                        .show_edit(task.id.clone(), &task.content, task.priority)
                }),
            View::Notes => self
                .notes_cursor
                .selected()
                .and_then(|i| self.session.notes.get(i))
                .and_then(|note| {
                    self.note_modal
                        .show_edit(note.id.clone(), &note.content, note.note_type)
                }),
            View::Output | View::Inbox => None,
        };
        self.report_truncation(truncation)
    }

    /// "Open detail" on the selected row. No-op on an empty list.
    fn activate_selection(&mut self) -> Vec<Effect> {
        match self.view {
            View::Tasks => {
                let Some(task) = self
                    .tasks_cursor
                    .selected()
                    .and_then(|i| self.session.tasks.get(i))
                else {
                    return Vec::new();
                };
                if let Some(subagent) = task.subagent.clone() {
                    self.subagent_modal = Some(SubagentModal::new(
                        task.id.clone(),
                        task.content.clone(),
                        subagent,
                    ));
                }
                Vec::new()
            }
            View::Inbox => {
                let Some(index) = self.inbox_cursor.selected() else {
                    return Vec::new();
                };
                let Some(message) = self.session.inbox.get_mut(index) else {
                    return Vec::new();
                };
                if message.read {
                    return Vec::new();
                }
                message.read = true;
                vec![Effect::Emit(Action::MarkInboxRead {
                    id: message.id.clone(),
                })]
            }
            View::Output | View::Notes => Vec::new(),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let focus = self.focus();
        match focus {
            // Clicks on or around a form do nothing.
            FocusTarget::NoteModal | FocusTarget::TaskModal => {}
            FocusTarget::SubagentModal => {
                if let Some(modal) = self.subagent_modal.as_mut() {
                    match mouse.kind {
                        MouseEventKind::ScrollUp => {
                            modal.handle_key("up");
                        }
                        MouseEventKind::ScrollDown => {
                            modal.handle_key("down");
                        }
                        _ => {}
                    }
                }
            }
            FocusTarget::LogsOverlay => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.logs.handle_key("up");
                }
                MouseEventKind::ScrollDown => {
                    self.logs.handle_key("down");
                }
                _ => {}
            },
            FocusTarget::PrimaryView => match mouse.kind {
                MouseEventKind::ScrollUp => self.navigate("up"),
                MouseEventKind::ScrollDown => self.navigate("down"),
                MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
                _ => {}
            },
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let layout = self.layout();
        if let Some(view) = layout.tab_at(column, row) {
            self.view = view;
            return;
        }
        if self.view == View::Output {
            return;
        }

        let height = layout.list_inner().height as usize;
        let Some(cursor) = self.current_cursor() else {
            return;
        };
        let start = cursor.window_start(height);
        if let Some(index) = layout.list_row_at(column, row, start) {
            if index < cursor.len() {
                cursor.select(index);
            }
        }
    }
}

/// Actions for a validated note form.
pub fn note_actions(submission: Submission<NoteType>) -> Vec<Action> {
    let Some(original) = submission.editing else {
        return vec![Action::CreateNote {
            content: submission.content,
            note_type: submission.choice,
        }];
    };

    let mut actions = Vec::new();
    if submission.choice != original.choice {
        actions.push(Action::UpdateNoteType {
            id: original.id.clone(),
            note_type: submission.choice,
        });
    }
    if submission.content != original.content.trim() {
        actions.push(Action::UpdateNoteContent {
            id: original.id,
            content: submission.content,
        });
    }
    actions
}

/// Actions for a validated task form.
pub fn task_actions(submission: Submission<Priority>) -> Vec<Action> {
    match submission.editing {
        None => vec![Action::CreateTask {
            content: submission.content,
            priority: submission.choice,
        }],
        Some(original)
            if original.content.trim() == submission.content
                && original.choice == submission.choice =>
        {
            Vec::new()
        }
        Some(original) => vec![Action::UpdateTask {
            id: original.id,
            content: submission.content,
            priority: submission.choice,
        }],
    }
}
