//! Widgets for the TUI
//!
//! Every widget borrows the [`Theme`] it is drawn with; nothing here reads
//! global state.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::cursor::ScrollCursor;
use super::focus::FocusTarget;
use super::input::BoundedInput;
use super::layout::{ScreenLayout, View, TAB_SEPARATOR};
use super::modal::{form_area, Choice, FormField, FormModal};
use super::overlay::{LogsOverlay, SubagentModal};
use super::state::AppState;
use super::theme::Theme;
use crate::session::{InboxMessage, LogEntry, Note, SessionSnapshot, Task, TaskStatus};

/// Cut `text` to `max_width` terminal columns, adding an ellipsis.
fn truncate_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(1);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// Area centered in `area`, clamped to fit.
fn centered(area: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_pct) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(height_pct) / 100) as u16;
    let width = width.max(20.min(area.width));
    let height = height.max(5.min(area.height));
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Header bar: app name, session id and agent
pub struct HeaderBar<'a> {
    pub theme: &'a Theme,
    pub session: &'a SessionSnapshot,
    pub feed_closed: bool,
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut spans = vec![
            Span::styled(" agentdeck ", self.theme.title()),
            Span::styled("│ ", self.theme.muted()),
        ];
        if self.session.session_id.is_empty() {
            spans.push(Span::styled("no session", self.theme.muted()));
        } else {
            spans.push(Span::styled(self.session.session_id.clone(), self.theme.text()));
        }
        if let Some(agent) = &self.session.agent {
            spans.push(Span::styled(" · ", self.theme.muted()));
            spans.push(Span::styled(agent.clone(), self.theme.accent()));
        }
        let unread = self.session.inbox.iter().filter(|m| !m.read).count();
        if unread > 0 {
            spans.push(Span::styled(
                format!("  ✉ {unread} unread"),
                self.theme.warning(),
            ));
        }
        if self.feed_closed {
            spans.push(Span::styled("  ○ feed closed", self.theme.muted()));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// View tabs. Label widths must match [`ScreenLayout::tab_at`].
pub struct TabBar<'a> {
    pub theme: &'a Theme,
    pub active: View,
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut spans = Vec::new();
        for (i, view) in View::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(TAB_SEPARATOR, self.theme.muted()));
            }
            let style = if *view == self.active {
                self.theme.selected()
            } else {
                self.theme.muted()
            };
            spans.push(Span::styled(view.label(), style));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// Agent output, pinned to the bottom unless scrolled up.
pub struct OutputView<'a> {
    pub theme: &'a Theme,
    pub lines: &'a [String],
    /// Lines scrolled up from the bottom
    pub scroll: usize,
}

impl Widget for OutputView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.scroll > 0 {
            format!(" Output ↑{} ", self.scroll)
        } else {
            " Output ".to_string()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(title, self.theme.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.lines.is_empty() {
            Paragraph::new("Waiting for agent output...")
                .style(self.theme.muted())
                .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let end = self.lines.len().saturating_sub(self.scroll);
        let start = end.saturating_sub(height);
        for (row, line) in self.lines[start..end].iter().enumerate() {
            let line = Line::styled(line.as_str(), self.theme.text());
            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }
    }
}

/// Bordered list with a highlighted selection row.
struct SelectList<'a> {
    theme: &'a Theme,
    title: String,
    rows: Vec<Line<'a>>,
    cursor: &'a ScrollCursor,
    empty: &'static str,
}

impl Widget for SelectList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(self.title, self.theme.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            Paragraph::new(self.empty)
                .style(self.theme.muted())
                .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let start = self.cursor.window_start(height);
        for (offset, line) in self.rows.into_iter().skip(start).take(height).enumerate() {
            let y = inner.y + offset as u16;
            if start + offset == self.cursor.index() {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), self.theme.selected());
                let plain: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                buf.set_line(
                    inner.x,
                    y,
                    &Line::styled(plain, self.theme.selected()),
                    inner.width,
                );
            } else {
                buf.set_line(inner.x, y, &line, inner.width);
            }
        }
    }
}

fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "○",
        TaskStatus::InProgress => "◐",
        TaskStatus::Done => "●",
    }
}

pub struct TaskList<'a> {
    pub theme: &'a Theme,
    pub tasks: &'a [Task],
    pub cursor: &'a ScrollCursor,
}

impl Widget for TaskList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(2) as usize;
        let rows = self
            .tasks
            .iter()
            .map(|task| {
                let prefix = format!("{} [{:<6}] ", status_marker(task.status), task.priority.to_string());
                let agent = if task.subagent.is_some() { " ⚙" } else { "" };
                let room = width.saturating_sub(prefix.width() + agent.width());
                Line::from(vec![
                    Span::styled(prefix, self.theme.priority(task.priority)),
                    Span::styled(
                        truncate_width(first_line(&task.content), room),
                        self.theme.text(),
                    ),
                    Span::styled(agent, self.theme.accent()),
                ])
            })
            .collect();
        SelectList {
            theme: self.theme,
            title: format!(" Tasks ({}) ", self.tasks.len()),
            rows,
            cursor: self.cursor,
            empty: "No tasks. Press t to add one.",
        }
        .render(area, buf);
    }
}

pub struct NoteList<'a> {
    pub theme: &'a Theme,
    pub notes: &'a [Note],
    pub cursor: &'a ScrollCursor,
}

impl Widget for NoteList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(2) as usize;
        let rows = self
            .notes
            .iter()
            .map(|note| {
                let prefix = format!("{:<12} ", note.note_type.label());
                let room = width.saturating_sub(prefix.width());
                Line::from(vec![
                    Span::styled(prefix, self.theme.note_type(note.note_type)),
                    Span::styled(
                        truncate_width(first_line(&note.content), room),
                        self.theme.text(),
                    ),
                ])
            })
            .collect();
        SelectList {
            theme: self.theme,
            title: format!(" Notes ({}) ", self.notes.len()),
            rows,
            cursor: self.cursor,
            empty: "No notes. Press n to add one.",
        }
        .render(area, buf);
    }
}

pub struct InboxList<'a> {
    pub theme: &'a Theme,
    pub messages: &'a [InboxMessage],
    pub cursor: &'a ScrollCursor,
}

impl Widget for InboxList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(2) as usize;
        let rows = self
            .messages
            .iter()
            .map(|message| {
                let (marker, style) = if message.read {
                    ("  ", self.theme.muted())
                } else {
                    ("● ", self.theme.warning())
                };
                let time = message.received_at.format("%H:%M ").to_string();
                let from = format!("{}: ", message.from);
                let room = width.saturating_sub(marker.width() + time.width() + from.width());
                Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(time, self.theme.muted()),
                    Span::styled(from, self.theme.accent()),
                    Span::styled(truncate_width(&message.subject, room), self.theme.text()),
                ])
            })
            .collect();
        SelectList {
            theme: self.theme,
            title: format!(" Inbox ({}) ", self.messages.len()),
            rows,
            cursor: self.cursor,
            empty: "Inbox is empty.",
        }
        .render(area, buf);
    }
}

/// Single-line chat prompt under the output view
pub struct ChatBox<'a> {
    pub theme: &'a Theme,
    pub input: &'a BoundedInput,
    pub active: bool,
}

impl Widget for ChatBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.active {
            self.theme.border_focused()
        } else {
            self.theme.border()
        };
        let counter = format!(" {}/{} ", self.input.char_count(), self.input.limit());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(" Message ", self.theme.muted()))
            .title_bottom(Line::styled(counter, self.theme.muted()).right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let (text, style) = if self.input.is_empty() {
            let hint = if self.active {
                "Type a message... (Enter to send, Esc to leave)"
            } else {
                "Press i to message the agent"
            };
            (hint, self.theme.muted())
        } else {
            (self.input.content(), self.theme.text())
        };

        // Keep the cursor visible by scrolling horizontally.
        let cursor_x = self.input.cursor_display_width();
        let skip = cursor_x.saturating_sub(inner.width.saturating_sub(1) as usize);
        let mut skipped = 0;
        let visible: String = text
            .chars()
            .skip_while(|c| {
                if skipped >= skip {
                    return false;
                }
                skipped += unicode_width::UnicodeWidthChar::width(*c).unwrap_or(1);
                true
            })
            .collect();
        buf.set_line(inner.x, inner.y, &Line::styled(visible, style), inner.width);
    }
}

/// Context-sensitive key hints
pub struct HelpBar<'a> {
    pub theme: &'a Theme,
    pub hints: &'a [(&'a str, &'a str)],
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.muted()));
            }
            spans.push(Span::styled(*key, self.theme.key()));
            spans.push(Span::styled(format!(" {desc}"), self.theme.key_desc()));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// Transient notice drawn over the bottom-right corner.
pub struct ToastBanner<'a> {
    pub theme: &'a Theme,
    pub text: &'a str,
}

impl Widget for ToastBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let label = format!(" {} ", self.text);
        let width = (label.width() as u16).min(area.width);
        let rect = Rect::new(area.x + area.width - width, area.y, width, 1);
        Clear.render(rect, buf);
        buf.set_line(rect.x, rect.y, &Line::styled(label, self.theme.toast()), width);
    }
}

/// Task or note form
pub struct FormView<'a, C: Choice> {
    pub theme: &'a Theme,
    pub modal: &'a FormModal<C>,
}

impl<C: Choice> FormView<'_, C> {
    fn field_style(&self, field: FormField) -> Style {
        if self.modal.focus() == field {
            self.theme.selected()
        } else {
            self.theme.text()
        }
    }
}

impl<C: Choice> Widget for FormView<'_, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let mode = if self.modal.editing().is_some() {
            "Edit"
        } else {
            "New"
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_focused())
            .title(Span::styled(
                format!(" {} {} ", mode, self.modal.title()),
                self.theme.title(),
            ));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 4 {
            return;
        }

        // Selector row
        let mut spans = vec![Span::styled("◀ ", self.theme.muted())];
        for (i, choice) in C::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if *choice == self.modal.choice() {
                self.field_style(FormField::Selector)
            } else {
                self.theme.muted()
            };
            spans.push(Span::styled(format!(" {} ", choice.label()), style));
        }
        spans.push(Span::styled(" ▶", self.theme.muted()));
        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);

        // Body
        let body = self.modal.body();
        let body_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 3);
        let body_block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.modal.focus() == FormField::Body {
                self.theme.border_focused()
            } else {
                self.theme.border()
            })
            .title_bottom(
                Line::styled(
                    format!(" {}/{} ", body.char_count(), body.limit()),
                    if body.remaining() == 0 {
                        self.theme.warning()
                    } else {
                        self.theme.muted()
                    },
                )
                .right_aligned(),
            );
        let body_inner = body_block.inner(body_area);
        body_block.render(body_area, buf);
        let (cursor_line, _) = body.cursor_line_col();
        let scroll = cursor_line.saturating_sub(body_inner.height.saturating_sub(1) as usize);
        Paragraph::new(body.content())
            .style(self.theme.text())
            .wrap(Wrap { trim: false })
            .scroll((scroll as u16, 0))
            .render(body_inner, buf);

        // Buttons
        let mut buttons = vec![Span::styled(" Save ", self.field_style(FormField::Submit))];
        if self.modal.editing().is_some() {
            buttons.push(Span::raw("  "));
            buttons.push(Span::styled(
                " Delete ",
                if self.modal.focus() == FormField::Delete {
                    self.theme.selected()
                } else {
                    self.theme.error()
                },
            ));
        }
        buttons.push(Span::styled(
            "   tab next · ctrl+s save · esc cancel",
            self.theme.muted(),
        ));
        buf.set_line(
            inner.x,
            inner.y + inner.height - 1,
            &Line::from(buttons),
            inner.width,
        );
    }
}

/// Cursor position inside a form body, for the terminal caret.
fn form_cursor<C: Choice>(modal: &FormModal<C>, area: Rect) -> Option<Position> {
    if !modal.body_active() {
        return None;
    }
    // Border (1) + selector row (1) + body border (1)
    let (line, _) = modal.body().cursor_line_col();
    let body_height = area.height.saturating_sub(7) as usize;
    let row = line.min(body_height.saturating_sub(1)) as u16;
    Some(Position::new(
        area.x + 2 + modal.body().cursor_display_width() as u16,
        area.y + 3 + row,
    ))
}

pub struct SubagentView<'a> {
    pub theme: &'a Theme,
    pub modal: &'a SubagentModal,
}

impl Widget for SubagentView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let subagent = &self.modal.subagent;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_focused())
            .title(Span::styled(
                format!(" {} · {} ", subagent.name, subagent.status),
                self.theme.title(),
            ))
            .title_bottom(Line::styled(" esc close · j/k scroll ", self.theme.muted()));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 {
            return;
        }

        let task = Line::from(vec![
            Span::styled("Task: ", self.theme.muted()),
            Span::styled(
                truncate_width(first_line(&self.modal.task_content), inner.width as usize),
                self.theme.text(),
            ),
        ]);
        buf.set_line(inner.x, inner.y, &task, inner.width);

        let height = (inner.height - 1) as usize;
        let cursor = self.modal.cursor();
        let start = cursor.window_start(height);
        for (offset, line) in subagent.output.iter().skip(start).take(height).enumerate() {
            let style = if start + offset == cursor.index() {
                self.theme.accent()
            } else {
                self.theme.text()
            };
            buf.set_line(
                inner.x,
                inner.y + 1 + offset as u16,
                &Line::styled(line.as_str(), style),
                inner.width,
            );
        }
    }
}

pub struct LogsView<'a> {
    pub theme: &'a Theme,
    pub overlay: &'a LogsOverlay,
    pub entries: &'a [LogEntry],
}

impl Widget for LogsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_focused())
            .title(Span::styled(
                format!(" Logs ({}) ", self.entries.len()),
                self.theme.title(),
            ))
            .title_bottom(Line::styled(" esc close · j/k scroll ", self.theme.muted()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            Paragraph::new("No log entries.")
                .style(self.theme.muted())
                .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let cursor = self.overlay.cursor();
        let start = cursor.window_start(height);
        for (offset, entry) in self.entries.iter().skip(start).take(height).enumerate() {
            let level = format!("{:<5} ", format!("{:?}", entry.level).to_uppercase());
            let mut line = Line::from(vec![
                Span::styled(entry.timestamp.format("%H:%M:%S ").to_string(), self.theme.muted()),
                Span::styled(level, self.theme.log_level(entry.level)),
                Span::styled(entry.message.as_str(), self.theme.text()),
            ]);
            if start + offset == cursor.index() {
                line = line.patch_style(self.theme.selected());
            }
            buf.set_line(inner.x, inner.y + offset as u16, &line, inner.width);
        }
    }
}

fn hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    match state.focus() {
        FocusTarget::NoteModal | FocusTarget::TaskModal => &[
            ("tab", "field"),
            ("ctrl+s", "save"),
            ("ctrl+v", "paste"),
            ("esc", "cancel"),
        ],
        FocusTarget::SubagentModal | FocusTarget::LogsOverlay => {
            &[("j/k", "scroll"), ("g/G", "top/bottom"), ("esc", "close")]
        }
        FocusTarget::PrimaryView if state.chat_active() => {
            &[("enter", "send"), ("ctrl+v", "paste"), ("esc", "leave")]
        }
        FocusTarget::PrimaryView => match state.view() {
            View::Output => &[
                ("1-4", "view"),
                ("i", "message"),
                ("j/k", "scroll"),
                ("t/n", "task/note"),
                ("L", "logs"),
                ("q", "quit"),
            ],
            View::Tasks => &[
                ("1-4", "view"),
                ("j/k", "move"),
                ("enter", "subagent"),
                ("e", "edit"),
                ("t", "new"),
                ("q", "quit"),
            ],
            View::Notes => &[
                ("1-4", "view"),
                ("j/k", "move"),
                ("e", "edit"),
                ("n", "new"),
                ("q", "quit"),
            ],
            View::Inbox => &[
                ("1-4", "view"),
                ("j/k", "move"),
                ("enter", "mark read"),
                ("q", "quit"),
            ],
        },
    }
}

/// Draw the whole screen for `state`.
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    let layout = ScreenLayout::new(area, state.view());
    let session = state.session();

    frame.render_widget(
        HeaderBar {
            theme,
            session,
            feed_closed: state.feed_closed(),
        },
        layout.header,
    );
    frame.render_widget(
        TabBar {
            theme,
            active: state.view(),
        },
        layout.tabs,
    );

    match state.view() {
        View::Output => {
            frame.render_widget(
                OutputView {
                    theme,
                    lines: &session.output,
                    scroll: state.output_scroll(),
                },
                layout.main,
            );
            frame.render_widget(
                ChatBox {
                    theme,
                    input: state.chat(),
                    active: state.chat_active(),
                },
                layout.chat,
            );
        }
        View::Tasks => frame.render_widget(
            TaskList {
                theme,
                tasks: &session.tasks,
                cursor: state.tasks_cursor(),
            },
            layout.main,
        ),
        View::Notes => frame.render_widget(
            NoteList {
                theme,
                notes: &session.notes,
                cursor: state.notes_cursor(),
            },
            layout.main,
        ),
        View::Inbox => frame.render_widget(
            InboxList {
                theme,
                messages: &session.inbox,
                cursor: state.inbox_cursor(),
            },
            layout.main,
        ),
    }

    frame.render_widget(
        HelpBar {
            theme,
            hints: hints(state),
        },
        layout.status,
    );

    // Overlays, lowest priority first so the focused one is on top.
    if state.logs().is_visible() {
        frame.render_widget(
            LogsView {
                theme,
                overlay: state.logs(),
                entries: &session.logs,
            },
            centered(area, 85, 80),
        );
    }
    if let Some(modal) = state.subagent_modal() {
        frame.render_widget(SubagentView { theme, modal }, centered(area, 80, 70));
    }
    let form = form_area(area);
    if state.task_modal().is_visible() {
        frame.render_widget(
            FormView {
                theme,
                modal: state.task_modal(),
            },
            form,
        );
    }
    if state.note_modal().is_visible() {
        frame.render_widget(
            FormView {
                theme,
                modal: state.note_modal(),
            },
            form,
        );
    }

    if let Some(toast) = state.toast() {
        let row = Rect::new(area.x, layout.status.y.saturating_sub(1), area.width, 1);
        frame.render_widget(
            ToastBanner {
                theme,
                text: &toast.text,
            },
            row,
        );
    }

    let caret = if state.note_modal().is_visible() {
        form_cursor(state.note_modal(), form)
    } else if state.task_modal().is_visible() {
        form_cursor(state.task_modal(), form)
    } else if state.focus() == FocusTarget::PrimaryView
        && state.view() == View::Output
        && state.chat_active()
    {
        let inner_width = layout.chat.width.saturating_sub(2) as usize;
        let x = state.chat().cursor_display_width().min(inner_width.saturating_sub(1));
        Some(Position::new(layout.chat.x + 1 + x as u16, layout.chat.y + 1))
    } else {
        None
    };
    if let Some(position) = caret {
        frame.set_cursor_position(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Limits;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    #[test]
    fn test_truncate_width() {
        assert_eq!(truncate_width("short", 10), "short");
        assert_eq!(truncate_width("a long line of text", 8), "a long …");
    }

    #[test]
    fn test_draw_renders_tabs_and_hints() {
        let state = AppState::new(SessionSnapshot::default(), Limits::default(), Duration::from_secs(3));
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, &state, &theme)).unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..80).map(|x| buffer[(x, 1)].symbol().to_string()).collect();
        assert!(row.starts_with(" 1 Output │ 2 Tasks "), "tab row: {row:?}");
    }

    #[test]
    fn test_draw_survives_tiny_terminal() {
        let state = AppState::new(SessionSnapshot::default(), Limits::default(), Duration::from_secs(3));
        let theme = Theme::light();
        let mut terminal = Terminal::new(TestBackend::new(12, 6)).unwrap();
        terminal.draw(|f| draw(f, &state, &theme)).unwrap();
    }
}
