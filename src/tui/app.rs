//! Main TUI application
//!
//! Owns the terminal and drives [`AppState`]: each turn draws, drains at most
//! one session event, fires due toast dismissals and handles one terminal
//! event. Side effects requested by the state are carried out here.

use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use super::clipboard_paste::paste_text;
use super::state::{AppMessage, AppState, Effect};
use super::theme::Theme;
use super::widgets::draw;
use crate::feed::{EventFeed, FeedPoll};
use crate::outbox::Outbox;

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: AppState,
    theme: Theme,
    outbox: Outbox,
    /// `None` once the feed has closed (or when none was configured)
    feed: Option<EventFeed>,
    /// Messages to deliver once their deadline has passed
    deferred: Vec<(Instant, AppMessage)>,
}

impl App {
    /// Enter the alternate screen and take over the terminal.
    pub fn new(
        mut state: AppState,
        theme: Theme,
        outbox: Outbox,
        feed: Option<EventFeed>,
    ) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let size = terminal.size()?;
        state.update(AppMessage::Resize(size.width, size.height));

        Ok(Self {
            terminal,
            state,
            theme,
            outbox,
            feed,
            deferred: Vec::new(),
        })
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> io::Result<()> {
        let poll_timeout = Duration::from_millis(16); // ~60fps responsiveness

        loop {
            self.terminal
                .draw(|f| draw(f, &self.state, &self.theme))?;

            if let Some(msg) = self.poll_feed().await {
                self.dispatch(msg).await;
            }

            for msg in self.take_due(Instant::now()) {
                self.dispatch(msg).await;
            }

            if self.state.should_quit() {
                break;
            }

            if event::poll(poll_timeout)? {
                let msg = match event::read()? {
                    // Release and repeat events are reported on some platforms.
                    Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppMessage::Key(key)),
                    Event::Paste(text) => Some(AppMessage::Paste(text)),
                    Event::Resize(width, height) => Some(AppMessage::Resize(width, height)),
                    Event::Mouse(mouse) => Some(AppMessage::Mouse(mouse)),
                    _ => None,
                };
                if let Some(msg) = msg {
                    self.dispatch(msg).await;
                }
            }

            if self.state.should_quit() {
                break;
            }
        }

        if let Some(feed) = self.feed.take() {
            feed.shutdown().await;
        }
        info!("Session viewer closed");
        Ok(())
    }

    /// Take one event from the feed, reporting closure exactly once.
    async fn poll_feed(&mut self) -> Option<AppMessage> {
        let poll = self.feed.as_ref()?.try_next();
        match poll {
            FeedPoll::Event(event) => Some(AppMessage::Session(event)),
            FeedPoll::Empty => None,
            FeedPoll::Closed => {
                let feed = self.feed.take()?;
                info!("Event feed closed ({} events dropped)", feed.dropped());
                feed.shutdown().await;
                Some(AppMessage::FeedClosed)
            }
        }
    }

    fn take_due(&mut self, now: Instant) -> Vec<AppMessage> {
        let (due, pending): (Vec<_>, Vec<_>) = self
            .deferred
            .drain(..)
            .partition(|(deadline, _)| *deadline <= now);
        self.deferred = pending;
        due.into_iter().map(|(_, msg)| msg).collect()
    }

    /// Feed one message to the state and carry out every effect it asks for.
    async fn dispatch(&mut self, msg: AppMessage) {
        let mut effects: VecDeque<Effect> = self.state.update(msg).into();

        while let Some(effect) = effects.pop_front() {
            match effect {
                Effect::Emit(action) => {
                    if let Err(e) = self.outbox.send(&action).await {
                        error!("Failed to emit {} action: {}", action.kind(), e);
                        effects.extend(
                            self.state
                                .notify(format!("Could not send {}", action.kind())),
                        );
                    }
                }
                Effect::ScheduleDismiss { generation, after } => {
                    self.deferred
                        .push((Instant::now() + after, AppMessage::DismissToast(generation)));
                }
                Effect::ReadClipboard => match paste_text() {
                    Ok(text) => effects.extend(self.state.update(AppMessage::Paste(text))),
                    Err(e) => {
                        warn!("Clipboard paste failed: {}", e);
                        effects.extend(self.state.notify("Clipboard is empty or unavailable"));
                    }
                },
                Effect::Quit => debug!("Quit requested"),
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}
