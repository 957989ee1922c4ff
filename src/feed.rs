//! Session event feed
//!
//! A background task reads newline-delimited JSON [`SessionEvent`]s and
//! pushes them into a bounded queue. When the queue is full the newest event
//! is dropped instead of blocking the reader. The UI side drains the queue
//! one event per turn and stops once the channel is closed.

use crate::session::SessionEvent;
use crate::{DeckError, Result};
use async_channel::{Receiver, Sender, TryRecvError, TrySendError};
use futures::StreamExt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::LinesStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of a non-blocking receive.
#[derive(Debug, PartialEq, Eq)]
pub enum FeedPoll {
    Event(SessionEvent),
    Empty,
    Closed,
}

pub struct EventFeed {
    rx: Receiver<SessionEvent>,
    dropped: Arc<AtomicU64>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl EventFeed {
    /// Start reading events from `reader` on a tokio task.
    pub fn spawn<R>(reader: R, capacity: usize, cancel: CancellationToken) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = async_channel::bounded(capacity.max(1));
        let dropped = Arc::new(AtomicU64::new(0));
        let handle = tokio::spawn(pump(reader, tx, dropped.clone(), cancel.clone()));
        Self {
            rx,
            dropped,
            cancel,
            handle,
        }
    }

    /// Open `path` (a file or FIFO) and start reading from it.
    pub async fn open(path: &Path, capacity: usize, cancel: CancellationToken) -> Result<Self> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| DeckError::Feed(format!("{}: {}", path.display(), e)))?;
        info!("Subscribed to session events at {:?}", path);
        Ok(Self::spawn(file, capacity, cancel))
    }

    /// Take at most one queued event without waiting.
    pub fn try_next(&self) -> FeedPoll {
        match self.rx.try_recv() {
            Ok(event) => FeedPoll::Event(event),
            Err(TryRecvError::Empty) => FeedPoll::Empty,
            Err(TryRecvError::Closed) => FeedPoll::Closed,
        }
    }

    /// Number of events discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Cancel and wait for the reader task to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

async fn pump<R>(
    reader: R,
    tx: Sender<SessionEvent>,
    dropped: Arc<AtomicU64>,
    cancel: CancellationToken,
) where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut lines = LinesStream::new(BufReader::new(reader).lines());

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Event feed cancelled");
                break;
            }
            line = lines.next() => line,
        };

        let line = match line {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                warn!("Event feed read error: {}", e);
                break;
            }
            None => {
                debug!("Event feed reached end of input");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let event = match serde_json::from_str::<SessionEvent>(&line) {
            Ok(event) => event,
            Err(e) => {
                warn!("Skipping malformed event: {}", e);
                continue;
            }
        };

        match tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                let total = dropped.fetch_add(1, Ordering::Relaxed) + 1;
                warn!("Event queue full, dropped event ({} total)", total);
            }
            Err(TrySendError::Closed(_)) => break,
        }
    }

    tx.close();
    info!("Unsubscribed from session events");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const OUTPUT_LINE: &str = "{\"type\":\"output\",\"text\":\"hi\"}\n";

    async fn wait_closed(feed: &EventFeed) {
        // Let the reader task run to completion.
        for _ in 0..100 {
            if feed.rx.is_closed() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("feed never closed");
    }

    #[tokio::test]
    async fn test_reads_events_and_closes_at_eof() {
        let input = format!("{OUTPUT_LINE}\nnot json\n{OUTPUT_LINE}");
        let feed = EventFeed::spawn(
            std::io::Cursor::new(input.into_bytes()),
            8,
            CancellationToken::new(),
        );
        wait_closed(&feed).await;

        assert!(matches!(feed.try_next(), FeedPoll::Event(SessionEvent::Output { .. })));
        assert!(matches!(feed.try_next(), FeedPoll::Event(SessionEvent::Output { .. })));
        assert_eq!(feed.try_next(), FeedPoll::Closed);
        assert_eq!(feed.try_next(), FeedPoll::Closed);
    }

    #[tokio::test]
    async fn test_full_queue_drops_newest() {
        let input = OUTPUT_LINE.repeat(5);
        let feed = EventFeed::spawn(
            std::io::Cursor::new(input.into_bytes()),
            2,
            CancellationToken::new(),
        );
        wait_closed(&feed).await;

        assert_eq!(feed.dropped(), 3);
        assert!(matches!(feed.try_next(), FeedPoll::Event(_)));
        assert!(matches!(feed.try_next(), FeedPoll::Event(_)));
        assert_eq!(feed.try_next(), FeedPoll::Closed);
    }

    #[tokio::test]
    async fn test_cancellation_closes_channel() {
        let (_writer, reader) = tokio::io::duplex(64);
        let cancel = CancellationToken::new();
        let feed = EventFeed::spawn(reader, 4, cancel.clone());
        assert_eq!(feed.try_next(), FeedPoll::Empty);

        cancel.cancel();
        wait_closed(&feed).await;
        assert_eq!(feed.try_next(), FeedPoll::Closed);
    }
}
