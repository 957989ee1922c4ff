//! Outbox - appends emitted actions to a JSON-lines file
//!
//! The session layer picks actions up from this file; each line is one
//! serialized [`Action`].

use crate::action::Action;
use crate::Result;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::info;

pub struct Outbox {
    path: PathBuf,
}

impl Outbox {
    /// Create an outbox writing to `path`. Parent directories are created.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one action as a JSON line.
    pub async fn send(&self, action: &Action) -> Result<()> {
        let mut line = serde_json::to_string(action)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        info!("Emitted {} action", action.kind());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::NoteType;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_appends_one_line_per_action() {
        let dir = TempDir::new().unwrap();
        let outbox = Outbox::new(dir.path().join("nested").join("outbox.jsonl"))
            .await
            .unwrap();

        outbox
            .send(&Action::CreateNote {
                content: "first".to_string(),
                note_type: NoteType::Decision,
            })
            .await
            .unwrap();
        outbox
            .send(&Action::RequestDeleteNote {
                id: "n1".to_string(),
            })
            .await
            .unwrap();

        let written = std::fs::read_to_string(outbox.path()).unwrap();
        let lines: Vec<Action> = written
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            Action::RequestDeleteNote {
                id: "n1".to_string()
            }
        );
    }
}
