//! Clipboard helpers for `ctrl+v` paste.
//!
//! Terminals deliver bracketed pastes on their own; this covers the explicit
//! key binding, which reads the system clipboard directly.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteTextError {
    ClipboardUnavailable(String),
    NoText(String),
}

impl std::fmt::Display for PasteTextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasteTextError::ClipboardUnavailable(msg) => write!(f, "clipboard unavailable: {msg}"),
            PasteTextError::NoText(msg) => write!(f, "no text on clipboard: {msg}"),
        }
    }
}

impl std::error::Error for PasteTextError {}

/// Read text from the system clipboard.
///
/// The result is raw; callers run it through the same sanitizer as a
/// bracketed paste.
pub fn paste_text() -> Result<String, PasteTextError> {
    let mut cb = arboard::Clipboard::new()
        .map_err(|e| PasteTextError::ClipboardUnavailable(e.to_string()))?;
    cb.get_text()
        .map_err(|e| PasteTextError::NoText(e.to_string()))
}
