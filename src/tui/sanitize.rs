//! Paste sanitization shared by every text-entry surface.
//!
//! Multi-line inputs (note and task bodies) apply [`sanitize`] only.
//! Single-line inputs (the chat prompt) apply [`sanitize`] and then
//! [`collapse_newlines`], in that order.

use regex::Regex;
use std::sync::OnceLock;

static CSI_SEQUENCE: OnceLock<Regex> = OnceLock::new();
static NEWLINE_RUN: OnceLock<Regex> = OnceLock::new();

/// `ESC [ <params> <final letter>`: cursor movement, SGR colors, private modes.
fn csi_sequence() -> &'static Regex {
    CSI_SEQUENCE.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("valid CSI pattern"))
}

fn newline_run() -> &'static Regex {
    NEWLINE_RUN.get_or_init(|| Regex::new(r"\n+").expect("valid newline pattern"))
}

/// Control characters removed from pasted text. Tab, LF and CR survive.
fn is_stripped_control(ch: char) -> bool {
    match ch {
        '\t' | '\n' | '\r' => false,
        '\u{0}'..='\u{1f}' | '\u{7f}' => true,
        _ => false,
    }
}

/// Convert arbitrary pasted text into a safe, displayable form.
///
/// Escape sequences go first, then stray control bytes, then `\r\n` becomes
/// `\n`, then trailing whitespace is trimmed. A lone `\r` is left in place
/// for line-based callers to deal with.
pub fn sanitize(raw: &str) -> String {
    let without_escapes = csi_sequence().replace_all(raw, "");
    let printable: String = without_escapes
        .chars()
        .filter(|&ch| !is_stripped_control(ch))
        .collect();
    let normalized = printable.replace("\r\n", "\n");
    normalized
        .trim_end_matches([' ', '\t', '\n', '\r'])
        .to_string()
}

/// Replace every run of newlines with a single space.
pub fn collapse_newlines(text: &str) -> String {
    newline_run().replace_all(text, " ").into_owned()
}

/// The pipeline for single-line fields.
pub fn sanitize_single_line(raw: &str) -> String {
    collapse_newlines(&sanitize(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_color_codes() {
        let raw = "\x1b[31mred\x1b[0m and \x1b[1;32mbold green\x1b[0m";
        assert_eq!(sanitize(raw), "red and bold green");
    }

    #[test]
    fn test_strips_cursor_and_private_mode_sequences() {
        let raw = "a\x1b[2Jb\x1b[10;20Hc\x1b[?25ld\x1b[?2004h";
        assert_eq!(sanitize(raw), "abcd");
    }

    #[test]
    fn test_removes_null_and_control_bytes() {
        let raw = "he\u{0}llo\u{7}\u{8} wor\u{7f}ld\u{1b}";
        assert_eq!(sanitize(raw), "hello world");
    }

    #[test]
    fn test_keeps_tabs_inside_text() {
        assert_eq!(sanitize("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn test_normalizes_crlf() {
        assert_eq!(sanitize("line1\r\nline2\r\nline3"), "line1\nline2\nline3");
    }

    #[test]
    fn test_bare_cr_is_preserved() {
        assert_eq!(sanitize("one\rtwo"), "one\rtwo");
    }

    #[test]
    fn test_trims_trailing_whitespace_only() {
        assert_eq!(sanitize("  leading kept \t\r\n\n  "), "  leading kept");
    }

    #[test]
    fn test_empty_and_all_stripped() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("\x1b[0m\u{0}\u{1}  \n"), "");
    }

    #[test]
    fn test_collapse_newlines() {
        assert_eq!(
            collapse_newlines("first line\nsecond line\n\nfourth line"),
            "first line second line fourth line"
        );
        assert_eq!(collapse_newlines("line1\n\n\n\nline2"), "line1 line2");
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let once = collapse_newlines("a\n\nb\nc\n");
        assert_eq!(collapse_newlines(&once), once);
    }

    #[test]
    fn test_single_line_pipeline_order() {
        let raw = "hello\x1b[0m\r\n\r\nworld\r\n";
        assert_eq!(sanitize_single_line(raw), "hello world");
    }
}
