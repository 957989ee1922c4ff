//! Canonical key identifiers
//!
//! Handlers match on strings like `"tab"`, `"shift+tab"` or `"ctrl+enter"`
//! instead of raw crossterm events, so key bindings read the same everywhere.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Canonical name of a key press. Unknown keys map to an empty string.
pub fn key_name(key: &KeyEvent) -> String {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let (base, is_char) = match key.code {
        // A space is a character, but named so it survives trimming.
        KeyCode::Char(' ') => ("space".to_string(), false),
        KeyCode::Char(c) if ctrl || alt => (c.to_ascii_lowercase().to_string(), true),
        KeyCode::Char(c) => (c.to_string(), true),
        KeyCode::Enter => ("enter".to_string(), false),
        KeyCode::Tab => ("tab".to_string(), false),
        KeyCode::BackTab => return prefixed(ctrl, alt, true, "tab"),
        KeyCode::Esc => ("esc".to_string(), false),
        KeyCode::Backspace => ("backspace".to_string(), false),
        KeyCode::Delete => ("delete".to_string(), false),
        KeyCode::Up => ("up".to_string(), false),
        KeyCode::Down => ("down".to_string(), false),
        KeyCode::Left => ("left".to_string(), false),
        KeyCode::Right => ("right".to_string(), false),
        KeyCode::PageUp => ("pgup".to_string(), false),
        KeyCode::PageDown => ("pgdown".to_string(), false),
        KeyCode::Home => ("home".to_string(), false),
        KeyCode::End => ("end".to_string(), false),
        KeyCode::F(n) => (format!("f{n}"), false),
        _ => return String::new(),
    };

    // Shift is already encoded in the character itself ("A" vs "a").
    prefixed(ctrl, alt, shift && !is_char, &base)
}

fn prefixed(ctrl: bool, alt: bool, shift: bool, base: &str) -> String {
    let mut name = String::new();
    if ctrl {
        name.push_str("ctrl+");
    }
    if alt {
        name.push_str("alt+");
    }
    if shift {
        name.push_str("shift+");
    }
    name.push_str(base);
    name
}

/// The printable character carried by a key press, if it should be typed.
pub fn typed_char(key: &KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(key_name(&key(KeyCode::Tab, KeyModifiers::NONE)), "tab");
        assert_eq!(key_name(&key(KeyCode::Esc, KeyModifiers::NONE)), "esc");
        assert_eq!(key_name(&key(KeyCode::Char('j'), KeyModifiers::NONE)), "j");
        assert_eq!(key_name(&key(KeyCode::Char(' '), KeyModifiers::NONE)), "space");
    }

    #[test]
    fn test_shift_tab_variants() {
        assert_eq!(key_name(&key(KeyCode::BackTab, KeyModifiers::SHIFT)), "shift+tab");
        assert_eq!(key_name(&key(KeyCode::BackTab, KeyModifiers::NONE)), "shift+tab");
        assert_eq!(key_name(&key(KeyCode::Tab, KeyModifiers::SHIFT)), "shift+tab");
    }

    #[test]
    fn test_modified_keys() {
        assert_eq!(key_name(&key(KeyCode::Enter, KeyModifiers::CONTROL)), "ctrl+enter");
        assert_eq!(key_name(&key(KeyCode::Char('S'), KeyModifiers::CONTROL)), "ctrl+s");
        assert_eq!(key_name(&key(KeyCode::Char('G'), KeyModifiers::SHIFT)), "G");
    }

    #[test]
    fn test_typed_char_ignores_chords() {
        assert_eq!(typed_char(&key(KeyCode::Char('x'), KeyModifiers::NONE)), Some('x'));
        assert_eq!(typed_char(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
        assert_eq!(typed_char(&key(KeyCode::Enter, KeyModifiers::NONE)), None);
    }
}
