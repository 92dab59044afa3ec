//! Platform-specific key bindings

use crossterm::event::{KeyEvent, KeyModifiers};

/// Platform-appropriate modifier for form shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit / next section shortcut display
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Open the doctor directory
/// - macOS: "Cmd+D"
/// - Linux/Windows: "Ctrl+D"
#[cfg(target_os = "macos")]
pub const DIRECTORY_SHORTCUT: &str = "Cmd+D";

#[cfg(not(target_os = "macos"))]
pub const DIRECTORY_SHORTCUT: &str = "Ctrl+D";

/// Whether `key` is `c` pressed with the shortcut modifier (Ctrl also accepted)
pub fn is_shortcut(key: &KeyEvent, c: char) -> bool {
    key.code == crossterm::event::KeyCode::Char(c)
        && (key.modifiers.contains(SHORTCUT_MODIFIER)
            || key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_ctrl_is_always_accepted() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(is_shortcut(&key, 's'));
        assert!(!is_shortcut(&key, 'd'));
    }

    #[test]
    fn test_plain_char_is_not_shortcut() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert!(!is_shortcut(&key, 's'));
    }
}
