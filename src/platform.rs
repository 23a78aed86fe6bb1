//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for copy/submit shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "^S";

/// Copy shortcut display
#[cfg(target_os = "macos")]
pub const COPY_SHORTCUT: &str = "Cmd+Y";

#[cfg(not(target_os = "macos"))]
pub const COPY_SHORTCUT: &str = "^Y";

/// Whether `modifiers` carries the platform action modifier. Ctrl is
/// accepted everywhere since many macOS terminals never forward Cmd.
pub fn has_action_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.contains(ACTION_MODIFIER) || modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_always_counts() {
        assert!(has_action_modifier(KeyModifiers::CONTROL));
        assert!(!has_action_modifier(KeyModifiers::SHIFT));
        assert!(!has_action_modifier(KeyModifiers::NONE));
    }
}
