//! Application state definitions

use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Splash screen with the school banner
    Splash,
    #[default]
    Admissions,
    Checklist,
    Gallery,
}

impl View {
    /// Views reachable from the sidebar, in display order
    pub const SIDEBAR: [View; 3] = [View::Admissions, View::Checklist, View::Gallery];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Splash => "",
            Self::Admissions => "Admissions",
            Self::Checklist => "Documents",
            Self::Gallery => "Gallery",
        }
    }

    /// Function key that jumps to this view
    pub fn shortcut(&self) -> &'static str {
        match self {
            Self::Splash => "",
            Self::Admissions => "F1",
            Self::Checklist => "F2",
            Self::Gallery => "F3",
        }
    }
}

/// What the keyboard cursor sits on in the admission form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    /// Index into the form's fields
    Field(usize),
    /// Index into the suggested grades
    Suggestion(usize),
    Submit,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Admission form cursor, an index into the focus ring
    pub form_focus_index: usize,
    pub form_scroll: usize,

    // Errors waiting to be shown, oldest first
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!(%message, "showing error dialog");
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Build the focus ring: every field, then any suggestions, then submit
    pub fn focus_ring(field_count: usize, suggestion_count: usize) -> Vec<FormFocus> {
        (0..field_count)
            .map(FormFocus::Field)
            .chain((0..suggestion_count).map(FormFocus::Suggestion))
            .chain(std::iter::once(FormFocus::Submit))
            .collect()
    }

    /// Resolve the cursor against a ring that may have shrunk
    pub fn form_focus(&self, ring: &[FormFocus]) -> FormFocus {
        ring.get(self.form_focus_index)
            .or(ring.last())
            .copied()
            .unwrap_or(FormFocus::Submit)
    }

    pub fn focus_next(&mut self, ring_len: usize) {
        if ring_len > 0 {
            self.form_focus_index = (self.form_focus_index.min(ring_len - 1) + 1) % ring_len;
        }
    }

    pub fn focus_prev(&mut self, ring_len: usize) {
        if ring_len == 0 {
            return;
        }
        let current = self.form_focus_index.min(ring_len - 1);
        self.form_focus_index = if current == 0 { ring_len - 1 } else { current - 1 };
    }

    /// Scroll down
    pub fn scroll_down(&mut self) {
        self.form_scroll = self.form_scroll.saturating_add(1);
    }

    /// Scroll up
    pub fn scroll_up(&mut self) {
        self.form_scroll = self.form_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_errors_shown_in_order() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_dismiss_empty_queue_is_noop() {
            let mut state = AppState::default();
            state.dismiss_error();
            assert!(state.current_error().is_none());
        }
    }

    mod focus {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_ring_order() {
            let ring = AppState::focus_ring(2, 1);
            assert_eq!(
                ring,
                vec![
                    FormFocus::Field(0),
                    FormFocus::Field(1),
                    FormFocus::Suggestion(0),
                    FormFocus::Submit,
                ]
            );
        }

        #[test]
        fn test_next_and_prev_wrap() {
            let mut state = AppState::default();
            state.focus_prev(3);
            assert_eq!(state.form_focus_index, 2);
            state.focus_next(3);
            assert_eq!(state.form_focus_index, 0);
        }

        #[test]
        fn test_focus_clamps_when_ring_shrinks() {
            let mut state = AppState::default();
            let long = AppState::focus_ring(2, 2);
            state.form_focus_index = 4;
            assert_eq!(state.form_focus(&long), FormFocus::Submit);

            state.form_focus_index = 3;
            let short = AppState::focus_ring(2, 0);
            assert_eq!(state.form_focus(&short), FormFocus::Submit);
        }
    }

    #[test]
    fn test_default_view_is_admissions() {
        assert_eq!(View::default(), View::Admissions);
        assert_eq!(View::SIDEBAR[2].shortcut(), "F3");
    }

    #[test]
    fn test_scroll_saturates() {
        let mut state = AppState::default();
        state.scroll_up();
        assert_eq!(state.form_scroll, 0);
        state.scroll_down();
        assert_eq!(state.form_scroll, 1);
    }
}
