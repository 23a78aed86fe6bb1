//! Application state and core logic

use crate::platform::has_action_modifier;
use crate::state::{AppState, FormFocus, ProgressFill, SplashState, View};
use crate::ui::{gallery_grid_columns, sidebar_view_at, SIDEBAR_WIDTH};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use school_portal::admissions::{
    DocumentChecklist, FieldKind, FormController, GradeLevel, SubmissionHandle,
    SubmissionTransport, SubmitOutcome, GRADE_APPLYING,
};
use school_portal::clock::Clock;
use school_portal::config::PortalConfig;
use school_portal::gallery::{
    builtin_entries, CategoryFilter, GalleryController, LightboxCommand, LightboxInput,
    LightboxKey,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Two Ctrl+C presses within this window quit
const DOUBLE_CTRL_C_WINDOW: Duration = Duration::from_millis(500);

/// Terminal cells are roughly 8 pixels wide; swipe distances are in pixels
const CELL_WIDTH_PX: i32 = 8;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Loaded configuration
    pub config: PortalConfig,
    /// Admission form workflow
    pub form: FormController,
    /// Photo gallery
    pub gallery: GalleryController,
    /// Document checklist
    pub checklist: DocumentChecklist,
    /// Eased progress bar fill
    pub progress_fill: ProgressFill,
    /// Backend that receives applications
    transport: Arc<dyn SubmissionTransport>,
    /// In-flight submission, if any
    submission: Option<SubmissionHandle>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback line shown in the status bar
    pub status_message: Option<String>,
    /// Splash screen animation state
    pub splash_state: Option<SplashState>,
    /// Terminal size for grid calculations (height, width)
    pub terminal_size: Option<(u16, u16)>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
    /// Column where a left-button drag started
    drag_start: Option<u16>,
    /// Focused field and its value when it gained focus
    focus_origin: Option<(&'static str, String)>,
}

impl App {
    /// Create a new App instance
    pub fn new(
        config: PortalConfig,
        clock: Arc<dyn Clock>,
        transport: Arc<dyn SubmissionTransport>,
        category_override: Option<&str>,
    ) -> Self {
        let mut state = AppState::default();

        let entries = match config.gallery_entries() {
            Ok(entries) => entries,
            Err(err) => {
                state.push_error(format!("{err}. Showing the built-in gallery instead."));
                builtin_entries()
            }
        };
        let mut gallery = GalleryController::new(entries);
        gallery.set_filter(config.initial_category(category_override));

        let splash_state = if config.show_splash() {
            state.current_view = View::Splash;
            Some(SplashState::new())
        } else {
            None
        };

        Self {
            state,
            form: FormController::new(clock),
            gallery,
            checklist: DocumentChecklist::new(),
            progress_fill: ProgressFill::new(),
            transport,
            submission: None,
            quit: false,
            status_message: None,
            splash_state,
            terminal_size: None,
            last_ctrl_c: None,
            drag_start: None,
            focus_origin: None,
            config,
        }
    }

    /// Update splash animation state
    /// Returns true if animation is complete and we should transition
    pub fn update_splash(&mut self, terminal_height: u16) -> bool {
        if let Some(ref mut splash) = self.splash_state {
            splash.update(terminal_height);
            if splash.is_complete() {
                self.splash_state = None;
                self.state.current_view = View::Admissions;
                return true;
            }
        }
        false
    }

    /// Check if in splash screen
    pub fn in_splash(&self) -> bool {
        matches!(self.state.current_view, View::Splash)
    }

    /// Whether the UI needs frequent redraws
    pub fn is_animating(&self) -> bool {
        self.in_splash() || self.progress_fill.is_animating() || self.submission.is_some()
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// First Ctrl+C arms, a second one inside the window quits
    pub fn register_ctrl_c(&mut self, now: Instant) {
        match self.last_ctrl_c {
            Some(previous) if now.duration_since(previous) <= DOUBLE_CTRL_C_WINDOW => {
                self.shutdown();
            }
            _ => {
                self.last_ctrl_c = Some(now);
                self.status_message = Some("Press ^C again to quit".to_string());
            }
        }
    }

    /// Cancel in-flight work and stop the event loop
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.submission.take() {
            handle.cancel();
            self.form.abandon_submission();
        }
        self.quit = true;
    }

    /// Calculate number of columns for the gallery grid
    pub fn gallery_columns(&self) -> usize {
        // terminal_size is (height, width)
        let width = self.terminal_size.map(|(_, w)| w).unwrap_or(80);
        gallery_grid_columns(width)
    }

    /// Check the in-flight submission without blocking
    pub fn poll_submission(&mut self) {
        let Some(handle) = self.submission.as_mut() else {
            return;
        };
        let finished = handle.is_finished();
        match handle.try_complete() {
            Some(ack) => {
                self.submission = None;
                if let Some(banner) = self.form.complete_submission(ack) {
                    self.status_message = Some(format!("Reference number: {}", banner.reference));
                }
                self.state.form_focus_index = 0;
                self.focus_origin = None;
            }
            None if finished => {
                self.submission = None;
                self.form.abandon_submission();
                self.push_error("The submission was interrupted. Please submit again.");
            }
            None => {}
        }
        self.sync_form();
    }

    /// Push derived form state into the presentation layer
    fn sync_form(&mut self) {
        self.progress_fill.retarget(self.form.progress());
        if self.form.take_scroll_request() {
            self.state.form_scroll = 0;
        }
    }

    fn focus_ring(&self) -> Vec<FormFocus> {
        let suggestions = self.form.suggestion().map_or(0, |s| s.grades.len());
        AppState::focus_ring(self.form.session().fields().len(), suggestions)
    }

    /// Current admission form cursor
    pub fn form_focus(&self) -> FormFocus {
        self.state.form_focus(&self.focus_ring())
    }

    fn focused_field(&self) -> Option<(&'static str, FieldKind)> {
        match self.form_focus() {
            FormFocus::Field(i) => self.form.session().fields().get(i).map(|f| (f.name, f.kind)),
            _ => None,
        }
    }

    fn focus_field(&mut self, name: &str) {
        if let Some(index) = self.form.session().fields().iter().position(|f| f.name == name) {
            self.state.form_focus_index = index;
        }
    }

    /// Remember the focused field's value the first time it is seen
    fn track_focus(&mut self) {
        let focused = self.focused_field().map(|(name, _)| name);
        let origin = self.focus_origin.as_ref().map(|(name, _)| *name);
        match focused {
            Some(name) if origin == Some(name) => {}
            Some(_) => self.remember_focused_value(),
            None => self.focus_origin = None,
        }
    }

    fn remember_focused_value(&mut self) {
        self.focus_origin = self
            .focused_field()
            .map(|(name, _)| (name, self.form.session().value(name).to_string()));
    }

    /// Leaving a field fires blur, then change only if the value differs
    /// from when it gained focus, as a browser would
    fn leave_focused_field(&mut self) {
        let Some((name, _)) = self.focused_field() else {
            return;
        };
        self.form.blur(name);
        let changed = match self.focus_origin.take() {
            Some((origin, value)) if origin == name => value != self.form.session().value(name),
            _ => true,
        };
        if changed {
            self.form.change(name);
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        if self.in_splash() {
            self.handle_splash_key(key);
            return Ok(());
        }

        if let Some(view) = match key.code {
            KeyCode::F(1) => Some(View::Admissions),
            KeyCode::F(2) => Some(View::Checklist),
            KeyCode::F(3) => Some(View::Gallery),
            _ => None,
        } {
            self.navigate(view);
            return Ok(());
        }

        match self.state.current_view {
            View::Splash => {}
            View::Admissions => self.handle_admissions_key(key)?,
            View::Checklist => self.handle_checklist_key(key),
            View::Gallery => self.handle_gallery_key(key)?,
        }

        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if self.state.current_view == View::Admissions && view != View::Admissions {
            self.leave_focused_field();
            self.sync_form();
        }
        self.state.current_view = view;
    }

    fn handle_splash_key(&mut self, _key: KeyEvent) {
        if let Some(ref mut splash) = self.splash_state {
            splash.skip();
        }
    }

    /// Handle keys in the admission form
    fn handle_admissions_key(&mut self, key: KeyEvent) -> Result<()> {
        self.track_focus();

        if has_action_modifier(key.modifiers) {
            match key.code {
                KeyCode::Char('s') => {
                    self.leave_focused_field();
                    self.submit();
                }
                KeyCode::Char('r') => {
                    self.form.reset();
                    self.state.form_focus_index = 0;
                    self.state.form_scroll = 0;
                    self.focus_origin = None;
                }
                KeyCode::Char('y') => self.copy_reference()?,
                _ => {}
            }
            self.sync_form();
            return Ok(());
        }

        let focus = self.form_focus();
        let field = self.focused_field();

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.leave_focused_field();
                self.state.focus_next(self.focus_ring().len());
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.leave_focused_field();
                self.state.focus_prev(self.focus_ring().len());
            }
            KeyCode::PageDown => self.state.scroll_down(),
            KeyCode::PageUp => self.state.scroll_up(),
            KeyCode::Enter => match focus {
                FormFocus::Suggestion(i) => self.accept_suggestion(i),
                FormFocus::Submit => self.submit(),
                FormFocus::Field(_) => {
                    self.leave_focused_field();
                    self.state.focus_next(self.focus_ring().len());
                }
            },
            KeyCode::Left | KeyCode::Right if matches!(field, Some((_, FieldKind::Select))) => {
                self.cycle_grade(key.code == KeyCode::Right);
            }
            KeyCode::Char(' ') if matches!(field, Some((_, FieldKind::Checkbox))) => {
                if let Some((name, _)) = field {
                    let checked = self.form.session().field(name).is_some_and(|f| f.is_checked());
                    self.form.set_checked(name, !checked);
                }
            }
            KeyCode::Char(c) => {
                if let Some((name, kind)) = field {
                    if !matches!(kind, FieldKind::Select | FieldKind::Checkbox) {
                        let mut value = self.form.session().value(name).to_string();
                        value.push(c);
                        self.form.input(name, &value);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some((name, kind)) = field {
                    if !matches!(kind, FieldKind::Select | FieldKind::Checkbox) {
                        let mut value = self.form.session().value(name).to_string();
                        value.pop();
                        self.form.input(name, &value);
                    }
                }
            }
            _ => {}
        }

        self.sync_form();
        Ok(())
    }

    /// Step through "no grade" followed by every grade, like a dropdown
    fn cycle_grade(&mut self, forward: bool) {
        let options: Vec<Option<GradeLevel>> = std::iter::once(None)
            .chain(GradeLevel::ALL.into_iter().map(Some))
            .collect();
        let current = self.form.session().selected_grade();
        let position = options.iter().position(|g| *g == current).unwrap_or(0);
        let next = if forward {
            (position + 1) % options.len()
        } else {
            (position + options.len() - 1) % options.len()
        };
        self.form.select_grade(options[next]);
        // select_grade already fired change for this value
        self.remember_focused_value();
    }

    fn accept_suggestion(&mut self, index: usize) {
        let grade = self.form.suggestion().and_then(|s| s.grades.get(index)).copied();
        if let Some(grade) = grade {
            self.form.accept_suggestion(grade);
            self.focus_field(GRADE_APPLYING);
        }
    }

    fn submit(&mut self) {
        match self.form.request_submit() {
            SubmitOutcome::Ready(snapshot) => {
                self.submission = Some(SubmissionHandle::spawn(self.transport.clone(), snapshot));
            }
            SubmitOutcome::Blocked(fields) => {
                if let Some(first) = fields.first() {
                    self.focus_field(first);
                }
                self.status_message = Some(match fields.len() {
                    1 => "1 field needs attention".to_string(),
                    n => format!("{n} fields need attention"),
                });
            }
            SubmitOutcome::AlreadySubmitting => {}
        }
    }

    fn copy_reference(&mut self) -> Result<()> {
        let Some(reference) = self.form.banner().map(|b| b.reference.clone()) else {
            return Ok(());
        };
        self.copy_with_feedback(&reference, "Reference copied");
        Ok(())
    }

    /// Handle keys in the document checklist
    fn handle_checklist_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.checklist.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.checklist.select_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => self.checklist.toggle_selected(),
            _ => {}
        }
    }

    /// Handle keys in the gallery
    fn handle_gallery_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.gallery.lightbox_index().is_some() {
            let input = match key.code {
                KeyCode::Esc => LightboxInput::Key(LightboxKey::Escape),
                KeyCode::Left => LightboxInput::Key(LightboxKey::ArrowLeft),
                KeyCode::Right => LightboxInput::Key(LightboxKey::ArrowRight),
                KeyCode::Char('y') => {
                    if let Some(index) = self.gallery.lightbox_index() {
                        self.share(index);
                    }
                    return Ok(());
                }
                _ => return Ok(()),
            };
            self.gallery.handle_input(input);
            return Ok(());
        }

        if has_action_modifier(key.modifiers) {
            match key.code {
                KeyCode::Char('l') => self.gallery.load_more(),
                KeyCode::Char('r') => self.gallery.clear_all_filters(),
                KeyCode::Char('y') => self.share(self.gallery.selected),
                _ => {}
            }
            return Ok(());
        }

        let columns = self.gallery_columns();
        let shown = self.gallery.stats().showing;
        match key.code {
            KeyCode::Tab => self.step_filter(true),
            KeyCode::BackTab => self.step_filter(false),
            KeyCode::Left => self.gallery.select_prev(),
            KeyCode::Right => self.gallery.select_next(),
            KeyCode::Up => {
                if self.gallery.selected >= columns {
                    self.gallery.selected -= columns;
                }
            }
            KeyCode::Down => {
                if self.gallery.selected + columns < shown {
                    self.gallery.selected += columns;
                }
            }
            KeyCode::Enter => {
                self.gallery.open_lightbox(self.gallery.selected);
            }
            KeyCode::Esc => self.gallery.set_search(""),
            KeyCode::Backspace => self.gallery.pop_search_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                self.gallery.push_search_char(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn step_filter(&mut self, forward: bool) {
        let buttons = CategoryFilter::buttons();
        let position = buttons
            .iter()
            .position(|f| *f == self.gallery.filter())
            .unwrap_or(0);
        let next = if forward {
            (position + 1) % buttons.len()
        } else {
            (position + buttons.len() - 1) % buttons.len()
        };
        self.gallery.set_filter(buttons[next]);
    }

    fn share(&mut self, index: usize) {
        let school = self.config.school_name().to_string();
        if let Some(text) = self.gallery.share_text(index, &school) {
            self.copy_with_feedback(&text, "Link copied to clipboard!");
        }
    }

    fn copy_with_feedback(&mut self, text: &str, feedback: &str) {
        match copy_to_clipboard(text) {
            Ok(()) => self.status_message = Some(feedback.to_string()),
            Err(err) => {
                tracing::warn!(%err, "clipboard unavailable");
                self.push_error(format!("Could not copy to clipboard: {err}"));
            }
        }
    }

    /// Handle mouse events
    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.in_splash() {
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                if let Some(ref mut splash) = self.splash_state {
                    splash.skip();
                }
            }
            return Ok(());
        }

        if self.state.has_errors() {
            return Ok(());
        }

        // Sidebar navigation
        if mouse.column < SIDEBAR_WIDTH && self.gallery.lightbox_index().is_none() {
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                let height = self.terminal_size.map(|(h, _)| h).unwrap_or(24);
                if let Some(view) = sidebar_view_at(mouse.row, height) {
                    self.navigate(view);
                }
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Gallery => self.handle_gallery_mouse(mouse),
            View::Admissions => self.handle_scroll_mouse(mouse),
            View::Checklist => match mouse.kind {
                MouseEventKind::ScrollDown => self.checklist.select_next(),
                MouseEventKind::ScrollUp => self.checklist.select_prev(),
                _ => {}
            },
            View::Splash => {}
        }
        Ok(())
    }

    fn handle_scroll_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.state.scroll_down(),
            MouseEventKind::ScrollUp => self.state.scroll_up(),
            _ => {}
        }
    }

    fn handle_gallery_mouse(&mut self, mouse: MouseEvent) {
        if self.gallery.lightbox_index().is_none() {
            match mouse.kind {
                MouseEventKind::ScrollDown => self.gallery.select_next(),
                MouseEventKind::ScrollUp => self.gallery.select_prev(),
                _ => {}
            }
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.drag_start = Some(mouse.column),
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(start) = self.drag_start.take() else {
                    return;
                };
                let swipe = LightboxInput::Swipe {
                    start_x: i32::from(start) * CELL_WIDTH_PX,
                    end_x: i32::from(mouse.column) * CELL_WIDTH_PX,
                };
                let input = if swipe.command().is_some() {
                    swipe
                } else {
                    LightboxInput::Click(self.lightbox_click_command(mouse.column))
                };
                self.gallery.handle_input(input);
            }
            _ => {}
        }
    }

    /// Left third goes back, right third goes forward, the middle closes
    fn lightbox_click_command(&self, column: u16) -> LightboxCommand {
        let width = self.terminal_size.map(|(_, w)| w).unwrap_or(80);
        if column < width / 3 {
            LightboxCommand::Prev
        } else if column >= width - width / 3 {
            LightboxCommand::Next
        } else {
            LightboxCommand::Close
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
