//! UI module for rendering the TUI

mod admissions;
mod checklist;
mod components;
mod field_renderer;
mod gallery;
mod layout;
mod splash;
mod widgets;

pub use gallery::gallery_grid_columns;
pub use layout::{sidebar_view_at, SIDEBAR_WIDTH};

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if let (View::Splash, Some(splash_state)) = (app.state.current_view, &app.splash_state) {
        splash::draw(frame, area, splash_state, app.config.school_name());
        return;
    }

    let (sidebar_area, main_area) = layout::create_layout(area);
    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::Splash => {}
        View::Admissions => admissions::draw(frame, main_area, app),
        View::Checklist => checklist::draw(frame, main_area, app),
        View::Gallery => gallery::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    if app.state.current_view == View::Gallery {
        gallery::draw_lightbox(frame, app);
    }

    // Error dialog (modal, drawn last so it sits on top)
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message);
    }
}
