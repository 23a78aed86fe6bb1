//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, render_sidebar_button, BUTTON_HEIGHT};
pub use dialog::{centered_rect, render_error_dialog, wrap_text};
