//! Application state module

mod app_state;
mod progress_fill;
mod splash_state;

pub use app_state::*;
pub use progress_fill::*;
pub use splash_state::*;
