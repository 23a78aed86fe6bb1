//! School portal core
//!
//! Host-independent admissions workflow and photo gallery. The terminal
//! front end in `main.rs` only renders the views these controllers produce.

pub mod admissions;
pub mod clock;
pub mod config;
pub mod gallery;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, PortalConfig};
