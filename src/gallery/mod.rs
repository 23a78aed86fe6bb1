//! Photo gallery: category filter, text search, paged reveal and lightbox

mod controller;
mod entry;

pub use controller::{
    GalleryController, GalleryStats, LightboxCommand, LightboxInput, LightboxKey, INITIAL_REVEAL,
    REVEAL_STEP, SWIPE_THRESHOLD,
};
pub use entry::{
    builtin_entries, load_entries, CategoryFilter, GalleryCategory, GalleryEntry, GalleryError,
    UnknownCategory,
};
