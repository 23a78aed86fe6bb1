//! Gallery filtering, pagination and lightbox navigation

use super::entry::{CategoryFilter, GalleryEntry};
use std::collections::HashSet;

/// Entries shown before any "load more"
pub const INITIAL_REVEAL: usize = 12;
/// Entries added per "load more"
pub const REVEAL_STEP: usize = 8;
/// Minimum horizontal travel for a drag to count as a swipe
pub const SWIPE_THRESHOLD: i32 = 50;

/// Lightbox operation, whatever input produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxCommand {
    Close,
    Prev,
    Next,
}

/// Keys the lightbox listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// The three input sources feeding the lightbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxInput {
    Key(LightboxKey),
    Swipe { start_x: i32, end_x: i32 },
    Click(LightboxCommand),
}

impl LightboxInput {
    /// Map the input onto the shared navigation contract
    pub fn command(&self) -> Option<LightboxCommand> {
        match *self {
            Self::Key(LightboxKey::Escape) => Some(LightboxCommand::Close),
            Self::Key(LightboxKey::ArrowLeft) => Some(LightboxCommand::Prev),
            Self::Key(LightboxKey::ArrowRight) => Some(LightboxCommand::Next),
            Self::Swipe { start_x, end_x } => {
                let diff = start_x - end_x;
                if diff.abs() <= SWIPE_THRESHOLD {
                    None
                } else if diff > 0 {
                    // Swipe left moves forward
                    Some(LightboxCommand::Next)
                } else {
                    Some(LightboxCommand::Prev)
                }
            }
            Self::Click(command) => Some(command),
        }
    }
}

/// Counters shown above the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryStats {
    /// Entries matching the current filter and search
    pub matching: usize,
    /// Entries currently revealed
    pub showing: usize,
    /// Distinct categories across the whole gallery
    pub categories: usize,
}

/// Owns the filtered view over a fixed list of entries
#[derive(Debug, Clone)]
pub struct GalleryController {
    entries: Vec<GalleryEntry>,
    filtered: Vec<usize>,
    filter: CategoryFilter,
    search_input: String,
    reveal_count: usize,
    lightbox: Option<usize>,
    scroll_locked: bool,
    /// Grid cursor, an index into the revealed entries
    pub selected: usize,
}

impl GalleryController {
    pub fn new(entries: Vec<GalleryEntry>) -> Self {
        let filtered = (0..entries.len()).collect();
        Self {
            entries,
            filtered,
            filter: CategoryFilter::All,
            search_input: String::new(),
            reveal_count: INITIAL_REVEAL,
            lightbox: None,
            scroll_locked: false,
            selected: 0,
        }
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn reveal_count(&self) -> usize {
        self.reveal_count
    }

    /// Re-filters only when the filter actually changes
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.refilter();
    }

    /// Re-filters only when the search text actually changes
    pub fn set_search(&mut self, input: &str) {
        if self.search_input == input {
            return;
        }
        self.search_input = input.to_string();
        self.refilter();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.refilter();
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.refilter();
        }
    }

    /// Back to every entry with an empty search box
    pub fn clear_all_filters(&mut self) {
        if self.search_input.is_empty() && self.filter == CategoryFilter::All {
            return;
        }
        self.search_input.clear();
        self.filter = CategoryFilter::All;
        self.refilter();
    }

    fn refilter(&mut self) {
        let term = self.search_input.trim().to_lowercase();
        self.filtered = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| self.filter.matches(e.category) && e.matches_search(&term))
            .map(|(i, _)| i)
            .collect();
        self.reveal_count = INITIAL_REVEAL;
        self.selected = 0;
        self.close_lightbox();
        tracing::debug!(
            filter = self.filter.label(),
            term = %term,
            matching = self.filtered.len(),
            "gallery refiltered"
        );
    }

    /// Every entry matching the current filter and search
    pub fn filtered(&self) -> Vec<&GalleryEntry> {
        self.filtered.iter().map(|&i| &self.entries[i]).collect()
    }

    /// The revealed prefix of the filtered view
    pub fn visible(&self) -> Vec<&GalleryEntry> {
        self.filtered
            .iter()
            .take(self.reveal_count)
            .map(|&i| &self.entries[i])
            .collect()
    }

    fn visible_len(&self) -> usize {
        self.filtered.len().min(self.reveal_count)
    }

    /// Entries hidden behind "load more"
    pub fn remaining(&self) -> usize {
        self.filtered.len().saturating_sub(self.reveal_count)
    }

    /// Label for the load-more button, or `None` when it should be hidden
    pub fn load_more_label(&self) -> Option<String> {
        match self.remaining() {
            0 => None,
            n => Some(format!("Load More ({n} remaining)")),
        }
    }

    pub fn load_more(&mut self) {
        if self.remaining() > 0 {
            self.reveal_count += REVEAL_STEP;
        }
    }

    pub fn has_no_results(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn stats(&self) -> GalleryStats {
        let categories: HashSet<_> = self.entries.iter().map(|e| e.category).collect();
        GalleryStats {
            matching: self.filtered.len(),
            showing: self.visible_len(),
            categories: categories.len(),
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Open the lightbox on a revealed entry. Returns false for indexes
    /// outside the revealed range.
    pub fn open_lightbox(&mut self, index: usize) -> bool {
        if index >= self.visible_len() {
            return false;
        }
        self.lightbox = Some(index);
        self.scroll_locked = true;
        true
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
        self.scroll_locked = false;
    }

    pub fn lightbox_index(&self) -> Option<usize> {
        self.lightbox
    }

    pub fn lightbox_entry(&self) -> Option<&GalleryEntry> {
        let index = self.lightbox?;
        self.filtered.get(index).map(|&i| &self.entries[i])
    }

    /// Background scrolling is suspended while the lightbox is open
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn can_go_prev(&self) -> bool {
        self.lightbox.is_some_and(|i| i > 0)
    }

    pub fn can_go_next(&self) -> bool {
        self.lightbox.is_some_and(|i| i + 1 < self.visible_len())
    }

    pub fn apply(&mut self, command: LightboxCommand) {
        let Some(index) = self.lightbox else {
            return;
        };
        match command {
            LightboxCommand::Close => self.close_lightbox(),
            LightboxCommand::Prev if self.can_go_prev() => {
                self.lightbox = Some(index - 1);
            }
            LightboxCommand::Next if self.can_go_next() => {
                self.lightbox = Some(index + 1);
            }
            _ => {}
        }
    }

    /// Route any lightbox input through the single navigation contract
    pub fn handle_input(&mut self, input: LightboxInput) {
        if let Some(command) = input.command() {
            self.apply(command);
        }
    }

    /// Text copied by the share action
    pub fn share_text(&self, index: usize, school: &str) -> Option<String> {
        let &i = self.filtered.get(index)?;
        let entry = &self.entries[i];
        Some(format!("{} - {school} Gallery", entry.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::entry::{GalleryCategory, GalleryEntry};

    /// 20 entries: 5 science (3 mention "lab"), 15 spread across the rest
    fn twenty_entries() -> Vec<GalleryEntry> {
        let mut entries = vec![
            GalleryEntry::new(GalleryCategory::Science, "Chemistry Lab", "Titration", "a"),
            GalleryEntry::new(GalleryCategory::Science, "Physics", "Optics lab bench", "b"),
            GalleryEntry::new(GalleryCategory::Science, "Biology LAB", "Microscopes", "c"),
            GalleryEntry::new(GalleryCategory::Science, "Exhibition", "Working models", "d"),
            GalleryEntry::new(GalleryCategory::Science, "Robotics", "Line followers", "e"),
            GalleryEntry::new(GalleryCategory::Academics, "Computer Lab", "Coding hour", "f"),
        ];
        let others = [
            GalleryCategory::Sports,
            GalleryCategory::Cultural,
            GalleryCategory::Events,
            GalleryCategory::Campus,
        ];
        for n in 0..14 {
            entries.push(GalleryEntry::new(
                others[n % others.len()],
                &format!("Photo {n}"),
                "Moments from school life",
                "z",
            ));
        }
        entries
    }

    fn many(count: usize) -> Vec<GalleryEntry> {
        (0..count)
            .map(|n| GalleryEntry::new(GalleryCategory::Events, &format!("Event {n}"), "", "x"))
            .collect()
    }

    mod filtering {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_science_lab_scenario() {
            let entries = twenty_entries();
            assert_eq!(entries.len(), 20);
            let mut gallery = GalleryController::new(entries);
            gallery.load_more();
            gallery.set_filter(CategoryFilter::Only(GalleryCategory::Science));
            gallery.set_search("lab");

            assert_eq!(gallery.filtered().len(), 3);
            assert_eq!(gallery.reveal_count(), INITIAL_REVEAL);
            assert_eq!(gallery.visible().len(), 3);
            assert_eq!(gallery.load_more_label(), None);
        }

        #[test]
        fn test_search_is_trimmed_and_case_insensitive() {
            let mut gallery = GalleryController::new(twenty_entries());
            gallery.set_search("  LAB ");
            assert_eq!(gallery.filtered().len(), 4);
        }

        #[test]
        fn test_all_filter_keeps_order() {
            let entries = twenty_entries();
            let gallery = GalleryController::new(entries.clone());
            let titles: Vec<_> = gallery.filtered().iter().map(|e| e.title.clone()).collect();
            let expected: Vec<_> = entries.iter().map(|e| e.title.clone()).collect();
            assert_eq!(titles, expected);
        }

        #[test]
        fn test_no_results_and_clear() {
            let mut gallery = GalleryController::new(twenty_entries());
            gallery.set_search("zebra");
            assert!(gallery.has_no_results());
            gallery.clear_all_filters();
            assert_eq!(gallery.filtered().len(), 20);
            assert_eq!(gallery.filter(), CategoryFilter::All);
            assert_eq!(gallery.search_input(), "");
        }

        #[test]
        fn test_typing_search_char_by_char() {
            let mut gallery = GalleryController::new(twenty_entries());
            for c in "lab".chars() {
                gallery.push_search_char(c);
            }
            assert_eq!(gallery.filtered().len(), 4);
            gallery.pop_search_char();
            assert_eq!(gallery.search_input(), "la");
        }
    }

    mod reveal {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_load_more_grows_by_eight() {
            let mut gallery = GalleryController::new(many(30));
            assert_eq!(gallery.visible().len(), 12);
            assert_eq!(gallery.load_more_label().as_deref(), Some("Load More (18 remaining)"));
            gallery.load_more();
            assert_eq!(gallery.visible().len(), 20);
            gallery.load_more();
            gallery.load_more();
            assert_eq!(gallery.visible().len(), 30);
            assert_eq!(gallery.load_more_label(), None);
        }

        #[test]
        fn test_filter_change_resets_reveal() {
            let mut gallery = GalleryController::new(many(30));
            gallery.load_more();
            gallery.set_filter(CategoryFilter::Only(GalleryCategory::Events));
            assert_eq!(gallery.reveal_count(), INITIAL_REVEAL);
        }

        #[test]
        fn test_unchanged_filter_or_search_keeps_reveal() {
            let mut gallery = GalleryController::new(many(30));
            gallery.load_more();
            gallery.set_filter(CategoryFilter::All);
            gallery.set_search("");
            gallery.clear_all_filters();
            assert_eq!(gallery.reveal_count(), INITIAL_REVEAL + REVEAL_STEP);
        }

        #[test]
        fn test_stats() {
            let mut gallery = GalleryController::new(twenty_entries());
            gallery.set_filter(CategoryFilter::Only(GalleryCategory::Science));
            assert_eq!(
                gallery.stats(),
                GalleryStats {
                    matching: 5,
                    showing: 5,
                    categories: 6,
                }
            );
        }
    }

    mod lightbox {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_navigation_clamps_at_both_ends() {
            let mut gallery = GalleryController::new(many(3));
            assert!(gallery.open_lightbox(0));
            assert!(gallery.is_scroll_locked());
            gallery.apply(LightboxCommand::Prev);
            assert_eq!(gallery.lightbox_index(), Some(0));
            gallery.apply(LightboxCommand::Next);
            gallery.apply(LightboxCommand::Next);
            gallery.apply(LightboxCommand::Next);
            assert_eq!(gallery.lightbox_index(), Some(2));
            assert!(!gallery.can_go_next());
        }

        #[test]
        fn test_only_revealed_entries_open() {
            let mut gallery = GalleryController::new(many(30));
            assert!(!gallery.open_lightbox(12));
            gallery.open_lightbox(11);
            gallery.apply(LightboxCommand::Next);
            assert_eq!(gallery.lightbox_index(), Some(11));
        }

        #[test]
        fn test_close_restores_scroll() {
            let mut gallery = GalleryController::new(many(3));
            gallery.open_lightbox(1);
            gallery.handle_input(LightboxInput::Key(LightboxKey::Escape));
            assert_eq!(gallery.lightbox_index(), None);
            assert!(!gallery.is_scroll_locked());
        }

        #[test]
        fn test_three_input_sources_agree() {
            let sources = [
                LightboxInput::Key(LightboxKey::ArrowRight),
                LightboxInput::Swipe {
                    start_x: 200,
                    end_x: 100,
                },
                LightboxInput::Click(LightboxCommand::Next),
            ];
            for input in sources {
                let mut gallery = GalleryController::new(many(3));
                gallery.open_lightbox(0);
                gallery.handle_input(input);
                assert_eq!(gallery.lightbox_index(), Some(1), "{input:?}");
            }
        }

        #[test]
        fn test_short_swipe_is_ignored() {
            let input = LightboxInput::Swipe {
                start_x: 100,
                end_x: 60,
            };
            assert_eq!(input.command(), None);
            let input = LightboxInput::Swipe {
                start_x: 0,
                end_x: 80,
            };
            assert_eq!(input.command(), Some(LightboxCommand::Prev));
        }

        #[test]
        fn test_lightbox_entry_follows_index() {
            let mut gallery = GalleryController::new(many(3));
            gallery.open_lightbox(2);
            assert_eq!(gallery.lightbox_entry().unwrap().title, "Event 2");
        }

        #[test]
        fn test_refilter_closes_lightbox() {
            let mut gallery = GalleryController::new(many(3));
            gallery.open_lightbox(1);
            gallery.set_search("event 0");
            assert_eq!(gallery.lightbox_index(), None);
        }
    }

    #[test]
    fn test_share_text() {
        let gallery = GalleryController::new(many(1));
        let text = gallery.share_text(0, "SMPS Jhansi").unwrap();
        assert_eq!(text, "Event 0 - SMPS Jhansi Gallery");
        assert!(gallery.share_text(5, "SMPS Jhansi").is_none());
    }
}
