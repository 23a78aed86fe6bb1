//! Gallery entries and their categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of photo categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    Academics,
    Science,
    Sports,
    Cultural,
    Events,
    Campus,
}

impl GalleryCategory {
    pub const ALL: [GalleryCategory; 6] = [
        Self::Academics,
        Self::Science,
        Self::Sports,
        Self::Cultural,
        Self::Events,
        Self::Campus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Academics => "academics",
            Self::Science => "science",
            Self::Sports => "sports",
            Self::Cultural => "cultural",
            Self::Events => "events",
            Self::Campus => "campus",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Academics => "Academics",
            Self::Science => "Science",
            Self::Sports => "Sports",
            Self::Cultural => "Cultural",
            Self::Events => "Events",
            Self::Campus => "Campus",
        }
    }
}

impl fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category filter selected by the filter buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(GalleryCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: GalleryCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.label(),
        }
    }

    /// Filter buttons in display order
    pub fn buttons() -> Vec<CategoryFilter> {
        std::iter::once(Self::All)
            .chain(GalleryCategory::ALL.into_iter().map(Self::Only))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gallery category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if key == "all" {
            return Ok(Self::All);
        }
        GalleryCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .map(Self::Only)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One photo in the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub category: GalleryCategory,
    pub title: String,
    pub description: String,
    pub image_ref: String,
}

impl GalleryEntry {
    pub fn new(category: GalleryCategory, title: &str, description: &str, image_ref: &str) -> Self {
        Self {
            category,
            title: title.to_string(),
            description: description.to_string(),
            image_ref: image_ref.to_string(),
        }
    }

    /// Case-insensitive substring match on title or description.
    /// `term` must already be lowercased and trimmed.
    pub fn matches_search(&self, term: &str) -> bool {
        term.is_empty()
            || self.title.to_lowercase().contains(term)
            || self.description.to_lowercase().contains(term)
    }
}

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("failed to read gallery file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse gallery file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load entries from a JSON array on disk
pub fn load_entries(path: &Path) -> Result<Vec<GalleryEntry>, GalleryError> {
    let content = fs::read_to_string(path)?;
    let entries: Vec<GalleryEntry> = serde_json::from_str(&content)?;
    tracing::info!(count = entries.len(), path = %path.display(), "loaded gallery entries");
    Ok(entries)
}

/// The photos published with the site
pub fn builtin_entries() -> Vec<GalleryEntry> {
    use GalleryCategory::*;
    [
        (Campus, "Main Building", "Front view of the senior wing at sunrise", "campus/main-building.jpg"),
        (Campus, "Library", "Reading hall with over ten thousand titles", "campus/library.jpg"),
        (Campus, "Smart Classroom", "Interactive boards in every primary classroom", "campus/smart-class.jpg"),
        (Science, "Chemistry Lab", "Students titrating during a practical session", "science/chemistry-lab.jpg"),
        (Science, "Physics Lab", "Optics bench experiment with class XI", "science/physics-lab.jpg"),
        (Science, "Biology Lab", "Microscope work on plant cells", "science/biology-lab.jpg"),
        (Science, "Science Exhibition", "Working models built by middle school", "science/exhibition.jpg"),
        (Science, "Robotics Club", "Line-follower robots ready for the inter-school meet", "science/robotics.jpg"),
        (Academics, "Spelling Bee", "Finalists of the junior spelling bee", "academics/spelling-bee.jpg"),
        (Academics, "Maths Olympiad", "Olympiad medal winners with their mentors", "academics/olympiad.jpg"),
        (Academics, "Computer Lab", "Coding hour for class VI", "academics/computer-lab.jpg"),
        (Sports, "Annual Sports Day", "March past by all four houses", "sports/sports-day.jpg"),
        (Sports, "Cricket Team", "Under-14 squad after the district final", "sports/cricket.jpg"),
        (Sports, "Yoga Session", "Morning yoga on the main ground", "sports/yoga.jpg"),
        (Sports, "Basketball Court", "Evening practice on the new court", "sports/basketball.jpg"),
        (Cultural, "Annual Day", "Dance drama on the festival of lights", "cultural/annual-day.jpg"),
        (Cultural, "Music Room", "Junior choir rehearsing", "cultural/music-room.jpg"),
        (Cultural, "Art Exhibition", "Paintings displayed in the corridor gallery", "cultural/art.jpg"),
        (Events, "Independence Day", "Flag hoisting ceremony", "events/independence-day.jpg"),
        (Events, "Graduation", "Class XII farewell and graduation", "events/graduation.jpg"),
        (Events, "Educational Trip", "Visit to the planetarium", "events/trip.jpg"),
        (Events, "Parent Teacher Meet", "Term one review with parents", "events/ptm.jpg"),
    ]
    .into_iter()
    .map(|(category, title, description, image)| {
        GalleryEntry::new(category, title, description, image)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parses_case_insensitively() {
        assert_eq!(
            "Science".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(GalleryCategory::Science))
        );
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert!("painting".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_filter_buttons_start_with_all() {
        let buttons = CategoryFilter::buttons();
        assert_eq!(buttons[0], CategoryFilter::All);
        assert_eq!(buttons.len(), GalleryCategory::ALL.len() + 1);
    }

    #[test]
    fn test_matches_search_on_title_or_description() {
        let entry = GalleryEntry::new(
            GalleryCategory::Science,
            "Chemistry Lab",
            "Titration practical",
            "x.jpg",
        );
        assert!(entry.matches_search("lab"));
        assert!(entry.matches_search("titration"));
        assert!(entry.matches_search(""));
        assert!(!entry.matches_search("cricket"));
    }

    #[test]
    fn test_entries_deserialize_from_json() {
        let json = r#"[{"category":"sports","title":"Relay","description":"4x100","image_ref":"r.jpg"}]"#;
        let entries: Vec<GalleryEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].category, GalleryCategory::Sports);
    }

    #[test]
    fn test_builtin_entries_cover_every_category() {
        let entries = builtin_entries();
        for category in GalleryCategory::ALL {
            assert!(entries.iter().any(|e| e.category == category), "{category:?}");
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_entries(Path::new("/nonexistent/gallery.json")).unwrap_err();
        assert!(matches!(err, GalleryError::Io(_)));
    }
}
