//! Grade catalog: display names, accepted age windows and extra documents
//!
//! Every table is an exhaustive `match` over [`GradeLevel`], so adding a grade
//! without filling in its rows is a compile error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step in the school's grade progression, from nursery through class 12.
///
/// Variants are declared in schooling order, so the derived `Ord` follows
/// progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeLevel {
    Nursery,
    Lkg,
    Ukg,
    Class1,
    Class2,
    Class3,
    Class4,
    Class5,
    Class6,
    Class7,
    Class8,
    Class9,
    Class10,
    Class11,
    Class12,
}

/// Inclusive age window in completed years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: i32) -> bool {
        age >= self.min as i32 && age <= self.max as i32
    }
}

/// Youngest age with a catalog entry
pub const MIN_ADMISSION_AGE: i32 = 3;
/// Oldest age with a catalog entry
pub const MAX_ADMISSION_AGE: i32 = 18;

const REPORT_CARD: &str = "Previous school report card";
const ENTRANCE_ASSESSMENT: &str = "Entrance assessment";

impl GradeLevel {
    /// All grades in progression order
    pub const ALL: [GradeLevel; 15] = [
        Self::Nursery,
        Self::Lkg,
        Self::Ukg,
        Self::Class1,
        Self::Class2,
        Self::Class3,
        Self::Class4,
        Self::Class5,
        Self::Class6,
        Self::Class7,
        Self::Class8,
        Self::Class9,
        Self::Class10,
        Self::Class11,
        Self::Class12,
    ];

    /// Stable identifier used by the form's select field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nursery => "nursery",
            Self::Lkg => "lkg",
            Self::Ukg => "ukg",
            Self::Class1 => "class1",
            Self::Class2 => "class2",
            Self::Class3 => "class3",
            Self::Class4 => "class4",
            Self::Class5 => "class5",
            Self::Class6 => "class6",
            Self::Class7 => "class7",
            Self::Class8 => "class8",
            Self::Class9 => "class9",
            Self::Class10 => "class10",
            Self::Class11 => "class11",
            Self::Class12 => "class12",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nursery => "Nursery",
            Self::Lkg => "LKG",
            Self::Ukg => "UKG",
            Self::Class1 => "Class I",
            Self::Class2 => "Class II",
            Self::Class3 => "Class III",
            Self::Class4 => "Class IV",
            Self::Class5 => "Class V",
            Self::Class6 => "Class VI",
            Self::Class7 => "Class VII",
            Self::Class8 => "Class VIII",
            Self::Class9 => "Class IX",
            Self::Class10 => "Class X",
            Self::Class11 => "Class XI",
            Self::Class12 => "Class XII",
        }
    }

    /// Accepted age window. Every grade currently has one; the `Option`
    /// keeps callers honest about grades that may lose theirs.
    pub fn age_range(&self) -> Option<AgeRange> {
        let range = match self {
            Self::Nursery => AgeRange::new(3, 4),
            Self::Lkg => AgeRange::new(4, 5),
            Self::Ukg => AgeRange::new(5, 6),
            Self::Class1 => AgeRange::new(6, 7),
            Self::Class2 => AgeRange::new(7, 8),
            Self::Class3 => AgeRange::new(8, 9),
            Self::Class4 => AgeRange::new(9, 10),
            Self::Class5 => AgeRange::new(10, 11),
            Self::Class6 => AgeRange::new(11, 12),
            Self::Class7 => AgeRange::new(12, 13),
            Self::Class8 => AgeRange::new(13, 14),
            Self::Class9 => AgeRange::new(14, 15),
            Self::Class10 => AgeRange::new(15, 16),
            Self::Class11 => AgeRange::new(16, 17),
            Self::Class12 => AgeRange::new(17, 18),
        };
        Some(range)
    }

    /// Extra documents or assessments asked of applicants to this grade
    pub fn requirements(&self) -> &'static [&'static str] {
        match self {
            Self::Nursery | Self::Lkg | Self::Ukg | Self::Class1 => &[],
            Self::Class2 | Self::Class3 | Self::Class4 | Self::Class5 => &[REPORT_CARD],
            Self::Class6 | Self::Class7 | Self::Class8 => &[REPORT_CARD, ENTRANCE_ASSESSMENT],
            Self::Class9 => &["Class 8 board results", "Entrance test", "Interview"],
            Self::Class10 => &["Class 9 results", "Entrance test", "Interview"],
            Self::Class11 => &[
                "Class 10 board results",
                "Stream selection",
                "Entrance test",
            ],
            Self::Class12 => &[
                "Class 11 results",
                "Stream continuation",
                "Performance review",
            ],
        }
    }

    /// Whether applicants must name the school they are transferring from
    pub fn needs_previous_school(&self) -> bool {
        *self >= Self::Class2
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Identifier did not name a known grade
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grade identifier: {0}")]
pub struct UnknownGrade(pub String);

impl FromStr for GradeLevel {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|grade| grade.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

/// Display name for a raw identifier; unknown identifiers are echoed back.
pub fn display_name_for(raw: &str) -> String {
    raw.parse::<GradeLevel>()
        .map(|grade| grade.display_name().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Grades a child of `age` completed years would typically join, youngest first.
pub fn suggest_grades(age: i32) -> Vec<GradeLevel> {
    use GradeLevel::*;
    match age {
        3 => vec![Nursery],
        4 => vec![Nursery, Lkg],
        5 => vec![Lkg, Ukg],
        6 => vec![Ukg, Class1],
        7 => vec![Class1, Class2],
        8 => vec![Class2, Class3],
        9 => vec![Class3, Class4],
        10 => vec![Class4, Class5],
        11 => vec![Class5, Class6],
        12 => vec![Class6, Class7],
        13 => vec![Class7, Class8],
        14 => vec![Class8, Class9],
        15 => vec![Class9, Class10],
        16 => vec![Class10, Class11],
        17 => vec![Class11, Class12],
        18 => vec![Class12],
        _ => Vec::new(),
    }
}
