//! Pure helpers shared by every front end of the portal

use crate::admissions::{self, parse_birth_date, FieldValidity, FormField};
use chrono::NaiveDate;

pub use crate::admissions::{format_phone_number, is_valid_email, is_valid_phone};

/// Completed years between a `YYYY-MM-DD` birth date and `today`
pub fn calculate_age(birth_date: &str, today: NaiveDate) -> Option<i32> {
    parse_birth_date(birth_date).map(|birth| admissions::calculate_age(birth, today))
}

pub fn validate_field(field: &FormField, today: NaiveDate) -> FieldValidity {
    admissions::validate_field(field, today)
}

/// Display name for a grade identifier, the identifier itself when unknown
pub fn grade_name(grade: &str) -> String {
    admissions::display_name_for(grade)
}
