//! Field-level validation predicates
//!
//! Every predicate is total over string input: malformed values simply fail
//! to match.

use super::eligibility::calculate_age;
use super::field::{FieldError, FieldKind, FieldValidity, FormField};
use super::grade::{MAX_ADMISSION_AGE, MIN_ADMISSION_AGE};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const PHONE_DIGITS: usize = 10;
const PINCODE_DIGITS: usize = 6;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[6-9]\d{9}$").expect("valid phone pattern"))
}

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid name pattern"))
}

fn pincode_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{6}$").expect("valid pincode pattern"))
}

fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parse an ISO `YYYY-MM-DD` date as typed into the birth-date field
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// False when the field is required and holds nothing but whitespace
pub fn is_required_satisfied(field: &FormField) -> bool {
    !field.required || field.is_filled()
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Ten-digit mobile number starting with 6-9, separators ignored
pub fn is_valid_phone(value: &str) -> bool {
    phone_regex().is_match(&digits_only(value))
}

/// ASCII letters and spaces only
pub fn is_valid_name(value: &str) -> bool {
    name_regex().is_match(value)
}

pub fn is_valid_pincode(value: &str) -> bool {
    pincode_regex().is_match(value)
}

/// Birth date parses and the completed age on `today` is within 3..=18
pub fn is_valid_age(birth_date: &str, today: NaiveDate) -> bool {
    parse_birth_date(birth_date)
        .map(|birth| calculate_age(birth, today))
        .is_some_and(|age| (MIN_ADMISSION_AGE..=MAX_ADMISSION_AGE).contains(&age))
}

/// Strip separators and cap at ten digits, as applied while typing
pub fn format_phone_number(value: &str) -> String {
    digits_only(value).chars().take(PHONE_DIGITS).collect()
}

/// Strip non-digits and cap at six, as applied while typing
pub fn sanitize_pincode(value: &str) -> String {
    digits_only(value).chars().take(PINCODE_DIGITS).collect()
}

/// Full blur-time check of one field.
///
/// The required rule runs first. Type rules only run on non-empty values and
/// a later failing rule replaces an earlier message.
pub fn validate_field(field: &FormField, today: NaiveDate) -> FieldValidity {
    if field.kind == FieldKind::Checkbox {
        return if field.required && !field.is_checked() {
            FieldValidity::Invalid(FieldError::ConsentRequired)
        } else {
            FieldValidity::Valid
        };
    }

    if !is_required_satisfied(field) {
        return FieldValidity::Invalid(FieldError::Required);
    }

    let value = field.as_text().trim();
    if value.is_empty() {
        return FieldValidity::Valid;
    }

    let mut error = match field.kind {
        FieldKind::Email if !is_valid_email(value) => Some(FieldError::InvalidEmail),
        FieldKind::Tel if !is_valid_phone(value) => Some(FieldError::InvalidPhone),
        FieldKind::Date if field.name == "dateOfBirth" && !is_valid_age(value, today) => {
            Some(FieldError::AgeOutOfBounds)
        }
        _ => None,
    };

    if field.name.to_ascii_lowercase().contains("name") && !is_valid_name(value) {
        error = Some(FieldError::InvalidName);
    }

    if field.name == "pincode" && !is_valid_pincode(value) {
        error = Some(FieldError::InvalidPincode);
    }

    match error {
        Some(err) => FieldValidity::Invalid(err),
        None => FieldValidity::Valid,
    }
}
