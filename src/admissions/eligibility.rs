//! Age/grade eligibility checks and grade suggestions

use super::field::FieldError;
use super::grade::{suggest_grades, GradeLevel};
use super::validator::parse_birth_date;
use chrono::{Datelike, NaiveDate};

/// Completed years between `birth` and `today`.
///
/// One year is taken off when this year's birthday has not come round yet.
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Outcome of checking an age against a grade's accepted window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityVerdict {
    pub age: i32,
    pub in_range: bool,
    /// Annotation for the birth-date field when out of range
    pub error: Option<FieldError>,
    /// Ranked alternatives when out of range; may be empty
    pub suggested_grades: Vec<GradeLevel>,
}

impl EligibilityVerdict {
    fn eligible(age: i32) -> Self {
        Self {
            age,
            in_range: true,
            error: None,
            suggested_grades: Vec::new(),
        }
    }
}

/// Check a (birth date, grade) pair as typed into the form.
///
/// Returns `None` when either side is blank or the birth date does not
/// parse: no eligibility claim is made in that case. Unknown grades count as
/// eligible.
pub fn check_eligibility(
    birth_date: &str,
    grade: &str,
    today: NaiveDate,
) -> Option<EligibilityVerdict> {
    if birth_date.trim().is_empty() || grade.trim().is_empty() {
        return None;
    }
    let birth = parse_birth_date(birth_date)?;
    let age = calculate_age(birth, today);

    let Ok(grade) = grade.parse::<GradeLevel>() else {
        return Some(EligibilityVerdict::eligible(age));
    };
    Some(evaluate(age, grade))
}

/// Verdict for a known grade
pub fn evaluate(age: i32, grade: GradeLevel) -> EligibilityVerdict {
    match grade.age_range() {
        Some(range) if !range.contains(age) => {
            tracing::debug!(age, grade = grade.as_str(), "age outside grade window");
            EligibilityVerdict {
                age,
                in_range: false,
                error: Some(FieldError::GradeAgeMismatch {
                    min: range.min,
                    max: range.max,
                    grade: grade.display_name().to_string(),
                }),
                suggested_grades: suggest_grades(age),
            }
        }
        _ => EligibilityVerdict::eligible(age),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::grade::{MAX_ADMISSION_AGE, MIN_ADMISSION_AGE};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod age {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_birthday_today_counts() {
            assert_eq!(calculate_age(date(2021, 6, 1), date(2024, 6, 1)), 3);
        }

        #[test]
        fn test_day_before_birthday() {
            assert_eq!(calculate_age(date(2021, 6, 2), date(2024, 6, 1)), 2);
        }

        #[test]
        fn test_earlier_month_same_day() {
            assert_eq!(calculate_age(date(2021, 7, 1), date(2024, 6, 30)), 2);
        }

        #[test]
        fn test_leap_day_birth() {
            assert_eq!(calculate_age(date(2016, 2, 29), date(2024, 2, 28)), 7);
            assert_eq!(calculate_age(date(2016, 2, 29), date(2024, 2, 29)), 8);
        }

        #[test]
        fn test_future_birth_is_negative() {
            assert_eq!(calculate_age(date(2025, 1, 1), date(2024, 6, 1)), -1);
        }
    }

    mod verdict {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_inputs_produce_no_verdict() {
            let today = date(2024, 6, 1);
            assert_eq!(check_eligibility("", "class6", today), None);
            assert_eq!(check_eligibility("2021-06-01", "", today), None);
            assert_eq!(check_eligibility("garbage", "class6", today), None);
        }

        #[test]
        fn test_three_year_old_in_class_six() {
            let verdict = check_eligibility("2021-06-01", "class6", date(2024, 6, 1)).unwrap();
            assert_eq!(verdict.age, 3);
            assert!(!verdict.in_range);
            assert_eq!(verdict.suggested_grades, vec![GradeLevel::Nursery]);
            assert_eq!(
                verdict.error.unwrap().to_string(),
                "Age should be between 11 and 12 years for Class VI"
            );
        }

        #[test]
        fn test_in_range_has_no_annotation() {
            let verdict = check_eligibility("2013-03-15", "class6", date(2024, 6, 1)).unwrap();
            assert_eq!(verdict.age, 11);
            assert!(verdict.in_range);
            assert!(verdict.error.is_none());
            assert!(verdict.suggested_grades.is_empty());
        }

        #[test]
        fn test_unknown_grade_is_eligible() {
            let verdict = check_eligibility("2013-03-15", "prep", date(2024, 6, 1)).unwrap();
            assert!(verdict.in_range);
        }

        #[test]
        fn test_out_of_range_always_suggests_for_admissible_ages() {
            for grade in GradeLevel::ALL {
                for age in MIN_ADMISSION_AGE..=MAX_ADMISSION_AGE {
                    let verdict = evaluate(age, grade);
                    let range = grade.age_range().unwrap();
                    if !range.contains(age) {
                        assert!(!verdict.in_range);
                        assert!(!verdict.suggested_grades.is_empty(), "{grade:?} {age}");
                    } else {
                        assert!(verdict.in_range);
                    }
                }
            }
        }

        #[test]
        fn test_too_young_for_anything() {
            let verdict = evaluate(2, GradeLevel::Nursery);
            assert!(!verdict.in_range);
            assert!(verdict.suggested_grades.is_empty());
        }
    }
}
