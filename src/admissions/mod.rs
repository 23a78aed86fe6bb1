//! Admissions domain layer
//!
//! - `grade`: grade catalog (names, age windows, requirements, suggestions)
//! - `field` / `validator`: field values and blur-time checks
//! - `eligibility`: age computation and grade eligibility
//! - `form`: the form session and its controller
//! - `transport`: async submission seam
//! - `checklist`: document checklist

mod checklist;
mod eligibility;
mod field;
mod form;
mod grade;
mod transport;
mod validator;

pub use checklist::{ChecklistItem, DocumentChecklist, ADMISSION_DOCUMENTS};
pub use eligibility::{calculate_age, check_eligibility, evaluate, EligibilityVerdict};
pub use field::{FieldError, FieldKind, FieldValidity, FieldValue, FormField};
pub use form::{
    AdmissionFormView, FieldView, FormController, FormSession, RequirementPanel, SubmissionPhase,
    SubmitControl, SubmitOutcome, SuccessBanner, SuggestionPanel, ADDRESS, DATE_OF_BIRTH,
    GRADE_APPLYING, PARENT_EMAIL, PARENT_NAME, PARENT_PHONE, PINCODE, PREVIOUS_SCHOOL,
    REFERENCE_TAG, STUDENT_NAME, TERMS_ACCEPTED,
};
pub use grade::{
    display_name_for, suggest_grades, AgeRange, GradeLevel, UnknownGrade, MAX_ADMISSION_AGE,
    MIN_ADMISSION_AGE,
};
pub use transport::{
    ApplicationSnapshot, SimulatedTransport, SubmissionAck, SubmissionHandle,
    SubmissionTransport, DEFAULT_SUBMISSION_DELAY,
};
pub use validator::{
    format_phone_number, is_required_satisfied, is_valid_age, is_valid_email, is_valid_name,
    is_valid_phone, is_valid_pincode, parse_birth_date, sanitize_pincode, validate_field,
};
