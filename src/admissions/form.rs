//! Admission form session and the controller that owns it

use super::eligibility::check_eligibility;
use super::field::{FieldError, FieldKind, FieldValidity, FormField};
use super::grade::GradeLevel;
use super::transport::{ApplicationSnapshot, SubmissionAck};
use super::validator::{format_phone_number, sanitize_pincode, validate_field};
use crate::clock::Clock;
use std::sync::Arc;
use uuid::Uuid;

pub const STUDENT_NAME: &str = "studentName";
pub const DATE_OF_BIRTH: &str = "dateOfBirth";
pub const GRADE_APPLYING: &str = "gradeApplying";
pub const PREVIOUS_SCHOOL: &str = "previousSchool";
pub const PARENT_NAME: &str = "parentName";
pub const PARENT_EMAIL: &str = "parentEmail";
pub const PARENT_PHONE: &str = "parentPhone";
pub const ADDRESS: &str = "address";
pub const PINCODE: &str = "pincode";
pub const TERMS_ACCEPTED: &str = "termsAccepted";

/// Prefix of locally generated reference tokens
pub const REFERENCE_TAG: &str = "SMPS";

const PREVIOUS_SCHOOL_REQUIRED_LABEL: &str = "Previous School *";
const PREVIOUS_SCHOOL_OPTIONAL_LABEL: &str = "Previous School (if any)";

const SUBMIT_LABEL: &str = "Submit Application";
const SUBMITTING_LABEL: &str = "Submitting Application...";

/// All fields of one in-progress application
#[derive(Debug, Clone)]
pub struct FormSession {
    pub id: Uuid,
    fields: Vec<FormField>,
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            fields: vec![
                FormField::text(STUDENT_NAME, "Student Name *", FieldKind::Text, true),
                FormField::text(DATE_OF_BIRTH, "Date of Birth * (YYYY-MM-DD)", FieldKind::Date, true),
                FormField::text(GRADE_APPLYING, "Grade Applying For *", FieldKind::Select, true),
                FormField::text(
                    PREVIOUS_SCHOOL,
                    PREVIOUS_SCHOOL_OPTIONAL_LABEL,
                    FieldKind::Text,
                    false,
                ),
                FormField::text(PARENT_NAME, "Parent/Guardian Name *", FieldKind::Text, true),
                FormField::text(PARENT_EMAIL, "Email Address *", FieldKind::Email, true),
                FormField::text(PARENT_PHONE, "Phone Number *", FieldKind::Tel, true),
                FormField::text(ADDRESS, "Address *", FieldKind::Text, true),
                FormField::text(PINCODE, "Pincode *", FieldKind::Text, true),
                {
                    let mut terms =
                        FormField::checkbox(TERMS_ACCEPTED, "I accept the terms and conditions *");
                    terms.required = true;
                    terms
                },
            ],
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Text value of a field, empty when unknown
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(FormField::as_text).unwrap_or("")
    }

    pub fn selected_grade(&self) -> Option<GradeLevel> {
        self.value(GRADE_APPLYING).parse().ok()
    }

    /// Name/value pairs as a form post would send them; unchecked boxes omitted
    pub fn snapshot(&self) -> ApplicationSnapshot {
        self.fields
            .iter()
            .filter_map(|f| match f.kind {
                FieldKind::Checkbox if f.is_checked() => {
                    Some((f.name.to_string(), "on".to_string()))
                }
                FieldKind::Checkbox => None,
                _ => Some((f.name.to_string(), f.as_text().trim().to_string())),
            })
            .collect()
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the submission lifecycle stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

/// Extra documents for the selected grade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementPanel {
    pub grade: GradeLevel,
    pub items: Vec<&'static str>,
}

impl RequirementPanel {
    pub fn title(&self) -> String {
        format!("Additional Requirements for {}:", self.grade.display_name())
    }
}

/// Alternative grades offered after an out-of-range age check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionPanel {
    pub age: i32,
    pub grades: Vec<GradeLevel>,
}

/// Shown above the form after a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessBanner {
    pub reference: String,
}

/// Result of asking to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed; hand the snapshot to the transport
    Ready(ApplicationSnapshot),
    /// These fields were annotated and block submission
    Blocked(Vec<&'static str>),
    /// A submission is already in flight
    AlreadySubmitting,
}

/// Render-ready state of the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub enabled: bool,
}

/// One field as the renderer should show it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    pub error: Option<String>,
}

/// Everything the renderer needs to draw the admission form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionFormView {
    pub fields: Vec<FieldView>,
    pub requirements: Option<RequirementPanel>,
    pub suggestion: Option<SuggestionPanel>,
    pub progress: u8,
    pub submit: SubmitControl,
    pub busy: bool,
    pub banner: Option<SuccessBanner>,
    pub scroll_to_banner: bool,
}

/// Owns the form session and every piece of state derived from it
pub struct FormController {
    session: FormSession,
    clock: Arc<dyn Clock>,
    phase: SubmissionPhase,
    requirements: Option<RequirementPanel>,
    suggestion: Option<SuggestionPanel>,
    banner: Option<SuccessBanner>,
    scroll_to_banner: bool,
    last_reference_millis: i64,
}

impl FormController {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            session: FormSession::new(),
            clock,
            phase: SubmissionPhase::Idle,
            requirements: None,
            suggestion: None,
            banner: None,
            scroll_to_banner: false,
            last_reference_millis: 0,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn requirements(&self) -> Option<&RequirementPanel> {
        self.requirements.as_ref()
    }

    pub fn suggestion(&self) -> Option<&SuggestionPanel> {
        self.suggestion.as_ref()
    }

    pub fn banner(&self) -> Option<&SuccessBanner> {
        self.banner.as_ref()
    }

    pub fn validity(&self, name: &str) -> Option<&FieldValidity> {
        self.session.field(name).map(|f| &f.validity)
    }

    /// Input event: store the (sanitized) value and optimistically drop any
    /// error. The authoritative re-check waits for the next blur.
    pub fn input(&mut self, name: &str, raw: &str) {
        let value = match name {
            PARENT_PHONE => format_phone_number(raw),
            PINCODE => sanitize_pincode(raw),
            _ => raw.to_string(),
        };
        if let Some(field) = self.session.field_mut(name) {
            field.set_text(value);
            if field.validity.is_invalid() {
                field.validity = FieldValidity::Unvalidated;
            }
        }
    }

    /// Checkbox toggle; counts as both input and change
    pub fn set_checked(&mut self, name: &str, checked: bool) {
        if let Some(field) = self.session.field_mut(name) {
            field.set_checked(checked);
            if field.validity.is_invalid() {
                field.validity = FieldValidity::Unvalidated;
            }
        }
    }

    /// Blur event: run the full check and replace the field's annotation
    pub fn blur(&mut self, name: &str) -> Option<&FieldValidity> {
        let today = self.clock.today();
        let field = self.session.field_mut(name)?;
        field.validity = validate_field(field, today);
        Some(&field.validity)
    }

    /// Change event. Birth date and grade changes re-run the eligibility
    /// check; grade changes also refresh required-ness and requirements.
    pub fn change(&mut self, name: &str) {
        match name {
            GRADE_APPLYING => {
                let grade = self.session.selected_grade();
                tracing::debug!(session = %self.session.id, grade = ?grade, "grade changed");
                self.apply_grade_rules(grade);
                self.check_eligibility();
            }
            DATE_OF_BIRTH => self.check_eligibility(),
            _ => {}
        }
    }

    /// Select a grade the way the dropdown does: input then change
    pub fn select_grade(&mut self, grade: Option<GradeLevel>) {
        let raw = grade.map(|g| g.as_str()).unwrap_or("");
        self.input(GRADE_APPLYING, raw);
        self.change(GRADE_APPLYING);
    }

    /// Take one of the offered grades.
    ///
    /// Eligibility is not re-checked here; that waits for the next explicit
    /// change event.
    pub fn accept_suggestion(&mut self, grade: GradeLevel) {
        self.input(GRADE_APPLYING, grade.as_str());
        self.suggestion = None;
        self.apply_grade_rules(Some(grade));
        tracing::debug!(session = %self.session.id, grade = grade.as_str(), "suggestion accepted");
    }

    fn apply_grade_rules(&mut self, grade: Option<GradeLevel>) {
        let needs_previous = grade.is_some_and(|g| g.needs_previous_school());
        if let Some(field) = self.session.field_mut(PREVIOUS_SCHOOL) {
            field.required = needs_previous;
            field.label = if needs_previous {
                PREVIOUS_SCHOOL_REQUIRED_LABEL
            } else {
                PREVIOUS_SCHOOL_OPTIONAL_LABEL
            }
            .to_string();
        }

        self.requirements = grade.and_then(|grade| {
            let items = grade.requirements();
            (!items.is_empty()).then(|| RequirementPanel {
                grade,
                items: items.to_vec(),
            })
        });
    }

    fn check_eligibility(&mut self) {
        let today = self.clock.today();
        let Some(verdict) = check_eligibility(
            self.session.value(DATE_OF_BIRTH),
            self.session.value(GRADE_APPLYING),
            today,
        ) else {
            return;
        };

        let Some(field) = self.session.field_mut(DATE_OF_BIRTH) else {
            return;
        };

        match verdict.error {
            Some(err) => {
                tracing::debug!(
                    age = verdict.age,
                    suggestions = verdict.suggested_grades.len(),
                    "age outside grade window"
                );
                field.validity = FieldValidity::Invalid(err);
                self.suggestion = Some(SuggestionPanel {
                    age: verdict.age,
                    grades: verdict.suggested_grades,
                });
            }
            None => {
                if matches!(
                    field.validity,
                    FieldValidity::Invalid(FieldError::GradeAgeMismatch { .. })
                ) {
                    field.validity = validate_field(field, today);
                }
                self.suggestion = None;
            }
        }
    }

    /// Percentage of required fields (consent included) that are filled
    pub fn progress(&self) -> u8 {
        let (filled, total) = self
            .session
            .fields()
            .iter()
            .filter(|f| f.required)
            .fold((0usize, 0usize), |(filled, total), f| {
                (filled + usize::from(f.is_filled()), total + 1)
            });
        if total == 0 {
            return 0;
        }
        (100.0 * filled as f64 / total as f64).round() as u8
    }

    /// Validate every required field without stopping at the first failure.
    /// Returns the names of all fields left invalid.
    pub fn validate_all(&mut self) -> Vec<&'static str> {
        let today = self.clock.today();
        let mut failed = Vec::new();
        for field in self.session.fields.iter_mut().filter(|f| f.required) {
            field.validity = validate_field(field, today);
            if field.validity.is_invalid() {
                failed.push(field.name);
            }
        }
        failed
    }

    /// Start a submission if the form is valid and nothing is in flight
    pub fn request_submit(&mut self) -> SubmitOutcome {
        if self.phase == SubmissionPhase::Submitting {
            return SubmitOutcome::AlreadySubmitting;
        }

        let failed = self.validate_all();
        if !failed.is_empty() {
            tracing::debug!(session = %self.session.id, invalid = ?failed, "submission blocked");
            return SubmitOutcome::Blocked(failed);
        }

        self.phase = SubmissionPhase::Submitting;
        tracing::info!(session = %self.session.id, "submitting application");
        SubmitOutcome::Ready(self.session.snapshot())
    }

    /// Transport acknowledged: show the banner and start a fresh session
    pub fn complete_submission(&mut self, ack: SubmissionAck) -> Option<&SuccessBanner> {
        if self.phase != SubmissionPhase::Submitting {
            return None;
        }
        let reference = ack.reference.unwrap_or_else(|| self.next_reference());
        tracing::info!(session = %self.session.id, reference = %reference, "application submitted");

        self.reset_session();
        self.phase = SubmissionPhase::Succeeded;
        self.scroll_to_banner = true;
        self.banner = Some(SuccessBanner { reference });
        self.banner.as_ref()
    }

    /// In-flight submission was cancelled; the form is left as it was
    pub fn abandon_submission(&mut self) {
        if self.phase == SubmissionPhase::Submitting {
            tracing::warn!(session = %self.session.id, "submission cancelled");
            self.phase = SubmissionPhase::Idle;
        }
    }

    /// Explicit reset: clear every field and derived panel
    pub fn reset(&mut self) {
        if self.phase == SubmissionPhase::Submitting {
            return;
        }
        self.reset_session();
        self.phase = SubmissionPhase::Idle;
        self.banner = None;
        self.scroll_to_banner = false;
    }

    fn reset_session(&mut self) {
        self.session = FormSession::new();
        self.requirements = None;
        self.suggestion = None;
    }

    fn next_reference(&mut self) -> String {
        let millis = self.clock.now_millis().max(self.last_reference_millis + 1);
        self.last_reference_millis = millis;
        format!("{REFERENCE_TAG}{millis}")
    }

    /// Consume the one-shot request to bring the banner into view
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_banner)
    }

    pub fn view(&self) -> AdmissionFormView {
        let submitting = self.phase == SubmissionPhase::Submitting;
        AdmissionFormView {
            fields: self
                .session
                .fields()
                .iter()
                .map(|f| FieldView {
                    name: f.name,
                    label: f.label.clone(),
                    kind: f.kind,
                    value: f.display_value(),
                    required: f.required,
                    error: f.validity.error().map(ToString::to_string),
                })
                .collect(),
            requirements: self.requirements.clone(),
            suggestion: self.suggestion.clone(),
            progress: self.progress(),
            submit: SubmitControl {
                label: if submitting { SUBMITTING_LABEL } else { SUBMIT_LABEL },
                enabled: !submitting,
            },
            busy: submitting,
            banner: self.banner.clone(),
            scroll_to_banner: self.scroll_to_banner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, MockClock};
    use chrono::NaiveDate;

    fn controller() -> FormController {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        FormController::new(Arc::new(FixedClock::on(today)))
    }

    fn fill_valid(form: &mut FormController) {
        form.input(STUDENT_NAME, "Asha Rani");
        form.input(DATE_OF_BIRTH, "2018-04-10");
        form.change(DATE_OF_BIRTH);
        form.select_grade(Some(GradeLevel::Class1));
        form.input(PARENT_NAME, "Meena Rani");
        form.input(PARENT_EMAIL, "meena@example.com");
        form.input(PARENT_PHONE, "98765 43210");
        form.input(ADDRESS, "12 Civil Lines, Jhansi");
        form.input(PINCODE, "284001");
        form.set_checked(TERMS_ACCEPTED, true);
    }

    mod field_events {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_blur_annotates_once() {
            let mut form = controller();
            form.input(PARENT_EMAIL, "nope");
            form.blur(PARENT_EMAIL);
            form.blur(PARENT_EMAIL);
            let view = form.view();
            let errors: Vec<_> = view.fields.iter().filter_map(|f| f.error.as_ref()).collect();
            assert_eq!(errors, vec!["Please enter a valid email address"]);
        }

        #[test]
        fn test_input_clears_error_without_rechecking() {
            let mut form = controller();
            form.input(PARENT_EMAIL, "nope");
            form.blur(PARENT_EMAIL);
            form.input(PARENT_EMAIL, "still nope");
            assert_eq!(form.validity(PARENT_EMAIL), Some(&FieldValidity::Unvalidated));
            form.blur(PARENT_EMAIL);
            assert!(form.validity(PARENT_EMAIL).unwrap().is_invalid());
        }

        #[test]
        fn test_phone_is_formatted_on_input() {
            let mut form = controller();
            form.input(PARENT_PHONE, "98-7654 3210x");
            assert_eq!(form.session().value(PARENT_PHONE), "9876543210");
            assert_eq!(form.blur(PARENT_PHONE), Some(&FieldValidity::Valid));
        }

        #[test]
        fn test_pincode_is_sanitized_on_input() {
            let mut form = controller();
            form.input(PINCODE, "28a4-0019");
            assert_eq!(form.session().value(PINCODE), "284001");
        }

        #[test]
        fn test_unknown_field_is_ignored() {
            let mut form = controller();
            form.input("nickname", "x");
            assert!(form.blur("nickname").is_none());
        }
    }

    mod grade_rules {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_previous_school_required_from_class_two() {
            let mut form = controller();
            form.select_grade(Some(GradeLevel::Class2));
            let field = form.session().field(PREVIOUS_SCHOOL).unwrap();
            assert!(field.required);
            assert_eq!(field.label, "Previous School *");
        }

        #[test]
        fn test_threshold_round_trip_restores_label() {
            let mut form = controller();
            let before = form.session().field(PREVIOUS_SCHOOL).unwrap().clone();
            form.select_grade(Some(GradeLevel::Class9));
            form.select_grade(Some(GradeLevel::Ukg));
            let after = form.session().field(PREVIOUS_SCHOOL).unwrap();
            assert_eq!(after.required, before.required);
            assert_eq!(after.label, before.label);
        }

        #[test]
        fn test_requirement_panel_replaced_on_change() {
            let mut form = controller();
            form.select_grade(Some(GradeLevel::Class9));
            let panel = form.requirements().unwrap();
            assert_eq!(panel.title(), "Additional Requirements for Class IX:");
            assert_eq!(panel.items, vec!["Class 8 board results", "Entrance test", "Interview"]);

            form.select_grade(Some(GradeLevel::Nursery));
            assert!(form.requirements().is_none());
        }
    }

    mod eligibility {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_out_of_range_annotates_and_suggests() {
            let mut form = controller();
            form.input(DATE_OF_BIRTH, "2021-06-01");
            form.change(DATE_OF_BIRTH);
            form.select_grade(Some(GradeLevel::Class6));

            let err = form.validity(DATE_OF_BIRTH).unwrap().error().unwrap();
            assert_eq!(
                err.to_string(),
                "Age should be between 11 and 12 years for Class VI"
            );
            let panel = form.suggestion().unwrap();
            assert_eq!(panel.age, 3);
            assert_eq!(panel.grades, vec![GradeLevel::Nursery]);
        }

        #[test]
        fn test_repeated_check_keeps_single_panel() {
            let mut form = controller();
            form.input(DATE_OF_BIRTH, "2021-06-01");
            form.select_grade(Some(GradeLevel::Class6));
            form.change(DATE_OF_BIRTH);
            form.change(DATE_OF_BIRTH);
            assert_eq!(form.suggestion().unwrap().grades, vec![GradeLevel::Nursery]);
        }

        #[test]
        fn test_no_verdict_without_birth_date() {
            let mut form = controller();
            form.select_grade(Some(GradeLevel::Class6));
            assert!(form.suggestion().is_none());
            assert_eq!(form.validity(DATE_OF_BIRTH), Some(&FieldValidity::Unvalidated));
        }

        #[test]
        fn test_accepting_suggestion_does_not_recheck() {
            let mut form = controller();
            form.input(DATE_OF_BIRTH, "2021-06-01");
            form.select_grade(Some(GradeLevel::Class6));
            form.accept_suggestion(GradeLevel::Nursery);

            assert_eq!(form.session().selected_grade(), Some(GradeLevel::Nursery));
            assert!(form.suggestion().is_none());
            assert!(!form.session().field(PREVIOUS_SCHOOL).unwrap().required);
            // The mismatch annotation stays until the next change event
            assert!(form.validity(DATE_OF_BIRTH).unwrap().is_invalid());

            form.change(DATE_OF_BIRTH);
            assert_eq!(form.validity(DATE_OF_BIRTH), Some(&FieldValidity::Valid));
        }

        #[test]
        fn test_eligible_change_clears_mismatch() {
            let mut form = controller();
            form.input(DATE_OF_BIRTH, "2013-01-01");
            form.select_grade(Some(GradeLevel::Nursery));
            assert!(form.suggestion().is_some());
            form.select_grade(Some(GradeLevel::Class6));
            assert!(form.suggestion().is_none());
            assert_eq!(form.validity(DATE_OF_BIRTH), Some(&FieldValidity::Valid));
        }
    }

    mod progress {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_fresh_session_is_zero() {
            assert_eq!(controller().progress(), 0);
        }

        #[test]
        fn test_progress_never_drops_while_filling() {
            let mut form = controller();
            let steps: [(&str, &str); 8] = [
                (STUDENT_NAME, "Asha"),
                (DATE_OF_BIRTH, "2018-04-10"),
                (GRADE_APPLYING, "ukg"),
                (PARENT_NAME, "Meena"),
                (PARENT_EMAIL, "m@example.com"),
                (PARENT_PHONE, "9876543210"),
                (ADDRESS, "Jhansi"),
                (PINCODE, "284001"),
            ];
            let mut last = form.progress();
            for (name, value) in steps {
                form.input(name, value);
                let now = form.progress();
                assert!(now >= last, "{name}: {now} < {last}");
                last = now;
            }
            form.set_checked(TERMS_ACCEPTED, true);
            assert_eq!(form.progress(), 100);
        }

        #[test]
        fn test_rounding() {
            let mut form = controller();
            form.input(STUDENT_NAME, "Asha");
            // 1 of 9 required fields
            assert_eq!(form.progress(), 11);
            form.input(ADDRESS, "Jhansi");
            assert_eq!(form.progress(), 22);
        }

        #[test]
        fn test_whitespace_does_not_count() {
            let mut form = controller();
            form.input(STUDENT_NAME, "   ");
            assert_eq!(form.progress(), 0);
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_blocked_submission_annotates_every_field() {
            let mut form = controller();
            form.input(PARENT_EMAIL, "bad");
            let SubmitOutcome::Blocked(failed) = form.request_submit() else {
                panic!("expected blocked submission");
            };
            assert!(failed.contains(&STUDENT_NAME));
            assert!(failed.contains(&PARENT_EMAIL));
            assert!(failed.contains(&TERMS_ACCEPTED));
            assert!(!failed.contains(&PREVIOUS_SCHOOL));
            assert_eq!(form.phase(), SubmissionPhase::Idle);
            assert_eq!(
                form.validity(TERMS_ACCEPTED).unwrap().error(),
                Some(&FieldError::ConsentRequired)
            );
        }

        #[test]
        fn test_missing_consent_alone_blocks() {
            let mut form = controller();
            fill_valid(&mut form);
            form.set_checked(TERMS_ACCEPTED, false);
            assert_eq!(form.request_submit(), SubmitOutcome::Blocked(vec![TERMS_ACCEPTED]));
        }

        #[test]
        fn test_previous_school_blocks_for_higher_grades() {
            let mut form = controller();
            fill_valid(&mut form);
            form.input(DATE_OF_BIRTH, "2014-04-10");
            form.select_grade(Some(GradeLevel::Class4));
            assert_eq!(form.request_submit(), SubmitOutcome::Blocked(vec![PREVIOUS_SCHOOL]));
        }

        #[test]
        fn test_full_lifecycle() {
            let mut form = controller();
            fill_valid(&mut form);
            assert_eq!(form.progress(), 100);

            let SubmitOutcome::Ready(snapshot) = form.request_submit() else {
                panic!("expected ready submission");
            };
            assert_eq!(snapshot.get(PARENT_PHONE).unwrap(), "9876543210");
            assert_eq!(snapshot.get(TERMS_ACCEPTED).unwrap(), "on");
            assert_eq!(form.phase(), SubmissionPhase::Submitting);

            let view = form.view();
            assert!(view.busy);
            assert!(!view.submit.enabled);
            assert_eq!(view.submit.label, "Submitting Application...");

            let banner = form.complete_submission(SubmissionAck::default()).unwrap();
            assert!(banner.reference.starts_with(REFERENCE_TAG));
            assert_eq!(form.phase(), SubmissionPhase::Succeeded);
            assert_eq!(form.progress(), 0);

            let view = form.view();
            assert!(view.submit.enabled);
            assert_eq!(view.submit.label, "Submit Application");
            assert!(view.fields.iter().all(|f| f.error.is_none()));
            assert!(form.take_scroll_request());
            assert!(!form.take_scroll_request());
        }

        #[test]
        fn test_second_submit_is_ignored_while_pending() {
            let mut form = controller();
            fill_valid(&mut form);
            assert!(matches!(form.request_submit(), SubmitOutcome::Ready(_)));
            assert_eq!(form.request_submit(), SubmitOutcome::AlreadySubmitting);
        }

        #[test]
        fn test_references_are_unique_within_session() {
            let mut form = controller();
            fill_valid(&mut form);
            form.request_submit();
            let first = form.complete_submission(SubmissionAck::default()).unwrap().reference.clone();
            fill_valid(&mut form);
            form.request_submit();
            let second = form.complete_submission(SubmissionAck::default()).unwrap().reference.clone();
            assert_ne!(first, second);
            assert_eq!(first, "SMPS1717200000000");
        }

        #[test]
        fn test_reference_keeps_rising_when_clock_steps_back() {
            let mut clock = MockClock::new();
            clock
                .expect_today()
                .return_const(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
            let mut readings = vec![4_000_i64, 5_000];
            clock
                .expect_now_millis()
                .times(2)
                .returning(move || readings.pop().unwrap_or_default());

            let mut form = FormController::new(Arc::new(clock));
            fill_valid(&mut form);
            form.request_submit();
            let first = form.complete_submission(SubmissionAck::default()).unwrap().reference.clone();
            fill_valid(&mut form);
            form.request_submit();
            let second = form.complete_submission(SubmissionAck::default()).unwrap().reference.clone();
            assert_eq!(first, "SMPS5000");
            assert_eq!(second, "SMPS5001");
        }

        #[test]
        fn test_server_reference_wins() {
            let mut form = controller();
            fill_valid(&mut form);
            form.request_submit();
            let banner = form
                .complete_submission(SubmissionAck {
                    reference: Some("SRV-42".to_string()),
                })
                .unwrap();
            assert_eq!(banner.reference, "SRV-42");
        }

        #[test]
        fn test_abandon_returns_to_idle_keeping_values() {
            let mut form = controller();
            fill_valid(&mut form);
            form.request_submit();
            form.abandon_submission();
            assert_eq!(form.phase(), SubmissionPhase::Idle);
            assert_eq!(form.session().value(STUDENT_NAME), "Asha Rani");
            assert!(form.complete_submission(SubmissionAck::default()).is_none());
        }

        #[test]
        fn test_reset_clears_everything() {
            let mut form = controller();
            fill_valid(&mut form);
            form.select_grade(Some(GradeLevel::Class6));
            form.reset();
            assert_eq!(form.progress(), 0);
            assert!(form.requirements().is_none());
            assert!(form.suggestion().is_none());
            assert!(!form.session().field(PREVIOUS_SCHOOL).unwrap().required);
        }
    }
}
