//! Form field value objects

use thiserror::Error;

/// Input widget kind, which decides the type-specific checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Select,
    Checkbox,
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// User-correctable problem shown inline next to a field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("Student must be between 3 and 18 years old")]
    AgeOutOfBounds,
    #[error("Name should contain only letters and spaces")]
    InvalidName,
    #[error("Pincode should be 6 digits")]
    InvalidPincode,
    #[error("You must accept the terms and conditions")]
    ConsentRequired,
    #[error("Age should be between {min} and {max} years for {grade}")]
    GradeAgeMismatch { min: u32, max: u32, grade: String },
}

/// Validation state of a single field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValidity {
    #[default]
    Unvalidated,
    Valid,
    Invalid(FieldError),
}

impl FieldValidity {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// The inline annotation to render, if any
    pub fn error(&self) -> Option<&FieldError> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: String,
    pub kind: FieldKind,
    pub value: FieldValue,
    pub required: bool,
    pub validity: FieldValidity,
}

impl FormField {
    fn new(name: &'static str, label: &str, kind: FieldKind, required: bool) -> Self {
        let value = match kind {
            FieldKind::Checkbox => FieldValue::Checked(false),
            _ => FieldValue::Text(String::new()),
        };
        Self {
            name,
            label: label.to_string(),
            kind,
            value,
            required,
            validity: FieldValidity::Unvalidated,
        }
    }

    /// Create a new text-like field
    pub fn text(name: &'static str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self::new(name, label, kind, required)
    }

    /// Create a new checkbox field
    pub fn checkbox(name: &'static str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Checkbox, false)
    }

    /// Get the text value (returns empty string for checkboxes)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Checked(_) => "",
        }
    }

    /// Get the checked state (returns false for text fields)
    pub fn is_checked(&self) -> bool {
        match &self.value {
            FieldValue::Checked(checked) => *checked,
            FieldValue::Text(_) => false,
        }
    }

    /// Set the text value
    pub fn set_text(&mut self, value: String) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = value;
        }
    }

    pub fn set_checked(&mut self, checked: bool) {
        if let FieldValue::Checked(c) = &mut self.value {
            *c = checked;
        }
    }

    /// Whether this field counts toward progress
    pub fn is_filled(&self) -> bool {
        match &self.value {
            FieldValue::Checked(checked) => *checked,
            FieldValue::Text(s) => !s.trim().is_empty(),
        }
    }

    /// Clear the field value and any annotation
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Checked(c) => *c = false,
        }
        self.validity = FieldValidity::Unvalidated;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Checked(true) => "[x]".to_string(),
            FieldValue::Checked(false) => "[ ]".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_starts_unchecked() {
        let field = FormField::checkbox("termsAccepted", "I accept");
        assert!(!field.is_checked());
        assert!(!field.is_filled());
        assert_eq!(field.display_value(), "[ ]");
    }

    #[test]
    fn test_whitespace_is_not_filled() {
        let mut field = FormField::text("studentName", "Student Name", FieldKind::Text, true);
        field.set_text("   ".to_string());
        assert!(!field.is_filled());
        field.set_text(" Asha ".to_string());
        assert!(field.is_filled());
    }

    #[test]
    fn test_set_text_ignored_on_checkbox() {
        let mut field = FormField::checkbox("termsAccepted", "I accept");
        field.set_text("yes".to_string());
        assert_eq!(field.as_text(), "");
        assert!(!field.is_checked());
    }

    #[test]
    fn test_clear_resets_validity() {
        let mut field = FormField::text("pincode", "Pincode", FieldKind::Text, true);
        field.set_text("12".to_string());
        field.validity = FieldValidity::Invalid(FieldError::InvalidPincode);
        field.clear();
        assert_eq!(field.as_text(), "");
        assert_eq!(field.validity, FieldValidity::Unvalidated);
    }

    #[test]
    fn test_grade_mismatch_message() {
        let err = FieldError::GradeAgeMismatch {
            min: 11,
            max: 12,
            grade: "Class VI".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Age should be between 11 and 12 years for Class VI"
        );
    }
}
