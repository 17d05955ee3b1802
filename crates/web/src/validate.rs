//! Form field validation.
//!
//! Every check appends to a [`ValidationErrors`] collector so a submission
//! reports all violated fields at once, not just the first one.

use std::fmt;

/// A single violated field with its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Accumulated per-field validation messages for one form submission.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a violation for `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first message recorded for `field`, if any.
    ///
    /// Templates use this to mark individual inputs invalid.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// All recorded messages, in submission order.
    #[must_use]
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Require a non-empty string (after trimming). Returns the trimmed value.
pub fn require(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    label: &str,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{label} is required."));
    }
    trimmed.to_owned()
}

/// Require a non-empty string of at most `max` characters.
pub fn require_max_len(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    label: &str,
    max: usize,
) -> String {
    let trimmed = require(errors, field, value, label);
    if trimmed.chars().count() > max {
        errors.push(field, format!("{label} must be at most {max} characters."));
    }
    trimmed
}

/// Require a non-empty string composed only of ASCII digits.
pub fn require_digits(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    label: &str,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{label} is required."));
    } else if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        errors.push(field, format!("{label} must be a number."));
    }
    trimmed.to_owned()
}

/// Require a value that parses as an integer.
///
/// Returns 0 on failure; callers must check `errors` before persisting.
pub fn require_integer<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    label: &str,
) -> T
where
    T: std::str::FromStr + Default,
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{label} is required."));
        return T::default();
    }
    match trimmed.parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            errors.push(field, format!("{label} must be an integer."));
            T::default()
        }
    }
}
