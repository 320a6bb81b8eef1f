//! Validation rules applied to incoming resource payloads.
//!
//! Two tiers run on every payload: structural rules (required fields and
//! length bounds) and the cross-field rule that a description must differ
//! from the name. Both tiers always run and write into one
//! [`ValidationErrors`] map, which is then checked for emptiness once, so a
//! client sees every violation in a single response.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::city::{DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS};

/// Wire name of the `name` field.
pub const NAME_FIELD: &str = "name";
/// Wire name of the `description` field.
pub const DESCRIPTION_FIELD: &str = "description";

/// Violations keyed by field name, each with every message raised for it.
///
/// # Examples
/// ```
/// use cityinfo::domain::ValidationErrors;
///
/// let mut errors = ValidationErrors::default();
/// errors.add("name", "You must provide a name value");
/// assert_eq!(errors.messages("name"), ["You must provide a name value"]);
/// assert!(!errors.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Record one violation against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Whether no violation has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against `field`, empty when the field is valid.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Names of the fields carrying at least one violation.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when empty, otherwise the collected violations.
    ///
    /// # Errors
    /// Returns `self` when at least one violation was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                write!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Payloads that can check themselves against the validation rules.
pub trait Validate {
    /// Run both validation tiers.
    ///
    /// # Errors
    /// Returns every structural and cross-field violation found.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Validate a `name` / `description` pair, the shape shared by every input.
///
/// # Errors
/// Returns the combined structural and cross-field violations.
pub fn validate_name_and_description(
    name: Option<&str>,
    description: Option<&str>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_structure(&mut errors, name, description);
    check_name_differs_from_description(&mut errors, name, description);
    errors.into_result()
}

fn check_structure(errors: &mut ValidationErrors, name: Option<&str>, description: Option<&str>) {
    match name {
        Some(value) if !value.trim().is_empty() => {
            if value.chars().count() > NAME_MAX_CHARS {
                errors.add(
                    NAME_FIELD,
                    format!("Name value is longer than max length of {NAME_MAX_CHARS} characters"),
                );
            }
        }
        _ => errors.add(NAME_FIELD, "You must provide a name value"),
    }

    if description.is_some_and(|value| value.chars().count() > DESCRIPTION_MAX_CHARS) {
        errors.add(
            DESCRIPTION_FIELD,
            format!(
                "Description value is longer than max length of {DESCRIPTION_MAX_CHARS} characters"
            ),
        );
    }
}

fn check_name_differs_from_description(
    errors: &mut ValidationErrors,
    name: Option<&str>,
    description: Option<&str>,
) {
    if let (Some(name), Some(description)) = (name, description)
        && name == description
    {
        errors.add(
            DESCRIPTION_FIELD,
            "Description value must be different from the name value.",
        );
    }
}
