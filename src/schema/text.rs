//! Text field validation.
//!
//! This module provides [`TextSchema`] for validating free-text inputs with
//! normalization (trim, upper-case) followed by length and pattern constraints.

use regex::Regex;
use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::field::Field;

use super::traits::FieldRule;

/// A transformation applied to the input before any constraint is checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Normalizer {
    Trim,
    Uppercase,
}

/// A constraint applied to normalized text.
#[derive(Clone)]
enum TextConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        pattern_str: String,
        message: Option<String>,
    },
}

/// A rule for validating text inputs.
///
/// Normalizers run first, in the order they were added. Empty input (after
/// normalization) fails with code `required` and no further checks. Every
/// other violated constraint is reported, in the order the constraints were
/// added, so the first error for a field is the first constraint it broke.
///
/// # Example
///
/// ```rust
/// use credit_intake::{Field, Schema};
///
/// let schema = Schema::text()
///     .trim()
///     .uppercase()
///     .min_len(5)
///     .pattern(r"^[A-Z0-9]+$")
///     .unwrap();
///
/// let result = schema.validate(" ab123 ", Field::TaxId);
/// assert_eq!(result.into_result().unwrap(), "AB123");
/// ```
#[derive(Clone, Default)]
pub struct TextSchema {
    normalizers: Vec<Normalizer>,
    constraints: Vec<TextConstraint>,
    required_message: Option<String>,
}

impl TextSchema {
    /// Creates a text schema with no normalizers and no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strips leading and trailing whitespace before validation.
    pub fn trim(mut self) -> Self {
        self.normalizers.push(Normalizer::Trim);
        self
    }

    /// Upper-cases the input before validation.
    ///
    /// ```rust
    /// use credit_intake::{Field, Schema};
    ///
    /// let schema = Schema::text().uppercase();
    /// let result = schema.validate("ab123456c", Field::TaxId);
    /// assert_eq!(result.into_result().unwrap(), "AB123456C");
    /// ```
    pub fn uppercase(mut self) -> Self {
        self.normalizers.push(Normalizer::Uppercase);
        self
    }

    /// Adds a minimum length constraint, counted in characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(TextConstraint::MinLength { min, message: None });
        self
    }

    /// Adds a maximum length constraint, counted in characters.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(TextConstraint::MaxLength { max, message: None });
        self
    }

    /// Adds a regex pattern constraint.
    ///
    /// Returns an error if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(TextConstraint::Pattern {
            regex,
            pattern_str: pattern.to_string(),
            message: None,
        });
        Ok(self)
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the message used when
    /// the input is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use credit_intake::{Field, Schema};
    ///
    /// let schema = Schema::text()
    ///     .error("please enter your name")
    ///     .min_len(2)
    ///     .error("name is too short");
    ///
    /// let errors = schema.validate("", Field::Name).into_result().unwrap_err();
    /// assert_eq!(errors.first().message, "please enter your name");
    ///
    /// let errors = schema.validate("J", Field::Name).into_result().unwrap_err();
    /// assert_eq!(errors.first().message, "name is too short");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                TextConstraint::MinLength { message: m, .. } => *m = Some(message.into()),
                TextConstraint::MaxLength { message: m, .. } => *m = Some(message.into()),
                TextConstraint::Pattern { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.required_message = Some(message.into());
        }
        self
    }

    /// Applies the normalizers to `input`.
    pub fn normalize(&self, input: &str) -> String {
        self.normalizers
            .iter()
            .fold(input.to_string(), |value, normalizer| match normalizer {
                Normalizer::Trim => value.trim().to_string(),
                Normalizer::Uppercase => value.to_uppercase(),
            })
    }

    /// Validates raw input for `field`.
    ///
    /// Returns the normalized text on success.
    pub fn validate(&self, input: &str, field: Field) -> Validation<String, FieldErrors> {
        let value = self.normalize(input);

        if value.is_empty() {
            let message = self
                .required_message
                .clone()
                .unwrap_or_else(|| format!("{} is required", field.label()));
            return Validation::Failure(FieldErrors::single(
                FieldError::new(field, message)
                    .with_code("required")
                    .with_expected("a value"),
            ));
        }

        let errors: Vec<FieldError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, &value, field))
            .collect();

        match FieldErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(value),
        }
    }
}

impl FieldRule for TextSchema {
    type Output = String;

    fn validate(&self, input: &str, field: Field) -> Validation<Self::Output, FieldErrors> {
        TextSchema::validate(self, input, field)
    }
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(constraint: &TextConstraint, value: &str, field: Field) -> Option<FieldError> {
    match constraint {
        TextConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            if len < *min {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("{} must be at least {} characters", field.label(), min)
                });
                Some(
                    FieldError::new(field, msg)
                        .with_code("min_length")
                        .with_expected(format!("at least {} characters", min))
                        .with_got(format!("{} characters", len)),
                )
            } else {
                None
            }
        }
        TextConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            if len > *max {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("{} must be at most {} characters", field.label(), max)
                });
                Some(
                    FieldError::new(field, msg)
                        .with_code("max_length")
                        .with_expected(format!("at most {} characters", max))
                        .with_got(format!("{} characters", len)),
                )
            } else {
                None
            }
        }
        TextConstraint::Pattern {
            regex,
            pattern_str,
            message,
        } => {
            if regex.is_match(value) {
                None
            } else {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("{} has an invalid format", field.label()));
                // The input itself is not echoed back: it may be personal data.
                Some(
                    FieldError::new(field, msg)
                        .with_code("pattern")
                        .with_expected(format!("text matching '{}'", pattern_str)),
                )
            }
        }
    }
}
