//! Enumerated-choice validation.
//!
//! This module provides [`ChoiceSchema`], which accepts only inputs that parse
//! into one of a fixed set of values.

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::field::Field;

use super::traits::FieldRule;

/// A rule that accepts one value of an enumerated type `T`.
///
/// The input is trimmed and parsed with `T::from_str`; a parse failure is
/// reported with code `invalid_choice`. The list of allowed values shown in
/// the error comes from [`ChoiceSchema::allowed`].
///
/// # Example
///
/// ```rust
/// use credit_intake::{Field, Nationality, Schema};
///
/// let schema = Schema::choice::<Nationality>().allowed(Nationality::ALL);
///
/// let result = schema.validate("American", Field::Nationality);
/// assert_eq!(result.into_result().unwrap(), Nationality::American);
///
/// assert!(schema.validate("martian", Field::Nationality).is_failure());
/// ```
pub struct ChoiceSchema<T> {
    allowed: Vec<String>,
    message: Option<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ChoiceSchema<T>
where
    T: FromStr,
{
    /// Creates a choice schema for `T`.
    pub fn new() -> Self {
        Self {
            allowed: Vec::new(),
            message: None,
            _marker: PhantomData,
        }
    }

    /// Lists the allowed values for error reporting.
    pub fn allowed<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        self.allowed = values.into_iter().map(|v| v.to_string()).collect();
        self
    }

    /// Sets a custom message for inputs that are not an allowed value.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Validates raw input for `field`, returning the parsed choice.
    pub fn validate(&self, input: &str, field: Field) -> Validation<T, FieldErrors> {
        let input = input.trim();

        if input.is_empty() {
            return Validation::Failure(FieldErrors::single(
                FieldError::new(field, format!("{} is required", field.label()))
                    .with_code("required")
                    .with_expected("a selection"),
            ));
        }

        match input.parse::<T>() {
            Ok(value) => Validation::Success(value),
            Err(_) => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("select a valid {}", field.label()));
                let mut error = FieldError::new(field, message)
                    .with_code("invalid_choice")
                    .with_got(input);
                if !self.allowed.is_empty() {
                    error = error.with_expected(format!("one of: {}", self.allowed.join(", ")));
                }
                Validation::Failure(FieldErrors::single(error))
            }
        }
    }
}

impl<T: FromStr> Default for ChoiceSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ChoiceSchema<T> {
    fn clone(&self) -> Self {
        Self {
            allowed: self.allowed.clone(),
            message: self.message.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> FieldRule for ChoiceSchema<T>
where
    T: FromStr,
{
    type Output = T;

    fn validate(&self, input: &str, field: Field) -> Validation<Self::Output, FieldErrors> {
        ChoiceSchema::validate(self, input, field)
    }
}
