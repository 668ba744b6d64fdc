//! Decimal field validation.
//!
//! This module provides [`DecimalSchema`] for validating monetary inputs typed
//! as text, with sign and range constraints.

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use stillwater::Validation;

use crate::error::{FieldError, FieldErrors};
use crate::field::Field;

use super::traits::FieldRule;

/// A constraint applied to parsed decimal values.
#[derive(Clone)]
enum DecimalConstraint {
    Min { value: Decimal, message: Option<String> },
    Max { value: Decimal, message: Option<String> },
    Positive { message: Option<String> },
}

/// A rule for validating decimal inputs.
///
/// Input is trimmed and parsed as a plain decimal number (`1500`, `1500.00`,
/// `-3.5`); separators such as `1,500` or `1_500` and exponents such as `1e3`
/// are not numbers. Empty input fails with code `required`, input that is not
/// a number with `invalid_number`, and a fraction finer than a `Decimal` can
/// hold exactly with `precision`. Each of these short-circuits the remaining
/// constraints. A number too large to represent is checked as `Decimal::MAX`
/// (or `MIN`), so it breaks the range constraints like any other large value.
/// Constraint violations are reported in the order the constraints were
/// added.
///
/// # Example
///
/// ```rust
/// use credit_intake::{Field, Schema};
/// use rust_decimal::Decimal;
///
/// let schema = Schema::decimal()
///     .positive()
///     .max(Decimal::from(10_000_000));
///
/// assert!(schema.validate("1500.00", Field::Amount).is_success());
/// assert!(schema.validate("0", Field::Amount).is_failure());
/// assert!(schema.validate("10000000.01", Field::Amount).is_failure());
/// ```
#[derive(Clone, Default)]
pub struct DecimalSchema {
    constraints: Vec<DecimalConstraint>,
    type_error_message: Option<String>,
}

impl DecimalSchema {
    /// Creates a decimal schema with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a minimum value constraint (inclusive).
    pub fn min(mut self, value: Decimal) -> Self {
        self.constraints.push(DecimalConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Adds a maximum value constraint (inclusive).
    pub fn max(mut self, value: Decimal) -> Self {
        self.constraints.push(DecimalConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Adds both minimum and maximum constraints (inclusive range).
    ///
    /// Equivalent to `.min(start).max(end)`.
    pub fn range(self, range: RangeInclusive<Decimal>) -> Self {
        let (start, end) = range.into_inner();
        self.min(start).max(end)
    }

    /// Requires the value to be strictly greater than zero.
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(DecimalConstraint::Positive { message: None });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the message used when
    /// the input is not a number.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                DecimalConstraint::Min { message: m, .. } => *m = Some(message.into()),
                DecimalConstraint::Max { message: m, .. } => *m = Some(message.into()),
                DecimalConstraint::Positive { message: m } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    /// Validates raw input for `field`, returning the parsed decimal.
    pub fn validate(&self, input: &str, field: Field) -> Validation<Decimal, FieldErrors> {
        let input = input.trim();

        if input.is_empty() {
            return Validation::Failure(FieldErrors::single(
                FieldError::new(field, format!("{} is required", field.label()))
                    .with_code("required")
                    .with_expected("a number"),
            ));
        }

        let value = match parse_plain(input) {
            Parsed::Exact(value) => value,
            // Too large to represent: checked as the nearest bound so the
            // range constraints report it.
            Parsed::Overflow { negative: true } => Decimal::MIN,
            Parsed::Overflow { negative: false } => Decimal::MAX,
            Parsed::TooPrecise => {
                return Validation::Failure(FieldErrors::single(
                    FieldError::new(
                        field,
                        format!("{} has too many decimal places", field.label()),
                    )
                    .with_code("precision")
                    .with_expected(format!("at most {} significant digits", MAX_DIGITS))
                    .with_got(input),
                ));
            }
            Parsed::NotANumber => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| format!("{} must be a number", field.label()));
                return Validation::Failure(FieldErrors::single(
                    FieldError::new(field, message)
                        .with_code("invalid_number")
                        .with_expected("a decimal number")
                        .with_got(input),
                ));
            }
        };

        let errors: Vec<FieldError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, value, input, field))
            .collect();

        match FieldErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(value),
        }
    }
}

/// Significant digits a `Decimal` holds exactly.
const MAX_DIGITS: u32 = 28;

/// The result of reading a plain decimal literal.
#[derive(Debug, PartialEq)]
enum Parsed {
    Exact(Decimal),
    /// Well-formed, but the integer part does not fit.
    Overflow { negative: bool },
    /// Well-formed, but the fraction cannot be held without rounding.
    TooPrecise,
    NotANumber,
}

/// Reads `[+-]digits[.digits]`, never rounding.
///
/// Grouping separators, underscores and exponents are not numbers here.
fn parse_plain(input: &str) -> Parsed {
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    if !is_digits(int) || !frac.map_or(true, is_digits) {
        return Parsed::NotANumber;
    }

    let int = match int.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    };
    let frac = frac.map_or("", |f| f.trim_end_matches('0'));
    let sign = if negative { "-" } else { "" };

    let Ok(whole) = Decimal::from_str_exact(&format!("{sign}{int}")) else {
        return Parsed::Overflow { negative };
    };
    if frac.is_empty() {
        return Parsed::Exact(whole);
    }
    match Decimal::from_str_exact(&format!("{sign}{int}.{frac}")) {
        Ok(value) => Parsed::Exact(value),
        Err(_) => Parsed::TooPrecise,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl FieldRule for DecimalSchema {
    type Output = Decimal;

    fn validate(&self, input: &str, field: Field) -> Validation<Self::Output, FieldErrors> {
        DecimalSchema::validate(self, input, field)
    }
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(
    constraint: &DecimalConstraint,
    value: Decimal,
    got: &str,
    field: Field,
) -> Option<FieldError> {
    match constraint {
        DecimalConstraint::Min {
            value: min,
            message,
        } => {
            if value < *min {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("{} must be at least {}", field.label(), min));
                Some(
                    FieldError::new(field, msg)
                        .with_code("min_value")
                        .with_expected(format!("at least {}", min))
                        .with_got(got),
                )
            } else {
                None
            }
        }
        DecimalConstraint::Max {
            value: max,
            message,
        } => {
            if value > *max {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("{} must not exceed {}", field.label(), max));
                Some(
                    FieldError::new(field, msg)
                        .with_code("max_value")
                        .with_expected(format!("at most {}", max))
                        .with_got(got),
                )
            } else {
                None
            }
        }
        DecimalConstraint::Positive { message } => {
            if value <= Decimal::ZERO {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("{} must be greater than 0", field.label()));
                Some(
                    FieldError::new(field, msg)
                        .with_code("positive")
                        .with_expected("greater than 0")
                        .with_got(got),
                )
            } else {
                None
            }
        }
    }
}
