//! The common seam for field rules.
//!
//! This module provides the [`FieldRule`] trait that lets the application
//! schema hold text, decimal, and choice rules side by side.

use stillwater::Validation;

use crate::error::FieldErrors;
use crate::field::Field;

/// A rule that validates the raw input of one form field.
///
/// Rules receive the field they are validating so that every error they
/// produce is attached to it. The `Send + Sync` bounds let a schema be shared
/// by a controller that lives across tokio tasks.
///
/// # Example
///
/// ```rust
/// use credit_intake::{Field, FieldRule, Schema};
///
/// let rule: Box<dyn FieldRule<Output = String>> = Box::new(Schema::text().min_len(2));
///
/// assert!(rule.validate("Jo", Field::Name).is_success());
/// assert!(rule.validate("J", Field::Name).is_failure());
/// ```
pub trait FieldRule: Send + Sync {
    /// The typed value produced by successful validation.
    type Output;

    /// Validates raw input for `field`.
    ///
    /// Returns `Validation::Success` with the normalized value, or
    /// `Validation::Failure` with every violated constraint, in check order.
    fn validate(&self, input: &str, field: Field) -> Validation<Self::Output, FieldErrors>;
}

impl<R: FieldRule + ?Sized> FieldRule for Box<R> {
    type Output = R::Output;

    fn validate(&self, input: &str, field: Field) -> Validation<Self::Output, FieldErrors> {
        (**self).validate(input, field)
    }
}
