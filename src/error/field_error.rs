//! Field validation error types.
//!
//! This module provides [`FieldError`] for a single violated constraint and
//! [`FieldErrors`] for accumulating violations across the whole form.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use stillwater::prelude::*;

use crate::field::Field;

/// A single violated constraint on one form field.
///
/// `FieldError` captures:
/// - **field**: which input failed
/// - **message**: text shown inline next to the input
/// - **got**: the offending input, when it is safe to echo back (optional)
/// - **expected**: what the constraint wanted (optional)
/// - **code**: machine-readable code such as `required` or `max_value`
///
/// # Example
///
/// ```rust
/// use credit_intake::{Field, FieldError};
///
/// let error = FieldError::new(Field::Email, "enter a valid email address")
///     .with_code("pattern")
///     .with_expected("address like name@example.com");
///
/// assert_eq!(error.code, "pattern");
/// assert_eq!(error.to_string(), "email: enter a valid email address (expected: address like name@example.com)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// The field whose input violated the constraint.
    pub field: Field,
    /// Human-readable error message.
    pub message: String,
    /// The actual input that was received.
    pub got: Option<String>,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// Machine-readable error code (e.g., `min_length`).
    pub code: String,
}

impl FieldError {
    /// Creates a new error for `field` with the code `validation_error`.
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            got: None,
            expected: None,
            code: "validation_error".to_string(),
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" (actual input) field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for FieldError {}

/// A non-empty collection of field validation errors.
///
/// `FieldErrors` wraps a `NonEmptyVec<FieldError>` so that a failed
/// `Validation<T, FieldErrors>` always carries at least one error. Errors from
/// independent fields are merged with [`Semigroup::combine`], keeping the
/// order in which constraints were checked.
///
/// ```rust
/// use credit_intake::{Field, FieldError, FieldErrors};
/// use stillwater::prelude::*;
///
/// let errors = FieldErrors::single(FieldError::new(Field::Name, "name is required"))
///     .combine(FieldErrors::single(FieldError::new(Field::Email, "email is required")));
///
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors(NonEmptyVec<FieldError>);

impl FieldErrors {
    /// Creates a `FieldErrors` containing a single error.
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `FieldErrors` from a `Vec`, returning `None` when it is empty.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let head = errors.next()?;
        Some(errors.fold(Self::single(head), |acc, e| acc.combine(Self::single(e))))
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// Returns all errors reported for `field`, in check order.
    pub fn for_field(&self, field: Field) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.field == field).collect()
    }

    /// Returns all errors with the specified error code.
    pub fn with_code(&self, code: &str) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the fields that have at least one error, in first-seen order.
    pub fn fields(&self) -> Vec<Field> {
        self.field_messages().into_keys().collect()
    }

    /// Reduces the collection to one message per field.
    ///
    /// Each field maps to the message of its first violated constraint, which
    /// is what the form shows inline. Fields keep the order in which they
    /// first failed.
    pub fn field_messages(&self) -> IndexMap<Field, String> {
        let mut messages = IndexMap::new();
        for error in self.0.iter() {
            messages
                .entry(error.field)
                .or_insert_with(|| error.message.clone());
        }
        messages
    }

    /// Converts this collection into a `Vec<FieldError>`.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0.into_vec()
    }
}

impl Semigroup for FieldErrors {
    fn combine(self, other: Self) -> Self {
        FieldErrors(self.0.combine(other.0))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Application rejected with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

// Controllers move errors across tokio tasks.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldErrors>();
    assert_sync::<FieldErrors>();
};
