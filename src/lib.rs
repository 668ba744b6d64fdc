//! # Credit Intake
//!
//! Validation and submission for a single-page credit application form.
//!
//! ## Overview
//!
//! The form collects five fields (amount, name, tax ID, nationality, email).
//! Each field has an independent rule; every rule is checked on every submit
//! and the failures are accumulated, so the user sees every problem at once.
//! Only a draft that passes all rules becomes an [`ApplicationRecord`], which
//! is sent exactly once per submit through a [`Transport`].
//!
//! ## Core Types
//!
//! - [`Field`]: names one input of the form
//! - [`FieldError`] / [`FieldErrors`]: violated constraints, attached to fields
//! - [`Schema`]: entry point for creating field rules
//! - [`ApplicationSchema`]: the standard five-field rule set
//! - [`SubmissionController`]: Idle → Submitting → Success/Failure, with a
//!   single request in flight at a time
//!
//! ## Example
//!
//! ```rust
//! use credit_intake::{ApplicationDraft, ApplicationSchema, Field};
//!
//! let draft = ApplicationDraft::new()
//!     .with(Field::Amount, "0")
//!     .with(Field::Name, "R2-D2")
//!     .with(Field::TaxId, "ab123456c")
//!     .with(Field::Nationality, "american")
//!     .with(Field::Email, "john@x.com");
//!
//! let errors = ApplicationSchema::new()
//!     .validate(&draft)
//!     .into_result()
//!     .unwrap_err();
//!
//! let inline = errors.field_messages();
//! assert_eq!(inline[&Field::Amount], "amount must be greater than 0");
//! assert!(inline.contains_key(&Field::Name));
//! ```

pub mod error;
pub mod field;
pub mod record;
pub mod schema;
pub mod submit;

pub use error::{ConfigError, FieldError, FieldErrors, SubmitError};
pub use field::Field;
pub use record::{ApplicationDraft, ApplicationRecord, Nationality, UnknownNationality};
pub use schema::{
    ApplicationSchema, ChoiceSchema, DecimalSchema, FieldRule, Schema, TextSchema, MAX_AMOUNT,
};
#[cfg(feature = "http")]
pub use submit::HttpTransport;
pub use submit::{
    FormState, IgnoredReason, Notice, SubmissionController, SubmissionState, SubmitConfig,
    SubmitOutcome, Transport,
};

/// Type alias for validation results using FieldErrors
pub type ValidationResult<T> = stillwater::Validation<T, FieldErrors>;
