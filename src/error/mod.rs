//! Error types for validation and submission failures.
//!
//! Validation failures are accumulated per field ([`FieldError`], [`FieldErrors`]);
//! operational failures of the outbound request and configuration are plain
//! error enums ([`SubmitError`], [`ConfigError`]).

mod field_error;
mod submit_error;

pub use field_error::{FieldError, FieldErrors};
pub use submit_error::{ConfigError, SubmitError};
