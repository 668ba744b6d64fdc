//! Submission of validated applications.
//!
//! This module provides the [`SubmissionController`] state machine, the
//! [`Transport`] seam it sends through, and [`SubmitConfig`].
//!
//! # Example
//!
//! ```rust,no_run
//! use credit_intake::{Field, SubmissionController, SubmitConfig, SubmitOutcome};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SubmitConfig::new("https://loans.example.test/applications")?;
//! let form = SubmissionController::with_http(config)?;
//!
//! form.set_field(Field::Amount, "1500.00");
//! form.set_field(Field::Name, "John Doe");
//! form.set_field(Field::TaxId, "ab123456c");
//! form.set_field(Field::Nationality, "american");
//! form.set_field(Field::Email, "john@x.com");
//!
//! match form.submit().await {
//!     SubmitOutcome::Accepted(record) => println!("sent {}", record.tax_id),
//!     SubmitOutcome::Invalid(errors) => println!("fix {} field(s)", errors.len()),
//!     SubmitOutcome::Failed(err) => println!("try again: {err}"),
//!     SubmitOutcome::Ignored(_) => {}
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod controller;
mod transport;

pub use config::{SubmitConfig, DEFAULT_RESET_DELAY};
pub use controller::{
    FormState, IgnoredReason, Notice, SubmissionController, SubmissionState, SubmitOutcome,
};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::Transport;
