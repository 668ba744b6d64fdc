//! Field rules and the application schema.
//!
//! This module provides one rule type per kind of form input (text, decimal,
//! enumerated choice) and [`ApplicationSchema`], which combines one rule per
//! field. Rules never short-circuit across fields: every field is checked and
//! all failures are accumulated.
//!
//! # Example
//!
//! ```rust
//! use credit_intake::{Field, Schema};
//!
//! let schema = Schema::text().trim().min_len(2).max_len(100);
//!
//! assert!(schema.validate(" Ana ", Field::Name).is_success());
//! assert!(schema.validate("A", Field::Name).is_failure());
//! ```

mod application;
mod choice;
mod decimal;
mod text;
mod traits;

use std::str::FromStr;

pub use application::{ApplicationSchema, MAX_AMOUNT};
pub use choice::ChoiceSchema;
pub use decimal::DecimalSchema;
pub use text::TextSchema;
pub use traits::FieldRule;

/// Entry point for creating field rules.
///
/// Each factory returns an unconstrained rule; add constraints with the
/// builder methods on the returned type.
pub struct Schema;

impl Schema {
    /// Creates a text rule.
    ///
    /// ```rust
    /// use credit_intake::{Field, Schema};
    ///
    /// let schema = Schema::text().max_len(3);
    /// assert!(schema.validate("abcd", Field::Name).is_failure());
    /// ```
    pub fn text() -> TextSchema {
        TextSchema::new()
    }

    /// Creates a decimal rule.
    ///
    /// ```rust
    /// use credit_intake::{Field, Schema};
    ///
    /// let schema = Schema::decimal().positive();
    /// assert!(schema.validate("12.50", Field::Amount).is_success());
    /// assert!(schema.validate("-12.50", Field::Amount).is_failure());
    /// ```
    pub fn decimal() -> DecimalSchema {
        DecimalSchema::new()
    }

    /// Creates a rule accepting any value that parses into `T`.
    pub fn choice<T: FromStr>() -> ChoiceSchema<T> {
        ChoiceSchema::new()
    }
}
