//! Whole-form validation.
//!
//! This module provides [`ApplicationSchema`], which applies one rule per
//! field of an [`ApplicationDraft`] and assembles an [`ApplicationRecord`]
//! once every rule passes.

use rust_decimal::Decimal;
use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::FieldErrors;
use crate::field::Field;
use crate::record::{ApplicationDraft, ApplicationRecord, Nationality};
use crate::ValidationResult;

use super::text::TextSchema;
use super::traits::FieldRule;
use super::Schema;

/// Largest amount that may be requested.
pub const MAX_AMOUNT: i64 = 10_000_000;

/// Letters in any script, spaces, hyphens, and apostrophes.
const NAME_PATTERN: &str = r"^[\p{L} '\-]+$";
const TAX_ID_PATTERN: &str = r"^[A-Z0-9]+$";
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

type Rule<T> = Box<dyn FieldRule<Output = T>>;

/// The validation schema for a credit application.
///
/// Each field has exactly one rule. Rules are independent: every field is
/// validated on every call, and the errors of all failing fields are
/// accumulated. [`FieldErrors::field_messages`] reduces them to the first
/// violated constraint per field.
///
/// [`ApplicationSchema::new`] builds the standard rules:
///
/// | field | rule |
/// |---|---|
/// | amount | decimal, `> 0`, `<= 10,000,000` |
/// | name | trimmed, 2-100 characters, letters/spaces/hyphens/apostrophes |
/// | taxId | trimmed, upper-cased, 5-20 characters, alphanumeric |
/// | nationality | one of [`Nationality::ALL`] |
/// | email | trimmed, at most 255 characters, `local@domain.tld` |
///
/// # Example
///
/// ```rust
/// use credit_intake::{ApplicationDraft, ApplicationSchema, Field};
///
/// let draft = ApplicationDraft::new()
///     .with(Field::Amount, "1500.00")
///     .with(Field::Name, "John Doe")
///     .with(Field::TaxId, "ab123456c")
///     .with(Field::Nationality, "american")
///     .with(Field::Email, "john@x.com");
///
/// let record = ApplicationSchema::new().validate(&draft).into_result().unwrap();
/// assert_eq!(record.tax_id, "AB123456C");
/// ```
pub struct ApplicationSchema {
    amount: Rule<Decimal>,
    name: Rule<String>,
    tax_id: Rule<String>,
    nationality: Rule<Nationality>,
    email: Rule<String>,
}

impl ApplicationSchema {
    /// Creates the schema with the standard rule for every field.
    pub fn new() -> Self {
        Self {
            amount: Box::new(standard_amount()),
            name: Box::new(standard_name()),
            tax_id: Box::new(standard_tax_id()),
            nationality: Box::new(standard_nationality()),
            email: Box::new(standard_email()),
        }
    }

    /// Replaces the amount rule.
    pub fn amount<R>(mut self, rule: R) -> Self
    where
        R: FieldRule<Output = Decimal> + 'static,
    {
        self.amount = Box::new(rule);
        self
    }

    /// Replaces the name rule.
    pub fn name<R>(mut self, rule: R) -> Self
    where
        R: FieldRule<Output = String> + 'static,
    {
        self.name = Box::new(rule);
        self
    }

    /// Replaces the tax ID rule.
    pub fn tax_id<R>(mut self, rule: R) -> Self
    where
        R: FieldRule<Output = String> + 'static,
    {
        self.tax_id = Box::new(rule);
        self
    }

    /// Replaces the nationality rule.
    pub fn nationality<R>(mut self, rule: R) -> Self
    where
        R: FieldRule<Output = Nationality> + 'static,
    {
        self.nationality = Box::new(rule);
        self
    }

    /// Replaces the email rule.
    pub fn email<R>(mut self, rule: R) -> Self
    where
        R: FieldRule<Output = String> + 'static,
    {
        self.email = Box::new(rule);
        self
    }

    /// Validates a draft.
    ///
    /// Returns `Validation::Success` with the assembled record when every
    /// field passes, or `Validation::Failure` with the errors of all failing
    /// fields in form order.
    pub fn validate(&self, draft: &ApplicationDraft) -> ValidationResult<ApplicationRecord> {
        let amount = self.amount.validate(draft.get(Field::Amount), Field::Amount);
        let name = self.name.validate(draft.get(Field::Name), Field::Name);
        let tax_id = self.tax_id.validate(draft.get(Field::TaxId), Field::TaxId);
        let nationality = self
            .nationality
            .validate(draft.get(Field::Nationality), Field::Nationality);
        let email = self.email.validate(draft.get(Field::Email), Field::Email);

        match (amount, name, tax_id, nationality, email) {
            (
                Validation::Success(amount),
                Validation::Success(name),
                Validation::Success(tax_id),
                Validation::Success(nationality),
                Validation::Success(email),
            ) => Validation::Success(ApplicationRecord {
                amount,
                name,
                tax_id,
                nationality,
                email,
            }),
            (amount, name, tax_id, nationality, email) => {
                let errors = [
                    failure_of(amount),
                    failure_of(name),
                    failure_of(tax_id),
                    failure_of(nationality),
                    failure_of(email),
                ]
                .into_iter()
                .flatten()
                .reduce(|acc, e| acc.combine(e))
                .expect("a non-success arm carries at least one failure");

                Validation::Failure(errors)
            }
        }
    }
}

impl Default for ApplicationSchema {
    fn default() -> Self {
        Self::new()
    }
}

fn failure_of<T>(result: Validation<T, FieldErrors>) -> Option<FieldErrors> {
    match result {
        Validation::Success(_) => None,
        Validation::Failure(errors) => Some(errors),
    }
}

fn standard_amount() -> impl FieldRule<Output = Decimal> {
    Schema::decimal()
        .error("enter the amount as a number, e.g. 1500.00")
        .positive()
        .error("amount must be greater than 0")
        .max(Decimal::from(MAX_AMOUNT))
        .error("amount must not exceed 10,000,000")
}

fn standard_name() -> impl FieldRule<Output = String> {
    text_rule(
        Schema::text()
            .trim()
            .min_len(2)
            .error("name must be at least 2 characters")
            .max_len(100)
            .error("name must be at most 100 characters"),
        NAME_PATTERN,
        "name may only contain letters, spaces, hyphens, and apostrophes",
    )
}

fn standard_tax_id() -> impl FieldRule<Output = String> {
    text_rule(
        Schema::text()
            .trim()
            .uppercase()
            .min_len(5)
            .error("tax ID must be at least 5 characters")
            .max_len(20)
            .error("tax ID must be at most 20 characters"),
        TAX_ID_PATTERN,
        "tax ID may only contain letters and digits",
    )
}

fn standard_nationality() -> impl FieldRule<Output = Nationality> {
    Schema::choice::<Nationality>()
        .allowed(Nationality::ALL)
        .error("select a nationality from the list")
}

fn standard_email() -> impl FieldRule<Output = String> {
    text_rule(
        Schema::text()
            .trim()
            .max_len(255)
            .error("email must be at most 255 characters"),
        EMAIL_PATTERN,
        "enter a valid email address",
    )
}

/// Appends a pattern constraint with a custom message.
///
/// Only called with the pattern constants above, which the tests compile.
fn text_rule(schema: TextSchema, pattern: &str, message: &str) -> TextSchema {
    schema
        .pattern(pattern)
        .expect("built-in patterns compile")
        .error(message)
}
