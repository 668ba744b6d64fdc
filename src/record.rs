//! Form input and the validated application record.
//!
//! [`ApplicationDraft`] is what the form holds while the user types: one raw
//! string per field. [`ApplicationRecord`] only exists once every field has
//! passed its constraint, and is what goes over the wire.

use std::fmt::{self, Display};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Raw, unvalidated form input.
///
/// The tax ID is upper-cased as it is entered, so the draft never holds a
/// lower-case tax ID.
///
/// # Example
///
/// ```rust
/// use credit_intake::{ApplicationDraft, Field};
///
/// let mut draft = ApplicationDraft::default();
/// draft.set(Field::TaxId, "ab123456c");
///
/// assert_eq!(draft.get(Field::TaxId), "AB123456C");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    amount: String,
    name: String,
    tax_id: String,
    nationality: String,
    email: String,
}

impl ApplicationDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning self for chaining.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Replaces the raw input of `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Amount => self.amount = value,
            Field::Name => self.name = value,
            Field::TaxId => self.tax_id = value.to_uppercase(),
            Field::Nationality => self.nationality = value,
            Field::Email => self.email = value,
        }
    }

    /// Returns the raw input of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Amount => &self.amount,
            Field::Name => &self.name,
            Field::TaxId => &self.tax_id,
            Field::Nationality => &self.nationality,
            Field::Email => &self.email,
        }
    }

    /// Returns true if every field is empty.
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Clears every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A credit application whose fields have all passed validation.
///
/// Serializes to the request body: five camelCase keys, with the amount as a
/// JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    /// Requested amount, `0 < amount <= 10_000_000`.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Applicant's name, trimmed.
    pub name: String,
    /// Upper-case alphanumeric tax identifier.
    pub tax_id: String,
    /// Applicant's nationality.
    pub nationality: Nationality,
    /// Contact email, trimmed.
    pub email: String,
}

/// The nationalities the form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nationality {
    American,
    Argentine,
    Australian,
    Brazilian,
    British,
    Canadian,
    Chinese,
    Dutch,
    French,
    German,
    Indian,
    Irish,
    Italian,
    Japanese,
    Korean,
    Mexican,
    Portuguese,
    Spanish,
    Other,
}

impl Nationality {
    /// Every selectable nationality, in display order.
    pub const ALL: [Nationality; 19] = [
        Nationality::American,
        Nationality::Argentine,
        Nationality::Australian,
        Nationality::Brazilian,
        Nationality::British,
        Nationality::Canadian,
        Nationality::Chinese,
        Nationality::Dutch,
        Nationality::French,
        Nationality::German,
        Nationality::Indian,
        Nationality::Irish,
        Nationality::Italian,
        Nationality::Japanese,
        Nationality::Korean,
        Nationality::Mexican,
        Nationality::Portuguese,
        Nationality::Spanish,
        Nationality::Other,
    ];

    /// Returns the lower-case wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Nationality::American => "american",
            Nationality::Argentine => "argentine",
            Nationality::Australian => "australian",
            Nationality::Brazilian => "brazilian",
            Nationality::British => "british",
            Nationality::Canadian => "canadian",
            Nationality::Chinese => "chinese",
            Nationality::Dutch => "dutch",
            Nationality::French => "french",
            Nationality::German => "german",
            Nationality::Indian => "indian",
            Nationality::Irish => "irish",
            Nationality::Italian => "italian",
            Nationality::Japanese => "japanese",
            Nationality::Korean => "korean",
            Nationality::Mexican => "mexican",
            Nationality::Portuguese => "portuguese",
            Nationality::Spanish => "spanish",
            Nationality::Other => "other",
        }
    }
}

impl Display for Nationality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known nationality.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown nationality '{0}'")]
pub struct UnknownNationality(pub String);

impl FromStr for Nationality {
    type Err = UnknownNationality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nationality::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownNationality(s.to_string()))
    }
}
