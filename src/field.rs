//! Field identifiers for the credit application form.
//!
//! This module provides [`Field`], which names each input of the form. Every
//! validation error is attached to exactly one field, and the field's display
//! form doubles as its JSON key on the wire.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// One input of the credit application form.
///
/// # Example
///
/// ```rust
/// use credit_intake::Field;
///
/// assert_eq!(Field::TaxId.to_string(), "taxId");
/// assert_eq!(Field::ALL.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Requested credit amount.
    Amount,
    /// Applicant's full name.
    Name,
    /// Applicant's tax identifier.
    TaxId,
    /// Applicant's nationality.
    Nationality,
    /// Contact email address.
    Email,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 5] = [
        Field::Amount,
        Field::Name,
        Field::TaxId,
        Field::Nationality,
        Field::Email,
    ];

    /// Returns the JSON key used for this field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Name => "name",
            Field::TaxId => "taxId",
            Field::Nationality => "nationality",
            Field::Email => "email",
        }
    }

    /// Returns the human-readable label used in default error messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Name => "name",
            Field::TaxId => "tax ID",
            Field::Nationality => "nationality",
            Field::Email => "email",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_wire_format() {
        let keys: Vec<_> = Field::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys, ["amount", "name", "taxId", "nationality", "email"]);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&Field::TaxId).unwrap();
        assert_eq!(json, "\"taxId\"");

        let field: Field = serde_json::from_str("\"nationality\"").unwrap();
        assert_eq!(field, Field::Nationality);
    }

    #[test]
    fn test_label_differs_from_key_for_tax_id() {
        assert_eq!(Field::TaxId.label(), "tax ID");
        assert_eq!(Field::Email.label(), Field::Email.key());
    }
}
