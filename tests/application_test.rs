//! Integration tests for the standard application schema.

use credit_intake::{ApplicationDraft, ApplicationSchema, Field, FieldErrors, Nationality};
use rust_decimal::Decimal;
use std::str::FromStr;

fn reference_draft() -> ApplicationDraft {
    ApplicationDraft::new()
        .with(Field::Amount, "1500.00")
        .with(Field::Name, "John Doe")
        .with(Field::TaxId, "ab123456c")
        .with(Field::Nationality, "american")
        .with(Field::Email, "john@x.com")
}

/// Validates `draft` and returns the errors, panicking on success.
fn errors_for(draft: &ApplicationDraft) -> FieldErrors {
    ApplicationSchema::new()
        .validate(draft)
        .into_result()
        .unwrap_err()
}

fn first_code(draft: &ApplicationDraft, field: Field) -> String {
    errors_for(draft).for_field(field)[0].code.clone()
}

#[test]
fn test_reference_application_is_accepted() {
    let record = ApplicationSchema::new()
        .validate(&reference_draft())
        .into_result()
        .unwrap();

    assert_eq!(record.amount, Decimal::from_str("1500.00").unwrap());
    assert_eq!(record.name, "John Doe");
    assert_eq!(record.tax_id, "AB123456C");
    assert_eq!(record.nationality, Nationality::American);
    assert_eq!(record.email, "john@x.com");
}

#[test]
fn test_amounts_at_or_below_zero_are_rejected() {
    for amount in ["0", "0.00", "-0.01", "-1500"] {
        let draft = reference_draft().with(Field::Amount, amount);
        assert_eq!(first_code(&draft, Field::Amount), "positive", "{amount}");
    }
}

#[test]
fn test_amounts_above_ten_million_are_rejected() {
    for amount in [
        "10000000.01",
        "10000001",
        "99999999999",
        "10000000.000000000000000000001",
        "99999999999999999999999999999999999",
    ] {
        let draft = reference_draft().with(Field::Amount, amount);
        assert_eq!(first_code(&draft, Field::Amount), "max_value", "{amount}");
        assert_eq!(
            errors_for(&draft).field_messages()[&Field::Amount],
            "amount must not exceed 10,000,000"
        );
    }

    // Finer than a Decimal holds: rejected rather than rounded down to the
    // limit.
    let draft = reference_draft().with(Field::Amount, "10000000.0000000000000000000000000001");
    assert_eq!(first_code(&draft, Field::Amount), "precision");
}

#[test]
fn test_amount_boundaries_are_accepted() {
    for amount in ["0.01", "1", "10000000", "10000000.00"] {
        let draft = reference_draft().with(Field::Amount, amount);
        assert!(
            ApplicationSchema::new().validate(&draft).is_success(),
            "{amount}"
        );
    }
}

#[test]
fn test_non_numeric_amount() {
    for amount in ["1,500", "1_500", "1e3", "abc"] {
        let draft = reference_draft().with(Field::Amount, amount);
        let errors = errors_for(&draft);
        assert_eq!(errors.for_field(Field::Amount).len(), 1, "{amount}");
        assert_eq!(errors.first().code, "invalid_number", "{amount}");
        assert_eq!(
            errors.first().message,
            "enter the amount as a number, e.g. 1500.00"
        );
    }
}

#[test]
fn test_names_outside_allowed_characters_are_rejected() {
    for name in ["John3", "J@ne", "Anne_Marie", "Bob!", "Ann.Lee", "Tab\tName"] {
        let draft = reference_draft().with(Field::Name, name);
        assert_eq!(first_code(&draft, Field::Name), "pattern", "{name:?}");
    }
}

#[test]
fn test_names_with_allowed_punctuation_and_accents_are_accepted() {
    for name in ["Mary-Jane O'Neil", "José Álvarez", "Zoë", "Li"] {
        let draft = reference_draft().with(Field::Name, name);
        assert!(
            ApplicationSchema::new().validate(&draft).is_success(),
            "{name}"
        );
    }
}

#[test]
fn test_name_length_limits() {
    let draft = reference_draft().with(Field::Name, "J");
    assert_eq!(first_code(&draft, Field::Name), "min_length");

    let draft = reference_draft().with(Field::Name, "a".repeat(101));
    assert_eq!(first_code(&draft, Field::Name), "max_length");

    let draft = reference_draft().with(Field::Name, "a".repeat(100));
    assert!(ApplicationSchema::new().validate(&draft).is_success());
}

#[test]
fn test_name_is_trimmed() {
    let draft = reference_draft().with(Field::Name, "  John Doe  ");
    let record = ApplicationSchema::new()
        .validate(&draft)
        .into_result()
        .unwrap();
    assert_eq!(record.name, "John Doe");
}

#[test]
fn test_tax_id_is_uppercased_before_validation() {
    // A deserialized draft bypasses `set`, so the schema must normalize too.
    let draft: ApplicationDraft = serde_json::from_value(serde_json::json!({
        "amount": "10",
        "name": "Ana Li",
        "taxId": "xy98765",
        "nationality": "mexican",
        "email": "ana@li.mx"
    }))
    .unwrap();
    assert_eq!(draft.get(Field::TaxId), "xy98765");

    let record = ApplicationSchema::new()
        .validate(&draft)
        .into_result()
        .unwrap();
    assert_eq!(record.tax_id, "XY98765");
}

#[test]
fn test_tax_id_constraints() {
    let draft = reference_draft().with(Field::TaxId, "ab12");
    assert_eq!(first_code(&draft, Field::TaxId), "min_length");

    let draft = reference_draft().with(Field::TaxId, "A".repeat(21));
    assert_eq!(first_code(&draft, Field::TaxId), "max_length");

    let draft = reference_draft().with(Field::TaxId, "AB-123456");
    assert_eq!(first_code(&draft, Field::TaxId), "pattern");
}

#[test]
fn test_nationality_must_be_in_set() {
    let draft = reference_draft().with(Field::Nationality, "klingon");
    assert_eq!(first_code(&draft, Field::Nationality), "invalid_choice");

    let draft = reference_draft().with(Field::Nationality, "Japanese");
    let record = ApplicationSchema::new()
        .validate(&draft)
        .into_result()
        .unwrap();
    assert_eq!(record.nationality, Nationality::Japanese);
}

#[test]
fn test_email_constraints() {
    for email in ["john", "john@", "@x.com", "john@x", "jo hn@x.com", "a@b@c.com"] {
        let draft = reference_draft().with(Field::Email, email);
        assert_eq!(first_code(&draft, Field::Email), "pattern", "{email}");
    }

    let long = format!("{}@x.com", "a".repeat(250));
    let draft = reference_draft().with(Field::Email, long);
    assert_eq!(first_code(&draft, Field::Email), "max_length");
}

#[test]
fn test_field_messages_give_first_violation_per_field() {
    let draft = ApplicationDraft::new()
        .with(Field::Amount, "-3")
        .with(Field::Name, "J3")
        .with(Field::TaxId, "ab!")
        .with(Field::Nationality, "")
        .with(Field::Email, "nope");

    let errors = errors_for(&draft);
    // The tax ID breaks two constraints; only the first is shown inline.
    assert_eq!(errors.for_field(Field::TaxId).len(), 2);

    let messages = errors.field_messages();
    assert_eq!(messages.keys().copied().collect::<Vec<_>>(), Field::ALL.to_vec());
    assert_eq!(messages[&Field::Amount], "amount must be greater than 0");
    assert_eq!(
        messages[&Field::Name],
        "name may only contain letters, spaces, hyphens, and apostrophes"
    );
    assert_eq!(messages[&Field::TaxId], "tax ID must be at least 5 characters");
    assert_eq!(messages[&Field::Nationality], "nationality is required");
    assert_eq!(messages[&Field::Email], "enter a valid email address");
}

#[test]
fn test_fields_are_validated_independently() {
    // A broken amount does not affect whether other fields are reported.
    let draft = reference_draft().with(Field::Amount, "abc");
    let errors = errors_for(&draft);
    assert_eq!(errors.fields(), vec![Field::Amount]);
}
