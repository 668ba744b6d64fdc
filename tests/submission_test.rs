//! Integration tests for the submission controller state machine.

mod common;

use std::time::Duration;

use common::{config, fill_reference, FakeTransport, Reply, RESET_DELAY};
use credit_intake::{
    Field, IgnoredReason, Notice, SubmissionController, SubmissionState, SubmitOutcome,
};

#[tokio::test]
async fn test_reference_application_is_sent_once() {
    let transport = FakeTransport::accepting();
    let form = SubmissionController::new(config(), transport.clone());
    fill_reference(&form);

    let outcome = form.submit().await;

    let SubmitOutcome::Accepted(record) = outcome else {
        panic!("expected acceptance, got {outcome:?}");
    };
    assert_eq!(record.tax_id, "AB123456C");
    assert_eq!(transport.sent(), vec![record]);

    let snapshot = form.snapshot();
    assert_eq!(snapshot.state, SubmissionState::Success);
    assert!(matches!(snapshot.notice, Some(Notice::Confirmation(_))));
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_tax_id_is_uppercased_as_typed() {
    let form = SubmissionController::new(config(), FakeTransport::accepting());
    form.set_field(Field::TaxId, "ab123456c");
    assert_eq!(form.draft().get(Field::TaxId), "AB123456C");
}

#[tokio::test]
async fn test_submit_while_in_flight_is_a_no_op() {
    let (transport, gate) = FakeTransport::gated(Reply::Accept);
    let form = SubmissionController::new(config(), transport.clone());
    fill_reference(&form);

    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    while !form.is_submitting() {
        tokio::task::yield_now().await;
    }
    assert_eq!(form.state(), SubmissionState::Submitting);

    let second = form.submit().await;
    assert!(matches!(
        second,
        SubmitOutcome::Ignored(IgnoredReason::InFlight)
    ));
    assert_eq!(form.state(), SubmissionState::Submitting);

    gate.notify_one();
    let outcome = first.await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
    assert_eq!(transport.send_count(), 1);
}

#[tokio::test]
async fn test_invalid_draft_sends_nothing_and_shows_inline_errors() {
    let transport = FakeTransport::accepting();
    let form = SubmissionController::new(config(), transport.clone());
    fill_reference(&form);
    form.set_field(Field::Amount, "0");
    form.set_field(Field::Email, "john@");

    let SubmitOutcome::Invalid(errors) = form.submit().await else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![Field::Amount, Field::Email]);
    assert_eq!(transport.send_count(), 0);

    let snapshot = form.snapshot();
    assert_eq!(snapshot.state, SubmissionState::Idle);
    assert_eq!(snapshot.field_errors, errors);
    assert!(!form.is_submitting());

    // Editing a field clears only that field's inline error.
    form.set_field(Field::Amount, "1500.00");
    let snapshot = form.snapshot();
    assert!(!snapshot.field_errors.contains_key(&Field::Amount));
    assert!(snapshot.field_errors.contains_key(&Field::Email));
}

#[tokio::test]
async fn test_rejected_response_keeps_form_populated_and_resubmittable() {
    let transport = FakeTransport::replying(Reply::Status(503));
    let form = SubmissionController::new(config(), transport.clone());
    fill_reference(&form);
    let before = form.draft();

    let SubmitOutcome::Failed(err) = form.submit().await else {
        panic!("expected transport failure");
    };
    assert_eq!(err.status(), Some(503));

    let snapshot = form.snapshot();
    assert_eq!(snapshot.state, SubmissionState::Failure);
    assert_eq!(snapshot.draft, before);
    assert!(matches!(snapshot.notice, Some(Notice::Error(_))));
    assert!(!form.is_submitting());

    transport.set_reply(Reply::Accept);
    let outcome = form.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
    assert_eq!(transport.send_count(), 2);
    assert_eq!(form.state(), SubmissionState::Success);
}

#[tokio::test]
async fn test_editing_after_failure_returns_to_idle() {
    let form = SubmissionController::new(config(), FakeTransport::replying(Reply::Status(400)));
    fill_reference(&form);
    form.submit().await;
    assert_eq!(form.state(), SubmissionState::Failure);

    form.set_field(Field::Name, "Jane Doe");
    assert_eq!(form.state(), SubmissionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_form_resets_after_delay_on_success() {
    let transport = FakeTransport::accepting();
    let form = SubmissionController::new(config(), transport.clone());
    fill_reference(&form);

    assert!(matches!(form.submit().await, SubmitOutcome::Accepted(_)));

    // Still showing the confirmation just before the delay elapses.
    tokio::time::sleep(RESET_DELAY - Duration::from_millis(1)).await;
    let snapshot = form.snapshot();
    assert_eq!(snapshot.state, SubmissionState::Success);
    assert!(!snapshot.draft.is_blank());

    let ignored = form.submit().await;
    assert!(matches!(
        ignored,
        SubmitOutcome::Ignored(IgnoredReason::AwaitingReset)
    ));
    assert_eq!(transport.send_count(), 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let snapshot = form.snapshot();
    assert_eq!(snapshot.state, SubmissionState::Idle);
    assert!(snapshot.draft.is_blank());
    assert!(snapshot.notice.is_none());
    assert!(snapshot.field_errors.is_empty());
}

#[tokio::test]
async fn test_dismiss_notice() {
    let form = SubmissionController::new(config(), FakeTransport::replying(Reply::Status(500)));
    fill_reference(&form);
    form.submit().await;
    assert!(form.snapshot().notice.is_some());

    form.dismiss_notice();
    assert!(form.snapshot().notice.is_none());
    assert_eq!(form.state(), SubmissionState::Failure);
}

#[tokio::test]
async fn test_abandoned_submit_returns_form_to_idle() {
    let (transport, gate) = FakeTransport::gated(Reply::Accept);
    let form = SubmissionController::new(config(), transport.clone());
    fill_reference(&form);
    let before = form.draft();

    let abandoned = tokio::time::timeout(Duration::from_millis(20), form.submit()).await;
    assert!(abandoned.is_err());

    let snapshot = form.snapshot();
    assert_eq!(snapshot.state, SubmissionState::Idle);
    assert_eq!(snapshot.draft, before);
    assert!(!form.is_submitting());

    gate.notify_one();
    assert!(matches!(form.submit().await, SubmitOutcome::Accepted(_)));
    assert_eq!(transport.send_count(), 2);
}
