//! The form-state machine.
//!
//! [`SubmissionController`] owns the UI-visible form state and runs the
//! Idle → Submitting → Success/Failure flow around a [`Transport`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use stillwater::Validation;
use tracing::{debug, info, warn};

use crate::error::SubmitError;
use crate::field::Field;
use crate::record::{ApplicationDraft, ApplicationRecord};
use crate::schema::ApplicationSchema;

use super::config::SubmitConfig;
use super::transport::Transport;

/// Where the form is in its submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Editable; the next submit will validate.
    Idle,
    /// A request is in flight; further submits are ignored.
    Submitting,
    /// The endpoint accepted the application; the form resets after the
    /// configured delay.
    Success,
    /// The last request failed; the input is kept and submit is allowed.
    Failure,
}

/// A transient message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Confirmation(String),
    Error(String),
}

/// Why a submit call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// Another submission is still in flight.
    InFlight,
    /// The previous submission succeeded and the form has not reset yet.
    AwaitingReset,
}

/// The result of one [`SubmissionController::submit`] call.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The endpoint accepted this record.
    Accepted(ApplicationRecord),
    /// Validation failed; maps each failing field to its inline message.
    Invalid(IndexMap<Field, String>),
    /// The request was made and failed; the form keeps its input.
    Failed(SubmitError),
    /// No request was made.
    Ignored(IgnoredReason),
}

/// Everything a UI needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub draft: ApplicationDraft,
    pub state: SubmissionState,
    /// Inline error per field, as of the last submit attempt.
    pub field_errors: IndexMap<Field, String>,
    pub notice: Option<Notice>,
}

impl FormState {
    fn new() -> Self {
        Self {
            draft: ApplicationDraft::default(),
            state: SubmissionState::Idle,
            field_errors: IndexMap::new(),
            notice: None,
        }
    }
}

/// Runs validation and single-flight submission for one credit form.
///
/// Cloning is cheap and every clone drives the same form. Form state lives
/// behind a mutex that is never held across an await; the in-flight flag is a
/// separate atomic so a second `submit` can be rejected without waiting.
///
/// Requires a tokio runtime: the post-success reset runs as a spawned task.
pub struct SubmissionController<T> {
    form: Arc<Mutex<FormState>>,
    in_flight: Arc<AtomicBool>,
    schema: Arc<ApplicationSchema>,
    transport: Arc<T>,
    config: SubmitConfig,
}

impl<T> Clone for SubmissionController<T> {
    fn clone(&self) -> Self {
        Self {
            form: Arc::clone(&self.form),
            in_flight: Arc::clone(&self.in_flight),
            schema: Arc::clone(&self.schema),
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
        }
    }
}

#[cfg(feature = "http")]
impl SubmissionController<super::transport::HttpTransport> {
    /// Creates a controller that POSTs with reqwest.
    pub fn with_http(config: SubmitConfig) -> Result<Self, crate::error::ConfigError> {
        let transport = super::transport::HttpTransport::new(&config)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> SubmissionController<T> {
    /// Creates a controller with the standard application schema.
    pub fn new(config: SubmitConfig, transport: T) -> Self {
        Self::with_schema(config, transport, ApplicationSchema::new())
    }

    /// Creates a controller with a custom schema.
    pub fn with_schema(config: SubmitConfig, transport: T, schema: ApplicationSchema) -> Self {
        Self {
            form: Arc::new(Mutex::new(FormState::new())),
            in_flight: Arc::new(AtomicBool::new(false)),
            schema: Arc::new(schema),
            transport: Arc::new(transport),
            config,
        }
    }

    /// Replaces the raw input of `field`.
    ///
    /// Clears that field's inline error. Editing after a failed submission
    /// returns the form to `Idle`.
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        let mut form = self.form.lock();
        form.draft.set(field, value);
        form.field_errors.shift_remove(&field);
        if form.state == SubmissionState::Failure {
            form.state = SubmissionState::Idle;
        }
    }

    /// Returns a copy of the current form state.
    pub fn snapshot(&self) -> FormState {
        self.form.lock().clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.form.lock().state
    }

    pub fn draft(&self) -> ApplicationDraft {
        self.form.lock().draft.clone()
    }

    /// True while a request is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn dismiss_notice(&self) {
        self.form.lock().notice = None;
    }

    /// Validates the draft and, if it passes, sends it once.
    ///
    /// - While a request is in flight, or while a success is waiting for its
    ///   reset, this is a no-op.
    /// - A draft that fails validation records inline errors and sends
    ///   nothing.
    /// - On acceptance the form shows a confirmation and, after the
    ///   configured delay, resets to an empty `Idle` form.
    /// - On failure the form keeps its input, shows an error notice, and can
    ///   be submitted again straight away.
    /// - Dropping the future before it completes returns the form to `Idle`
    ///   with its input kept.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("submit ignored: request already in flight");
            return SubmitOutcome::Ignored(IgnoredReason::InFlight);
        };

        let record = {
            let mut form = self.form.lock();
            if form.state == SubmissionState::Success {
                debug!("submit ignored: awaiting reset after success");
                return SubmitOutcome::Ignored(IgnoredReason::AwaitingReset);
            }

            match self.schema.validate(&form.draft) {
                Validation::Failure(errors) => {
                    let messages = errors.field_messages();
                    let fields: Vec<&str> = messages.keys().map(|f| f.key()).collect();
                    debug!(?fields, "application failed validation");
                    form.state = SubmissionState::Idle;
                    form.field_errors = messages.clone();
                    return SubmitOutcome::Invalid(messages);
                }
                Validation::Success(record) => {
                    form.draft.set(Field::TaxId, record.tax_id.clone());
                    form.state = SubmissionState::Submitting;
                    form.field_errors.clear();
                    form.notice = None;
                    record
                }
            }
        };

        let _pending = PendingSubmission(&self.form);
        info!("submitting credit application");
        let result = self.transport.send(&record).await;

        let mut form = self.form.lock();
        match result {
            Ok(()) => {
                info!("credit application accepted");
                form.state = SubmissionState::Success;
                form.notice = Some(Notice::Confirmation(
                    "Your application has been submitted.".to_string(),
                ));
                self.schedule_reset();
                SubmitOutcome::Accepted(record)
            }
            Err(err) => {
                warn!(status = ?err.status(), error = %err, "credit application failed");
                form.state = SubmissionState::Failure;
                form.notice = Some(Notice::Error(format!(
                    "We could not submit your application ({err}). Please try again."
                )));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Clears the form once the reset delay has passed.
    ///
    /// Only one success can be pending at a time: leaving `Success` requires
    /// this reset, so the task never clears a later submission.
    fn schedule_reset(&self) {
        let form = Arc::clone(&self.form);
        let delay = self.config.reset_delay();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut form = form.lock();
            if form.state != SubmissionState::Success {
                return;
            }
            debug!("resetting form after successful submission");
            form.draft.clear();
            form.field_errors.clear();
            form.notice = None;
            form.state = SubmissionState::Idle;
        });
    }
}

/// Holds the in-flight flag for the duration of one submit call.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Returns the form to `Idle` if a submit call is dropped before it records
/// an outcome.
struct PendingSubmission<'a>(&'a Mutex<FormState>);

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        let mut form = self.0.lock();
        if form.state == SubmissionState::Submitting {
            debug!("submit dropped before completion; form returned to idle");
            form.state = SubmissionState::Idle;
        }
    }
}
