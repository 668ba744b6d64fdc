//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use credit_intake::{
    ApplicationRecord, Field, SubmissionController, SubmitConfig, SubmitError, Transport,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

pub const RESET_DELAY: Duration = Duration::from_millis(3000);

/// Fills a controller with the reference application.
pub fn fill_reference<T: Transport>(form: &SubmissionController<T>) {
    form.set_field(Field::Amount, "1500.00");
    form.set_field(Field::Name, "John Doe");
    form.set_field(Field::TaxId, "ab123456c");
    form.set_field(Field::Nationality, "american");
    form.set_field(Field::Email, "john@x.com");
}

pub fn config() -> SubmitConfig {
    SubmitConfig::new("http://127.0.0.1:9/applications")
        .unwrap()
        .with_reset_delay(RESET_DELAY)
}

/// How a [`FakeTransport`] answers.
#[derive(Clone, Copy, Debug)]
pub enum Reply {
    Accept,
    Status(u16),
}

/// Records every record it is asked to send.
#[derive(Clone)]
pub struct FakeTransport {
    sent: Arc<Mutex<Vec<ApplicationRecord>>>,
    reply: Arc<Mutex<Reply>>,
    gate: Option<Arc<Notify>>,
}

impl FakeTransport {
    pub fn accepting() -> Self {
        Self::replying(Reply::Accept)
    }

    pub fn replying(reply: Reply) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new(reply)),
            gate: None,
        }
    }

    /// Each send waits for one `notify_one` on the returned handle.
    pub fn gated(reply: Reply) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut transport = Self::replying(reply);
        transport.gate = Some(Arc::clone(&gate));
        (transport, gate)
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock() = reply;
    }

    pub fn sent(&self) -> Vec<ApplicationRecord> {
        self.sent.lock().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().len()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, record: &ApplicationRecord) -> Result<(), SubmitError> {
        self.sent.lock().push(record.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let reply = *self.reply.lock();
        match reply {
            Reply::Accept => Ok(()),
            Reply::Status(status) => Err(SubmitError::Status {
                status,
                body: String::new(),
            }),
        }
    }
}
