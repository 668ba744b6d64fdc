//! Outbound delivery of validated applications.
//!
//! [`Transport`] is the seam between the controller and the network.
//! [`HttpTransport`] (feature `http`, on by default) POSTs the record as JSON
//! with reqwest.

use std::future::Future;

use crate::error::SubmitError;
use crate::record::ApplicationRecord;

/// Sends one validated application.
///
/// Implementations report acceptance as `Ok(())`. Any rejection or failure to
/// reach the endpoint is an error; the controller does not retry.
pub trait Transport: Send + Sync + 'static {
    fn send(
        &self,
        record: &ApplicationRecord,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send;
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use reqwest::Client;
    use tracing::{debug, warn};

    use super::Transport;
    use crate::error::{ConfigError, SubmitError};
    use crate::record::ApplicationRecord;
    use crate::submit::SubmitConfig;

    /// Error bodies beyond this many bytes are cut off.
    const MAX_ERROR_BODY_BYTES: usize = 4 * 1024;

    /// POSTs applications as JSON to a fixed endpoint.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: Client,
        endpoint: String,
    }

    impl HttpTransport {
        /// Builds a transport for the config's endpoint and timeout.
        pub fn new(config: &SubmitConfig) -> Result<Self, ConfigError> {
            let mut builder = Client::builder();
            if let Some(timeout) = config.timeout() {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| ConfigError::Client(Box::new(e)))?;

            Ok(Self::with_client(client, config.endpoint()))
        }

        /// Uses an existing client.
        pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
            Self {
                client,
                endpoint: endpoint.into(),
            }
        }

        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    impl Transport for HttpTransport {
        async fn send(&self, record: &ApplicationRecord) -> Result<(), SubmitError> {
            let response = self
                .client
                .post(&self.endpoint)
                .json(record)
                .send()
                .await
                .map_err(|e| {
                    if e.is_builder() {
                        return SubmitError::Encode(Box::new(e));
                    }
                    warn!(error = %e, "application request failed before a response");
                    SubmitError::Network(Box::new(e))
                })?;

            let status = response.status();
            if status.is_success() {
                debug!(status = status.as_u16(), "endpoint accepted application");
                return Ok(());
            }

            let body = read_error_body(response).await;
            warn!(status = status.as_u16(), "endpoint rejected application");
            Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn read_error_body(response: reqwest::Response) -> String {
        let Ok(bytes) = response.bytes().await else {
            return String::new();
        };
        if bytes.len() > MAX_ERROR_BODY_BYTES {
            let text = String::from_utf8_lossy(&bytes[..MAX_ERROR_BODY_BYTES]);
            return format!("{text}...(truncated)");
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
