//! HTTP answering service client

use super::types::{AnswerRequest, AnswerResponse};
use super::{AnswerError, AnswerService};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Posts each turn as JSON to a single endpoint
pub struct HttpAnswerService {
    client: Client,
    endpoint: String,
}

impl HttpAnswerService {
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialised.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AnswerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnswerError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, endpoint))
    }

    /// Use a preconfigured client
    #[must_use]
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn classify_transport(e: &reqwest::Error) -> AnswerError {
        if e.is_timeout() {
            AnswerError::timeout(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            AnswerError::network(format!("Connection failed: {e}"))
        } else {
            AnswerError::network(format!("Request failed: {e}"))
        }
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, request: &AnswerRequest) -> Result<AnswerResponse, AnswerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::classify_transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::classify_transport(&e))?;

        if !status.is_success() {
            return Err(AnswerError::status(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| AnswerError::decode(format!("Failed to parse response: {e} - body: {body}")))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
