//! Answering service abstraction
//!
//! The backend that turns a question about the article into an answer.

mod error;
mod http;
mod types;

pub use error::{AnswerError, AnswerErrorKind};
pub use http::HttpAnswerService;
pub use types::{AnswerRequest, AnswerResponse};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for answering backends
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Ask one question; a single attempt, no retries
    async fn ask(&self, request: &AnswerRequest) -> Result<AnswerResponse, AnswerError>;

    /// Where requests go, for logs
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: AnswerService + ?Sized> AnswerService for Arc<T> {
    async fn ask(&self, request: &AnswerRequest) -> Result<AnswerResponse, AnswerError> {
        (**self).ask(request).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for answer services
pub struct LoggingService {
    inner: Arc<dyn AnswerService>,
    endpoint: String,
}

impl LoggingService {
    #[must_use]
    pub fn new(inner: Arc<dyn AnswerService>) -> Self {
        let endpoint = inner.endpoint().to_string();
        Self { inner, endpoint }
    }
}

#[async_trait]
impl AnswerService for LoggingService {
    async fn ask(&self, request: &AnswerRequest) -> Result<AnswerResponse, AnswerError> {
        let start = std::time::Instant::now();
        let result = self.inner.ask(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    endpoint = %self.endpoint,
                    duration_ms = %duration.as_millis(),
                    mode = request.mode.as_deref().unwrap_or("direct"),
                    has_answer = response.answer.as_deref().is_some_and(|a| !a.is_empty()),
                    "Answer request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.endpoint,
                    duration_ms = %duration.as_millis(),
                    kind = %e.kind,
                    error = %e.message,
                    "Answer request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
