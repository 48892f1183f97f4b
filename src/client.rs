use crate::models::{ChatResponse, CompletionError, CompletionRequest, RemoteDetail};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, info, warn};

pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Where failure diagnostics go. The form prints them; tests collect them.
pub trait ErrorSink {
    fn report(&mut self, message: &str);
}

impl ErrorSink for Vec<String> {
    fn report(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

pub struct GroqClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GroqClient {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Sends one completion request and returns the assistant's reply.
    ///
    /// Failures are reported to `sink` and come back as `None`; nothing is
    /// retried.
    pub async fn request_solution(
        &self,
        description: &str,
        credential: &str,
        model_id: &str,
        sink: &mut dyn ErrorSink,
    ) -> Option<String> {
        match self.try_complete(description, credential, model_id).await {
            Ok(content) => {
                info!(model = model_id, chars = content.len(), "completion received");
                Some(content)
            }
            Err(err) => {
                warn!(model = model_id, error = %err, "completion failed");
                sink.report(&err.to_string());
                None
            }
        }
    }

    pub async fn try_complete(
        &self,
        description: &str,
        credential: &str,
        model_id: &str,
    ) -> Result<String, CompletionError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", credential))
                .map_err(|e| CompletionError::Transport(format!("invalid authorization header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let request = CompletionRequest::for_error(description, model_id);
        debug!(endpoint = %self.endpoint, model = model_id, "sending completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Remote {
                status: status.as_u16(),
                detail: RemoteDetail::from_body(&body),
            });
        }

        // A null content is an empty answer, not a failure; the caller decides
        // how to present it.
        let parsed = response.json::<ChatResponse>().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| CompletionError::Transport("response contained no choices".to_string()))
    }
}
