pub mod error;
pub mod types;
pub mod util;

pub use error::{AiError, Result};
pub use types::GenerationRequest;
pub use util::strip_code_fences;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use types::{InputMessage, ResponsesPayload, ResponsesRequest};

const OPENAI_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Single-shot text generation behind a trait so the engine can run against
/// mocks in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

pub struct OpenAiGenerator {
    api_key: String,
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
            base_url: OPENAI_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point the client at a different endpoint (test servers).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| AiError::Network(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!("{}/responses", self.base_url);

        let body = ResponsesRequest {
            model: self.model.clone(),
            input: vec![
                InputMessage {
                    role: "system",
                    content: request.system.clone(),
                },
                InputMessage {
                    role: "user",
                    content: request.user.clone(),
                },
            ],
            temperature: request.temperature,
        };

        debug!(model = %self.model, "OpenAI responses request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: ResponsesPayload = response.json().await?;
        let text = payload.output_text();

        if text.is_empty() {
            return Err(AiError::EmptyOutput);
        }

        Ok(text)
    }
}
