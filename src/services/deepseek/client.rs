//! DeepSeek chat completion client.

use reqwest::Client;
use thiserror::Error;

use super::messages::{ChatMessage, ChatRequest, ChatResponse};

/// Generate-side failures. These never propagate out of the signal
/// generator; their Display strings become the `reason` of the fallback
/// HOLD signal.
#[derive(Debug, Error)]
pub enum GenerateFailure {
    #[error("API key not configured")]
    MissingCredential,

    #[error("API connection error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {0}")]
    UpstreamStatus(u16),

    #[error("Completion response contained no choices")]
    EmptyCompletion,

    #[error("Failed to parse AI response")]
    Unparsable,
}

/// Single-turn completion client with bearer auth and a bounded timeout.
///
/// Temperature is fixed low to favor deterministic output; `max_tokens`
/// caps the response so a rambling model cannot blow up the parse stage.
pub struct DeepSeekClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

const TEMPERATURE: f64 = 0.1;
const MAX_TOKENS: u32 = 500;

impl DeepSeekClient {
    pub fn new(
        base_url: String,
        model: String,
        api_key: Option<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            model,
            api_key,
        })
    }

    /// Submit one user prompt and return the raw text content of the first
    /// choice. The credential check happens before any network traffic.
    pub async fn complete(&self, prompt: &str) -> Result<String, GenerateFailure> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerateFailure::MissingCredential)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerateFailure::UpstreamStatus(response.status().as_u16()));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(GenerateFailure::EmptyCompletion)
    }
}
