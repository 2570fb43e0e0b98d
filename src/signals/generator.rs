//! Signal generation via the completion API.

use tracing::warn;

use crate::models::Signal;
use crate::services::deepseek::{DeepSeekClient, GenerateFailure};
use crate::signals::extract;

/// Builds the analyst prompt, submits it, and parses the response.
///
/// This stage never fails upward: every failure mode (missing credential,
/// transport error, non-success status, unparsable content) degrades to a
/// conservative HOLD signal whose reason names the cause. A degraded
/// opinion is acceptable; a failed request over one is not.
pub struct SignalRequester {
    client: DeepSeekClient,
}

impl SignalRequester {
    pub fn new(client: DeepSeekClient) -> Self {
        Self { client }
    }

    pub async fn request(&self, summary: &str, pair: &str) -> Signal {
        let prompt = build_prompt(summary, pair);

        let content = match self.client.complete(&prompt).await {
            Ok(content) => content,
            Err(failure) => {
                warn!(pair = %pair, error = %failure, "completion request failed, degrading to HOLD");
                return Signal::hold(failure.to_string());
            }
        };

        match extract::parse_signal(&content) {
            Some(signal) => signal,
            None => {
                warn!(pair = %pair, "completion content not parseable as a signal, degrading to HOLD");
                Signal::hold(GenerateFailure::Unparsable.to_string())
            }
        }
    }
}

/// Fixed instruction template embedding the formatted series.
pub fn build_prompt(summary: &str, pair: &str) -> String {
    format!(
        "You are a professional trading analyst. Generate a trading signal for {pair} based on the following OHLC data.\n\
         \n\
         {summary}\n\
         \n\
         Analyze this hourly data and provide a JSON response with:\n\
         1. \"signal\": either \"BUY\", \"SELL\", or \"HOLD\"\n\
         2. \"reason\": a brief technical analysis explanation (2-3 sentences)\n\
         3. \"confidence\": a number between 0.1 and 1.0 indicating confidence level\n\
         4. \"price_target\": optional target price if applicable\n\
         5. \"stop_loss\": optional stop loss price if applicable\n\
         \n\
         Consider trends, support/resistance levels, volume patterns, and recent price action.\n\
         \n\
         Respond ONLY with a valid JSON object. Do not include any other text."
    )
}
