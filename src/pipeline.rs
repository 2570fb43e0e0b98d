//! Fetch-format-generate pipeline orchestration.

use std::sync::Arc;

use crate::models::Signal;
use crate::services::market_data::{resolve_first_available, FetchError, OhlcSource};
use crate::signals::{formatter, SignalRequester};

/// Outcome of one successful pipeline run. The HTTP layer re-shapes this
/// into the response envelope, so only the embedded signal is serialized.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub signal: Signal,
    pub pair_used: String,
    pub sample_count: usize,
}

/// Sequences fetch → format → generate for one request.
///
/// Fetch failures fail the run: absence of market data is fatal. The
/// generate stage degrades internally and never fails, so a run that got
/// data always produces a result.
pub struct PipelineOrchestrator {
    source: Arc<dyn OhlcSource>,
    requester: SignalRequester,
    candidates: Vec<String>,
}

impl PipelineOrchestrator {
    pub fn new(
        source: Arc<dyn OhlcSource>,
        requester: SignalRequester,
        candidates: Vec<String>,
    ) -> Self {
        Self {
            source,
            requester,
            candidates,
        }
    }

    /// Run the pipeline. An explicit pair bypasses the candidate list and
    /// is probed alone.
    pub async fn run(&self, explicit_pair: Option<&str>) -> Result<PipelineResult, FetchError> {
        let candidates: Vec<String> = match explicit_pair {
            Some(pair) => vec![pair.to_string()],
            None => self.candidates.clone(),
        };

        let resolved = resolve_first_available(self.source.as_ref(), &candidates).await?;

        let summary = formatter::format_series(&resolved.candles, &resolved.pair);
        let signal = self.requester.request(&summary, &resolved.pair).await;

        Ok(PipelineResult {
            signal,
            pair_used: resolved.pair,
            sample_count: resolved.candles.len(),
        })
    }
}
