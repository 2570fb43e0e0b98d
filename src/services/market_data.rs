//! Market data source interface and candidate-pair resolution.
//!
//! Kraken names Bitcoin pairs inconsistently (XBTUSD, XXBTZUSD, ...), so the
//! fetch layer probes an ordered candidate list until one yields candles.
//! Resolution is written against the [`OhlcSource`] trait rather than a
//! concrete client so it can be exercised with a scripted probe in tests.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::Candle;

/// Fetch-side failures. These propagate and fail the whole request; there
/// is no safe default for "we don't know the price".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An upstream-reported error other than an unknown pair. Signals a
    /// systemic problem (malformed request, outage notice), so the fetch
    /// aborts instead of trying further candidates.
    #[error("market data API error: {message}")]
    Upstream { message: String },

    #[error("no OHLC data available for any candidate pair (tried: {})", .tried.join(", "))]
    NoData { tried: Vec<String> },
}

/// A candle series together with the pair identifier the upstream actually
/// keyed it under, which may differ from the one requested.
#[derive(Debug, Clone)]
pub struct ResolvedSeries {
    pub pair: String,
    pub candles: Vec<Candle>,
}

/// A source of historical OHLC candles.
#[async_trait]
pub trait OhlcSource: Send + Sync {
    /// Probe one pair identifier.
    ///
    /// `Ok(None)` means the pair is unknown upstream or returned no rows;
    /// the caller should advance to the next candidate. `Err(Transport)` is
    /// likewise non-fatal per candidate. `Err(Upstream)` is fatal.
    async fn probe(&self, pair: &str) -> Result<Option<ResolvedSeries>, FetchError>;
}

/// Try candidates in order and return the first non-empty series.
///
/// Probes are sequential, never concurrent: first working candidate wins
/// and the upstream is not hit with speculative parallel requests. A
/// timed-out or rejected candidate advances to the next one; only a fatal
/// upstream error aborts early.
pub async fn resolve_first_available(
    source: &dyn OhlcSource,
    candidates: &[String],
) -> Result<ResolvedSeries, FetchError> {
    for pair in candidates {
        debug!(pair = %pair, "probing candidate pair");
        match source.probe(pair).await {
            Ok(Some(series)) if !series.candles.is_empty() => {
                info!(
                    requested = %pair,
                    resolved = %series.pair,
                    count = series.candles.len(),
                    "fetched OHLC data"
                );
                return Ok(series);
            }
            Ok(_) => {
                debug!(pair = %pair, "no data for candidate, trying next");
            }
            Err(err @ FetchError::Upstream { .. }) => return Err(err),
            Err(err) => {
                warn!(pair = %pair, error = %err, "candidate probe failed, trying next");
            }
        }
    }
    Err(FetchError::NoData {
        tried: candidates.to_vec(),
    })
}
