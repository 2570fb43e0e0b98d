//! Kraken market data provider implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::messages::OhlcResponse;
use crate::models::Candle;
use crate::services::market_data::{FetchError, OhlcSource, ResolvedSeries};

/// REST client for Kraken's public OHLC endpoint.
///
/// Each probe is one bounded-timeout GET covering `[now - window, now]` at
/// the configured interval. The connection is released on every exit path;
/// nothing is held across probes.
pub struct KrakenProvider {
    client: Client,
    base_url: String,
    interval_minutes: u32,
    window: chrono::Duration,
}

impl KrakenProvider {
    pub fn new(
        base_url: String,
        interval_minutes: u32,
        window: chrono::Duration,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            interval_minutes,
            window,
        })
    }
}

#[async_trait]
impl OhlcSource for KrakenProvider {
    async fn probe(&self, pair: &str) -> Result<Option<ResolvedSeries>, FetchError> {
        let since = (Utc::now() - self.window).timestamp();

        let response = self
            .client
            .get(format!("{}/0/public/OHLC", self.base_url))
            .query(&[
                ("pair", pair),
                ("interval", &self.interval_minutes.to_string()),
                ("since", &since.to_string()),
            ])
            .send()
            .await?;

        // A non-200 on one candidate is a naming/routing hiccup, not a
        // systemic failure: advance to the next candidate.
        if !response.status().is_success() {
            warn!(pair = %pair, status = %response.status(), "Kraken returned non-success status");
            return Ok(None);
        }

        let body: OhlcResponse = response.json().await?;

        if let Some(message) = body.error.first() {
            if message.contains("Unknown asset pair") {
                debug!(pair = %pair, "pair unknown upstream");
                return Ok(None);
            }
            return Err(FetchError::Upstream {
                message: message.clone(),
            });
        }

        let Some((resolved, rows)) = body.first_pair_entry() else {
            return Ok(None);
        };

        let candles: Vec<Candle> = rows.iter().filter_map(parse_row).collect();
        if candles.is_empty() {
            return Ok(None);
        }

        Ok(Some(ResolvedSeries {
            pair: resolved.to_string(),
            candles,
        }))
    }
}

/// Parse one `[ts, open, high, low, close, vwap, volume, count]` row.
/// Kraken delivers prices as strings; numbers are accepted too. Malformed
/// rows are dropped.
fn parse_row(row: &Value) -> Option<Candle> {
    let row = row.as_array()?;
    let timestamp = DateTime::from_timestamp(coerce_f64(row.first()?)? as i64, 0)?;
    Some(Candle::new(
        coerce_f64(row.get(1)?)?,
        coerce_f64(row.get(2)?)?,
        coerce_f64(row.get(3)?)?,
        coerce_f64(row.get(4)?)?,
        coerce_f64(row.get(6)?)?,
        timestamp,
    ))
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
