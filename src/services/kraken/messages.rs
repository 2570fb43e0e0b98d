//! Kraken REST OHLC wire types.

use serde::Deserialize;
use serde_json::Value;

/// Envelope of `GET /0/public/OHLC`.
///
/// `result` maps the resolved pair identifier to an array of rows, plus a
/// non-array `last` pagination cursor. It is kept as raw JSON because the
/// pair key is not known ahead of time (Kraken may answer under an alias of
/// the requested identifier).
#[derive(Debug, Deserialize)]
pub struct OhlcResponse {
    #[serde(default)]
    pub error: Vec<String>,
    #[serde(default)]
    pub result: serde_json::Map<String, Value>,
}

impl OhlcResponse {
    /// First key in the result that carries a row array. Skips `last` and
    /// any other scalar entry.
    pub fn first_pair_entry(&self) -> Option<(&str, &[Value])> {
        self.result
            .iter()
            .find_map(|(key, value)| value.as_array().map(|rows| (key.as_str(), rows.as_slice())))
    }
}
