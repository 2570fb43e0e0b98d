//! Trading signal output types.

use serde::{Deserialize, Serialize};

/// Recommended trade direction.
///
/// Deserialization is strict: anything other than the three uppercase
/// variants is rejected, so a malformed model response degrades to the
/// HOLD fallback instead of passing through unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
    Hold,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Buy => "BUY",
            SignalDirection::Sell => "SELL",
            SignalDirection::Hold => "HOLD",
        }
    }
}

/// Normalized trading signal, the terminal artifact of a pipeline run.
///
/// Field names mirror the JSON contract the model is instructed to emit:
/// `signal`, `reason`, `confidence`, plus optional `price_target` and
/// `stop_loss`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "signal")]
    pub direction: SignalDirection,
    pub reason: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
}

impl Signal {
    /// Conservative fallback used whenever signal generation degrades.
    /// The reason names the failure so callers can see why they got a HOLD.
    pub fn hold(reason: impl Into<String>) -> Self {
        Self {
            direction: SignalDirection::Hold,
            reason: reason.into(),
            confidence: 0.1,
            price_target: None,
            stop_loss: None,
        }
    }
}
