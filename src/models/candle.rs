use chrono::{DateTime, Utc};

/// One time-bucketed OHLCV sample.
///
/// Candles are immutable once parsed and ordered chronologically within a
/// series (strictly increasing timestamps, as delivered by the upstream).
/// Parsed by hand from the upstream's positional rows, so no serde here.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}
