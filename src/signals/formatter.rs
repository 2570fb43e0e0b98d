//! Candle series formatting for the model prompt.

use crate::models::Candle;

/// At most this many trailing candles are rendered, bounding the prompt
/// size no matter how wide the fetched window was.
pub const PROMPT_CANDLE_LIMIT: usize = 24;

/// Returned for an empty series. Formatting is total: it never fails and
/// never yields an empty string.
pub const NO_DATA_SENTINEL: &str = "No OHLC data available";

/// Render the most recent candles as fixed-precision lines plus a summary
/// line with the current price and percent change over the window.
///
/// Pure and deterministic; timestamps are rendered in UTC.
pub fn format_series(series: &[Candle], pair: &str) -> String {
    if series.is_empty() {
        return NO_DATA_SENTINEL.to_string();
    }

    let recent = &series[series.len().saturating_sub(PROMPT_CANDLE_LIMIT)..];

    let mut out = format!(
        "Recent OHLC data for {} (timestamp, open, high, low, close, volume):\n",
        pair
    );
    for candle in recent {
        out.push_str(&format!(
            "{}: {:.2}, {:.2}, {:.2}, {:.2}, {:.2}\n",
            candle.timestamp.format("%Y-%m-%d %H:%M"),
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume,
        ));
    }

    let first_close = recent[0].close;
    let last_close = recent[recent.len() - 1].close;
    // Percent change is defined as 0 when the window opens at 0.
    let change = if first_close != 0.0 {
        (last_close - first_close) / first_close * 100.0
    } else {
        0.0
    };
    out.push_str(&format!(
        "\nSummary: Current price: {:.2}, 24h change: {:.2}%",
        last_close, change
    ));

    out
}
