//! Signalforge: AI-assisted trading signal generator.
//!
//! Fetches recent hourly OHLC history for a Bitcoin pair from Kraken,
//! summarizes it into a prompt, and asks a DeepSeek chat model for a
//! structured BUY/SELL/HOLD signal. The HTTP layer in [`core::http`]
//! exposes the pipeline; the decision logic lives in [`services`],
//! [`signals`], and [`pipeline`].

pub mod config;
pub mod core;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod signals;
