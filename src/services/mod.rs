//! External service integrations.

pub mod deepseek;
pub mod kraken;
pub mod market_data;
