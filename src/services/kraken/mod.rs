//! Kraken REST market data integration.

pub mod messages;
pub mod provider;

pub use provider::KrakenProvider;
