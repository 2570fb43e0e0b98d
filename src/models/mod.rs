//! Shared data models spanning the pipeline layers.

pub mod candle;
pub mod signal;

pub use candle::Candle;
pub use signal::{Signal, SignalDirection};
