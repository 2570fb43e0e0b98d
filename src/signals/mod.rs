//! Signal generation: series formatting, prompt construction, and
//! tolerant response parsing.

pub mod extract;
pub mod formatter;
pub mod generator;

pub use generator::SignalRequester;
