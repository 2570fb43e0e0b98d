//! DeepSeek completion API integration.

pub mod client;
pub mod messages;

pub use client::{DeepSeekClient, GenerateFailure};
