//! Core application primitives.

pub mod http;
