//! Infrastructure adapters for configuration, logging, and interactive input.

pub mod config;
pub mod logging;
pub mod prompt;
