//! Application layer: scanning, extraction, writing, and the orchestrating splitter.

pub mod extract;
pub mod report;
pub mod scan;
pub mod split;
pub mod write;
