//! Core domain types shared by the scanner, extractor, and writer.

pub mod errors;
pub mod model;
