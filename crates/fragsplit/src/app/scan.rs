//! Marker discovery over concatenated bundles.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::model::Directive;

/// `/* including file '<path>' */`, plus the rest of that line and its newline when present.
static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/\*\s+including\s+file\s+'([^'\n]+)'\s+\*/(?:.*\n)?")
        .expect("marker pattern is a valid regex")
});

/// Finds inclusion markers and reports them in source order.
pub trait MarkerScanner {
    fn scan(&self, source: &str) -> Vec<Directive>;
}

/// Regex-backed scanner for the `including file` marker grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexScanner;

impl RegexScanner {
    pub fn new() -> Self {
        Self
    }
}

impl MarkerScanner for RegexScanner {
    fn scan(&self, source: &str) -> Vec<Directive> {
        MARKER_PATTERN
            .captures_iter(source)
            .filter_map(|caps| {
                let marker = caps.get(0)?;
                let path = caps.get(1)?;
                Some(Directive {
                    path: path.as_str().to_owned(),
                    start_offset: marker.start(),
                    end_offset: marker.end(),
                })
            })
            .collect()
    }
}
