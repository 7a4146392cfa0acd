//! Orchestrates scanning, extraction, and writing for one bundle.

use std::fs;
use std::io;
use std::path::Path;

use crate::app::extract::extract_fragments;
use crate::app::scan::{MarkerScanner, RegexScanner};
use crate::app::write::FileWriter;
use crate::domain::errors::SplitError;
use crate::domain::model::{SplitReport, WriteOutcome};

/// Splits a concatenated bundle back into its constituent files.
#[derive(Debug, Clone)]
pub struct Splitter<S = RegexScanner> {
    scanner: S,
    writer: FileWriter,
}

impl Splitter {
    /// Splitter using the regex marker grammar.
    pub fn new(writer: FileWriter) -> Self {
        Self::with_scanner(RegexScanner::new(), writer)
    }
}

impl<S: MarkerScanner> Splitter<S> {
    pub fn with_scanner(scanner: S, writer: FileWriter) -> Self {
        Self { scanner, writer }
    }

    /// Load `input` and split it. Only a missing or unreadable input is an error; per-fragment
    /// failures are recorded in the report.
    pub fn split_file(&self, input: &Path) -> Result<SplitReport, SplitError> {
        self.split_file_with(input, |_| {})
    }

    /// Like [`Splitter::split_file`], calling `observer` as each outcome is produced.
    pub fn split_file_with<F>(&self, input: &Path, observer: F) -> Result<SplitReport, SplitError>
    where
        F: FnMut(&WriteOutcome),
    {
        let source = load_input(input)?;
        tracing::info!(input = %input.display(), bytes = source.len(), "loaded bundle");
        Ok(self.split_str_with(&source, observer))
    }

    pub fn split_str(&self, source: &str) -> SplitReport {
        self.split_str_with(source, |_| {})
    }

    pub fn split_str_with<F>(&self, source: &str, mut observer: F) -> SplitReport
    where
        F: FnMut(&WriteOutcome),
    {
        let directives = self.scanner.scan(source);
        if directives.is_empty() {
            tracing::info!("no inclusion markers found");
            return SplitReport::default();
        }
        tracing::debug!(count = directives.len(), "located inclusion markers");

        let outcomes = extract_fragments(source, &directives)
            .iter()
            .map(|fragment| {
                let outcome = self.writer.write(fragment);
                observer(&outcome);
                outcome
            })
            .collect();

        let report = SplitReport { outcomes };
        tracing::info!(
            written = report.written(),
            failed = report.failed(),
            "split finished"
        );
        report
    }
}

/// Read the whole bundle as UTF-8.
pub fn load_input(path: &Path) -> Result<String, SplitError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => SplitError::InputNotFound(path.to_path_buf()),
        _ => SplitError::InputRead {
            path: path.to_path_buf(),
            source,
        },
    })
}
