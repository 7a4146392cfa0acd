//! Console reporting for split runs.

use std::io::{self, Write};

use crate::domain::errors::SplitError;
use crate::domain::model::WriteOutcome;

pub const NO_DIRECTIVES_MESSAGE: &str =
    "No 'including file' directives found in the input file.";
pub const COMPLETED_MESSAGE: &str = "File splitting process completed.";

/// Writes the user-facing lines of a run to any [`Write`] sink.
pub struct ConsoleReporter<W> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn outcome(&mut self, outcome: &WriteOutcome) -> io::Result<()> {
        match outcome {
            WriteOutcome::Written { path, .. } => writeln!(self.out, "Created file: '{path}'"),
            WriteOutcome::Planned { path, bytes } => {
                writeln!(self.out, "Would create file: '{path}' ({bytes} bytes)")
            }
            WriteOutcome::Failed { path, error } => {
                writeln!(self.out, "Error writing to file '{path}': {error}")
            }
        }
    }

    pub fn no_directives(&mut self) -> io::Result<()> {
        writeln!(self.out, "{NO_DIRECTIVES_MESSAGE}")
    }

    pub fn input_error(&mut self, error: &SplitError) -> io::Result<()> {
        writeln!(self.out, "Error: {error}")
    }

    pub fn completed(&mut self) -> io::Result<()> {
        writeln!(self.out, "{COMPLETED_MESSAGE}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
