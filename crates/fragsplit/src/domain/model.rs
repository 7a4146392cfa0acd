//! Domain models for directives, fragments, and split outcomes.

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::errors::SplitError;

/// A marker occurrence in the bundle.
///
/// `start_offset` is where the marker begins and `end_offset` is just past the marker, including
/// the trailing line it absorbs. Both are byte offsets into the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub path: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Trimmed text destined for a single output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub path: &'a str,
    pub contents: &'a str,
}

/// How marker paths that leave the output root are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum PathPolicy {
    /// Write every path as given, warning about absolute or `..` paths.
    #[default]
    PassThrough,
    /// Refuse absolute or `..` paths as a per-fragment failure.
    Reject,
}

impl PathPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathPolicy::PassThrough => "pass-through",
            PathPolicy::Reject => "reject",
        }
    }
}

impl FromStr for PathPolicy {
    type Err = PathPolicyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pass-through" | "passthrough" | "allow" => Ok(PathPolicy::PassThrough),
            "reject" | "deny" => Ok(PathPolicy::Reject),
            other => Err(PathPolicyParseError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Error returned when parsing a [`PathPolicy`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum PathPolicyParseError {
    #[error("unknown path policy '{0}'")]
    UnknownPolicy(String),
}

/// Result of handling one directive.
#[derive(Debug)]
pub enum WriteOutcome {
    Written { path: String, bytes: usize },
    Planned { path: String, bytes: usize },
    Failed { path: String, error: SplitError },
}

impl WriteOutcome {
    /// Marker path the outcome refers to.
    pub fn path(&self) -> &str {
        match self {
            WriteOutcome::Written { path, .. }
            | WriteOutcome::Planned { path, .. }
            | WriteOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, WriteOutcome::Failed { .. })
    }
}

/// Ordered outcomes of one split run. Empty when the bundle had no markers.
#[derive(Debug, Default)]
pub struct SplitReport {
    pub outcomes: Vec<WriteOutcome>,
}

impl SplitReport {
    /// True when the input contained no markers at all.
    pub fn no_directives(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, WriteOutcome::Written { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_failure()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(WriteOutcome::is_failure)
    }
}
