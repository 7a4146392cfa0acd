//! Command-line surface: argument parsing and the run loop around [`Splitter`].

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;

use crate::app::report::ConsoleReporter;
use crate::app::split::Splitter;
use crate::app::write::FileWriter;
use crate::domain::model::PathPolicy;
use crate::infra::config::Config;
use crate::infra::prompt;

/// Exit status when `--strict` is set and at least one fragment failed.
const EXIT_PARTIAL: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "fragsplit",
    author,
    version,
    about = "Split a concatenated bundle into files using /* including file '<path>' */ markers",
    long_about = None
)]
pub struct Cli {
    /// Bundle to split. Prompted for when omitted.
    pub input: Option<PathBuf>,

    /// Directory that relative marker paths are resolved against.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Treatment of absolute or `..` marker paths.
    #[arg(long, value_enum)]
    pub path_policy: Option<PathPolicy>,

    /// Report what would be written without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 2 when any fragment fails to write.
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print a shell completion script and exit.
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}

/// Effective settings after layering config and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub output_dir: PathBuf,
    pub path_policy: PathPolicy,
    pub dry_run: bool,
    pub strict: bool,
}

impl RunSettings {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            output_dir: cli
                .output_dir
                .clone()
                .unwrap_or_else(|| config.output.dir()),
            path_policy: cli
                .path_policy
                .unwrap_or_else(|| config.output.path_policy()),
            dry_run: cli.dry_run,
            strict: cli.strict || config.output.strict(),
        }
    }

    fn writer(&self) -> FileWriter {
        FileWriter::new(&self.output_dir)
            .with_policy(self.path_policy)
            .with_dry_run(self.dry_run)
    }
}

/// Entry point used by the binary.
pub fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "fragsplit", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load()?;
    let settings = RunSettings::resolve(&cli, &config);
    let input = match cli.input {
        Some(input) => input,
        None => prompt::prompt_input_path()?,
    };

    let stdout = io::stdout();
    let mut reporter = ConsoleReporter::new(stdout.lock());
    execute(&input, &settings, &mut reporter)
}

/// Split `input` with `settings`, streaming report lines to `reporter`.
pub fn execute<W: Write>(
    input: &Path,
    settings: &RunSettings,
    reporter: &mut ConsoleReporter<W>,
) -> Result<ExitCode> {
    tracing::debug!(?settings, input = %input.display(), "starting split");
    let splitter = Splitter::new(settings.writer());

    let mut report_error = None;
    let result = splitter.split_file_with(input, |outcome| {
        if let Err(err) = reporter.outcome(outcome)
            && report_error.is_none()
        {
            report_error = Some(err);
        }
    });
    if let Some(err) = report_error {
        return Err(err.into());
    }

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            reporter.input_error(&err)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    if report.no_directives() {
        reporter.no_directives()?;
    }
    reporter.completed()?;

    if settings.strict && report.has_failures() {
        return Ok(ExitCode::from(EXIT_PARTIAL));
    }
    Ok(ExitCode::SUCCESS)
}
