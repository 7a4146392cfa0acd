//! Interactive prompt for the input bundle path.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

const PROMPT: &str = "Enter the name of the input file";

/// Ask for the input path, using a line editor on a terminal and plain stdin otherwise.
pub fn prompt_input_path() -> Result<PathBuf> {
    let line = if io::stdin().is_terminal() {
        read_interactive()?
    } else {
        read_piped(io::stdin().lock())?
    };
    parse_answer(&line)
}

fn read_interactive() -> Result<String> {
    let mut editor = Reedline::create();
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(PROMPT.to_owned()),
        DefaultPromptSegment::Empty,
    );
    match editor
        .read_line(&prompt)
        .context("failed to read input file name")?
    {
        Signal::Success(line) => Ok(line),
        _ => bail!("no input file given"),
    }
}

fn read_piped(mut reader: impl BufRead) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{PROMPT}: ")?;
    stdout.flush()?;

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("failed to read input file name from stdin")?;
    Ok(line)
}

fn parse_answer(line: &str) -> Result<PathBuf> {
    let answer = line.trim_end_matches(['\r', '\n']);
    if answer.trim().is_empty() {
        bail!("no input file given");
    }
    Ok(PathBuf::from(answer))
}
