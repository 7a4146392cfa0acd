use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let cli = fragsplit::cli::Cli::parse();
    fragsplit::init(cli.verbose);

    fragsplit::cli::run(cli)
}
