//! `ipshard` binary entry point.

use anyhow::Result;
use clap::Parser;

use ipshard_cli::{init_logging, render_summary, run, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet)?;

    // Failures surface through anyhow on stderr with a non-zero exit.
    let summary = run(&args)?;
    eprintln!("{}", render_summary(&summary, args.summary_json)?);

    Ok(())
}
