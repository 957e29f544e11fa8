//! One shard run, from arguments to emitted results.

use crate::cli::Args;
use crate::config::load_config;
use anyhow::{Context, Result};
use ipshard_partition::{
    prepare_output_path, EntrySource, FileSink, PartitionEngine, PartitionResult,
    PartitionSummary, ResultSink, SourceSpec, StdoutSink,
};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Run shard selection and write the selected items.
///
/// The results path is validated and its directories created before any
/// entry is read. The file itself is only opened once selection succeeds.
pub fn run(args: &Args) -> Result<PartitionSummary> {
    let output = match &args.output {
        Some(path) => Some(
            prepare_output_path(path)
                .with_context(|| format!("cannot prepare results file {}", path.display()))?,
        ),
        None => None,
    };

    let started = Instant::now();
    let result = select(args)?;

    let mut sink = open_sink(output.as_deref())?;
    emit(args, &result, started, sink.as_mut())
}

/// Same as [`run`], writing into a caller-supplied sink.
pub fn run_with_sink(args: &Args, sink: &mut dyn ResultSink) -> Result<PartitionSummary> {
    let started = Instant::now();
    let result = select(args)?;
    emit(args, &result, started, sink)
}

fn select(args: &Args) -> Result<PartitionResult> {
    let config = load_config(args).context("invalid configuration")?;
    let engine = PartitionEngine::new(config)?;

    let input = SourceSpec::resolve(&args.input);
    let exclude = args.exclude.as_deref().map(SourceSpec::resolve_exclude);
    info!("Selecting shard {} (seed {})", args.shard, args.seed);

    Ok(engine.run_sources(
        &input,
        exclude.as_ref().map(|spec| spec as &dyn EntrySource),
        args.shard,
        args.seed,
    )?)
}

fn emit(
    args: &Args,
    result: &PartitionResult,
    started: Instant,
    sink: &mut dyn ResultSink,
) -> Result<PartitionSummary> {
    sink.emit_all(&result.selected)
        .context("failed to write results")?;
    Ok(PartitionSummary::new(args.shard, result, started.elapsed()))
}

fn open_sink(output: Option<&Path>) -> Result<Box<dyn ResultSink>> {
    match output {
        Some(path) => {
            let sink = FileSink::create(path)
                .with_context(|| format!("cannot open results file {}", path.display()))?;
            info!("Writing results to {}", sink.path().display());
            Ok(Box::new(sink))
        }
        None => Ok(Box::new(StdoutSink::new())),
    }
}

/// Summary line for the diagnostic stream.
pub fn render_summary(summary: &PartitionSummary, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(summary)?)
    } else {
        Ok(summary.to_string())
    }
}
