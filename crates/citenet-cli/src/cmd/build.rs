use std::io;
use std::path::PathBuf;

use anyhow::Result;
use citenet_core::Parser;
use citenet_graph::{prune, write_graphml, CocitationGraph, PruneOptions, PruneReport};
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use crate::discover;
use crate::output::{self, OutputMode};

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory containing savedrecs*.txt exports.
    #[arg(long, value_name = "DIR")]
    pub input: PathBuf,

    /// GraphML output path.
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// Remove co-citation edges with weight at or below this value.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub min_weight: u32,
}

/// Stable summary document, printed as JSON under `--json`.
#[derive(Debug, Serialize)]
struct BuildSummary {
    status: &'static str,
    files: usize,
    publications: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    prune: Option<PruneReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
}

impl BuildSummary {
    fn empty(status: &'static str, files: usize, publications: usize) -> Self {
        Self {
            status,
            files,
            publications,
            prune: None,
            output: None,
        }
    }
}

pub fn run_build(args: &BuildArgs, mode: OutputMode, quiet: bool) -> Result<()> {
    let files = discover::discover_inputs(&args.input)?;
    if files.is_empty() {
        info!(dir = %args.input.display(), "no savedrecs exports found");
        return emit(&BuildSummary::empty("no-input", 0, 0), mode, quiet);
    }

    let mut records = Vec::new();
    for path in &files {
        match Parser::parse_path(path) {
            Ok(parsed) => {
                info!(file = %path.display(), records = parsed.len(), "parsed export");
                records.extend(parsed);
            }
            Err(err) => warn!(file = %path.display(), %err, "skipping unreadable export"),
        }
    }
    if records.is_empty() {
        info!("exports contained no publications");
        return emit(&BuildSummary::empty("no-publications", files.len(), 0), mode, quiet);
    }

    let mut graph = CocitationGraph::from_records(&records);
    if graph.edge_count() == 0 {
        info!("no co-citation pairs in the corpus");
        return emit(
            &BuildSummary::empty("no-edges", files.len(), records.len()),
            mode,
            quiet,
        );
    }

    let report = prune(
        &mut graph,
        &PruneOptions {
            min_weight: args.min_weight,
        },
    );
    if graph.is_empty() {
        info!(min_weight = args.min_weight, "pruning removed every node");
        return emit(
            &BuildSummary {
                status: "pruned-empty",
                files: files.len(),
                publications: records.len(),
                prune: Some(report),
                output: None,
            },
            mode,
            quiet,
        );
    }

    write_graphml(&graph, &args.output)?;
    emit(
        &BuildSummary {
            status: "written",
            files: files.len(),
            publications: records.len(),
            prune: Some(report),
            output: Some(args.output.clone()),
        },
        mode,
        quiet,
    )
}

fn emit(summary: &BuildSummary, mode: OutputMode, quiet: bool) -> Result<()> {
    if mode.is_json() {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    let mut out = io::stdout().lock();
    output::kv(&mut out, "files", summary.files.to_string())?;
    output::kv(&mut out, "publications", summary.publications.to_string())?;
    if let Some(report) = &summary.prune {
        output::kv(
            &mut out,
            "nodes",
            format!(
                "{} -> {}",
                report.initial.nodes, report.after_giant_component.nodes
            ),
        )?;
        output::kv(
            &mut out,
            "edges",
            format!(
                "{} -> {}",
                report.initial.edges, report.after_giant_component.edges
            ),
        )?;
    }
    match &summary.output {
        Some(path) => output::kv(&mut out, "output", path.display().to_string())?,
        None => output::kv(&mut out, "output", format!("none ({})", summary.status))?,
    }
    Ok(())
}
