use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use citenet_core::Parser;
use clap::Args;
use serde::Serialize;
use tracing::warn;

use crate::discover;
use crate::output::{self, OutputMode};

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Directory containing savedrecs*.txt exports.
    #[arg(long, value_name = "DIR")]
    pub input: PathBuf,
}

#[derive(Debug, Serialize)]
struct FileReport {
    file: PathBuf,
    records: usize,
    cited_refs: usize,
}

#[derive(Debug, Serialize)]
struct ParseSummary {
    files: Vec<FileReport>,
    publications: usize,
    cited_refs: usize,
}

pub fn run_parse(args: &ParseArgs, mode: OutputMode, quiet: bool) -> Result<()> {
    let paths = discover::discover_inputs(&args.input)?;

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match Parser::parse_path(&path) {
            Ok(records) => {
                let cited_refs = records.iter().map(|r| r.cited_refs().len()).sum();
                files.push(FileReport {
                    file: path,
                    records: records.len(),
                    cited_refs,
                });
            }
            Err(err) => warn!(file = %path.display(), %err, "skipping unreadable export"),
        }
    }

    let summary = ParseSummary {
        publications: files.iter().map(|f| f.records).sum(),
        cited_refs: files.iter().map(|f| f.cited_refs).sum(),
        files,
    };

    if mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    let mut out = io::stdout().lock();
    for report in &summary.files {
        writeln!(
            out,
            "{}: {} records, {} cited refs",
            report.file.display(),
            report.records,
            report.cited_refs
        )?;
    }
    output::kv(&mut out, "publications", summary.publications.to_string())?;
    output::kv(&mut out, "cited_refs", summary.cited_refs.to_string())?;
    Ok(())
}
