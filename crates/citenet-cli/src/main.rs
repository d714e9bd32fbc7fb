#![forbid(unsafe_code)]

mod cmd;
mod discover;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "citenet: co-citation networks from Web of Science exports",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Build a pruned co-citation network",
        long_about = "Parse every savedrecs export in the input directory, build the \
                      co-citation graph, prune it, and write the result as GraphML.",
        after_help = "EXAMPLES:\n    # Build from a directory of savedrecs exports\n    citenet build --input data/ --output out/network.graphml\n\n    # Keep pairs co-cited only once\n    citenet build --input data/ --output out/network.graphml --min-weight 0\n\n    # Emit machine-readable output\n    citenet build --input data/ --output out/network.graphml --json"
    )]
    Build(cmd::build::BuildArgs),

    #[command(
        about = "Parse exports and report record counts",
        long_about = "Parse every savedrecs export in the input directory and report \
                      per-file publication and cited-reference counts without building a graph.",
        after_help = "EXAMPLES:\n    # Inspect a directory of exports\n    citenet parse --input data/\n\n    # Emit machine-readable output\n    citenet parse --input data/ --json"
    )]
    Parse(cmd::parse::ParseArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CITENET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "citenet=debug,info"
        } else {
            "citenet=info,warn"
        })
    });

    let format = env::var("CITENET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();

    match cli.command {
        Commands::Build(ref args) => cmd::build::run_build(args, output, cli.quiet),
        Commands::Parse(ref args) => cmd::parse::run_parse(args, output, cli.quiet),
    }
}
