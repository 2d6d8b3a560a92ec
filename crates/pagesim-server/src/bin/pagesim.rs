//! pagesim binary: HTTP server and offline runner.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pagesim_common::{Algorithm, EngineConfig, PageNumber, PagesimConfig};
use pagesim_engine::PagingEngine;
use pagesim_server::report::{format_report, format_trace, RunStats};
use pagesim_server::telemetry::init_tracing;
use rand::Rng;
use tracing::info;

#[derive(Parser)]
#[command(name = "pagesim")]
#[command(about = "Paging simulator with FIFO, LRU and OPTIMAL replacement")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the JSON API
    Serve(ServeArgs),
    /// Run a reference string offline and print statistics
    Run(RunArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Server host address
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(long)]
    port: Option<u16>,

    /// Number of physical frames
    #[arg(long)]
    frames: Option<usize>,

    /// Number of virtual pages
    #[arg(long)]
    pages: Option<u32>,

    /// Initial replacement algorithm (fifo, lru, optimal)
    #[arg(long)]
    algorithm: Option<Algorithm>,

    /// Comma-separated future page requests, required by optimal
    #[arg(long, value_delimiter = ',')]
    reference_string: Option<Vec<PageNumber>>,

    /// Reject concurrent requests instead of queueing them
    #[arg(long)]
    reject_when_busy: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Args)]
struct RunArgs {
    /// Replacement algorithm (fifo, lru, optimal)
    #[arg(long, default_value = "fifo")]
    algorithm: Algorithm,

    /// Number of physical frames
    #[arg(long, default_value = "3")]
    frames: usize,

    /// Number of virtual pages
    #[arg(long, default_value = "16")]
    pages: u32,

    /// Generate a random reference string of this length instead
    #[arg(long)]
    random: Option<usize>,

    /// Print one line per access
    #[arg(long)]
    trace: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Page reference string
    sequence: Vec<PageNumber>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Run(args) => run(args),
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = PagesimConfig::from_env().context("failed to load configuration")?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(frames) = args.frames {
        config.engine.frame_count = frames;
    }
    if let Some(pages) = args.pages {
        config.engine.page_table_size = pages;
    }
    if let Some(algorithm) = args.algorithm {
        config.engine.algorithm = algorithm;
    }
    if let Some(refs) = args.reference_string {
        config.engine.reference_string = Some(refs);
    }
    if args.reject_when_busy {
        config.server.reject_when_busy = true;
    }
    if let Some(level) = args.log_level {
        config.server.log_level = level;
    }

    init_tracing(&config.server.log_level)?;
    info!("Starting pagesim server...");
    pagesim_server::serve(config).await
}

fn run(args: RunArgs) -> Result<()> {
    init_tracing(&args.log_level)?;

    let sequence = match args.random {
        Some(len) => random_sequence(len, args.pages),
        None => args.sequence,
    };
    if sequence.is_empty() {
        bail!("empty reference string: pass page numbers or --random <LEN>");
    }

    let mut config = EngineConfig::new(args.pages, args.frames, args.algorithm);
    if args.algorithm.requires_reference_string() {
        config = config.with_reference_string(sequence.clone());
    }

    let mut engine = PagingEngine::new(config)?;
    let summary = engine.simulate(&sequence)?;

    if args.trace {
        print!("{}", format_trace(&summary.records));
        println!();
    }
    print!("{}", format_report(&RunStats::from_state(&summary.final_state)));
    Ok(())
}

fn random_sequence(len: usize, pages: u32) -> Vec<PageNumber> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random_range(..pages.max(1))).collect()
}
