use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use liftgraph_core::cli::{analyze_stream, format_rep_line, read_csv_stream};
use liftgraph_core::{load_baselines, load_config, save_baselines, RepAnalyzer};
use log::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "LiftGraph rep analysis CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Segment a recorded accelerometer CSV (t,ax,ay,az) and score every rep
    Analyze(AnalyzeArgs),
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// CSV file with header t,ax,ay,az (m/s², seconds)
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Lift label, e.g. "back squat", "bench", "deadlift"
    #[arg(short, long, default_value = "bench")]
    lift: String,

    /// Sample rate in Hz (0 = infer from timestamps)
    #[arg(long, default_value_t = 50.0)]
    fs: f64,

    /// Pipeline config JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// ROM baseline store, loaded before and saved after the run
    #[arg(long, value_hint = ValueHint::FilePath)]
    baselines: Option<PathBuf>,

    /// Print one line per rep instead of JSON
    #[arg(long, action = ArgAction::SetTrue)]
    text: bool,

    /// Drop raw/normalized series from the JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    no_series: bool,

    /// Verbose logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = match &cli.command {
        Command::Analyze(args) if args.verbose => "debug",
        Command::Analyze(_) => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(p) => load_config(p).with_context(|| format!("loading config {}", p.display()))?,
        None => Default::default(),
    };
    if args.no_series {
        config.include_series = false;
    }

    let mut analyzer = RepAnalyzer::new(config).context("creating analyzer")?;
    if let Some(p) = &args.baselines {
        let store = load_baselines(p).with_context(|| format!("loading baselines {}", p.display()))?;
        analyzer = analyzer.with_baselines(store);
    }

    let stream = read_csv_stream(&args.input, args.fs, &args.lift)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let report = analyze_stream(&mut analyzer, &stream);
    info!("{} reps funnet i {}", report.reps.len(), args.input.display());

    if args.text {
        for rep in &report.reps {
            println!("{}", format_rep_line(rep));
        }
        println!("{}", report.summary.tip);
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(p) = &args.baselines {
        save_baselines(analyzer.baselines(), p).with_context(|| format!("saving baselines {}", p.display()))?;
    }
    Ok(())
}
