use anyhow::Context;
use clap::Parser;
use reelsim::{load_catalog, IndexConfig, IndexHandle, SimilarityStats, DEFAULT_TOP_N};
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Content-based movie recommendations
#[derive(Parser, Debug)]
#[command(name = "reelsim")]
#[command(about = "Recommend catalog items similar to a reference title", long_about = None)]
struct Args {
    /// Catalog file: a JSON array of records or JSON lines
    #[arg(short, long)]
    catalog: PathBuf,

    /// Reference title
    #[arg(short, long)]
    title: String,

    /// Number of neighbors to return
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Print raw similarity scores and their summary instead of tags
    #[arg(long)]
    scores: bool,

    /// Index configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort on the first malformed catalog record
    #[arg(long)]
    strict: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the JSON result
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting reelsim v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            IndexConfig::from_json(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => IndexConfig::default(),
    };
    if args.strict {
        config = config.strict(true);
    }

    let raw = load_catalog(&args.catalog)?;
    info!("Loaded {} records from {:?}", raw.len(), args.catalog);

    let handle = IndexHandle::build(raw, &config).context("failed to build index")?;
    let index = handle.snapshot();
    let report = index.report();
    if !report.excluded.is_empty() {
        warn!("{} records excluded from the index", report.excluded.len());
    }

    let output = if args.scores {
        let scores = index.similarity_scores(&args.title, args.top_n)?;
        let stats = SimilarityStats::compute(&scores);
        json!({ "title": args.title, "scores": scores, "stats": stats })
    } else {
        let recommendations = index.recommend(&args.title, args.top_n)?;
        json!({ "title": args.title, "recommendations": recommendations })
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
