use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use config::AppConfig;

mod command;
mod config;

#[derive(Parser)]
#[command(name = "docqa")]
#[command(about = "Chunk documents and grade retrieval candidates for document QA", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML configuration file (overrides DOCQA_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk a Markdown document into store-ready records
    Chunk(ChunkArgs),

    /// Show how every section of a document is classified
    Inspect(InspectArgs),

    /// Grade a list of scored candidates for one query
    Grade(GradeArgs),
}

#[derive(Args)]
struct ChunkArgs {
    /// Markdown document to chunk
    file: PathBuf,

    /// Document name used in chunk ids (defaults to the file stem)
    #[arg(long)]
    name: Option<String>,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Estimated token budget per embedding batch
    #[arg(long, default_value_t = docqa_chunker::DEFAULT_BATCH_TOKENS)]
    max_batch_tokens: usize,
}

#[derive(Args)]
struct InspectArgs {
    /// Markdown document to inspect
    file: PathBuf,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct GradeArgs {
    /// JSON array of {"score": f, "chunk": {...}}
    file: PathBuf,

    /// Override retrieval.primary_threshold
    #[arg(long)]
    primary: Option<f32>,

    /// Override retrieval.secondary_threshold
    #[arg(long)]
    secondary: Option<f32>,

    /// Override retrieval.max_context_chunks
    #[arg(long)]
    max_context: Option<usize>,

    /// Override retrieval.top_k
    #[arg(long)]
    top_k: Option<usize>,

    /// Print the rendered context (or the refusal message) instead of JSON
    #[arg(long)]
    context: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Chunk(args) => command::run_chunk(&args, &config),
        Commands::Inspect(args) => command::run_inspect(&args, &config),
        Commands::Grade(args) => command::run_grade(&args, &config),
    }
}
