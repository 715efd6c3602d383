/// CLI конвейера анализа голосовых данных

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use parkinsons_ml::{pipeline, AnalysisError, PipelineConfig};

#[derive(Parser)]
#[command(name = "parkinsons-ml")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cleaning, statistics and charts for the Parkinson's voice dataset", long_about = None)]
struct Cli {
    /// JSON file overriding the default configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, fit the regression, draw charts and write the report
    Run,
    /// Clean the raw data and save it
    Clean,
    /// Analyze previously cleaned data and write the report
    Analyze,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let summary = pipeline::run(&config)?;
            tracing::info!(
                "{} rows analyzed, {} charts written, accuracy {:.3}",
                summary.rows,
                summary.charts.len(),
                summary.regression.accuracy
            );
        }
        Commands::Clean => {
            pipeline::clean_data(&config)?;
        }
        Commands::Analyze => match pipeline::analyze(&config) {
            Ok(_) => {}
            Err(AnalysisError::NotFound(path)) => {
                tracing::error!(
                    "Cleaned data file '{}' not found. Run the cleaning step first.",
                    path.display()
                );
                std::process::exit(1);
            }
            Err(e) => return Err(e).context("Analysis failed"),
        },
    }

    Ok(())
}
