mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use distress_core::config::{DashboardConfig, MODEL_PATH_ENV};

use commands::parse::ParseArgs;
use commands::predict::{FlagArgs, PredictArgs};
use commands::ratios::RatioArgs;

/// Financial distress screening from financial statement ratios
#[derive(Parser)]
#[command(
    name = "distress",
    version,
    about = "Financial distress screening from financial statement ratios",
    long_about = "Computes liquidity and profitability ratios from raw financial statement \
                  figures (Indonesian number format), estimates the probability of financial \
                  distress with a pre-trained neural network, and explains the result with \
                  benchmark-based ratio commentary."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Model artifact (parameter dictionary or full model object, JSON)
    #[arg(long, global = true, env = MODEL_PATH_ENV)]
    model: Option<PathBuf>,

    /// Session context file carrying the last computed ratios between runs
    #[arg(long, global = true)]
    session: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an Indonesian-formatted number (1.234.567,50)
    Parse(ParseArgs),
    /// Compute CR, QR, Cash Ratio, ROA, ROE and NPM from raw statement figures
    Ratios(RatioArgs),
    /// Predict financial distress from the six ratios
    Predict(PredictArgs),
    /// Benchmark flags for the six ratios, without the model
    Flags(FlagArgs),
    /// Model summary and validation metrics
    About,
    /// How to use the dashboard
    Guide,
    /// Interactive dashboard session
    Dashboard,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config = DashboardConfig::default().with_overrides(cli.model, cli.session);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Parse(args) => commands::parse::run_parse(args),
        Commands::Ratios(args) => commands::ratios::run_ratios(args, &config),
        Commands::Predict(args) => commands::predict::run_predict(args, &config),
        Commands::Flags(args) => commands::predict::run_flags(args, &config),
        Commands::About => commands::info::run_about(),
        Commands::Guide => commands::info::run_guide(),
        Commands::Dashboard => match commands::dashboard::run_dashboard(&config) {
            Ok(()) => process::exit(0),
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("distress {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
