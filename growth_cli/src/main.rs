mod commands;
mod settings;
mod ui;

use clap::{Parser, Subcommand, ValueEnum};
use settings::Settings;
use std::path::PathBuf;
use tracing::{error, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Parser)]
#[command(name = "growth")]
#[command(about = "Health and usage metrics for the public stream catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    settings: Settings,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
    Markdown,
    Prometheus,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the catalog, sample every stream and publish both snapshots
    Run {
        /// Print snapshots to stdout instead of publishing them
        #[arg(long)]
        dry_run: bool,

        /// Also write the report to a JSON file
        #[arg(short, long)]
        output_json: Option<PathBuf>,

        /// Also write the report to a Markdown file
        #[arg(long)]
        output_markdown: Option<PathBuf>,

        /// Report format printed after the run
        #[arg(short, long, value_enum, default_value = "cli")]
        format: OutputFormat,
    },

    /// Fetch the product list only and print its counters
    Products,

    /// Check configuration and credentials without touching the network
    Validate,
}

fn init_tracing(cli: &Cli) {
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials usually live in a local .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    let result = match cli.command {
        Commands::Run {
            dry_run,
            output_json,
            output_markdown,
            format,
        } => {
            commands::run::execute(&cli.settings, dry_run, output_json, output_markdown, format)
                .await
        }

        Commands::Products => commands::products::execute(&cli.settings).await,

        Commands::Validate => commands::validate::execute(&cli.settings).await,
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }

    result
}
