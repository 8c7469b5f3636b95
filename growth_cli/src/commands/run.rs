use crate::settings::Settings;
use crate::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use growth_metrics::exporters::{JsonExporter, MarkdownExporter, PrometheusExporter, TableExporter};
use growth_runner::{GrowthRunner, SinkConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub async fn execute(
    settings: &Settings,
    dry_run: bool,
    output_json: Option<PathBuf>,
    output_markdown: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = settings.load().await?;

    if dry_run {
        info!("Dry run: snapshots go to stdout");
        config.sink = SinkConfig::Stdout;
    }

    let runner = GrowthRunner::from_config(&config)?;
    let interactive = format == OutputFormat::Cli && !dry_run;

    if interactive {
        println!("{}", "=== Catalog Growth ===".bold().cyan());
        println!("Catalog: {}", config.api.base_url);
        println!("Sink: {}", config.sink.kind().green());
        println!("Products -> {}", config.destinations.products);
        println!("Streams  -> {}", config.destinations.streams);
    }

    let pb = if interactive {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
        );
        pb.set_message("Sampling streams...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = runner.run().await;

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    let report = result?;

    if let Some(path) = &output_json {
        JsonExporter::export(&report, path).await?;
        info!("Report written to {}", path.display());
    }

    if let Some(path) = &output_markdown {
        MarkdownExporter::export(&report, path).await?;
        info!("Markdown report written to {}", path.display());
    }

    // Dry runs already used stdout for the snapshots.
    if dry_run {
        return Ok(());
    }

    match format {
        OutputFormat::Cli => {
            println!("\n{}", "=== Published ===".bold().green());
            println!("Run: {}", report.run_id.to_string().cyan());
            println!("Duration: {:?}", report.duration());
            println!("{}", TableExporter::format(&report));
        }
        OutputFormat::Json => println!("{}", JsonExporter::to_string(&report)?),
        OutputFormat::Markdown => println!("{}", MarkdownExporter::format(&report)),
        OutputFormat::Prometheus => print!("{}", PrometheusExporter::format(&report)?),
    }

    Ok(())
}
