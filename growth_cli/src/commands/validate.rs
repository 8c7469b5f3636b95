use crate::settings::Settings;
use crate::ui;
use anyhow::{anyhow, Result};

pub async fn execute(settings: &Settings) -> Result<()> {
    ui::print_header("Validating Configuration");

    let config = settings.load().await?;

    let checked = config
        .validate()
        .map_err(|e| anyhow!(e))
        .and_then(|_| Ok(config.sink.build()?))
        .and_then(|sink| Ok(sink.validate()?));

    if let Err(e) = checked {
        ui::print_error("Configuration is invalid!");
        println!("\nError: {:#}", e);
        return Err(e);
    }

    ui::print_success("Configuration is valid!");
    println!("\nDetails:");
    println!("  Catalog: {}", config.api.base_url);
    println!("  Products destination: {}", config.destinations.products);
    println!("  Streams destination: {}", config.destinations.streams);
    println!("  Sink: {}", config.sink.kind());
    println!("  Pacing: {}", humantime::format_duration(config.pacing));
    match config.max_concurrent_products {
        Some(limit) => println!("  Max concurrent products: {}", limit),
        None => println!("  Max concurrent products: unbounded"),
    }

    if config.pacing.is_zero() {
        ui::print_warning("Pacing is zero; every probe fires immediately");
    }

    Ok(())
}
