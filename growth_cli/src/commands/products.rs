use crate::settings::Settings;
use crate::ui;
use anyhow::Result;
use growth_core::HttpCatalogApi;
use growth_runner::CatalogWalker;
use std::sync::Arc;

/// Prints the product counters without sampling or publishing anything.
pub async fn execute(settings: &Settings) -> Result<()> {
    let config = settings.load().await?;

    let api = Arc::new(HttpCatalogApi::new(&config.api.base_url)?);
    let walker = CatalogWalker::new(api, config.pacing);
    let catalog = walker.fetch_catalog().await?;

    ui::print_header("Public Products");
    for product in &catalog.products {
        println!("  {}", product.description());
    }

    println!();
    for (name, value) in catalog.metrics.counters() {
        println!("  {:<12} {}", name, value);
    }

    if catalog.products.is_empty() {
        ui::print_warning("Catalog has no public products");
    }

    Ok(())
}
