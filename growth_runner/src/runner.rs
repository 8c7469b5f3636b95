use crate::{
    config::{Destinations, GrowthConfig},
    walker::CatalogWalker,
};
use growth_core::{
    DynCatalogApi, DynSink, GrowthError, HttpCatalogApi, Result, SnapshotPublisher,
};
use growth_metrics::{GrowthReport, ProductMetrics};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::info;

pub struct GrowthRunner {
    walker: CatalogWalker,
    publisher: SnapshotPublisher,
    destinations: Destinations,
}

impl GrowthRunner {
    pub fn new(api: DynCatalogApi, sink: DynSink, config: &GrowthConfig) -> Self {
        let walker = CatalogWalker::new(api, config.pacing)
            .with_max_concurrent_products(config.max_concurrent_products);

        Self {
            walker,
            publisher: SnapshotPublisher::new(sink),
            destinations: config.destinations.clone(),
        }
    }

    /// Builds the HTTP catalog client and the configured sink.
    pub fn from_config(config: &GrowthConfig) -> Result<Self> {
        config.validate().map_err(GrowthError::InvalidConfig)?;

        let api = Arc::new(HttpCatalogApi::new(&config.api.base_url)?);
        let sink = config.sink.build()?;

        Ok(Self::new(api, sink, config))
    }

    /// Walks the whole catalog, then publishes the product snapshot followed
    /// by the stream snapshot. Nothing is published unless the walk succeeds.
    pub async fn run(&self) -> Result<GrowthReport> {
        self.publisher.validate()?;

        let start = Instant::now();
        info!("Starting catalog walk");

        let (products, streams) = self.walker.walk().await?;

        self.publisher
            .publish(&self.destinations.products, &products)
            .await?;
        self.publisher
            .publish(&self.destinations.streams, &streams)
            .await?;

        let report = GrowthReport::new(products, streams, start.elapsed());
        info!(
            "Run {} completed in {:?} via {} sink",
            report.run_id,
            report.duration(),
            self.publisher.sink_name()
        );

        Ok(report)
    }

    /// Catalog-only pass; publishes nothing.
    pub async fn products(&self) -> Result<ProductMetrics> {
        Ok(self.walker.fetch_catalog().await?.metrics)
    }
}

pub async fn run_growth(config: &GrowthConfig) -> Result<GrowthReport> {
    let runner = GrowthRunner::from_config(config)?;
    runner.run().await
}
