use crate::sampler::StreamSampler;
use futures::{stream, TryStreamExt};
use growth_core::{DynCatalogApi, GrowthError, Product, Result, Stream};
use growth_metrics::{ProductMetrics, StreamAggregator, StreamMetrics};
use std::time::Duration;
use tracing::{info, warn};

/// Products of one run plus the counts derived from their static fields.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub metrics: ProductMetrics,
}

pub struct CatalogWalker {
    api: DynCatalogApi,
    pacing: Duration,
    max_concurrent_products: Option<usize>,
}

impl CatalogWalker {
    pub fn new(api: DynCatalogApi, pacing: Duration) -> Self {
        Self {
            api,
            pacing,
            max_concurrent_products: None,
        }
    }

    pub fn with_max_concurrent_products(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent_products = limit;
        self
    }

    pub async fn fetch_catalog(&self) -> Result<Catalog> {
        let products = self.api.products().await?;
        let metrics = ProductMetrics::from_products(&products);

        info!(
            "Fetched {} public products ({} free, {} data unions)",
            metrics.total, metrics.is_free, metrics.is_data_union
        );

        Ok(Catalog { products, metrics })
    }

    pub async fn fetch_streams_for(&self, product: &Product) -> Result<Vec<Stream>> {
        self.api.streams(product).await
    }

    /// Runs one branch per product concurrently. The first failure drops
    /// every other branch and the partially filled aggregator with them.
    pub async fn sample_streams(&self, products: &[Product]) -> Result<StreamMetrics> {
        let aggregator = StreamAggregator::new();
        let sampler = StreamSampler::new(self.api.as_ref(), &aggregator, self.pacing);
        let sampler = &sampler;

        let result = stream::iter(products.iter().map(Ok::<_, GrowthError>))
            .try_for_each_concurrent(self.max_concurrent_products, |product| async move {
                let streams = self.fetch_streams_for(product).await?;
                sampler.sample_product(product, &streams).await
            })
            .await;

        if let Err(e) = result {
            warn!(
                "Catalog walk aborted: {} (partial stream counts: {:?})",
                e,
                aggregator.peek()
            );
            return Err(e);
        }

        let metrics = aggregator.snapshot();
        info!(
            "Sampled {} streams ({} free, {} not free)",
            metrics.total, metrics.is_free, metrics.is_not_free
        );

        Ok(metrics)
    }

    pub async fn walk(&self) -> Result<(ProductMetrics, StreamMetrics)> {
        let catalog = self.fetch_catalog().await?;

        match self.sample_streams(&catalog.products).await {
            Ok(streams) => Ok((catalog.metrics, streams)),
            Err(e) => {
                warn!("Unpublished product counts: {:?}", catalog.metrics);
                Err(e)
            }
        }
    }
}
