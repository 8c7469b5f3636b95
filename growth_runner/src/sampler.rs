use growth_core::{classify, CatalogApi, Product, Result, Sample, Stream};
use growth_metrics::StreamAggregator;
use std::time::Duration;
use tracing::debug;

/// Probes the streams of one product, one at a time.
pub struct StreamSampler<'a> {
    api: &'a dyn CatalogApi,
    aggregator: &'a StreamAggregator,
    pacing: Duration,
}

impl<'a> StreamSampler<'a> {
    pub fn new(api: &'a dyn CatalogApi, aggregator: &'a StreamAggregator, pacing: Duration) -> Self {
        Self {
            api,
            aggregator,
            pacing,
        }
    }

    pub async fn sample_stream(&self, stream: &Stream) -> Result<Sample> {
        self.api.last_message(stream).await
    }

    /// Streams are probed in list order with the pacing wait before each
    /// probe; each sample is recorded before the next probe starts.
    pub async fn sample_product(&self, product: &Product, streams: &[Stream]) -> Result<()> {
        for stream in streams {
            tokio::time::sleep(self.pacing).await;

            let sample = self.sample_stream(stream).await?;
            let bucket = classify(&sample, stream.inactivity_threshold_hours);

            debug!(
                "Stream {} of product {}: {} -> {}",
                stream.id,
                product.id,
                sample.kind(),
                bucket.label()
            );

            self.aggregator.record(bucket);
        }

        debug!("Sampled {} streams of {}", streams.len(), product.description());
        Ok(())
    }
}
