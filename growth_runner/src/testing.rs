use growth_core::{async_trait, CatalogApi, GrowthError, Product, Result, Sample, Stream};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// In-memory catalog with optional per-stream latency.
#[derive(Default)]
pub(crate) struct CannedApi {
    products: Vec<Product>,
    streams: HashMap<String, Vec<Stream>>,
    failing_products: Vec<String>,
    samples: HashMap<String, std::result::Result<Sample, String>>,
    latency: HashMap<String, Duration>,
    probes: Mutex<Vec<(String, Instant)>>,
    fetches: Mutex<usize>,
}

impl CannedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn product(mut self, product: Product) -> Self {
        self.streams.entry(product.id.clone()).or_default();
        self.products.push(product);
        self
    }

    pub(crate) fn stream(mut self, product_id: &str, stream: Stream, sample: Sample) -> Self {
        self.samples.insert(stream.id.clone(), Ok(sample));
        self.streams
            .entry(product_id.to_string())
            .or_default()
            .push(stream);
        self
    }

    pub(crate) fn failing_stream(mut self, product_id: &str, stream: Stream) -> Self {
        self.samples
            .insert(stream.id.clone(), Err(format!("connection reset on {}", stream.id)));
        self.streams
            .entry(product_id.to_string())
            .or_default()
            .push(stream);
        self
    }

    /// Listed in the catalog, but its stream list cannot be fetched.
    pub(crate) fn failing_product(mut self, product: Product) -> Self {
        self.failing_products.push(product.id.clone());
        self.products.push(product);
        self
    }

    pub(crate) fn latency(mut self, stream_id: &str, latency: Duration) -> Self {
        self.latency.insert(stream_id.to_string(), latency);
        self
    }

    pub(crate) fn probes(&self) -> Vec<(String, Instant)> {
        self.probes.lock().unwrap().clone()
    }

    /// Every request of any kind
    pub(crate) fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }

    fn count(&self) {
        *self.fetches.lock().unwrap() += 1;
    }
}

#[async_trait]
impl CatalogApi for CannedApi {
    async fn products(&self) -> Result<Vec<Product>> {
        self.count();
        Ok(self.products.clone())
    }

    async fn streams(&self, product: &Product) -> Result<Vec<Stream>> {
        self.count();
        if self.failing_products.contains(&product.id) {
            return Err(GrowthError::Transport(format!(
                "stream list of {} returned 503",
                product.id
            )));
        }

        self.streams
            .get(&product.id)
            .cloned()
            .ok_or_else(|| GrowthError::Transport(format!("unknown product {}", product.id)))
    }

    async fn last_message(&self, stream: &Stream) -> Result<Sample> {
        self.count();
        self.probes
            .lock()
            .unwrap()
            .push((stream.id.clone(), Instant::now()));

        if let Some(latency) = self.latency.get(&stream.id) {
            tokio::time::sleep(*latency).await;
        }

        match self.samples.get(&stream.id) {
            Some(Ok(sample)) => Ok(sample.clone()),
            Some(Err(reason)) => Err(GrowthError::Transport(reason.clone())),
            None => Err(GrowthError::Transport(format!("unknown stream {}", stream.id))),
        }
    }
}
