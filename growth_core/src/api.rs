use crate::{
    error::{GrowthError, Result},
    model::{Product, Stream},
    sample::Sample,
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://www.streamr.com/api/v1";

/// Read side of the remote catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// All publicly accessible products
    async fn products(&self) -> Result<Vec<Product>>;

    /// Streams belonging to one product
    async fn streams(&self, product: &Product) -> Result<Vec<Stream>>;

    /// Probe the newest message on partition 0 of a stream
    async fn last_message(&self, stream: &Stream) -> Result<Sample>;
}

pub type DynCatalogApi = Arc<dyn CatalogApi>;

#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: Client,
    base_url: Url,
}

impl HttpCatalogApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("growth/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            GrowthError::InvalidConfig(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(GrowthError::InvalidConfig(format!(
                "API base URL '{}' cannot carry a path",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn products_url(&self) -> Url {
        let mut url = self.endpoint(&["products"]);
        url.query_pairs_mut().append_pair("publicAccess", "true");
        url
    }

    pub fn streams_url(&self, product_id: &str) -> Url {
        self.endpoint(&["products", product_id, "streams"])
    }

    pub fn last_message_url(&self, stream_id: &str) -> Url {
        let mut url = self.endpoint(&["streams", stream_id, "data", "partitions", "0", "last"]);
        url.query_pairs_mut().append_pair("count", "1");
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GrowthError::Transport(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| GrowthError::decode(url.as_str(), e))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn products(&self) -> Result<Vec<Product>> {
        self.get_json(self.products_url()).await
    }

    async fn streams(&self, product: &Product) -> Result<Vec<Stream>> {
        self.get_json(self.streams_url(&product.id)).await
    }

    async fn last_message(&self, stream: &Stream) -> Result<Sample> {
        let url = self.last_message_url(&stream.id);
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        // Access failures arrive as 401/403 with an error body.
        match Sample::parse(&body) {
            Ok(sample @ Sample::AccessDenied { .. }) => Ok(sample),
            _ if !status.is_success() => Err(GrowthError::Transport(format!(
                "GET {} returned {}",
                url, status
            ))),
            Ok(sample) => Ok(sample),
            Err(e) => Err(GrowthError::decode(url.as_str(), e)),
        }
    }
}
