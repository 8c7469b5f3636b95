pub mod api;
pub mod classifier;
pub mod error;
pub mod model;
pub mod sample;
pub mod sinks;

pub use api::{CatalogApi, DynCatalogApi, HttpCatalogApi, DEFAULT_API_BASE};
pub use classifier::{classify, classify_at, Bucket};
pub use error::{GrowthError, Result};
pub use model::{Product, ProductType, Stream};
pub use sample::Sample;
pub use sinks::{DynSink, Sink, SnapshotPublisher};

// Re-export commonly used types
pub use async_trait::async_trait;
