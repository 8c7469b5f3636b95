pub mod file;
pub mod http;
pub mod signed;
pub mod stdout;

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

pub use file::FileSink;
pub use http::{HttpSink, DEFAULT_PUBLISH_BASE};
pub use signed::SignedSink;
pub use stdout::StdoutSink;

/// Destination for finished metric snapshots
#[async_trait]
pub trait Sink: Send + Sync {
    /// Deliver one payload to the named destination
    async fn publish(&self, destination: &str, payload: &serde_json::Value) -> Result<()>;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Check the credential shape without touching the network
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

pub type DynSink = Arc<dyn Sink>;

/// Serializes records and hands them to whichever sink is configured.
#[derive(Clone)]
pub struct SnapshotPublisher {
    sink: DynSink,
}

impl SnapshotPublisher {
    pub fn new(sink: DynSink) -> Self {
        Self { sink }
    }

    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    pub fn validate(&self) -> Result<()> {
        self.sink.validate()
    }

    pub async fn publish<T: Serialize + ?Sized>(&self, destination: &str, record: &T) -> Result<()> {
        let payload = serde_json::to_value(record)?;

        info!(
            "Publishing snapshot to '{}' via {} sink",
            destination,
            self.sink.name()
        );

        self.sink.publish(destination, &payload).await
    }
}
