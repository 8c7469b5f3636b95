use crate::records::{ProductMetrics, StreamMetrics};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Both snapshots of one run, as printed or exported after publishing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrowthReport {
    pub run_id: uuid::Uuid,
    pub generated_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub products: ProductMetrics,
    pub streams: StreamMetrics,
}

impl GrowthReport {
    pub fn new(products: ProductMetrics, streams: StreamMetrics, duration: Duration) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4(),
            generated_at: Utc::now(),
            duration_ms: duration.as_millis() as u64,
            products,
            streams,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn is_consistent(&self) -> bool {
        self.products.is_consistent() && self.streams.is_consistent()
    }
}
