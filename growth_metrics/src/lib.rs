pub mod aggregator;
pub mod exporters;
pub mod records;
pub mod report;

pub use aggregator::StreamAggregator;
pub use records::{ProductMetrics, StreamMetrics};
pub use report::GrowthReport;
