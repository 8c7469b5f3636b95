use crate::records::StreamMetrics;
use growth_core::Bucket;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared accumulator for per-stream buckets.
///
/// Product branches record through `&self` concurrently; the run takes the
/// final counts with [`StreamAggregator::snapshot`], which consumes it.
#[derive(Debug, Default)]
pub struct StreamAggregator {
    total: AtomicU64,
    is_free: AtomicU64,
    is_not_free: AtomicU64,
    is_free_and_empty: AtomicU64,
    is_free_and_not_empty: AtomicU64,
    is_free_and_not_empty_and_active: AtomicU64,
    is_free_and_not_empty_and_not_active: AtomicU64,
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, bucket: Bucket) {
        self.total.fetch_add(1, Ordering::Relaxed);

        match bucket {
            Bucket::NotFree => {
                self.is_not_free.fetch_add(1, Ordering::Relaxed);
            }
            Bucket::FreeEmpty => {
                self.is_free.fetch_add(1, Ordering::Relaxed);
                self.is_free_and_empty.fetch_add(1, Ordering::Relaxed);
            }
            Bucket::FreeActive => {
                self.is_free.fetch_add(1, Ordering::Relaxed);
                self.is_free_and_not_empty.fetch_add(1, Ordering::Relaxed);
                self.is_free_and_not_empty_and_active
                    .fetch_add(1, Ordering::Relaxed);
            }
            Bucket::FreeNotActive => {
                self.is_free.fetch_add(1, Ordering::Relaxed);
                self.is_free_and_not_empty.fetch_add(1, Ordering::Relaxed);
                self.is_free_and_not_empty_and_not_active
                    .fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Counts so far. May be mid-update while branches are still recording.
    pub fn peek(&self) -> StreamMetrics {
        StreamMetrics {
            total: self.total.load(Ordering::Relaxed),
            is_free: self.is_free.load(Ordering::Relaxed),
            is_not_free: self.is_not_free.load(Ordering::Relaxed),
            is_free_and_empty: self.is_free_and_empty.load(Ordering::Relaxed),
            is_free_and_not_empty: self.is_free_and_not_empty.load(Ordering::Relaxed),
            is_free_and_not_empty_and_active: self
                .is_free_and_not_empty_and_active
                .load(Ordering::Relaxed),
            is_free_and_not_empty_and_not_active: self
                .is_free_and_not_empty_and_not_active
                .load(Ordering::Relaxed),
        }
    }

    pub fn snapshot(self) -> StreamMetrics {
        StreamMetrics {
            total: self.total.into_inner(),
            is_free: self.is_free.into_inner(),
            is_not_free: self.is_not_free.into_inner(),
            is_free_and_empty: self.is_free_and_empty.into_inner(),
            is_free_and_not_empty: self.is_free_and_not_empty.into_inner(),
            is_free_and_not_empty_and_active: self.is_free_and_not_empty_and_active.into_inner(),
            is_free_and_not_empty_and_not_active: self
                .is_free_and_not_empty_and_not_active
                .into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUCKETS: [Bucket; 4] = [
        Bucket::NotFree,
        Bucket::FreeEmpty,
        Bucket::FreeActive,
        Bucket::FreeNotActive,
    ];

    #[test]
    fn test_aggregation() {
        let aggregator = StreamAggregator::new();
        for bucket in BUCKETS {
            aggregator.record(bucket);
        }

        let metrics = aggregator.snapshot();
        assert_eq!(metrics, StreamMetrics::from_buckets(BUCKETS));
        assert_eq!(metrics.total, 4);
        assert!(metrics.is_consistent());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let aggregator = StreamAggregator::new();
        aggregator.record(Bucket::FreeEmpty);

        assert_eq!(aggregator.peek().total, 1);
        aggregator.record(Bucket::NotFree);
        assert_eq!(aggregator.snapshot().total, 2);
    }

    #[test]
    fn test_parallel_threads_record_every_bucket() {
        let aggregator = StreamAggregator::new();

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let aggregator = &aggregator;
                scope.spawn(move || {
                    for i in 0..1_000 {
                        aggregator.record(BUCKETS[(worker + i) % BUCKETS.len()]);
                    }
                });
            }
        });

        let metrics = aggregator.snapshot();
        assert_eq!(metrics.total, 8_000);
        assert_eq!(metrics.is_not_free, 2_000);
        assert_eq!(metrics.is_free_and_empty, 2_000);
        assert_eq!(metrics.is_free_and_not_empty_and_active, 2_000);
        assert_eq!(metrics.is_free_and_not_empty_and_not_active, 2_000);
        assert!(metrics.is_consistent());
    }
}
