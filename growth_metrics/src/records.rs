use growth_core::{Bucket, Product};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetrics {
    pub total: u64,
    pub is_data_union: u64,
    pub is_normal: u64,
    pub is_free: u64,
    pub is_not_free: u64,
}

impl ProductMetrics {
    /// Counts come straight from static product fields, no extra requests.
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |mut metrics, product| {
            metrics.total += 1;
            if product.is_data_union() {
                metrics.is_data_union += 1;
            }
            if product.is_normal() {
                metrics.is_normal += 1;
            }
            if product.is_free {
                metrics.is_free += 1;
            } else {
                metrics.is_not_free += 1;
            }
            metrics
        })
    }

    /// Counter names as they appear in the published JSON.
    pub fn counters(&self) -> [(&'static str, u64); 5] {
        [
            ("total", self.total),
            ("isDataUnion", self.is_data_union),
            ("isNormal", self.is_normal),
            ("isFree", self.is_free),
            ("isNotFree", self.is_not_free),
        ]
    }

    pub fn is_consistent(&self) -> bool {
        self.is_free + self.is_not_free == self.total
            && self.is_data_union + self.is_normal <= self.total
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreamMetrics {
    pub total: u64,
    pub is_free: u64,
    pub is_not_free: u64,
    pub is_free_and_empty: u64,
    pub is_free_and_not_empty: u64,
    pub is_free_and_not_empty_and_active: u64,
    pub is_free_and_not_empty_and_not_active: u64,
}

impl StreamMetrics {
    pub fn from_buckets(buckets: impl IntoIterator<Item = Bucket>) -> Self {
        let mut metrics = Self::default();
        for bucket in buckets {
            metrics.add(bucket);
        }
        metrics
    }

    pub fn add(&mut self, bucket: Bucket) {
        self.total += 1;
        match bucket {
            Bucket::NotFree => self.is_not_free += 1,
            Bucket::FreeEmpty => {
                self.is_free += 1;
                self.is_free_and_empty += 1;
            }
            Bucket::FreeActive => {
                self.is_free += 1;
                self.is_free_and_not_empty += 1;
                self.is_free_and_not_empty_and_active += 1;
            }
            Bucket::FreeNotActive => {
                self.is_free += 1;
                self.is_free_and_not_empty += 1;
                self.is_free_and_not_empty_and_not_active += 1;
            }
        }
    }

    pub fn counters(&self) -> [(&'static str, u64); 7] {
        [
            ("total", self.total),
            ("isFree", self.is_free),
            ("isNotFree", self.is_not_free),
            ("isFreeAndEmpty", self.is_free_and_empty),
            ("isFreeAndNotEmpty", self.is_free_and_not_empty),
            ("isFreeAndNotEmptyAndActive", self.is_free_and_not_empty_and_active),
            ("isFreeAndNotEmptyAndNotActive", self.is_free_and_not_empty_and_not_active),
        ]
    }

    pub fn is_consistent(&self) -> bool {
        self.is_free + self.is_not_free == self.total
            && self.is_free_and_empty + self.is_free_and_not_empty == self.is_free
            && self.is_free_and_not_empty_and_active + self.is_free_and_not_empty_and_not_active
                == self.is_free_and_not_empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_core::ProductType;
    use proptest::prelude::*;

    #[test]
    fn test_single_normal_free_product() {
        let products = vec![Product::new("p1", ProductType::Normal, true)];

        assert_eq!(
            ProductMetrics::from_products(&products),
            ProductMetrics {
                total: 1,
                is_data_union: 0,
                is_normal: 1,
                is_free: 1,
                is_not_free: 0,
            }
        );
    }

    #[test]
    fn test_mixed_products() {
        let products = vec![
            Product::new("p1", ProductType::Normal, true),
            Product::new("p2", ProductType::DataUnion, false),
            Product::new("p3", ProductType::Other, false),
        ];

        let metrics = ProductMetrics::from_products(&products);
        assert_eq!(metrics.total, 3);
        assert_eq!(metrics.is_data_union, 1);
        assert_eq!(metrics.is_normal, 1);
        assert_eq!(metrics.is_free, 1);
        assert_eq!(metrics.is_not_free, 2);
        assert!(metrics.is_consistent());
    }

    #[test]
    fn test_stream_metrics_serialization() {
        let metrics = StreamMetrics::from_buckets([Bucket::FreeActive, Bucket::NotFree]);
        let json = serde_json::to_value(metrics).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "total": 2,
                "isFree": 1,
                "isNotFree": 1,
                "isFreeAndEmpty": 0,
                "isFreeAndNotEmpty": 1,
                "isFreeAndNotEmptyAndActive": 1,
                "isFreeAndNotEmptyAndNotActive": 0,
            })
        );
    }

    #[test]
    fn test_empty_and_denied_streams() {
        let metrics = StreamMetrics::from_buckets([Bucket::FreeEmpty, Bucket::NotFree]);

        assert_eq!(metrics.total, 2);
        assert_eq!(metrics.is_free_and_empty, 1);
        assert_eq!(metrics.is_not_free, 1);
        assert_eq!(metrics.is_free_and_not_empty, 0);
    }

    fn any_bucket() -> impl Strategy<Value = Bucket> {
        prop_oneof![
            Just(Bucket::NotFree),
            Just(Bucket::FreeEmpty),
            Just(Bucket::FreeActive),
            Just(Bucket::FreeNotActive),
        ]
    }

    fn any_product() -> impl Strategy<Value = Product> {
        (
            prop_oneof![
                Just(ProductType::Normal),
                Just(ProductType::DataUnion),
                Just(ProductType::Other)
            ],
            any::<bool>(),
        )
            .prop_map(|(product_type, is_free)| Product::new("p", product_type, is_free))
    }

    proptest! {
        #[test]
        fn prop_stream_partitions_hold(buckets in proptest::collection::vec(any_bucket(), 0..200)) {
            let metrics = StreamMetrics::from_buckets(buckets.iter().copied());
            prop_assert!(metrics.is_consistent());
            prop_assert_eq!(metrics.total, buckets.len() as u64);
        }

        #[test]
        fn prop_product_partitions_hold(products in proptest::collection::vec(any_product(), 0..100)) {
            let metrics = ProductMetrics::from_products(&products);
            prop_assert!(metrics.is_consistent());
        }
    }
}
