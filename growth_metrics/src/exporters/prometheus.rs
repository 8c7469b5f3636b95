use crate::report::GrowthReport;
use anyhow::Result;
use prometheus::{Encoder, IntGaugeVec, Opts, Registry, TextEncoder};

/// Renders a report in the Prometheus text exposition format.
pub struct PrometheusExporter;

impl PrometheusExporter {
    pub fn format(report: &GrowthReport) -> Result<String> {
        let registry = Registry::new();

        let products = IntGaugeVec::new(
            Opts::new("growth_products", "Public catalog products by counter"),
            &["counter"],
        )?;
        let streams = IntGaugeVec::new(
            Opts::new("growth_streams", "Streams of public products by counter"),
            &["counter"],
        )?;
        registry.register(Box::new(products.clone()))?;
        registry.register(Box::new(streams.clone()))?;

        for (name, value) in report.products.counters() {
            products.with_label_values(&[name]).set(value as i64);
        }
        for (name, value) in report.streams.counters() {
            streams.with_label_values(&[name]).set(value as i64);
        }

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ProductMetrics, StreamMetrics};
    use std::time::Duration;

    #[test]
    fn test_prometheus_text() {
        let report = GrowthReport::new(
            ProductMetrics { total: 4, is_data_union: 1, is_free: 4, ..Default::default() },
            StreamMetrics { total: 9, is_free: 9, is_free_and_empty: 9, ..Default::default() },
            Duration::ZERO,
        );

        let text = PrometheusExporter::format(&report).unwrap();

        assert!(text.contains("# TYPE growth_products gauge"));
        assert!(text.contains(r#"growth_products{counter="isDataUnion"} 1"#));
        assert!(text.contains(r#"growth_streams{counter="isFreeAndEmpty"} 9"#));
    }
}
