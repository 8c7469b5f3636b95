use crate::report::GrowthReport;
use anyhow::Result;
use std::path::Path;

pub struct MarkdownExporter;

impl MarkdownExporter {
    pub async fn export(report: &GrowthReport, path: impl AsRef<Path>) -> Result<()> {
        let markdown = Self::format(report);
        tokio::fs::write(path, markdown).await?;
        Ok(())
    }

    pub fn format(report: &GrowthReport) -> String {
        let rows = |counters: &[(&str, u64)]| {
            counters
                .iter()
                .map(|(name, value)| format!("| {} | {} |", name, value))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            r#"# Catalog Growth Report

Run `{}` generated at {} in {:?}.

## Products

| Counter | Value |
|---------|-------|
{}

## Streams

| Counter | Value |
|---------|-------|
{}
"#,
            report.run_id,
            report.generated_at.to_rfc3339(),
            report.duration(),
            rows(&report.products.counters()),
            rows(&report.streams.counters()),
        )
    }
}
