use crate::{
    error::{GrowthError, Result},
    sinks::Sink,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes each snapshot to `<dir>/<destination>.json`.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, destination: &str) -> PathBuf {
        let file_name: String = destination
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
                _ => '_',
            })
            .collect();

        self.dir.join(format!("{}.json", file_name))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl Sink for FileSink {
    async fn publish(&self, destination: &str, payload: &serde_json::Value) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(destination);
        let json = serde_json::to_string_pretty(payload)?;
        tokio::fs::write(&path, json).await?;

        info!("Wrote snapshot for '{}' to {}", destination, path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }

    fn validate(&self) -> Result<()> {
        if self.dir.as_os_str().is_empty() {
            return Err(GrowthError::InvalidConfig(
                "file sink directory cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
