use anyhow::Result;
use clap::Args;
use growth_runner::{load_config_from_file, ConfigOverrides, GrowthConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration sources shared by every subcommand. Flags and environment
/// variables win over the config file.
#[derive(Args, Debug)]
pub struct Settings {
    /// Config file (YAML, TOML, or JSON)
    #[arg(short, long, global = true, env = "GROWTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog API base URL
    #[arg(long, global = true, env = "STREAMR_API_BASE")]
    pub api_base: Option<String>,

    /// Publish API base URL
    #[arg(long, global = true, env = "STREAMR_PUBLISH_BASE")]
    pub publish_base: Option<String>,

    /// Destination stream for product metrics
    #[arg(long, global = true, env = "STREAMR_GROWTH_PRODUCTS_STREAM_ID")]
    pub products_stream: Option<String>,

    /// Destination stream for stream metrics
    #[arg(long, global = true, env = "STREAMR_GROWTH_STREAMS_STREAM_ID")]
    pub streams_stream: Option<String>,

    /// Session token for bearer-authenticated publishing
    #[arg(long, global = true, env = "STREAMR_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    /// Hex private key for signed publishing
    #[arg(long, global = true, env = "STREAMR_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Wait before each stream probe, e.g. "1ms" or "50ms"
    #[arg(long, global = true, env = "GROWTH_PACING", value_parser = humantime::parse_duration)]
    pub pacing: Option<Duration>,

    /// Upper bound on products sampled at once
    #[arg(long, global = true, env = "GROWTH_MAX_CONCURRENT_PRODUCTS")]
    pub max_concurrent_products: Option<usize>,
}

impl Settings {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_base: self.api_base.clone(),
            publish_base: self.publish_base.clone(),
            products_destination: self.products_stream.clone(),
            streams_destination: self.streams_stream.clone(),
            session_token: self.session_token.clone(),
            private_key: self.private_key.clone(),
            pacing: self.pacing,
            max_concurrent_products: self.max_concurrent_products,
        }
    }

    pub async fn load(&self) -> Result<GrowthConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from_file(path).await?,
            None => GrowthConfig::default(),
        };

        config.apply(self.overrides());
        Ok(config)
    }
}
