use growth_core::{
    sinks::{FileSink, HttpSink, SignedSink, StdoutSink, DEFAULT_PUBLISH_BASE},
    DynSink, DEFAULT_API_BASE,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_PACING: Duration = Duration::from_millis(1);

/// Credential that never shows up in logs or debug output.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthConfig {
    #[serde(default)]
    pub api: ApiConfig,

    /// Wait before each stream probe within a product
    #[serde(with = "humantime_serde", default = "default_pacing")]
    pub pacing: Duration,

    /// Unbounded when absent
    #[serde(default)]
    pub max_concurrent_products: Option<usize>,

    #[serde(default)]
    pub destinations: Destinations,

    #[serde(default)]
    pub sink: SinkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base")]
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Destinations {
    #[serde(default)]
    pub products: String,
    #[serde(default)]
    pub streams: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    Http {
        #[serde(default = "default_publish_base")]
        base_url: String,
        #[serde(default)]
        session_token: Option<Secret>,
    },
    Signed {
        #[serde(default = "default_publish_base")]
        base_url: String,
        #[serde(default)]
        private_key: Option<Secret>,
    },
    File {
        dir: PathBuf,
    },
    Stdout,
}

/// Values from the command line or environment, applied over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base: Option<String>,
    pub publish_base: Option<String>,
    pub products_destination: Option<String>,
    pub streams_destination: Option<String>,
    pub session_token: Option<String>,
    pub private_key: Option<String>,
    pub pacing: Option<Duration>,
    pub max_concurrent_products: Option<usize>,
}

fn default_pacing() -> Duration {
    DEFAULT_PACING
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_publish_base() -> String {
    DEFAULT_PUBLISH_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base(),
        }
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self::Http {
            base_url: default_publish_base(),
            session_token: None,
        }
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            pacing: DEFAULT_PACING,
            max_concurrent_products: None,
            destinations: Destinations::default(),
            sink: SinkConfig::default(),
        }
    }
}

impl SinkConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::Signed { .. } => "signed",
            Self::File { .. } => "file",
            Self::Stdout => "stdout",
        }
    }

    pub fn build(&self) -> growth_core::Result<DynSink> {
        let sink: DynSink = match self {
            Self::Http {
                base_url,
                session_token,
            } => Arc::new(HttpSink::new(
                base_url,
                session_token.as_ref().map(|s| s.expose().to_string()),
            )?),
            Self::Signed {
                base_url,
                private_key,
            } => Arc::new(SignedSink::new(
                base_url,
                private_key.as_ref().map(|s| s.expose().to_string()),
            )?),
            Self::File { dir } => Arc::new(FileSink::new(dir.clone())),
            Self::Stdout => Arc::new(StdoutSink),
        };

        Ok(sink)
    }

    fn set_publish_base(&mut self, base: String) {
        match self {
            Self::Http { base_url, .. } | Self::Signed { base_url, .. } => *base_url = base,
            Self::File { .. } | Self::Stdout => {}
        }
    }

    fn publish_base(&self) -> String {
        match self {
            Self::Http { base_url, .. } | Self::Signed { base_url, .. } => base_url.clone(),
            Self::File { .. } | Self::Stdout => default_publish_base(),
        }
    }
}

impl GrowthConfig {
    /// A session token wins over a private key when both are given.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(base) = overrides.api_base {
            self.api.base_url = base;
        }
        if let Some(products) = overrides.products_destination {
            self.destinations.products = products;
        }
        if let Some(streams) = overrides.streams_destination {
            self.destinations.streams = streams;
        }
        if let Some(pacing) = overrides.pacing {
            self.pacing = pacing;
        }
        if let Some(limit) = overrides.max_concurrent_products {
            self.max_concurrent_products = Some(limit);
        }

        let base_url = overrides
            .publish_base
            .clone()
            .unwrap_or_else(|| self.sink.publish_base());

        if let Some(token) = overrides.session_token {
            self.sink = SinkConfig::Http {
                base_url,
                session_token: Some(Secret::new(token)),
            };
        } else if let Some(key) = overrides.private_key {
            self.sink = SinkConfig::Signed {
                base_url,
                private_key: Some(Secret::new(key)),
            };
        } else if let Some(base) = overrides.publish_base {
            self.sink.set_publish_base(base);
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("API base URL cannot be empty".to_string());
        }

        if self.destinations.products.trim().is_empty() {
            return Err("Products destination id cannot be empty".to_string());
        }

        if self.destinations.streams.trim().is_empty() {
            return Err("Streams destination id cannot be empty".to_string());
        }

        if self.max_concurrent_products == Some(0) {
            return Err("max_concurrent_products must be > 0".to_string());
        }

        match &self.sink {
            SinkConfig::Http { base_url, .. } | SinkConfig::Signed { base_url, .. }
                if base_url.trim().is_empty() =>
            {
                Err("Publish base URL cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
