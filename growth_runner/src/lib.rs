pub mod config;
pub mod parser;
pub mod runner;
pub mod sampler;
pub mod walker;

#[cfg(test)]
mod testing;

pub use config::{ApiConfig, ConfigOverrides, Destinations, GrowthConfig, Secret, SinkConfig};
pub use parser::{load_config_from_file, parse_config_from_str};
pub use runner::{run_growth, GrowthRunner};
pub use sampler::StreamSampler;
pub use walker::{Catalog, CatalogWalker};
