use crate::config::GrowthConfig;
use anyhow::Result;
use std::path::Path;

/// Reads a config file; the format follows the extension. Validation is left to
/// the caller because destinations usually arrive through the environment.
pub async fn load_config_from_file(path: impl AsRef<Path>) -> Result<GrowthConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;

    let extension = path.extension().and_then(|s| s.to_str());

    match extension {
        Some("yaml") | Some("yml") => parse_yaml(&contents),
        Some("toml") => parse_toml(&contents),
        Some("json") => parse_json(&contents),
        _ => Err(anyhow::anyhow!(
            "Unsupported file format. Use .yaml, .yml, .toml, or .json"
        )),
    }
}

pub fn parse_config_from_str(content: &str, format: &str) -> Result<GrowthConfig> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => parse_yaml(content),
        "toml" => parse_toml(content),
        "json" => parse_json(content),
        _ => Err(anyhow::anyhow!("Unsupported format: {}", format)),
    }
}

fn parse_yaml(content: &str) -> Result<GrowthConfig> {
    Ok(serde_yaml::from_str(content)?)
}

fn parse_toml(content: &str) -> Result<GrowthConfig> {
    Ok(toml::from_str(content)?)
}

fn parse_json(content: &str) -> Result<GrowthConfig> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SinkConfig;
    use std::time::Duration;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
api:
  base_url: "http://localhost:8080/api/v1"
pacing: 5ms
max_concurrent_products: 4
destinations:
  products: "growth/products"
  streams: "growth/streams"
sink:
  type: signed
  private_key: "0x01"
"#;

        let config = parse_yaml(yaml).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.pacing, Duration::from_millis(5));
        assert_eq!(config.max_concurrent_products, Some(4));
        assert_eq!(config.sink.kind(), "signed");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
pacing = "10ms"

[destinations]
products = "growth/products"
streams = "growth/streams"

[sink]
type = "file"
dir = "snapshots"
"#;

        let config = parse_toml(toml).unwrap();
        assert_eq!(config.pacing, Duration::from_millis(10));
        assert!(matches!(config.sink, SinkConfig::File { .. }));
    }

    #[test]
    fn test_parse_json_defaults() {
        let config = parse_json(r#"{"sink": {"type": "stdout"}}"#).unwrap();

        assert_eq!(config.pacing, Duration::from_millis(1));
        assert_eq!(config.sink.kind(), "stdout");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_format() {
        assert!(parse_config_from_str("", "ini").is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("growth.json");
        tokio::fs::write(&path, r#"{"pacing": "2ms"}"#).await.unwrap();

        let config = load_config_from_file(&path).await.unwrap();
        assert_eq!(config.pacing, Duration::from_millis(2));

        assert!(load_config_from_file(dir.path().join("growth.ini")).await.is_err());
    }
}
