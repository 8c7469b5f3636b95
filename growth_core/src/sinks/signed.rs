use crate::{
    error::{GrowthError, Result},
    sinks::{
        http::{parse_base, post_event, publish_url},
        Sink,
    },
};
use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

const PRIVATE_KEY_LEN: usize = 32;
const TOKEN_LIFETIME_SECS: u64 = 60;

/// Claims of the per-publish token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishClaims {
    /// Destination stream id
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// Publishes with a short-lived token signed by a hex-encoded private key.
pub struct SignedSink {
    client: Client,
    base_url: Url,
    private_key: Option<String>,
}

impl SignedSink {
    pub fn new(base_url: &str, private_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base(base_url)?,
            private_key,
        })
    }

    fn key_bytes(&self) -> Result<Vec<u8>> {
        let raw = self
            .private_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                GrowthError::AuthConfiguration("private key is missing or empty".to_string())
            })?;

        let raw = raw.strip_prefix("0x").unwrap_or(raw);
        let bytes = hex::decode(raw).map_err(|e| {
            GrowthError::AuthConfiguration(format!("private key is not valid hex: {}", e))
        })?;

        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(GrowthError::AuthConfiguration(format!(
                "private key must be {} bytes, got {}",
                PRIVATE_KEY_LEN,
                bytes.len()
            )));
        }

        Ok(bytes)
    }

    pub fn sign_token(&self, destination: &str) -> Result<String> {
        let key = self.key_bytes()?;
        let now = chrono::Utc::now().timestamp().max(0) as u64;

        let claims = PublishClaims {
            sub: destination.to_string(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        encode(&Header::default(), &claims, &EncodingKey::from_secret(&key))
            .map_err(|e| GrowthError::AuthConfiguration(format!("token signing failed: {}", e)))
    }
}

#[async_trait]
impl Sink for SignedSink {
    async fn publish(&self, destination: &str, payload: &serde_json::Value) -> Result<()> {
        let token = self.sign_token(destination)?;
        post_event(&self.client, publish_url(&self.base_url, destination), &token, payload).await
    }

    fn name(&self) -> &'static str {
        "signed"
    }

    fn validate(&self) -> Result<()> {
        self.key_bytes().map(|_| ())
    }
}
