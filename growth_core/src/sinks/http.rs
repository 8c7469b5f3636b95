use crate::{
    error::{GrowthError, Result},
    sinks::Sink,
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

pub const DEFAULT_PUBLISH_BASE: &str = "https://streamr.network/api/v1";

/// Resolves `{base}/streams/{destination}/data`, encoding the destination as one segment.
pub(crate) fn publish_url(base_url: &Url, destination: &str) -> Url {
    let mut url = base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(["streams", destination, "data"]);
    }
    url
}

pub(crate) fn parse_base(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url).map_err(|e| {
        GrowthError::InvalidConfig(format!("Invalid publish base URL '{}': {}", base_url, e))
    })?;

    if url.cannot_be_a_base() {
        return Err(GrowthError::InvalidConfig(format!(
            "Publish base URL '{}' cannot carry a path",
            base_url
        )));
    }

    Ok(url)
}

/// POSTs the payload with a bearer token and maps non-2xx answers to transport errors.
pub(crate) async fn post_event(
    client: &Client,
    url: Url,
    bearer: &str,
    payload: &serde_json::Value,
) -> Result<()> {
    debug!("POST {}", url);

    let response = client
        .post(url.clone())
        .bearer_auth(bearer)
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GrowthError::Transport(format!(
            "POST {} returned {}: {}",
            url, status, body
        )));
    }

    Ok(())
}

/// Publishes with a session token in the `Authorization` header.
pub struct HttpSink {
    client: Client,
    base_url: Url,
    session_token: Option<String>,
}

impl HttpSink {
    pub fn new(base_url: &str, session_token: Option<String>) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base(base_url)?,
            session_token,
        })
    }

    fn token(&self) -> Result<&str> {
        match self.session_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(GrowthError::AuthConfiguration(
                "session token is missing or empty".to_string(),
            )),
        }
    }
}

#[async_trait]
impl Sink for HttpSink {
    async fn publish(&self, destination: &str, payload: &serde_json::Value) -> Result<()> {
        let token = self.token()?;
        post_event(&self.client, publish_url(&self.base_url, destination), token, payload).await
    }

    fn name(&self) -> &'static str {
        "http"
    }

    fn validate(&self) -> Result<()> {
        self.token().map(|_| ())
    }
}
