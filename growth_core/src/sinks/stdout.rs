use crate::{error::Result, sinks::Sink};
use async_trait::async_trait;

/// Prints `{"destination": .., "payload": ..}` lines instead of publishing.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn render(destination: &str, payload: &serde_json::Value) -> Result<String> {
        let line = serde_json::json!({
            "destination": destination,
            "payload": payload,
        });
        Ok(serde_json::to_string(&line)?)
    }
}

#[async_trait]
impl Sink for StdoutSink {
    async fn publish(&self, destination: &str, payload: &serde_json::Value) -> Result<()> {
        println!("{}", Self::render(destination, payload)?);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}
