use serde::Deserialize;
use serde_json::{Map, Value};

/// Outcome of probing a stream for its most recent message.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// Latest message, `timestamp` in epoch milliseconds
    Message { timestamp: i64, payload: Value },

    /// Access granted but nothing has been published
    Empty,

    /// The endpoint answered with a well-formed error body
    AccessDenied { reason: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LastMessageBody {
    Messages(Vec<RawMessage>),
    Object(Map<String, Value>),
}

#[derive(Deserialize)]
struct RawMessage {
    timestamp: i64,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl Sample {
    pub fn message(timestamp: i64, payload: Value) -> Self {
        Self::Message { timestamp, payload }
    }

    pub fn access_denied(reason: impl Into<String>) -> Self {
        Self::AccessDenied {
            reason: reason.into(),
        }
    }

    /// Decodes a last-message body. Only the first element of an array
    /// counts; an object is an error body when it carries a non-null
    /// `error` field and an empty answer otherwise.
    pub fn parse(body: &[u8]) -> serde_json::Result<Self> {
        let sample = match serde_json::from_slice::<LastMessageBody>(body)? {
            LastMessageBody::Messages(messages) => match messages.into_iter().next() {
                Some(RawMessage { timestamp, rest }) => Self::Message {
                    timestamp,
                    payload: Value::Object(rest),
                },
                None => Self::Empty,
            },
            LastMessageBody::Object(object) => match object.get("error") {
                Some(Value::Null) | None => Self::Empty,
                Some(Value::String(reason)) => Self::access_denied(reason.clone()),
                Some(other) => Self::access_denied(other.to_string()),
            },
        };

        Ok(sample)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Message { .. } => "message",
            Self::Empty => "empty",
            Self::AccessDenied { .. } => "access_denied",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_message() {
        let body = br#"[{"timestamp": 1700000000000, "content": {"temp": 21.5}, "sequenceNumber": 0}]"#;

        let sample = Sample::parse(body).unwrap();
        assert_eq!(
            sample,
            Sample::message(
                1_700_000_000_000,
                json!({"content": {"temp": 21.5}, "sequenceNumber": 0})
            )
        );
    }

    #[test]
    fn test_parse_empty_variants() {
        assert_eq!(Sample::parse(b"[]").unwrap(), Sample::Empty);
        assert_eq!(Sample::parse(b"{}").unwrap(), Sample::Empty);
        assert_eq!(Sample::parse(br#"{"error": null}"#).unwrap(), Sample::Empty);
    }

    #[test]
    fn test_parse_error_body() {
        let sample = Sample::parse(br#"{"error": "no access", "code": "FORBIDDEN"}"#).unwrap();
        assert_eq!(sample, Sample::access_denied("no access"));

        let sample = Sample::parse(br#"{"error": {"code": 403}}"#).unwrap();
        assert_eq!(sample, Sample::access_denied(r#"{"code":403}"#));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(Sample::parse(b"<html>bad gateway</html>").is_err());
        assert!(Sample::parse(br#"[{"content": {}}]"#).is_err());
        assert!(Sample::parse(b"42").is_err());
    }

    #[test]
    fn test_any_non_null_error_is_denied() {
        assert_eq!(Sample::parse(br#"{"error": false}"#).unwrap(), Sample::access_denied("false"));
        assert_eq!(Sample::parse(br#"{"error": ""}"#).unwrap(), Sample::access_denied(""));
        assert_eq!(Sample::parse(br#"{"error": 0}"#).unwrap(), Sample::access_denied("0"));
    }
}
