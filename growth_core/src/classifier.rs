use crate::sample::Sample;
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;

/// Terminal classification of a single sample. Exactly one per sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    NotFree,
    FreeEmpty,
    FreeActive,
    FreeNotActive,
}

impl Bucket {
    pub fn is_free(self) -> bool {
        !matches!(self, Self::NotFree)
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Self::FreeEmpty)
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::FreeActive)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NotFree => "not free",
            Self::FreeEmpty => "free, empty",
            Self::FreeActive => "free, active",
            Self::FreeNotActive => "free, not active",
        }
    }
}

/// A message is active when it is strictly newer than `now - threshold`.
/// Without a threshold the stream can never be active.
pub fn is_active(message_timestamp: i64, inactivity_threshold_hours: Option<f64>, now_ms: i64) -> bool {
    match inactivity_threshold_hours {
        Some(hours) => (now_ms as f64) - hours * MILLIS_PER_HOUR < message_timestamp as f64,
        None => false,
    }
}

pub fn classify_at(sample: &Sample, inactivity_threshold_hours: Option<f64>, now_ms: i64) -> Bucket {
    match sample {
        Sample::Message { timestamp, .. } => {
            if is_active(*timestamp, inactivity_threshold_hours, now_ms) {
                Bucket::FreeActive
            } else {
                Bucket::FreeNotActive
            }
        }
        // Access failures count as not free, whatever the product says.
        Sample::AccessDenied { .. } => Bucket::NotFree,
        Sample::Empty => Bucket::FreeEmpty,
    }
}

/// Classifies against the wall clock at the moment of the call.
pub fn classify(sample: &Sample, inactivity_threshold_hours: Option<f64>) -> Bucket {
    classify_at(sample, inactivity_threshold_hours, chrono::Utc::now().timestamp_millis())
}
