//! Per-response detection results

use serde::{Deserialize, Serialize};
use crate::types::{Confidence, ImplicitSignal};

/// Result of explicit detection on one response
///
/// When nothing matched only `detected: false` is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// Unmodified input, only on a hit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_response: Option<String>,
}

impl DetectionResult {
    /// Explicit hit
    pub fn hit(signal: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            detected: true,
            signal: Some(signal.into()),
            confidence: Some(Confidence::High),
            original_response: Some(original.into()),
        }
    }

    /// No explicit signal found
    pub fn miss() -> Self {
        Self {
            detected: false,
            signal: None,
            confidence: None,
            original_response: None,
        }
    }
}

/// Result of implicit detection on one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplicitDetectionResult {
    pub detected: bool,
    /// Every hit, in scan order
    pub signals: Vec<ImplicitSignal>,
    /// MEDIUM when anything matched, null otherwise
    pub confidence: Option<Confidence>,
    pub original_response: String,
}

impl ImplicitDetectionResult {
    /// Build from collected signals
    pub fn from_signals(signals: Vec<ImplicitSignal>, original: impl Into<String>) -> Self {
        let detected = !signals.is_empty();
        Self {
            detected,
            signals,
            confidence: detected.then_some(Confidence::Medium),
            original_response: original.into(),
        }
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }
}
