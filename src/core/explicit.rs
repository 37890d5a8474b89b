//! Explicit detector: unambiguous admissions of a knowledge limit

use tracing::debug;

use crate::core::catalog::SignalCatalog;
use crate::types::DetectionResult;

/// Lowercase + trim, shared by both detectors
pub(crate) fn normalize(response: &str) -> String {
    response.trim().to_lowercase()
}

/// Scans a response for the first explicit catalog phrase
#[derive(Debug, Clone, Copy)]
pub struct ExplicitDetector<'a> {
    catalog: &'a SignalCatalog,
}

impl Default for ExplicitDetector<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplicitDetector<'static> {
    /// Detector over the built-in catalog
    pub fn new() -> Self {
        Self { catalog: SignalCatalog::builtin() }
    }
}

impl<'a> ExplicitDetector<'a> {
    pub fn with_catalog(catalog: &'a SignalCatalog) -> Self {
        Self { catalog }
    }

    /// Detect the first explicit signal; catalog order decides ties
    pub fn detect(&self, response: &str) -> DetectionResult {
        let normalized = normalize(response);
        if normalized.is_empty() {
            return DetectionResult::miss();
        }

        match self.catalog.explicit().iter().find(|s| normalized.contains(s.as_str())) {
            Some(signal) => {
                debug!(signal = %signal, "explicit cliff signal");
                DetectionResult::hit(signal.as_str(), response)
            }
            None => DetectionResult::miss(),
        }
    }

    /// Detect on possibly absent input
    pub fn detect_opt(&self, response: Option<&str>) -> DetectionResult {
        self.detect(response.unwrap_or_default())
    }
}

// =============================================================================
// TESTS
// =============================================================================
