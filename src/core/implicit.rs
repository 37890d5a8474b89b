//! Implicit detector: hedging, disfluency and soft deferral cues
//!
//! Unlike the explicit detector this collects every hit. Matching is plain
//! substring containment with no word boundaries, so short markers such as
//! "um" also fire inside longer words ("medium", "album").

use tracing::debug;

use crate::core::catalog::SignalCatalog;
use crate::core::explicit::normalize;
use crate::types::{ImplicitDetectionResult, ImplicitSignal, SignalCategory};

/// Scans a response against every implicit category
#[derive(Debug, Clone, Copy)]
pub struct ImplicitDetector<'a> {
    catalog: &'a SignalCatalog,
}

impl Default for ImplicitDetector<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ImplicitDetector<'static> {
    pub fn new() -> Self {
        Self { catalog: SignalCatalog::builtin() }
    }
}

impl<'a> ImplicitDetector<'a> {
    pub fn with_catalog(catalog: &'a SignalCatalog) -> Self {
        Self { catalog }
    }

    /// Collect all implicit signals: hedging, then quality markers, then deferrals
    pub fn detect(&self, response: &str) -> ImplicitDetectionResult {
        let normalized = normalize(response);
        let mut signals = Vec::new();

        if !normalized.is_empty() {
            for category in SignalCategory::ALL {
                signals.extend(
                    self.catalog
                        .implicit(category)
                        .iter()
                        .filter(|phrase| normalized.contains(phrase.as_str()))
                        .map(|phrase| ImplicitSignal::new(phrase.as_str(), category)),
                );
            }
        }

        if !signals.is_empty() {
            debug!(count = signals.len(), "implicit cliff signals");
        }
        ImplicitDetectionResult::from_signals(signals, response)
    }

    pub fn detect_opt(&self, response: Option<&str>) -> ImplicitDetectionResult {
        self.detect(response.unwrap_or_default())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Confidence;

    fn phrases(text: &str) -> Vec<(String, SignalCategory)> {
        ImplicitDetector::new()
            .detect(text)
            .signals
            .into_iter()
            .map(|s| (s.signal, s.category))
            .collect()
    }

    #[test]
    fn test_detects_hedging() {
        let result = ImplicitDetector::new().detect("Maybe we could use React, perhaps with Next.js");
        assert!(result.detected);
        assert_eq!(result.confidence, Some(Confidence::Medium));
        assert!(result.signals.iter().all(|s| s.category == SignalCategory::Hedging));
        assert_eq!(result.signal_count(), 2);
    }

    #[test]
    fn test_detects_quality_degradation() {
        let found = phrases("Hmm, let me think... um, well...");
        assert!(found.contains(&("hmm".to_string(), SignalCategory::QualityDegradation)));
        assert!(found.contains(&("let me think".to_string(), SignalCategory::QualityDegradation)));
        assert!(found.contains(&("well...".to_string(), SignalCategory::QualityDegradation)));
    }

    #[test]
    fn test_detects_deferrals() {
        let found = phrases("Whatever works, you pick the database");
        assert_eq!(
            found,
            vec![
                ("whatever works".to_string(), SignalCategory::Deferral),
                ("you pick".to_string(), SignalCategory::Deferral),
            ]
        );
    }

    #[test]
    fn test_collects_across_categories_in_scan_order() {
        // "um" (quality) appears first in the text but hedging is scanned first
        let found = phrases("um, maybe");
        assert_eq!(
            found,
            vec![
                ("maybe".to_string(), SignalCategory::Hedging),
                ("um".to_string(), SignalCategory::QualityDegradation),
            ]
        );
    }

    #[test]
    fn test_overlapping_phrases_both_count() {
        // "i think maybe" contains "maybe"; both are catalog entries
        let found = phrases("I think maybe Postgres");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].0, "maybe");
        assert_eq!(found[1].0, "i think maybe");
    }

    #[test]
    fn test_substring_match_inside_words() {
        // Known precision limitation, kept literally
        let found = phrases("A medium sized team");
        assert_eq!(found, vec![("um".to_string(), SignalCategory::QualityDegradation)]);
    }

    #[test]
    fn test_no_signals() {
        let result = ImplicitDetector::new().detect("We will use PostgreSQL for persistence");
        assert!(!result.detected);
        assert!(result.signals.is_empty());
        assert_eq!(result.confidence, None);
    }

    #[test]
    fn test_absent_input() {
        let result = ImplicitDetector::new().detect_opt(None);
        assert!(!result.detected);
        assert_eq!(result.original_response, "");
    }

    #[test]
    fn test_idempotent() {
        let detector = ImplicitDetector::new();
        let text = "Hmm, probably whatever is easier";
        assert_eq!(detector.detect(text), detector.detect(text));
    }
}
