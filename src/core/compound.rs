//! Compound analyzer: one trigger decision per response
//!
//! - explicit signal → trigger, HIGH (history ignored)
//! - current + last 3 turns' implicit signals ≥ 2 → trigger, MEDIUM
//! - otherwise no trigger

use tracing::{debug, info};

use crate::{COMPOUND_TRIGGER_THRESHOLD, HISTORY_WINDOW};
use crate::core::catalog::SignalCatalog;
use crate::core::explicit::ExplicitDetector;
use crate::core::implicit::ImplicitDetector;
use crate::types::{CompoundResult, HistoryEntry, ImplicitDetectionResult, Trigger};

/// Combines both detectors with the caller's recent history
#[derive(Debug, Clone, Copy)]
pub struct CompoundAnalyzer<'a> {
    explicit: ExplicitDetector<'a>,
    implicit: ImplicitDetector<'a>,
}

impl Default for CompoundAnalyzer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl CompoundAnalyzer<'static> {
    pub fn new() -> Self {
        Self::with_catalog(SignalCatalog::builtin())
    }
}

impl<'a> CompoundAnalyzer<'a> {
    pub fn with_catalog(catalog: &'a SignalCatalog) -> Self {
        Self {
            explicit: ExplicitDetector::with_catalog(catalog),
            implicit: ImplicitDetector::with_catalog(catalog),
        }
    }

    pub fn explicit(&self) -> &ExplicitDetector<'a> {
        &self.explicit
    }

    pub fn implicit(&self) -> &ImplicitDetector<'a> {
        &self.implicit
    }

    /// Analyze a response against the caller's history (oldest first)
    pub fn analyze(&self, response: &str, history: &[HistoryEntry]) -> CompoundResult {
        self.analyze_with(response, history).0
    }

    /// Analyze and also return the current turn's implicit detection,
    /// which callers append to their history
    pub fn analyze_with(
        &self,
        response: &str,
        history: &[HistoryEntry],
    ) -> (CompoundResult, ImplicitDetectionResult) {
        let explicit = self.explicit.detect(response);
        let current = self.implicit.detect(response);
        let historical = windowed_signal_count(history);
        let signal_count = current.signal_count() + historical;

        debug!(
            current = current.signal_count(),
            historical,
            window = history.len().min(HISTORY_WINDOW),
            "compound analysis"
        );

        let result = if explicit.detected {
            info!(signal = ?explicit.signal, "cliff trigger: explicit signal");
            CompoundResult {
                trigger: Trigger::Explicit,
                signal_count,
                signals: Vec::new(),
            }
        } else if signal_count >= COMPOUND_TRIGGER_THRESHOLD {
            info!(signal_count, "cliff trigger: compound implicit");
            CompoundResult {
                trigger: Trigger::CompoundImplicit,
                signal_count,
                signals: current.signals.clone(),
            }
        } else {
            CompoundResult {
                trigger: Trigger::NoTrigger,
                signal_count,
                signals: current.signals.clone(),
            }
        };

        (result, current)
    }
}

/// Sum of implicit signals in the most recent `HISTORY_WINDOW` entries
pub fn windowed_signal_count(history: &[HistoryEntry]) -> usize {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..].iter().map(HistoryEntry::signal_count).sum()
}

// =============================================================================
// TESTS
// =============================================================================
