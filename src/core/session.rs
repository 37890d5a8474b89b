//! Survey session: caller-side state around the pure detectors
//!
//! Owns the conversation history and the declined-offer counter. Detection
//! runs on every response; once the user has declined `SUPPRESSION_THRESHOLD`
//! offers, triggers are still logged but no longer offered.
//!
//! Offer lifecycle:
//! - trigger + declined < threshold → offer pending
//! - decline() → counter + 1, offer cleared
//! - accept() → handed off, no further offers

use chrono::Utc;
use tracing::{info, warn};

use crate::SUPPRESSION_THRESHOLD;
use crate::core::catalog::SignalCatalog;
use crate::core::compound::CompoundAnalyzer;
use crate::types::{CliffRecord, CompoundResult, HistoryEntry, SessionStatus, TurnOutcome};

/// Decides whether a triggered detection should be offered to the user
#[derive(Debug, Clone, Copy)]
pub struct OfferPolicy {
    threshold: u32,
}

impl Default for OfferPolicy {
    fn default() -> Self {
        Self { threshold: SUPPRESSION_THRESHOLD }
    }
}

impl OfferPolicy {
    pub fn with_threshold(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Offer iff the analysis fired and the user has not declined too often
    pub fn should_offer(&self, declined_offers: u32, result: &CompoundResult) -> bool {
        result.fired() && !self.is_suppressed(declined_offers)
    }

    pub fn is_suppressed(&self, declined_offers: u32) -> bool {
        declined_offers >= self.threshold
    }
}

/// One survey conversation
#[derive(Debug, Clone)]
pub struct SurveySession<'a> {
    analyzer: CompoundAnalyzer<'a>,
    policy: OfferPolicy,
    history: Vec<HistoryEntry>,
    declined_offers: u32,
    pending_offer: bool,
    handed_off: bool,
    cliff_signals: Vec<CliffRecord>,
}

impl Default for SurveySession<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveySession<'static> {
    pub fn new() -> Self {
        Self::with_catalog(SignalCatalog::builtin())
    }
}

impl<'a> SurveySession<'a> {
    pub fn with_catalog(catalog: &'a SignalCatalog) -> Self {
        Self {
            analyzer: CompoundAnalyzer::with_catalog(catalog),
            policy: OfferPolicy::default(),
            history: Vec::new(),
            declined_offers: 0,
            pending_offer: false,
            handed_off: false,
            cliff_signals: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: OfferPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Analyze one response and record it in the history
    pub fn respond(&mut self, response: &str) -> TurnOutcome {
        let (result, current) = self.analyzer.analyze_with(response, &self.history);
        self.history.push(HistoryEntry::from(current));
        let turn = self.history.len();

        let mut offer = false;
        let mut suppressed = false;

        if let (Some(reason), Some(confidence)) = (result.reason(), result.confidence()) {
            offer = !self.handed_off && self.policy.should_offer(self.declined_offers, &result);
            suppressed = !self.handed_off && !offer;

            if offer {
                self.pending_offer = true;
                info!(turn, reason = reason.code(), "offering mode switch");
            } else if suppressed {
                warn!(turn, declined = self.declined_offers, "mode switch offer suppressed");
            }

            self.cliff_signals.push(CliffRecord {
                timestamp: Utc::now(),
                turn,
                response: response.to_string(),
                reason,
                confidence,
                signal_count: result.signal_count,
                mode_switch_offered: offer,
            });
        }

        TurnOutcome { turn, result, offer, suppressed }
    }

    /// User turned the offer down and continues the survey
    pub fn decline(&mut self) {
        if self.pending_offer {
            self.declined_offers += 1;
            self.pending_offer = false;
            info!(declined = self.declined_offers, "mode switch declined");
        }
    }

    /// User accepted the mode switch
    pub fn accept(&mut self) {
        if self.pending_offer {
            self.pending_offer = false;
            self.handed_off = true;
            info!(turns = self.history.len(), "handing off to engineer mode");
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn declined_offers(&self) -> u32 {
        self.declined_offers
    }

    pub fn pending_offer(&self) -> bool {
        self.pending_offer
    }

    pub fn handed_off(&self) -> bool {
        self.handed_off
    }

    pub fn is_suppressed(&self) -> bool {
        self.policy.is_suppressed(self.declined_offers)
    }

    pub fn cliff_signals(&self) -> &[CliffRecord] {
        &self.cliff_signals
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            turn_count: self.history.len(),
            declined_offers: self.declined_offers,
            pending_offer: self.pending_offer,
            suppressed: self.is_suppressed(),
            handed_off: self.handed_off,
            cliff_signals: self.cliff_signals.clone(),
        }
    }

    /// Reset to a fresh session, keeping catalog and policy
    pub fn reset(&mut self) {
        self.history.clear();
        self.cliff_signals.clear();
        self.declined_offers = 0;
        self.pending_offer = false;
        self.handed_off = false;
    }
}

// =============================================================================
// TESTS
// =============================================================================
