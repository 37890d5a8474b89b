//! Session output structures for terminal display and the API

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{CompoundResult, Confidence, TriggerReason};

/// A triggered turn, logged by the session whether or not an offer was shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliffRecord {
    pub timestamp: DateTime<Utc>,
    /// 1-based turn number within the session
    pub turn: usize,
    pub response: String,
    pub reason: TriggerReason,
    pub confidence: Confidence,
    pub signal_count: usize,
    /// False when the offer was suppressed
    pub mode_switch_offered: bool,
}

/// What the session decided for one response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub turn: usize,
    pub result: CompoundResult,
    /// Present the mode-switch offer now?
    pub offer: bool,
    /// Detection fired but the declined-offer threshold withheld the offer
    pub suppressed: bool,
}

impl TurnOutcome {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        match self.result.confidence() {
            Some(confidence) => format!(
                "{}● turn={} | trigger={} | signals={} | {}{}",
                confidence.color_code(),
                self.turn,
                confidence,
                self.result.signal_count,
                self.reason_code(),
                Confidence::color_reset()
            ),
            None => format!(
                "\x1b[90m○ turn={} | trigger=NONE | signals={}{}",
                self.turn,
                self.result.signal_count,
                Confidence::color_reset()
            ),
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "turn={} | trigger={} | confidence={} | signals={} | reason={} | offer={}",
            self.turn,
            self.result.fired(),
            self.result.confidence().map(|c| c.code()).unwrap_or("NONE"),
            self.result.signal_count,
            self.reason_code(),
            self.offer
        )
    }

    fn reason_code(&self) -> &'static str {
        self.result.reason().map(|r| r.code()).unwrap_or("none")
    }
}

/// Snapshot of a session's caller-side state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub turn_count: usize,
    pub declined_offers: u32,
    pub pending_offer: bool,
    pub suppressed: bool,
    pub handed_off: bool,
    pub cliff_signals: Vec<CliffRecord>,
}
