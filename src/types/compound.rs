//! Compound detection: trigger decision and caller-owned history

use serde::{Deserialize, Serialize};
use crate::types::{Confidence, ImplicitDetectionResult, ImplicitSignal};

/// Why a compound analysis fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerReason {
    /// An explicit phrase in the current response
    ExplicitSignal,
    /// Two or more implicit signals across the window
    CompoundImplicit,
}

impl TriggerReason {
    pub fn code(&self) -> &'static str {
        match self {
            TriggerReason::ExplicitSignal => "explicit_signal",
            TriggerReason::CompoundImplicit => "compound_implicit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TriggerReason::ExplicitSignal => "User explicitly admitted a knowledge limit",
            TriggerReason::CompoundImplicit => "Uncertainty accumulated over recent answers",
        }
    }
}

impl std::fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Outcome tier of a compound analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Explicit signal, HIGH confidence
    Explicit,
    /// Accumulated implicit signals, MEDIUM confidence
    CompoundImplicit,
    /// Below threshold
    NoTrigger,
}

impl Trigger {
    pub fn fired(&self) -> bool {
        !matches!(self, Trigger::NoTrigger)
    }

    pub fn reason(&self) -> Option<TriggerReason> {
        match self {
            Trigger::Explicit => Some(TriggerReason::ExplicitSignal),
            Trigger::CompoundImplicit => Some(TriggerReason::CompoundImplicit),
            Trigger::NoTrigger => None,
        }
    }

    pub fn confidence(&self) -> Option<Confidence> {
        match self {
            Trigger::Explicit => Some(Confidence::High),
            Trigger::CompoundImplicit => Some(Confidence::Medium),
            Trigger::NoTrigger => None,
        }
    }
}

impl From<Option<TriggerReason>> for Trigger {
    fn from(reason: Option<TriggerReason>) -> Self {
        match reason {
            Some(TriggerReason::ExplicitSignal) => Trigger::Explicit,
            Some(TriggerReason::CompoundImplicit) => Trigger::CompoundImplicit,
            None => Trigger::NoTrigger,
        }
    }
}

/// Result of compound analysis on one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CompoundWire", from = "CompoundWire")]
pub struct CompoundResult {
    pub trigger: Trigger,
    /// Current implicit signals plus those in the history window
    pub signal_count: usize,
    /// Implicit signals of the current response (empty on explicit trigger)
    pub signals: Vec<ImplicitSignal>,
}

impl CompoundResult {
    pub fn fired(&self) -> bool {
        self.trigger.fired()
    }

    pub fn reason(&self) -> Option<TriggerReason> {
        self.trigger.reason()
    }

    pub fn confidence(&self) -> Option<Confidence> {
        self.trigger.confidence()
    }
}

/// Flat JSON shape: `{trigger, reason, confidence, signalCount, signals}`
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompoundWire {
    trigger: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<TriggerReason>,
    confidence: Option<Confidence>,
    signal_count: usize,
    #[serde(default)]
    signals: Vec<ImplicitSignal>,
}

impl From<CompoundResult> for CompoundWire {
    fn from(result: CompoundResult) -> Self {
        Self {
            trigger: result.trigger.fired(),
            reason: result.trigger.reason(),
            confidence: result.trigger.confidence(),
            signal_count: result.signal_count,
            signals: result.signals,
        }
    }
}

impl From<CompoundWire> for CompoundResult {
    fn from(wire: CompoundWire) -> Self {
        Self {
            trigger: Trigger::from(wire.reason),
            signal_count: wire.signal_count,
            signals: wire.signals,
        }
    }
}

/// One signal in a caller's history record
///
/// Records this crate produced parse as `Typed`; anything else the caller
/// stored is kept as-is and still counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalRecord {
    Typed(ImplicitSignal),
    Other(serde_json::Value),
}

impl SignalRecord {
    pub fn as_signal(&self) -> Option<&ImplicitSignal> {
        match self {
            SignalRecord::Typed(signal) => Some(signal),
            SignalRecord::Other(_) => None,
        }
    }
}

impl From<ImplicitSignal> for SignalRecord {
    fn from(signal: ImplicitSignal) -> Self {
        SignalRecord::Typed(signal)
    }
}

/// One prior turn, as remembered by the caller
///
/// Only the number of signals matters to compound detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(default)]
    pub implicit_signals: Vec<SignalRecord>,
}

impl HistoryEntry {
    pub fn new(implicit_signals: Vec<ImplicitSignal>) -> Self {
        Self {
            implicit_signals: implicit_signals.into_iter().map(SignalRecord::from).collect(),
        }
    }

    pub fn signal_count(&self) -> usize {
        self.implicit_signals.len()
    }
}

impl From<ImplicitDetectionResult> for HistoryEntry {
    fn from(result: ImplicitDetectionResult) -> Self {
        Self::new(result.signals)
    }
}
