//! Confidence tiers and implicit signal categories

use serde::{Deserialize, Serialize};

/// Confidence tier attached to a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    /// Explicit admission, a single match is decisive
    High,
    /// Implicit cue, needs accumulation before acting
    Medium,
}

impl Confidence {
    /// Wire string ("HIGH" / "MEDIUM")
    pub fn code(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Confidence::High => "\x1b[31m",   // Red
            Confidence::Medium => "\x1b[33m", // Yellow
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    fn medium() -> Self {
        Confidence::Medium
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Category of an implicit signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    /// "maybe", "perhaps", "i guess"
    Hedging,
    /// Disfluencies: "um", "hmm", "let me think"
    QualityDegradation,
    /// Soft hand-offs: "whatever works", "you pick"
    Deferral,
}

impl SignalCategory {
    /// Scan order used by the implicit detector
    pub const ALL: [SignalCategory; 3] = [
        SignalCategory::Hedging,
        SignalCategory::QualityDegradation,
        SignalCategory::Deferral,
    ];

    /// Wire string
    pub fn code(&self) -> &'static str {
        match self {
            SignalCategory::Hedging => "hedging",
            SignalCategory::QualityDegradation => "quality_degradation",
            SignalCategory::Deferral => "deferral",
        }
    }

    /// Name of the catalog list feeding this category
    pub fn catalog_key(&self) -> &'static str {
        match self {
            SignalCategory::Hedging => "hedging",
            SignalCategory::QualityDegradation => "quality_markers",
            SignalCategory::Deferral => "deferrals",
        }
    }
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One implicit signal hit inside a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplicitSignal {
    /// The matched catalog phrase
    pub signal: String,
    pub category: SignalCategory,
    /// Always MEDIUM; defaulted so caller-built history records may omit it
    #[serde(default = "Confidence::medium")]
    pub confidence: Confidence,
}

impl ImplicitSignal {
    pub fn new(signal: impl Into<String>, category: SignalCategory) -> Self {
        Self {
            signal: signal.into(),
            category,
            confidence: Confidence::Medium,
        }
    }
}
