//! Cliffwatch: knowledge-cliff detection for survey-driven design tools
//!
//! Pure heuristics over free text:
//! - explicit + implicit cliff signal detection
//! - compound detection over a short window of prior turns
//! - constraint extraction and complexity ceiling checks
//! - research gap discovery
//!
//! `SurveySession`, the CLI and the HTTP API are reference callers built on top.

pub mod core;
pub mod error;
pub mod types;

pub use error::{CliffError, Result};

// =============================================================================
// COMPOUND DETECTION
// =============================================================================

/// Combined implicit signals (current + window) needed to trigger
pub const COMPOUND_TRIGGER_THRESHOLD: usize = 2;

/// Number of prior turns counted toward compound detection
pub const HISTORY_WINDOW: usize = 3;

// =============================================================================
// CALLER POLICY
// =============================================================================

/// Declined offers after which mode-switch offers are withheld
pub const SUPPRESSION_THRESHOLD: u32 = 2;

/// Maximum researchable gaps returned per analysis
pub const MAX_RESEARCH_GAPS: usize = 3;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.2.0";
