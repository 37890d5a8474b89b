//! Signal catalog: the fixed phrase lists behind both detectors
//!
//! The built-in lists are static. A JSON file can replace any of them; the
//! detectors borrow whichever catalog they are given and never mutate it.
//!
//! File format (every key optional, missing keys keep the built-in list):
//!
//! ```json
//! {
//!   "explicit": ["i don't know", "no idea"],
//!   "hedging": ["maybe"],
//!   "quality_markers": ["um"],
//!   "deferrals": ["you pick"]
//! }
//! ```

use std::path::Path;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliffError, Result};
use crate::types::SignalCategory;

// =============================================================================
// EXPLICIT TIER (HIGH confidence)
// First match wins, so longer phrases that contain a shorter entry must come
// before it to be reported.
// =============================================================================

pub const EXPLICIT_CLIFF_SIGNALS: &[&str] = &[
    "i don't know",
    "i dont know",
    "no idea",
    "i'm not sure",
    "i'm not technical enough",
    "whatever you think",
    "whatever you think is best",
    "you decide",
    "take it from here",
    "i'll defer to you",
    "that's beyond my expertise",
    "beyond my expertise",
    "not my area",
    "out of my depth",
];

// =============================================================================
// IMPLICIT TIER (MEDIUM confidence)
// Plain substring matches: "um" also hits "medium", "uh" hits "uhh".
// =============================================================================

pub const HEDGING_SIGNALS: &[&str] = &[
    "maybe",
    "perhaps",
    "possibly",
    "i guess",
    "i think maybe",
    "not sure if",
    "could be",
    "might be",
    "probably",
    "i suppose",
];

pub const QUALITY_MARKERS: &[&str] = &[
    "um",
    "uh",
    "hmm",
    "well...",
    "let me think",
    "that's a good question",
    "honestly i'm not",
];

pub const DEFERRAL_SIGNALS: &[&str] = &[
    "i'll figure it out later",
    "we can decide later",
    "whatever works",
    "whatever is easier",
    "any of those",
    "you pick",
    "dealer's choice",
];

lazy_static! {
    static ref BUILTIN: SignalCatalog = SignalCatalog {
        explicit: to_owned(EXPLICIT_CLIFF_SIGNALS),
        hedging: to_owned(HEDGING_SIGNALS),
        quality_markers: to_owned(QUALITY_MARKERS),
        deferrals: to_owned(DEFERRAL_SIGNALS),
    };
}

/// Ordered phrase lists for the explicit tier and each implicit category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalCatalog {
    explicit: Vec<String>,
    hedging: Vec<String>,
    quality_markers: Vec<String>,
    deferrals: Vec<String>,
}

/// On-disk shape of a catalog override
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    explicit: Option<Vec<String>>,
    hedging: Option<Vec<String>>,
    quality_markers: Option<Vec<String>>,
    deferrals: Option<Vec<String>>,
}

impl Default for SignalCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl SignalCatalog {
    /// The shared built-in catalog
    pub fn builtin() -> &'static SignalCatalog {
        &BUILTIN
    }

    /// Explicit phrases in match order
    pub fn explicit(&self) -> &[String] {
        &self.explicit
    }

    /// Implicit phrases for one category, in match order
    pub fn implicit(&self, category: SignalCategory) -> &[String] {
        match category {
            SignalCategory::Hedging => &self.hedging,
            SignalCategory::QualityDegradation => &self.quality_markers,
            SignalCategory::Deferral => &self.deferrals,
        }
    }

    /// Total number of implicit phrases across categories
    pub fn implicit_len(&self) -> usize {
        self.hedging.len() + self.quality_markers.len() + self.deferrals.len()
    }

    /// Parse a catalog override; `context` names the source in errors
    pub fn from_json_str(json: &str, context: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CliffError::json(context, e))?;
        let builtin = Self::builtin();

        let catalog = Self {
            explicit: merge_list("explicit", file.explicit, &builtin.explicit)?,
            hedging: merge_category(SignalCategory::Hedging, file.hedging, builtin)?,
            quality_markers: merge_category(
                SignalCategory::QualityDegradation,
                file.quality_markers,
                builtin,
            )?,
            deferrals: merge_category(SignalCategory::Deferral, file.deferrals, builtin)?,
        };

        debug!(
            source = context,
            explicit = catalog.explicit.len(),
            implicit = catalog.implicit_len(),
            "loaded signal catalog"
        );
        Ok(catalog)
    }

    /// Load a catalog override from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CliffError::io(path, e))?;
        Self::from_json_str(&json, &path.display().to_string())
    }
}

fn to_owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}

fn merge_category(
    category: SignalCategory,
    list: Option<Vec<String>>,
    builtin: &SignalCatalog,
) -> Result<Vec<String>> {
    merge_list(category.catalog_key(), list, builtin.implicit(category))
}

/// Normalize an override list, or keep the built-in one when absent
fn merge_list(
    key: &'static str,
    list: Option<Vec<String>>,
    fallback: &[String],
) -> Result<Vec<String>> {
    let Some(list) = list else {
        return Ok(fallback.to_vec());
    };

    // Empty phrases would match every response
    let phrases: Vec<String> = list
        .into_iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();

    if phrases.is_empty() {
        return Err(CliffError::EmptyCatalog(key));
    }
    Ok(phrases)
}

// =============================================================================
// TESTS
// =============================================================================
