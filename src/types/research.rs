//! Research gap records

use serde::{Deserialize, Serialize};

/// How urgently a gap should be researched
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchPriority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapType {
    /// "X vs Y", "which database to use"
    TechnologyComparison,
    /// "best practices", "industry standard"
    BestPractices,
}

/// A diagnosis gap that a web search could fill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchableGap {
    pub gap: String,
    pub search_query: String,
    pub priority: ResearchPriority,
    #[serde(rename = "type")]
    pub gap_type: GapType,
}

/// Findings returned by a search, as handed back by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchResult {
    pub query: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub findings: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}
