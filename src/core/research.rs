//! Research gap finder: pick diagnosis gaps worth a web search

use chrono::Datelike;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::MAX_RESEARCH_GAPS;
use crate::types::{GapType, ResearchPriority, ResearchResult, ResearchableGap};

/// Phrases marking a gap as answerable by research
pub const RESEARCHABLE_INDICATORS: &[&str] = &[
    "best practices",
    "recommended",
    "industry standard",
    "current approach",
    "comparison",
    "vs",
    "alternatives",
    "trade-offs",
    "modern approach",
    "state of the art",
];

lazy_static! {
    static ref RE_TECH_COMPARISON: Regex = Regex::new(
        r"(?i)\bvs\b|comparison|which.*(?:to use|better)|choose between"
    ).unwrap();

    // Survey path prefixes such as "backend.database"
    static ref RE_PATH_PREFIX: Regex = Regex::new(
        r"backend\.|frontend\.|survey\.|rubric_coverage\."
    ).unwrap();

    static ref RE_GAP_DESCRIPTOR: Regex = Regex::new(
        r"(?i)not.?captured|missing|gap|unknown|unspecified"
    ).unwrap();

    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Finds researchable gaps and builds search queries for them
#[derive(Debug, Clone, Copy)]
pub struct ResearchGapFinder {
    year: i32,
}

impl Default for ResearchGapFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResearchGapFinder {
    /// Finder stamping queries with the current year
    pub fn new() -> Self {
        Self::for_year(chrono::Utc::now().year())
    }

    /// Finder with a fixed year
    pub fn for_year(year: i32) -> Self {
        Self { year }
    }

    /// Researchable gaps, high priority first, at most `MAX_RESEARCH_GAPS`
    pub fn identify<S: AsRef<str>>(&self, gaps: &[S]) -> Vec<ResearchableGap> {
        let mut researchable: Vec<ResearchableGap> = gaps
            .iter()
            .map(AsRef::as_ref)
            .filter_map(|gap| self.classify(gap))
            .collect();

        // Stable: equal priorities keep input order
        researchable.sort_by_key(|g| g.priority);
        researchable.truncate(MAX_RESEARCH_GAPS);

        debug!(input = gaps.len(), selected = researchable.len(), "research gaps");
        researchable
    }

    fn classify(&self, gap: &str) -> Option<ResearchableGap> {
        let lower = gap.to_lowercase();
        let indicated = RESEARCHABLE_INDICATORS.iter().any(|i| lower.contains(i));
        let comparison = RE_TECH_COMPARISON.is_match(gap);

        if !indicated && !comparison {
            return None;
        }

        let (priority, gap_type) = if comparison {
            (ResearchPriority::High, GapType::TechnologyComparison)
        } else {
            (ResearchPriority::Medium, GapType::BestPractices)
        };

        Some(ResearchableGap {
            gap: gap.to_string(),
            search_query: build_search_query(gap, self.year),
            priority,
            gap_type,
        })
    }
}

/// Strip survey paths and gap wording, then append a freshness suffix
pub fn build_search_query(gap: &str, year: i32) -> String {
    let cleaned = RE_PATH_PREFIX.replace_all(gap, "");
    let cleaned = RE_GAP_DESCRIPTOR.replace_all(&cleaned, "");
    let cleaned = RE_WHITESPACE.replace_all(&cleaned, " ");
    format!("{} best practices {}", cleaned.trim(), year)
}

/// Markdown block for a recommendation document
pub fn format_research_findings(result: &ResearchResult, original_gap: &str) -> String {
    format!(
        r#"
### Research Findings

**Gap addressed:** {gap}
**Query:** {query}
**Source:** {source}

**Key findings:**
{findings}

**Impact on recommendation:**
{impact}

---
"#,
        gap = original_gap,
        query = result.query,
        source = result.source.as_deref().unwrap_or("WebSearch"),
        findings = result.findings.as_deref().unwrap_or("No specific findings extracted"),
        impact = result
            .impact
            .as_deref()
            .unwrap_or("Research findings incorporated into recommendation confidence."),
    )
}

// =============================================================================
// TESTS
// =============================================================================
