//! Constraint extractor: infer team, budget, timeline and experience from survey text

use std::path::Path;
use tracing::debug;

use crate::error::{CliffError, Result};
use crate::types::{
    Budget, ConstraintProfile, Experience, MaxComplexity, Survey, SurveyorNotes, TeamSize,
    Timeline,
};

pub const SOLO_DEVELOPER: &[&str] = &[
    "solo", "just me", "one person", "by myself", "side project", "personal project",
];

pub const BUDGET_CONSTRAINED: &[&str] = &[
    "budget", "cost", "cheap", "free tier", "limited resources", "affordable",
];

pub const TIME_CONSTRAINED: &[&str] = &[
    "quick", "fast", "mvp", "prototype", "deadline", "asap", "sprint",
];

pub const EXPERIENCE_BEGINNER: &[&str] = &[
    "first time", "learning", "new to", "beginner", "never used", "just started",
];

pub const EXPERIENCE_INTERMEDIATE: &[&str] = &[
    "some experience", "used before", "familiar with", "worked with",
];

pub const EXPERIENCE_EXPERT: &[&str] = &[
    "expert", "years of experience", "production at scale", "senior",
];

/// Derives a `ConstraintProfile` from survey text and surveyor notes
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstraintExtractor;

impl ConstraintExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract constraints; missing fields simply contribute no text
    pub fn extract(&self, survey: &Survey, notes: Option<&SurveyorNotes>) -> ConstraintProfile {
        let corpus = collect_text(survey, notes);
        let mut profile = ConstraintProfile::default();

        // Each ceiling rule applies independently
        if contains_any(&corpus, SOLO_DEVELOPER) {
            profile.team_size = TeamSize::Solo;
            profile.max_complexity = MaxComplexity::Minimal;
        }
        if contains_any(&corpus, BUDGET_CONSTRAINED) {
            profile.budget = Budget::Constrained;
            profile.max_complexity = MaxComplexity::Minimal;
        }
        if contains_any(&corpus, TIME_CONSTRAINED) {
            profile.timeline = Timeline::Fast;
            profile.max_complexity = MaxComplexity::Minimal;
        }

        // Experience: first level that matches
        profile.experience = if contains_any(&corpus, EXPERIENCE_BEGINNER) {
            Experience::Beginner
        } else if contains_any(&corpus, EXPERIENCE_INTERMEDIATE) {
            Experience::Intermediate
        } else if contains_any(&corpus, EXPERIENCE_EXPERT) {
            Experience::Expert
        } else {
            Experience::Unknown
        };

        debug!(?profile, "extracted constraints");
        profile
    }
}

/// Lowercased one-liner, problem statement and notes, space-joined
fn collect_text(survey: &Survey, notes: Option<&SurveyorNotes>) -> String {
    let mut texts: Vec<String> = Vec::new();

    if let Some(project) = &survey.project {
        texts.extend(project.one_liner.iter().map(|t| t.to_lowercase()));
        texts.extend(project.problem_statement.iter().map(|t| t.to_lowercase()));
    }

    if let Some(constraints) = notes.and_then(|n| n.implicit_constraints.as_ref()) {
        texts.extend(constraints.iter().map(|c| c.to_lowercase()));
    }

    texts.join(" ")
}

fn contains_any(corpus: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| corpus.contains(p))
}

// =============================================================================
// FILE LOADING
// =============================================================================

/// Read a survey JSON document
pub fn load_survey(path: impl AsRef<Path>) -> Result<Survey> {
    read_json(path.as_ref())
}

/// Read surveyor handoff notes
pub fn load_surveyor_notes(path: impl AsRef<Path>) -> Result<SurveyorNotes> {
    read_json(path.as_ref())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path).map_err(|e| CliffError::io(path, e))?;
    serde_json::from_str(&json).map_err(|e| CliffError::json(path.display().to_string(), e))
}

// =============================================================================
// TESTS
// =============================================================================
