//! Survey input, constraint profile and complexity check results

use serde::{Deserialize, Serialize};

// =============================================================================
// SURVEY INPUT
// =============================================================================

/// The parts of a survey document the extractor reads
///
/// Everything is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Survey {
    #[serde(default)]
    pub project: Option<ProjectInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub one_liner: Option<String>,
    #[serde(default)]
    pub problem_statement: Option<String>,
}

impl Survey {
    /// Survey with only a one-liner set
    pub fn with_one_liner(one_liner: impl Into<String>) -> Self {
        Self {
            project: Some(ProjectInfo {
                one_liner: Some(one_liner.into()),
                ..ProjectInfo::default()
            }),
        }
    }
}

/// Handoff notes written by the surveyor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyorNotes {
    #[serde(default)]
    pub implicit_constraints: Option<Vec<String>>,
}

impl SurveyorNotes {
    pub fn new<I, S>(constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            implicit_constraints: Some(constraints.into_iter().map(Into::into).collect()),
        }
    }
}

// =============================================================================
// CONSTRAINT PROFILE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSize {
    Solo,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Constrained,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeline {
    Fast,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    Beginner,
    Intermediate,
    Expert,
    #[default]
    Unknown,
}

/// Ceiling for recommended architecture complexity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxComplexity {
    Minimal,
    #[default]
    Standard,
    Enterprise,
}

/// Constraints inferred from survey text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintProfile {
    #[serde(default)]
    pub team_size: TeamSize,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub experience: Experience,
    #[serde(default)]
    pub max_complexity: MaxComplexity,
}

impl ConstraintProfile {
    /// Profile with only the ceiling set
    pub fn with_ceiling(max_complexity: MaxComplexity) -> Self {
        Self {
            max_complexity,
            ..Self::default()
        }
    }
}

// =============================================================================
// COMPLEXITY CHECK
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    OverEngineering,
}

/// One over-engineering pattern found in a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityViolation {
    #[serde(rename = "type")]
    pub kind: ViolationType,
    pub reason: String,
    pub suggestion: String,
}

/// Result of checking a recommendation against a ceiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityCheck {
    pub valid: bool,
    pub violations: Vec<ComplexityViolation>,
}

impl ComplexityCheck {
    pub fn from_violations(violations: Vec<ComplexityViolation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_unknown_standard() {
        let json = serde_json::to_value(ConstraintProfile::default()).unwrap();
        assert_eq!(json["teamSize"], "unknown");
        assert_eq!(json["budget"], "unknown");
        assert_eq!(json["timeline"], "unknown");
        assert_eq!(json["experience"], "unknown");
        assert_eq!(json["maxComplexity"], "standard");
    }

    #[test]
    fn test_survey_tolerates_partial_json() {
        let survey: Survey = serde_json::from_str(r#"{"project":{"name":"Test"},"extra":1}"#).unwrap();
        let project = survey.project.unwrap();
        assert_eq!(project.name.as_deref(), Some("Test"));
        assert!(project.one_liner.is_none());

        let notes: SurveyorNotes = serde_json::from_str(r#"{"implicit_constraints":null}"#).unwrap();
        assert!(notes.implicit_constraints.is_none());
    }

    #[test]
    fn test_violation_type_field_name() {
        let violation = ComplexityViolation {
            kind: ViolationType::OverEngineering,
            reason: "r".into(),
            suggestion: "s".into(),
        };
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["type"], "over_engineering");
    }
}
