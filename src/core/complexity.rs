//! Complexity guard: flag over-engineered recommendations for minimal projects
//!
//! The ceiling is only enforced when the profile says `minimal`. Standard and
//! enterprise profiles pass unconditionally.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::types::{
    ComplexityCheck, ComplexityViolation, ConstraintProfile, MaxComplexity, ViolationType,
};

/// One row of the over-engineering table
#[derive(Debug)]
pub struct OverEngineeringPattern {
    pub pattern: Regex,
    pub reason: &'static str,
    pub suggestion: &'static str,
}

impl OverEngineeringPattern {
    fn new(pattern: &str, reason: &'static str, suggestion: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            reason,
            suggestion,
        }
    }

    fn violation(&self) -> ComplexityViolation {
        ComplexityViolation {
            kind: ViolationType::OverEngineering,
            reason: self.reason.to_string(),
            suggestion: self.suggestion.to_string(),
        }
    }
}

lazy_static! {
    /// Checked in order; every matching row yields a violation
    pub static ref OVER_ENGINEERING_PATTERNS: Vec<OverEngineeringPattern> = vec![
        OverEngineeringPattern::new(
            r"(?i)microservice",
            "Microservices over-complex for solo/MVP",
            "Consider simpler monolithic approach",
        ),
        OverEngineeringPattern::new(
            r"(?i)kubernetes|k8s",
            "K8s over-complex for solo/MVP",
            "Consider simpler monolithic approach with managed hosting (Vercel, Railway)",
        ),
        OverEngineeringPattern::new(
            r"(?i)event.?driven.*architecture",
            "Event-driven architecture over-complex for MVP",
            "Consider simpler monolithic approach with request/response patterns",
        ),
        OverEngineeringPattern::new(
            r"(?i)distributed.*system",
            "Distributed systems over-complex for solo",
            "Consider simpler monolithic approach",
        ),
    ];
}

/// Validates recommendations against a constraint profile
#[derive(Debug, Default, Clone, Copy)]
pub struct ComplexityGuard;

impl ComplexityGuard {
    pub fn new() -> Self {
        Self
    }

    /// Check a recommendation; valid iff no pattern matched
    pub fn check(&self, recommendation: &str, constraints: &ConstraintProfile) -> ComplexityCheck {
        if constraints.max_complexity != MaxComplexity::Minimal {
            debug!(ceiling = ?constraints.max_complexity, "complexity ceiling not enforced");
            return ComplexityCheck::from_violations(Vec::new());
        }

        let violations: Vec<ComplexityViolation> = OVER_ENGINEERING_PATTERNS
            .iter()
            .filter(|row| row.pattern.is_match(recommendation))
            .map(OverEngineeringPattern::violation)
            .collect();

        if !violations.is_empty() {
            warn!(count = violations.len(), "recommendation exceeds complexity ceiling");
        }
        ComplexityCheck::from_violations(violations)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn minimal() -> ConstraintProfile {
        ConstraintProfile::with_ceiling(MaxComplexity::Minimal)
    }

    #[test]
    fn test_standard_profile_is_not_enforced() {
        let guard = ComplexityGuard::new();
        for ceiling in [MaxComplexity::Standard, MaxComplexity::Enterprise] {
            let result = guard.check(
                "Deploy via Kubernetes microservices",
                &ConstraintProfile::with_ceiling(ceiling),
            );
            assert_eq!(result, ComplexityCheck { valid: true, violations: Vec::new() });
        }
    }

    #[test]
    fn test_microservices_flagged() {
        let result = ComplexityGuard::new().check("Deploy as microservices architecture", &minimal());
        assert!(!result.valid);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].kind, ViolationType::OverEngineering);
        assert!(result.violations[0].reason.contains("Microservices"));
    }

    #[test]
    fn test_multiple_patterns_match() {
        let result = ComplexityGuard::new().check(
            "Run an event-driven architecture on K8S as a distributed system of microservices",
            &minimal(),
        );
        let reasons: Vec<&str> = result.violations.iter().map(|v| v.reason.as_str()).collect();
        assert_eq!(
            reasons,
            vec![
                "Microservices over-complex for solo/MVP",
                "K8s over-complex for solo/MVP",
                "Event-driven architecture over-complex for MVP",
                "Distributed systems over-complex for solo",
            ]
        );
    }

    #[test]
    fn test_event_driven_spelling_variants() {
        let guard = ComplexityGuard::new();
        assert!(!guard.check("An EventDriven Architecture", &minimal()).valid);
        assert!(!guard.check("event driven messaging architecture", &minimal()).valid);
        assert!(guard.check("event sourcing only", &minimal()).valid);
    }

    #[test]
    fn test_simple_recommendation_is_valid() {
        let result = ComplexityGuard::new().check("A single Rails app on Heroku with Postgres", &minimal());
        assert!(result.valid);
        assert!(result.violations.is_empty());
    }
}
