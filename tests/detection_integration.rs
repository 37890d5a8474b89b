//! Integration tests for cliff detection
//!
//! Tests the full path: response → explicit/implicit detectors → compound analyzer

use cliffwatch::core::{CompoundAnalyzer, ExplicitDetector, ImplicitDetector};
use cliffwatch::core::catalog::EXPLICIT_CLIFF_SIGNALS;
use cliffwatch::types::{Confidence, HistoryEntry, ImplicitSignal, SignalCategory, Trigger, TriggerReason};
use pretty_assertions::assert_eq;

fn hedges(n: usize) -> HistoryEntry {
    HistoryEntry::new(
        (0..n).map(|_| ImplicitSignal::new("maybe", SignalCategory::Hedging)).collect(),
    )
}

/// Every explicit phrase triggers, whatever the surrounding text or history
#[test]
fn test_every_explicit_phrase_triggers() {
    let explicit = ExplicitDetector::new();
    let analyzer = CompoundAnalyzer::new();
    let histories = [vec![], vec![hedges(0)], vec![hedges(3), hedges(1)]];

    for phrase in EXPLICIT_CLIFF_SIGNALS {
        let response = format!("Well, for the hosting part {} honestly", phrase.to_uppercase());
        let detection = explicit.detect(&response);
        assert!(detection.detected, "not detected: {}", phrase);
        assert_eq!(detection.confidence, Some(Confidence::High));

        for history in &histories {
            let result = analyzer.analyze(&response, history);
            assert_eq!(result.reason(), Some(TriggerReason::ExplicitSignal), "phrase: {}", phrase);
            assert_eq!(result.confidence(), Some(Confidence::High));
        }
    }
}

/// Responses with no catalog phrase never trigger
#[test]
fn test_plain_answers_never_trigger() {
    let answers = [
        "yes",
        "looks good",
        "correct",
        "that's right",
        "The project is a task manager",
        "Users can create tasks",
        "I want to use PostgreSQL for the database",
    ];
    let analyzer = CompoundAnalyzer::new();

    for answer in answers {
        assert!(!ExplicitDetector::new().detect(answer).detected, "explicit in {:?}", answer);
        assert!(!ImplicitDetector::new().detect(answer).detected, "implicit in {:?}", answer);
        let result = analyzer.analyze(answer, &[]);
        assert_eq!(result.trigger, Trigger::NoTrigger);
        assert_eq!(result.signal_count, 0);
    }
}

/// Same input, same output
#[test]
fn test_idempotence() {
    let analyzer = CompoundAnalyzer::new();
    let history = vec![hedges(1)];
    let text = "Hmm, I guess whatever works";

    assert_eq!(analyzer.analyze(text, &history), analyzer.analyze(text, &history));
    assert_eq!(ExplicitDetector::new().detect(text), ExplicitDetector::new().detect(text));
    assert_eq!(ImplicitDetector::new().detect(text), ImplicitDetector::new().detect(text));
}

/// Implicit detection collects across categories
#[test]
fn test_implicit_is_exhaustive() {
    let result = ImplicitDetector::new().detect("um... maybe?");
    assert!(result.signals.len() >= 2);
    let categories: Vec<SignalCategory> = result.signals.iter().map(|s| s.category).collect();
    assert!(categories.contains(&SignalCategory::Hedging));
    assert!(categories.contains(&SignalCategory::QualityDegradation));
}

/// Entries older than the last three turns are ignored
#[test]
fn test_window_excludes_old_turns() {
    let history = vec![hedges(1), hedges(1), hedges(0), hedges(0), hedges(0)];
    let result = CompoundAnalyzer::new().analyze("Maybe", &history);
    assert_eq!(result.signal_count, 1);
    assert!(!result.fired());
}

/// Exactly one combined signal does not trigger, exactly two does
#[test]
fn test_threshold_boundary() {
    let analyzer = CompoundAnalyzer::new();

    let one = analyzer.analyze("Sure, Postgres", &[hedges(1)]);
    assert_eq!(one.signal_count, 1);
    assert_eq!(one.trigger, Trigger::NoTrigger);

    let two = analyzer.analyze("Probably Postgres", &[hedges(1)]);
    assert_eq!(two.signal_count, 2);
    assert_eq!(two.reason(), Some(TriggerReason::CompoundImplicit));
    assert_eq!(two.confidence(), Some(Confidence::Medium));
}

/// Case does not change the result
#[test]
fn test_case_insensitive_results() {
    let upper = ExplicitDetector::new().detect("I DON'T KNOW");
    let lower = ExplicitDetector::new().detect("i don't know");
    assert_eq!(upper.signal, lower.signal);
    assert_eq!(upper.confidence, lower.confidence);
    assert_eq!(upper.detected, lower.detected);
}

/// Uncertainty building up over a survey triggers within four answers
#[test]
fn test_gradual_uncertainty_accumulation() {
    let responses = [
        "I want to build a task management app",
        "React seems good, maybe Next.js",
        "For the database, hmm, PostgreSQL I guess",
        "Authentication... um, whatever works really",
    ];
    let analyzer = CompoundAnalyzer::new();
    let mut history: Vec<HistoryEntry> = Vec::new();
    let mut triggers = Vec::new();

    for response in responses {
        let implicit = ImplicitDetector::new().detect(response);
        let result = analyzer.analyze(response, &history);
        triggers.push(result.trigger);
        history.push(implicit.into());
    }

    assert_eq!(triggers[0], Trigger::NoTrigger);
    assert_eq!(triggers[1], Trigger::NoTrigger);
    assert_eq!(triggers[2], Trigger::CompoundImplicit);
    assert_eq!(triggers[3], Trigger::CompoundImplicit);
}

/// Compound result JSON matches the documented record
#[test]
fn test_compound_json_shape() {
    let result = CompoundAnalyzer::new().analyze("I'm not sure", &[]);
    let json: serde_json::Value = serde_json::to_value(&result).unwrap();
    assert_eq!(json["trigger"], true);
    assert_eq!(json["reason"], "explicit_signal");
    assert_eq!(json["confidence"], "HIGH");
    assert_eq!(json["signals"], serde_json::json!([]));
    assert!(json["signalCount"].is_u64());
}
