//! Core types for Cliffwatch

mod confidence;
mod detection;
mod compound;
mod constraints;
mod research;
mod output;

pub use confidence::{Confidence, SignalCategory, ImplicitSignal};
pub use detection::{DetectionResult, ImplicitDetectionResult};
pub use compound::{Trigger, TriggerReason, CompoundResult, HistoryEntry, SignalRecord};
pub use constraints::{
    Survey, ProjectInfo, SurveyorNotes, ConstraintProfile, TeamSize, Budget, Timeline,
    Experience, MaxComplexity, ComplexityViolation, ComplexityCheck, ViolationType,
};
pub use research::{ResearchableGap, ResearchPriority, GapType, ResearchResult};
pub use output::{CliffRecord, TurnOutcome, SessionStatus};
