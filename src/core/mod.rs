//! Core modules for Cliffwatch

pub mod catalog;
pub mod explicit;
pub mod implicit;
pub mod compound;
pub mod constraints;
pub mod complexity;
pub mod research;
pub mod session;
pub mod api;

pub use catalog::SignalCatalog;
pub use explicit::ExplicitDetector;
pub use implicit::ImplicitDetector;
pub use compound::{CompoundAnalyzer, windowed_signal_count};
pub use constraints::{ConstraintExtractor, load_survey, load_surveyor_notes};
pub use complexity::ComplexityGuard;
pub use research::{ResearchGapFinder, build_search_query, format_research_findings};
pub use session::{OfferPolicy, SurveySession};
pub use api::{create_router, run_server};
