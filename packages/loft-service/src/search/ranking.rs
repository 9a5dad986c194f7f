pub mod heuristic;
pub mod semantic;

pub use heuristic::ScoredCandidate;
pub use semantic::SemanticReranker;
