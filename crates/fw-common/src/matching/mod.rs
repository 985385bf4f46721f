pub mod pipeline;
pub mod prefilter;
pub mod scoring;
pub mod skills;
pub mod text_similarity;
pub mod weights;

pub use pipeline::{MatchResult, MatchingEngine, MatchingEngineConfig};
pub use scoring::{CompositeScorer, ScoreBreakdown};
pub use skills::{NormalizeBy, SkillOverlap, overlap};
pub use text_similarity::similarity;
pub use weights::{WeightTable, WeightTableError};
