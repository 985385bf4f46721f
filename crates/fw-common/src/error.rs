use thiserror::Error;

use crate::matching::weights::WeightTableError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum MatchError {
    /// A weight table failed validation; the engine was never built.
    #[error("invalid matching configuration: {0}")]
    Configuration(#[from] WeightTableError),
    /// A candidate or aggregation store failed. Callers decide on retries.
    #[error("collaborator failure: {0}")]
    Collaborator(#[from] StoreError),
    #[error("invalid match criteria: {0}")]
    InvalidCriteria(String),
}

impl MatchError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, MatchError::Collaborator(_))
    }
}
