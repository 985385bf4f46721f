//! Collaborator contracts the engine consumes.
//!
//! Stores own retrieval and hard filtering; the engine only scores what they
//! return. Handles are passed in explicitly (`Arc<dyn CandidateStore>`).

pub mod memory;

use async_trait::async_trait;
use deadpool_postgres::PoolError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_postgres::Error as PgError;

use crate::{MatchCriteria, ProjectCandidate, SkillSet, WorkerCandidate};

pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
    #[error("failed to map row: {0}")]
    Mapping(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillUsage {
    pub skill: String,
    pub count: i64,
}

#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Workers satisfying the criteria's hard filters, ordered by rating then
    /// completed jobs, both descending.
    async fn fetch_workers(
        &self,
        criteria: &MatchCriteria,
    ) -> Result<Vec<WorkerCandidate>, StoreError>;

    async fn fetch_worker(&self, worker_id: &str) -> Result<Option<WorkerCandidate>, StoreError>;

    /// Open projects sharing at least one of `skills`, newest first.
    async fn fetch_open_projects(
        &self,
        skills: &SkillSet,
    ) -> Result<Vec<ProjectCandidate>, StoreError>;

    async fn fetch_project(&self, project_id: &str)
    -> Result<Option<ProjectCandidate>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
pub trait AggregationStore: Send + Sync {
    /// Skill usage counts, most used first, at most `limit` rows.
    async fn popular_skills(&self, limit: usize) -> Result<Vec<SkillUsage>, StoreError>;
}
