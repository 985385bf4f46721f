use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::MatchError;
use crate::matching::{MatchResult, MatchingEngine};
use crate::store::{CandidateStore, StoreError};
use crate::{ProjectCandidate, WorkerCandidate};

/// Engine plus the candidate store it reads from.
///
/// Store failures propagate as `MatchError::Collaborator`; scoring itself
/// never fails once the engine has been built.
#[derive(Clone)]
pub struct MatchingService {
    engine: MatchingEngine,
    store: Arc<dyn CandidateStore>,
}

impl MatchingService {
    pub fn new(engine: MatchingEngine, store: Arc<dyn CandidateStore>) -> Self {
        Self { engine, store }
    }

    #[instrument(skip(self, criteria), fields(skills = criteria.required_skills.len(), limit = criteria.limit))]
    pub async fn rank_workers(
        &self,
        criteria: &crate::MatchCriteria,
    ) -> Result<Vec<MatchResult<WorkerCandidate>>, MatchError> {
        criteria.validate()?;

        let candidates = self.store.fetch_workers(criteria).await?;
        let fetched = candidates.len();
        let ranked = self.engine.rank_workers(criteria, candidates);

        info!(fetched, returned = ranked.len(), "workers ranked");
        Ok(ranked)
    }

    /// Projects for a stored worker. Unknown workers and workers without
    /// skills get an empty list.
    #[instrument(skip(self))]
    pub async fn recommend_projects(
        &self,
        worker_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchResult<ProjectCandidate>>, MatchError> {
        if limit == 0 {
            return Err(MatchError::InvalidCriteria("limit must be positive".into()));
        }

        let Some(worker) = self.store.fetch_worker(worker_id).await? else {
            return Ok(Vec::new());
        };
        if worker.skills.is_empty() {
            return Ok(Vec::new());
        }

        let projects = self.store.fetch_open_projects(&worker.skills).await?;
        let fetched = projects.len();
        let ranked = self
            .engine
            .rank_projects_for_candidate(&worker.skills, projects, limit);

        info!(fetched, returned = ranked.len(), "projects ranked");
        Ok(ranked)
    }

    /// Pairwise score for stored ids; a missing side scores 0.0.
    #[instrument(skip(self))]
    pub async fn similarity_score(
        &self,
        worker_id: &str,
        project_id: &str,
    ) -> Result<f64, MatchError> {
        let worker = self.store.fetch_worker(worker_id).await?;
        let project = self.store.fetch_project(project_id).await?;

        let (Some(worker), Some(project)) = (worker, project) else {
            return Ok(0.0);
        };

        Ok(self.engine.pairwise_score(&worker, &project))
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.health_check().await
    }
}
