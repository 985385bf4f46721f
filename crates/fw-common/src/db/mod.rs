pub mod pool;
pub mod projects;
pub mod skills;
pub mod util;
pub mod workers;

use std::time::Duration;

use async_trait::async_trait;
use deadpool_postgres::Timeouts;

use crate::store::{AggregationStore, CandidateStore, SkillUsage, StoreError};
use crate::{MatchCriteria, ProjectCandidate, SkillSet, WorkerCandidate};

pub use pool::{DbPoolError, PgPool, PoolSettings, create_pool};

/// Postgres-backed candidate and aggregation store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PING_TIMEOUT: Duration = Duration::from_secs(1);

#[async_trait]
impl CandidateStore for PgStore {
    async fn fetch_workers(
        &self,
        criteria: &MatchCriteria,
    ) -> Result<Vec<WorkerCandidate>, StoreError> {
        workers::fetch_workers(&self.pool, criteria).await
    }

    async fn fetch_worker(&self, worker_id: &str) -> Result<Option<WorkerCandidate>, StoreError> {
        workers::fetch_worker(&self.pool, worker_id).await
    }

    async fn fetch_open_projects(
        &self,
        skills: &SkillSet,
    ) -> Result<Vec<ProjectCandidate>, StoreError> {
        projects::fetch_open_projects(&self.pool, skills).await
    }

    async fn fetch_project(
        &self,
        project_id: &str,
    ) -> Result<Option<ProjectCandidate>, StoreError> {
        projects::fetch_project(&self.pool, project_id).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let timeouts = Timeouts {
            wait: Some(PING_TIMEOUT),
            create: Some(PING_TIMEOUT),
            recycle: Some(PING_TIMEOUT),
        };
        let client = self.pool.timeout_get(&timeouts).await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }
}

#[async_trait]
impl AggregationStore for PgStore {
    async fn popular_skills(&self, limit: usize) -> Result<Vec<SkillUsage>, StoreError> {
        skills::fetch_popular_skills(&self.pool, limit).await
    }
}
