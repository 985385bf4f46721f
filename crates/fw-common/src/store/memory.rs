use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;

use super::{AggregationStore, CandidateStore, SkillUsage, StoreError};
use crate::matching::prefilter::{admits_project, admits_worker};
use crate::{MatchCriteria, ProjectCandidate, SkillSet, WorkerCandidate};

/// Store backed by vectors, applying the same predicates and ordering as the
/// Postgres store. Projects are kept newest first in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    workers: Vec<WorkerCandidate>,
    projects: Vec<ProjectCandidate>,
    outage: Option<String>,
}

impl InMemoryStore {
    pub fn new(workers: Vec<WorkerCandidate>, projects: Vec<ProjectCandidate>) -> Self {
        Self {
            workers,
            projects,
            outage: None,
        }
    }

    /// A store whose every call fails with `StoreError::Unavailable`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            outage: Some(reason.into()),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.outage {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CandidateStore for InMemoryStore {
    async fn fetch_workers(
        &self,
        criteria: &MatchCriteria,
    ) -> Result<Vec<WorkerCandidate>, StoreError> {
        self.check()?;

        let mut workers: Vec<_> = self
            .workers
            .iter()
            .filter(|worker| admits_worker(criteria, worker))
            .cloned()
            .collect();

        workers.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
                .then(b.completed_jobs.cmp(&a.completed_jobs))
        });

        Ok(workers)
    }

    async fn fetch_worker(&self, worker_id: &str) -> Result<Option<WorkerCandidate>, StoreError> {
        self.check()?;
        Ok(self.workers.iter().find(|w| w.id == worker_id).cloned())
    }

    async fn fetch_open_projects(
        &self,
        skills: &SkillSet,
    ) -> Result<Vec<ProjectCandidate>, StoreError> {
        self.check()?;
        Ok(self
            .projects
            .iter()
            .filter(|project| admits_project(skills, project))
            .cloned()
            .collect())
    }

    async fn fetch_project(
        &self,
        project_id: &str,
    ) -> Result<Option<ProjectCandidate>, StoreError> {
        self.check()?;
        Ok(self.projects.iter().find(|p| p.id == project_id).cloned())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check()
    }
}

#[async_trait]
impl AggregationStore for InMemoryStore {
    async fn popular_skills(&self, limit: usize) -> Result<Vec<SkillUsage>, StoreError> {
        self.check()?;

        let mut counts: HashMap<&str, i64> = HashMap::new();
        for worker in &self.workers {
            for skill in worker.skills.iter() {
                *counts.entry(skill).or_default() += 1;
            }
        }

        let mut usage: Vec<_> = counts
            .into_iter()
            .map(|(skill, count)| SkillUsage {
                skill: skill.to_string(),
                count,
            })
            .collect();
        usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.skill.cmp(&b.skill)));
        usage.truncate(limit);

        Ok(usage)
    }
}
