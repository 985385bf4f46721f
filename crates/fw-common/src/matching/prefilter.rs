use crate::{MatchCriteria, ProjectCandidate, SkillSet, WorkerCandidate};

pub const OPEN_PROJECT_STATUS: &str = "open";

/// Hard constraints a worker must satisfy for a search.
///
/// Mirrors the candidate store query: available, active, hourly rate inside
/// the budget, location as a case-insensitive substring, timezone exact.
pub fn admits_worker(criteria: &MatchCriteria, worker: &WorkerCandidate) -> bool {
    if !worker.is_available || !worker.is_active {
        return false;
    }

    if worker.hourly_rate < criteria.budget_min || worker.hourly_rate > criteria.budget_max {
        return false;
    }

    if let Some(wanted) = non_blank(criteria.location.as_deref()) {
        let matches = worker
            .location
            .as_deref()
            .is_some_and(|loc| loc.to_lowercase().contains(&wanted.to_lowercase()));
        if !matches {
            return false;
        }
    }

    if let Some(wanted) = non_blank(criteria.timezone.as_deref()) {
        if worker.timezone.as_deref() != Some(wanted) {
            return false;
        }
    }

    true
}

/// Open projects sharing at least one skill with the worker.
pub fn admits_project(worker_skills: &SkillSet, project: &ProjectCandidate) -> bool {
    project.status == OPEN_PROJECT_STATUS && project.skills.iter().any(|s| worker_skills.contains(s))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
