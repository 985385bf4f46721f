use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use super::{
    prefilter::{admits_project, admits_worker},
    scoring::{CompositeScorer, ScoreBreakdown, experience_score, rating_score, round_score},
    skills::{NormalizeBy, SkillOverlap, overlap},
    text_similarity::similarity,
    weights::{
        PROJECT_RECOMMENDATION_WEIGHTS, SIMILARITY_WEIGHTS, WORKER_MATCHING_WEIGHTS, WeightTable,
        WeightTableError,
    },
};
use crate::{Candidate, MatchCriteria, ProjectCandidate, SkillSet, WorkerCandidate};

/// One ranked candidate. `score` is the rounded total used for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<C> {
    pub candidate_id: String,
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub breakdown: ScoreBreakdown,
    pub candidate: C,
}

#[derive(Debug, Clone)]
pub struct MatchingEngineConfig {
    /// Re-apply the store's hard filters before scoring.
    pub revalidate_candidates: bool,
    pub worker_weights: WeightTable,
    pub similarity_weights: WeightTable,
    pub recommendation_weights: WeightTable,
}

impl Default for MatchingEngineConfig {
    fn default() -> Self {
        Self {
            revalidate_candidates: false,
            worker_weights: WORKER_MATCHING_WEIGHTS,
            similarity_weights: SIMILARITY_WEIGHTS,
            recommendation_weights: PROJECT_RECOMMENDATION_WEIGHTS,
        }
    }
}

impl MatchingEngineConfig {
    pub fn from_env() -> Self {
        let revalidate_candidates = std::env::var("FW_REVALIDATE_CANDIDATES")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            revalidate_candidates,
            ..Self::default()
        }
    }
}

/// Stateless scoring and ranking over candidates handed in by the caller.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    revalidate_candidates: bool,
    worker_scorer: CompositeScorer,
    similarity_scorer: CompositeScorer,
    recommendation_scorer: CompositeScorer,
}

struct Scored<C> {
    total: f64,
    result: MatchResult<C>,
}

impl MatchingEngine {
    pub fn new(config: MatchingEngineConfig) -> Result<Self, WeightTableError> {
        Ok(Self {
            revalidate_candidates: config.revalidate_candidates,
            worker_scorer: CompositeScorer::new(config.worker_weights)?,
            similarity_scorer: CompositeScorer::new(config.similarity_weights)?,
            recommendation_scorer: CompositeScorer::new(config.recommendation_weights)?,
        })
    }

    /// Score workers against a search and return the best `criteria.limit`.
    ///
    /// Skill overlap is normalized by the requested skills; the text signal
    /// compares the requested skills with each worker's bio.
    pub fn rank_workers(
        &self,
        criteria: &MatchCriteria,
        workers: Vec<WorkerCandidate>,
    ) -> Vec<MatchResult<WorkerCandidate>> {
        let query_text = criteria.required_skills.joined();

        let scored = workers
            .into_iter()
            .filter(|worker| !self.revalidate_candidates || admits_worker(criteria, worker))
            .map(|worker| {
                let skill = overlap(&criteria.required_skills, &worker.skills, NormalizeBy::Want);
                let text = similarity(Some(&query_text), worker.free_text());
                let breakdown = ScoreBreakdown {
                    skill_score: skill.score,
                    text_score: text,
                    rating_score: rating_score(worker.rating()),
                    experience_score: experience_score(worker.experience_count()),
                    total_score: 0.0,
                };
                self.finish(&self.worker_scorer, breakdown, skill, worker)
            })
            .collect();

        rank(scored, criteria.limit)
    }

    /// Score projects for a worker's skills and return the best `limit`.
    ///
    /// Skill overlap is normalized by each project's own skill set.
    pub fn rank_projects_for_candidate(
        &self,
        candidate_skills: &SkillSet,
        projects: Vec<ProjectCandidate>,
        limit: usize,
    ) -> Vec<MatchResult<ProjectCandidate>> {
        let scored = projects
            .into_iter()
            .filter(|project| {
                !self.revalidate_candidates || admits_project(candidate_skills, project)
            })
            .map(|project| {
                let skill = overlap(candidate_skills, project.skills(), NormalizeBy::Have);
                let breakdown = ScoreBreakdown {
                    skill_score: skill.score,
                    ..ScoreBreakdown::default()
                };
                self.finish(&self.recommendation_scorer, breakdown, skill, project)
            })
            .collect();

        rank(scored, limit)
    }

    /// Similarity of `seeker` to `target`, rounded to three places.
    ///
    /// Overlap is normalized by the target's skills; a target without skills
    /// scores zero regardless of text.
    pub fn pairwise_score(&self, seeker: &impl Candidate, target: &impl Candidate) -> f64 {
        if target.skills().is_empty() {
            return 0.0;
        }

        let skill = overlap(seeker.skills(), target.skills(), NormalizeBy::Have);
        let breakdown = ScoreBreakdown {
            skill_score: skill.score,
            text_score: similarity(seeker.free_text(), target.free_text()),
            ..ScoreBreakdown::default()
        };

        round_score(self.similarity_scorer.compose(&breakdown))
    }

    fn finish<C: Candidate>(
        &self,
        scorer: &CompositeScorer,
        breakdown: ScoreBreakdown,
        skill: SkillOverlap,
        candidate: C,
    ) -> Scored<C> {
        let breakdown = scorer.score(breakdown);
        debug!(
            candidate_id = candidate.id(),
            table = scorer.weights().name,
            total = breakdown.total_score,
            "candidate scored"
        );

        Scored {
            total: breakdown.total_score,
            result: MatchResult {
                candidate_id: candidate.id().to_string(),
                score: round_score(breakdown.total_score),
                matched_skills: skill.matched.to_vec(),
                breakdown,
                candidate: candidate.into_display(),
            },
        }
    }
}

/// Stable sort on the unrounded total, so ties keep the store's order.
fn rank<C>(mut scored: Vec<Scored<C>>, limit: usize) -> Vec<MatchResult<C>> {
    scored.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored.into_iter().map(|s| s.result).collect()
}
