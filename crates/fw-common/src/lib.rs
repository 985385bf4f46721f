pub mod db;
pub mod error;
pub mod logging;
pub mod matching;
pub mod service;
pub mod store;
pub mod taxonomy;

use serde::{Deserialize, Serialize};

pub use error::MatchError;
pub use matching::skills::SkillSet;

/// Characters of a project description kept for display.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Anything the ranking pipeline can score.
///
/// Absent ratings and experience counts are resolved to zero when the
/// candidate is mapped from storage, so the accessors here are total.
pub trait Candidate {
    fn id(&self) -> &str;
    fn skills(&self) -> &SkillSet;
    fn free_text(&self) -> Option<&str>;

    fn rating(&self) -> f64 {
        0.0
    }

    fn experience_count(&self) -> u32 {
        0
    }

    /// Shape the candidate for presentation once it has been scored.
    fn into_display(self) -> Self
    where
        Self: Sized,
    {
        self
    }
}

// Commonly used data models for matching functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerCandidate {
    pub id: String,
    pub skills: SkillSet,
    pub bio: Option<String>,
    pub rating: f64,
    pub completed_jobs: u32,
    pub review_count: u32,
    pub hourly_rate: f64,
    pub currency: Option<String>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub is_available: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectCandidate {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills: SkillSet,
    pub budget: Option<f64>,
    pub status: String,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
}

impl Candidate for WorkerCandidate {
    fn id(&self) -> &str {
        &self.id
    }

    fn skills(&self) -> &SkillSet {
        &self.skills
    }

    fn free_text(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    fn rating(&self) -> f64 {
        self.rating
    }

    fn experience_count(&self) -> u32 {
        self.completed_jobs
    }
}

impl Candidate for ProjectCandidate {
    fn id(&self) -> &str {
        &self.id
    }

    fn skills(&self) -> &SkillSet {
        &self.skills
    }

    fn free_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn into_display(mut self) -> Self {
        self.description = Some(
            self.description
                .map(|text| text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect())
                .unwrap_or_default(),
        );
        self
    }
}

fn default_limit() -> usize {
    20
}

/// Worker search request. Hard filters are applied by the candidate store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCriteria {
    #[serde(alias = "skills")]
    pub required_skills: SkillSet,
    pub budget_min: f64,
    pub budget_max: f64,
    /// short | medium | long. Carried through but not used as a filter.
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl MatchCriteria {
    pub fn new(required_skills: SkillSet, budget_min: f64, budget_max: f64, limit: usize) -> Self {
        Self {
            required_skills,
            budget_min,
            budget_max,
            duration: None,
            location: None,
            timezone: None,
            limit,
        }
    }

    /// Rejects a zero limit and non-finite budget bounds. An inverted budget
    /// range is valid and simply admits no worker.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.limit == 0 {
            return Err(MatchError::InvalidCriteria("limit must be positive".into()));
        }
        if !self.budget_min.is_finite() || !self.budget_max.is_finite() {
            return Err(MatchError::InvalidCriteria("budget bounds must be finite".into()));
        }
        Ok(())
    }
}
