use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Set of skill names. Matching is exact and case-sensitive; names are only
/// trimmed, and blank entries are dropped on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, skill: impl AsRef<str>) -> bool {
        let trimmed = skill.as_ref().trim();
        if trimmed.is_empty() {
            return false;
        }
        self.0.insert(trimmed.to_string())
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn is_subset(&self, other: &SkillSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Space separated rendering used as the query document for text similarity.
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(value: SkillSet) -> Self {
        value.0.into_iter().collect()
    }
}

/// Which side of the comparison supplies the overlap denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeBy {
    /// The requested skills (worker matching).
    Want,
    /// The candidate's own skills (project recommendation, pairwise score).
    Have,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillOverlap {
    pub score: f64,
    pub matched: SkillSet,
}

impl SkillOverlap {
    fn empty() -> Self {
        Self {
            score: 0.0,
            matched: SkillSet::new(),
        }
    }
}

/// Overlap of requested and possessed skills.
///
/// `score = |want ∩ have| / max(|selected|, 1)`. Either side empty yields zero.
pub fn overlap(want: &SkillSet, have: &SkillSet, normalize_by: NormalizeBy) -> SkillOverlap {
    if want.is_empty() || have.is_empty() {
        return SkillOverlap::empty();
    }

    let matched = want.intersection(have);
    let denominator = match normalize_by {
        NormalizeBy::Want => want.len(),
        NormalizeBy::Have => have.len(),
    }
    .max(1);

    SkillOverlap {
        score: matched.len() as f64 / denominator as f64,
        matched,
    }
}
