use std::sync::LazyLock;

use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::instrument;

use crate::store::{AggregationStore, SkillUsage, StoreError};

/// Category catalog in display order. A skill may appear under more than one
/// category (Swift, Kotlin); lookups use the first category that lists it.
const CATALOG: &[(&str, &[&str])] = &[
    (
        "Development",
        &[
            "JavaScript", "TypeScript", "Python", "Go", "Rust", "Java", "C++", "Ruby", "PHP",
            "Swift", "Kotlin",
        ],
    ),
    (
        "Frontend",
        &[
            "React", "Vue", "Angular", "Next.js", "HTML", "CSS", "Tailwind", "Bootstrap", "Svelte",
        ],
    ),
    (
        "Backend",
        &[
            "Node.js", "Express", "FastAPI", "Django", "Flask", "Spring Boot", "NestJS", "GraphQL",
            "REST API",
        ],
    ),
    (
        "Database",
        &[
            "PostgreSQL", "MongoDB", "MySQL", "Redis", "Elasticsearch", "DynamoDB", "Firebase",
        ],
    ),
    (
        "DevOps",
        &[
            "Docker", "Kubernetes", "AWS", "GCP", "Azure", "Terraform", "CI/CD", "Linux", "Nginx",
        ],
    ),
    (
        "Mobile",
        &["React Native", "Flutter", "iOS", "Android", "Swift", "Kotlin"],
    ),
    (
        "Design",
        &["Figma", "UI/UX", "Adobe XD", "Photoshop", "Illustrator", "Sketch"],
    ),
    (
        "Data",
        &[
            "Machine Learning", "Data Science", "TensorFlow", "PyTorch", "Pandas", "SQL",
            "Data Analysis",
        ],
    ),
    (
        "Other",
        &[
            "Project Management", "Agile", "Scrum", "Technical Writing", "QA Testing",
        ],
    ),
];

static TAXONOMY: LazyLock<SkillsTaxonomy> = LazyLock::new(|| SkillsTaxonomy::from_catalog(CATALOG));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

pub struct CatalogView<'a>(&'a [SkillCategory]);

impl Serialize for CatalogView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in self.0 {
            map.serialize_entry(&category.name, &category.skills)?;
        }
        map.end()
    }
}

/// Read-only skill catalog, built once per process.
#[derive(Debug, Clone)]
pub struct SkillsTaxonomy {
    categories: Vec<SkillCategory>,
    all_skills: Vec<String>,
}

impl SkillsTaxonomy {
    /// The built-in catalog.
    pub fn global() -> &'static SkillsTaxonomy {
        &TAXONOMY
    }

    pub fn from_catalog(catalog: &[(&str, &[&str])]) -> Self {
        let categories: Vec<_> = catalog
            .iter()
            .map(|(name, skills)| SkillCategory {
                name: name.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        let all_skills = categories
            .iter()
            .flat_map(|c| c.skills.iter().cloned())
            .collect();

        Self {
            categories,
            all_skills,
        }
    }

    /// Case-insensitive substring search, sorted lexicographically.
    ///
    /// Skills listed under several categories are reported once.
    pub fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut matches: Vec<_> = self
            .all_skills
            .iter()
            .filter(|skill| skill.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort();
        matches.dedup();
        matches.truncate(limit);
        matches
    }

    /// Other members of the first category listing `skill` (exact match).
    pub fn related_to(&self, skill: &str, limit: usize) -> Vec<String> {
        let Some(category) = self
            .categories
            .iter()
            .find(|c| c.skills.iter().any(|s| s == skill))
        else {
            return Vec::new();
        };

        category
            .skills
            .iter()
            .filter(|s| s.as_str() != skill)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    /// `{category: [skills]}` view of the catalog, serialized in catalog order.
    pub fn catalog_view(&self) -> CatalogView<'_> {
        CatalogView(&self.categories)
    }

    /// Most used skills; counting is left to the aggregation store.
    #[instrument(skip(self, store))]
    pub async fn popular(
        &self,
        store: &dyn AggregationStore,
        limit: usize,
    ) -> Result<Vec<SkillUsage>, StoreError> {
        let mut usage = store.popular_skills(limit).await?;
        usage.truncate(limit);
        Ok(usage)
    }
}
