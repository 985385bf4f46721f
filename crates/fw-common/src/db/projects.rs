use std::time::Instant;

use tokio_postgres::Row;
use tracing::instrument;

use super::util::log_if_slow;
use crate::db::PgPool;
use crate::matching::prefilter::OPEN_PROJECT_STATUS;
use crate::store::StoreError;
use crate::{ProjectCandidate, SkillSet};

const PROJECT_COLUMNS: &str = "\
    p.id::text AS id,\
    p.title,\
    p.description,\
    p.skills,\
    p.budget::float8 AS budget,\
    p.status,\
    u.first_name,\
    u.last_name";

#[derive(Debug, Clone, Default)]
pub struct ProjectRow {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills: Option<Vec<String>>,
    pub budget: Option<f64>,
    pub status: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ProjectRow {
    fn from_row(row: &Row) -> Result<Self, StoreError> {
        let get_err = |e: tokio_postgres::Error| StoreError::Mapping(e.to_string());

        Ok(Self {
            id: row.try_get("id").map_err(get_err)?,
            title: row.try_get("title").map_err(get_err)?,
            description: row.try_get("description").map_err(get_err)?,
            skills: row.try_get("skills").map_err(get_err)?,
            budget: row.try_get("budget").map_err(get_err)?,
            status: row.try_get("status").map_err(get_err)?,
            first_name: row.try_get("first_name").map_err(get_err)?,
            last_name: row.try_get("last_name").map_err(get_err)?,
        })
    }
}

impl From<ProjectRow> for ProjectCandidate {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            skills: row.skills.unwrap_or_default().into_iter().collect(),
            budget: row.budget.filter(|b| b.is_finite()),
            status: row.status.unwrap_or_default(),
            client_first_name: row.first_name,
            client_last_name: row.last_name,
        }
    }
}

#[instrument(skip(pool, skills), fields(skills = skills.len()))]
pub async fn fetch_open_projects(
    pool: &PgPool,
    skills: &SkillSet,
) -> Result<Vec<ProjectCandidate>, StoreError> {
    let client = pool.get().await?;
    let query = format!(
        "SELECT {PROJECT_COLUMNS} \
        FROM projects p \
        JOIN users u ON p.client_id = u.id \
        WHERE p.status = $1 \
          AND p.skills && $2::text[] \
        ORDER BY p.created_at DESC"
    );
    let skill_list = skills.to_vec();

    let started = Instant::now();
    let rows = client
        .query(&query, &[&OPEN_PROJECT_STATUS, &skill_list])
        .await?;
    log_if_slow("fetch_open_projects", started);

    rows.iter()
        .map(|row| ProjectRow::from_row(row).map(ProjectCandidate::from))
        .collect()
}

#[instrument(skip(pool))]
pub async fn fetch_project(
    pool: &PgPool,
    project_id: &str,
) -> Result<Option<ProjectCandidate>, StoreError> {
    let client = pool.get().await?;
    let query = format!(
        "SELECT {PROJECT_COLUMNS} \
        FROM projects p \
        LEFT JOIN users u ON p.client_id = u.id \
        WHERE p.id::text = $1"
    );

    let started = Instant::now();
    let row = client.query_opt(&query, &[&project_id]).await?;
    log_if_slow("fetch_project", started);

    row.as_ref()
        .map(|row| ProjectRow::from_row(row).map(ProjectCandidate::from))
        .transpose()
}
