use std::time::Instant;

use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tracing::instrument;

use super::util::{contains_pattern, log_if_slow};
use crate::db::PgPool;
use crate::store::StoreError;
use crate::{MatchCriteria, WorkerCandidate};

const WORKER_COLUMNS: &str = "\
    wp.user_id::text AS user_id,\
    wp.title,\
    wp.bio,\
    wp.skills,\
    wp.hourly_rate::float8 AS hourly_rate,\
    wp.currency,\
    wp.location,\
    wp.timezone,\
    wp.rating::float8 AS rating,\
    wp.review_count,\
    wp.completed_jobs,\
    wp.is_available,\
    u.is_active,\
    u.first_name,\
    u.last_name,\
    u.avatar_url";

/// Raw worker row; nullable columns stay optional until mapped.
#[derive(Debug, Clone, Default)]
pub struct WorkerRow {
    pub user_id: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub hourly_rate: Option<f64>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub completed_jobs: Option<i32>,
    pub is_available: Option<bool>,
    pub is_active: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl WorkerRow {
    fn from_row(row: &Row) -> Result<Self, StoreError> {
        let get_err = |e: tokio_postgres::Error| StoreError::Mapping(e.to_string());

        Ok(Self {
            user_id: row.try_get("user_id").map_err(get_err)?,
            title: row.try_get("title").map_err(get_err)?,
            bio: row.try_get("bio").map_err(get_err)?,
            skills: row.try_get("skills").map_err(get_err)?,
            hourly_rate: row.try_get("hourly_rate").map_err(get_err)?,
            currency: row.try_get("currency").map_err(get_err)?,
            location: row.try_get("location").map_err(get_err)?,
            timezone: row.try_get("timezone").map_err(get_err)?,
            rating: row.try_get("rating").map_err(get_err)?,
            review_count: row.try_get("review_count").map_err(get_err)?,
            completed_jobs: row.try_get("completed_jobs").map_err(get_err)?,
            is_available: row.try_get("is_available").map_err(get_err)?,
            is_active: row.try_get("is_active").map_err(get_err)?,
            first_name: row.try_get("first_name").map_err(get_err)?,
            last_name: row.try_get("last_name").map_err(get_err)?,
            avatar_url: row.try_get("avatar_url").map_err(get_err)?,
        })
    }
}

fn non_negative(value: Option<i32>) -> u32 {
    value.unwrap_or(0).max(0) as u32
}

impl From<WorkerRow> for WorkerCandidate {
    fn from(row: WorkerRow) -> Self {
        Self {
            id: row.user_id,
            skills: row.skills.unwrap_or_default().into_iter().collect(),
            bio: row.bio,
            rating: row.rating.filter(|r| r.is_finite()).unwrap_or(0.0).clamp(0.0, 5.0),
            completed_jobs: non_negative(row.completed_jobs),
            review_count: non_negative(row.review_count),
            hourly_rate: row.hourly_rate.unwrap_or(0.0),
            currency: row.currency,
            title: row.title,
            first_name: row.first_name,
            last_name: row.last_name,
            avatar_url: row.avatar_url,
            location: row.location,
            timezone: row.timezone,
            is_available: row.is_available.unwrap_or(false),
            is_active: row.is_active.unwrap_or(false),
        }
    }
}

/// SQL and bind values for a worker search. Bind order: budget_min,
/// budget_max, then location and timezone when present.
fn worker_search_query(criteria: &MatchCriteria) -> (String, Vec<Box<dyn ToSql + Sync + Send>>) {
    let mut conditions = vec![
        "wp.is_available = true".to_string(),
        "u.is_active = true".to_string(),
        "wp.hourly_rate::float8 >= $1::float8".to_string(),
        "wp.hourly_rate::float8 <= $2::float8".to_string(),
    ];
    let mut params: Vec<Box<dyn ToSql + Sync + Send>> =
        vec![Box::new(criteria.budget_min), Box::new(criteria.budget_max)];

    if let Some(location) = criteria.location.as_deref().filter(|v| !v.trim().is_empty()) {
        params.push(Box::new(contains_pattern(location)));
        conditions.push(format!("wp.location ILIKE ${}", params.len()));
    }

    if let Some(timezone) = criteria.timezone.as_deref().filter(|v| !v.trim().is_empty()) {
        params.push(Box::new(timezone.to_string()));
        conditions.push(format!("wp.timezone = ${}", params.len()));
    }

    let query = format!(
        "SELECT {WORKER_COLUMNS} \
        FROM worker_profiles wp \
        JOIN users u ON wp.user_id = u.id \
        WHERE {} \
        ORDER BY wp.rating DESC NULLS LAST, wp.completed_jobs DESC NULLS LAST",
        conditions.join(" AND ")
    );

    (query, params)
}

#[instrument(skip(pool, criteria))]
pub async fn fetch_workers(
    pool: &PgPool,
    criteria: &MatchCriteria,
) -> Result<Vec<WorkerCandidate>, StoreError> {
    let client = pool.get().await?;
    let (query, params) = worker_search_query(criteria);
    let refs: Vec<&(dyn ToSql + Sync)> = params
        .iter()
        .map(|p| p.as_ref() as &(dyn ToSql + Sync))
        .collect();

    let started = Instant::now();
    let rows = client.query(&query, &refs).await?;
    log_if_slow("fetch_workers", started);

    rows.iter()
        .map(|row| WorkerRow::from_row(row).map(WorkerCandidate::from))
        .collect()
}

#[instrument(skip(pool))]
pub async fn fetch_worker(
    pool: &PgPool,
    worker_id: &str,
) -> Result<Option<WorkerCandidate>, StoreError> {
    let client = pool.get().await?;
    let query = format!(
        "SELECT {WORKER_COLUMNS} \
        FROM worker_profiles wp \
        JOIN users u ON wp.user_id = u.id \
        WHERE wp.user_id::text = $1"
    );

    let started = Instant::now();
    let row = client.query_opt(&query, &[&worker_id]).await?;
    log_if_slow("fetch_worker", started);

    row.as_ref()
        .map(|row| WorkerRow::from_row(row).map(WorkerCandidate::from))
        .transpose()
}
