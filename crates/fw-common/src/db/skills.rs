use std::time::Instant;

use tracing::instrument;

use super::util::log_if_slow;
use crate::db::PgPool;
use crate::store::{SkillUsage, StoreError};

#[instrument(skip(pool))]
pub async fn fetch_popular_skills(
    pool: &PgPool,
    limit: usize,
) -> Result<Vec<SkillUsage>, StoreError> {
    let client = pool.get().await?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let started = Instant::now();
    let rows = client
        .query(
            "SELECT skill, COUNT(*) AS count \
            FROM worker_profiles, unnest(skills) AS skill \
            GROUP BY skill \
            ORDER BY count DESC, skill ASC \
            LIMIT $1",
            &[&limit],
        )
        .await?;
    log_if_slow("fetch_popular_skills", started);

    rows.iter()
        .map(|row| {
            Ok(SkillUsage {
                skill: row
                    .try_get("skill")
                    .map_err(|e| StoreError::Mapping(e.to_string()))?,
                count: row
                    .try_get("count")
                    .map_err(|e| StoreError::Mapping(e.to_string()))?,
            })
        })
        .collect()
}
