use axum::{
    Json,
    extract::{Path, Query, State},
};
use fw_common::matching::MatchResult;
use fw_common::{MatchCriteria, ProjectCandidate, WorkerCandidate};
use serde::{Deserialize, Serialize};

use super::limits::{FIND_WORKERS, RECOMMENDATIONS, validate_limit};
use super::{ApiResponse, LimitQuery};
use crate::SharedState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PairQuery {
    pub worker_id: String,
    pub project_id: String,
}

#[derive(Debug, Serialize)]
pub struct SimilarityScore {
    pub score: f64,
}

pub async fn find_workers(
    State(state): State<SharedState>,
    Query(query): Query<LimitQuery>,
    Json(mut criteria): Json<MatchCriteria>,
) -> Result<Json<Vec<MatchResult<WorkerCandidate>>>, ApiError> {
    criteria.limit = validate_limit(query.limit, FIND_WORKERS)?;

    let ranked = state.matching.rank_workers(&criteria).await?;
    fw_metrics::record_ranked("find_workers", ranked.len());

    Ok(Json(ranked))
}

pub async fn recommendations(
    State(state): State<SharedState>,
    Path(worker_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<MatchResult<ProjectCandidate>>>>, ApiError> {
    let limit = validate_limit(query.limit, RECOMMENDATIONS)?;

    let ranked = state.matching.recommend_projects(&worker_id, limit).await?;
    fw_metrics::record_ranked("recommend_projects", ranked.len());

    Ok(Json(ApiResponse::ok(ranked)))
}

pub async fn similarity_score(
    State(state): State<SharedState>,
    Query(pair): Query<PairQuery>,
) -> Result<Json<ApiResponse<SimilarityScore>>, ApiError> {
    let score = state
        .matching
        .similarity_score(&pair.worker_id, &pair.project_id)
        .await?;

    Ok(Json(ApiResponse::ok(SimilarityScore { score })))
}
