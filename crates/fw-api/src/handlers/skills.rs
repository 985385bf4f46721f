use axum::{
    Json,
    extract::{Path, Query, State},
};
use fw_common::store::SkillUsage;
use fw_common::taxonomy::CatalogView;
use serde::Deserialize;

use super::limits::{POPULAR_SKILLS, RELATED_SKILLS, SKILL_SEARCH, validate_limit};
use super::{ApiResponse, LimitQuery};
use crate::SharedState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

pub async fn search(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    if query.q.is_empty() {
        return Err(ApiError::BadRequest("q must not be empty".into()));
    }
    let limit = validate_limit(query.limit, SKILL_SEARCH)?;

    Ok(Json(ApiResponse::ok(state.taxonomy.search(&query.q, limit))))
}

pub async fn popular(
    State(state): State<SharedState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<SkillUsage>>>, ApiError> {
    let limit = validate_limit(query.limit, POPULAR_SKILLS)?;

    let usage = state
        .taxonomy
        .popular(state.aggregation.as_ref(), limit)
        .await?;

    Ok(Json(ApiResponse::ok(usage)))
}

pub async fn categories(
    State(state): State<SharedState>,
) -> Json<ApiResponse<CatalogView<'static>>> {
    Json(ApiResponse::ok(state.taxonomy.catalog_view()))
}

pub async fn related(
    State(state): State<SharedState>,
    Path(skill): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let limit = validate_limit(query.limit, RELATED_SKILLS)?;

    Ok(Json(ApiResponse::ok(state.taxonomy.related_to(&skill, limit))))
}
