use std::sync::atomic::Ordering;

use axum::{Json, extract::State};
use serde_json::json;
use tokio::time::{Duration, timeout};

use crate::SharedState;
use crate::error::ApiError;

const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

pub async fn livez() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn readyz(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.readiness.load(Ordering::SeqCst) {
        return Err(ApiError::ServiceUnavailable("shutting_down".into()));
    }

    timeout(READINESS_TIMEOUT, state.matching.health_check())
        .await
        .map_err(|_| ApiError::ServiceUnavailable("store_ping_timeout".into()))??;

    Ok(Json(json!({
        "status": "ok",
        "store": "ok",
        "application": env!("CARGO_PKG_NAME"),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fw_common::store::InMemoryStore;

    use crate::test_state;

    #[tokio::test]
    async fn readyz_rejects_when_readiness_disabled() {
        let state = test_state(InMemoryStore::default());
        state.readiness.store(false, Ordering::SeqCst);

        let result = readyz(State(state)).await;

        match result {
            Err(ApiError::ServiceUnavailable(code)) => assert!(code.contains("shutting_down")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn readyz_reports_store_outage() {
        let state = test_state(InMemoryStore::unavailable("maintenance"));

        let result = readyz(State(state)).await;

        assert!(matches!(result, Err(ApiError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn readyz_ok_with_healthy_store() {
        let state = test_state(InMemoryStore::default());

        let Json(body) = readyz(State(state)).await.unwrap();

        assert_eq!(body["store"], "ok");
    }
}
