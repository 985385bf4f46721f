use axum::{body::Body, http::Request, http::StatusCode};
use fw_common::store::InMemoryStore;
use fw_common::{ProjectCandidate, WorkerCandidate};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn worker(id: &str, skills: &[&str], rating: f64, hourly_rate: f64) -> WorkerCandidate {
    WorkerCandidate {
        id: id.into(),
        skills: skills.iter().collect(),
        bio: Some(format!("{} developer", skills.join(" "))),
        rating,
        completed_jobs: 10,
        hourly_rate,
        is_available: true,
        is_active: true,
        ..WorkerCandidate::default()
    }
}

fn project(id: &str, skills: &[&str], status: &str, description: &str) -> ProjectCandidate {
    ProjectCandidate {
        id: id.into(),
        title: Some(format!("Project {id}")),
        description: Some(description.into()),
        skills: skills.iter().collect(),
        status: status.into(),
        ..ProjectCandidate::default()
    }
}

fn seeded_store() -> InMemoryStore {
    let mut unavailable = worker("w-3", &["Rust"], 5.0, 40.0);
    unavailable.is_available = false;

    InMemoryStore::new(
        vec![
            worker("w-1", &["Rust", "Go"], 4.8, 60.0),
            worker("w-2", &["Python"], 4.0, 50.0),
            unavailable,
            worker("w-4", &["Rust"], 4.9, 200.0),
        ],
        vec![
            project("p-1", &["Rust", "AWS"], "open", &"Rust services ".repeat(30)),
            project("p-2", &["Rust"], "closed", "Closed Rust work"),
            project("p-3", &["Figma"], "open", "Design work"),
        ],
    )
}

async fn send(store: InMemoryStore, request: Request<Body>) -> (StatusCode, Value) {
    let app = fw_api::create_router(fw_api::test_state(store));
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn search_body() -> Value {
    json!({
        "skills": ["Rust"],
        "budget_min": 0,
        "budget_max": 100,
        "duration": "short"
    })
}

#[tokio::test]
async fn find_workers_returns_filtered_ranked_array() {
    let (status, body) = send(
        seeded_store(),
        post_json("/api/matching/find-workers", search_body()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    let ids: Vec<_> = results
        .iter()
        .map(|r| r["candidate_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["w-1", "w-2"]);
    assert_eq!(results[0]["matched_skills"], json!(["Rust"]));
    assert!(results[0]["score"].as_f64().unwrap() >= results[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn find_workers_honours_limit_query() {
    let (status, body) = send(
        seeded_store(),
        post_json("/api/matching/find-workers?limit=1", search_body()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["candidate_id"], "w-1");
}

#[tokio::test]
async fn find_workers_rejects_out_of_range_limit() {
    let (status, body) = send(
        seeded_store(),
        post_json("/api/matching/find-workers?limit=51", search_body()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn find_workers_with_inverted_budget_is_empty() {
    let (status, body) = send(
        seeded_store(),
        post_json(
            "/api/matching/find-workers",
            json!({"skills": ["Rust"], "budget_min": 90, "budget_max": 10}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn store_outage_returns_service_unavailable() {
    let (status, body) = send(
        InMemoryStore::unavailable("maintenance"),
        post_json("/api/matching/find-workers", search_body()),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}

#[tokio::test]
async fn recommendations_only_include_open_overlapping_projects() {
    let (status, body) = send(seeded_store(), get("/api/matching/recommendations/w-1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["candidate_id"], "p-1");
    assert_eq!(data[0]["score"], 0.5);
    let description = data[0]["candidate"]["description"].as_str().unwrap();
    assert_eq!(description.chars().count(), 200);
}

#[tokio::test]
async fn recommendations_for_unknown_worker_are_empty() {
    let (status, body) = send(seeded_store(), get("/api/matching/recommendations/nobody")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn similarity_score_for_known_and_missing_pairs() {
    let (status, body) = send(
        seeded_store(),
        post_json(
            "/api/matching/similarity-score?worker_id=w-1&project_id=p-1",
            Value::Null,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let score = body["data"]["score"].as_f64().unwrap();
    assert!(score > 0.0 && score <= 1.0);

    let (_, body) = send(
        seeded_store(),
        post_json(
            "/api/matching/similarity-score?worker_id=w-1&project_id=missing",
            Value::Null,
        ),
    )
    .await;
    assert_eq!(body["data"]["score"], 0.0);
}

#[tokio::test]
async fn skill_search_requires_query() {
    let (status, body) = send(seeded_store(), get("/api/skills/search?q=script")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["JavaScript", "TypeScript"]));

    let (status, _) = send(seeded_store(), get("/api/skills/search?q=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn popular_skills_are_counted_across_workers() {
    let (status, body) = send(seeded_store(), get("/api/skills/popular?limit=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([{"skill": "Rust", "count": 3}]));
}

#[tokio::test]
async fn categories_and_related_skills() {
    let (status, body) = send(seeded_store(), get("/api/skills/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_object().unwrap().len(), 9);
    assert!(body["data"]["Mobile"].as_array().unwrap().contains(&json!("Flutter")));

    let (status, body) = send(seeded_store(), get("/api/skills/related/Python?limit=3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["JavaScript", "TypeScript", "Go"]));

    let (_, body) = send(seeded_store(), get("/api/skills/related/CI%2FCD?limit=2")).await;
    assert_eq!(body["data"], json!(["Docker", "Kubernetes"]));
}
