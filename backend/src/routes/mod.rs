pub mod spin_routes;
pub mod wheel_routes;

use axum::{http::StatusCode, routing::get, Router};

use crate::AppState;

async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub fn create_router(state: AppState) -> Router {
    let wheel_routes = wheel_routes::create_router().merge(spin_routes::create_router());

    Router::new()
        .route("/api/health_check", get(health_check))
        .nest("/api/wheels", wheel_routes)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use shared::physics::PhysicsConfig;
    use tower::ServiceExt;

    use super::*;
    use crate::store::MemoryStore;

    fn app() -> Router {
        create_router(AppState {
            store: Arc::new(MemoryStore::default()),
            physics: PhysicsConfig::default(),
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn lunch_wheel() -> Value {
        json!({
            "title": "  Lunch  ",
            "segments": [
                { "id": "p", "label": "Pizza", "weight": 2.0, "color": "#ff0000" },
                { "id": "s", "label": "Sushi", "weight": 1.0 },
                { "id": "t", "label": "Tacos", "weight": 1.0, "url": "https://tacos.example" }
            ],
            "owner_id": "alice"
        })
    }

    async fn create(app: &Router) -> String {
        let (status, wheel) = send(app, Method::POST, "/api/wheels", Some(lunch_wheel())).await;
        assert_eq!(status, StatusCode::CREATED);
        wheel["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, _) = send(&app(), Method::GET, "/api/health_check", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wheel_crud() {
        let app = app();
        let id = create(&app).await;

        let (status, wheel) = send(&app, Method::GET, &format!("/api/wheels/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(wheel["title"], "Lunch");
        assert_eq!(wheel["segments"].as_array().unwrap().len(), 3);
        assert!(!wheel["segments"][1]["color"].as_str().unwrap().is_empty());

        let (_, mine) = send(&app, Method::GET, "/api/wheels?owner=alice", None).await;
        assert_eq!(mine.as_array().unwrap().len(), 1);
        let (_, theirs) = send(&app, Method::GET, "/api/wheels?owner=bob", None).await;
        assert!(theirs.as_array().unwrap().is_empty());

        let mut update = lunch_wheel();
        update["title"] = json!("Dinner");
        let (status, wheel) = send(&app, Method::PUT, &format!("/api/wheels/{}", id), Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(wheel["title"], "Dinner");
        assert_eq!(wheel["id"], id.as_str());

        let (status, _) = send(&app, Method::DELETE, &format!("/api/wheels/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send(&app, Method::GET, &format!("/api/wheels/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Wheel not found");
    }

    #[tokio::test]
    async fn test_invalid_wheels_are_rejected() {
        let app = app();

        let mut one_segment = lunch_wheel();
        one_segment["segments"] = json!([{ "id": "a", "label": "A", "weight": 1.0 }]);
        let (status, body) = send(&app, Method::POST, "/api/wheels", Some(one_segment)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());

        let mut zero_weight = lunch_wheel();
        zero_weight["segments"][0]["weight"] = json!(0.0);
        let (status, _) = send(&app, Method::POST, "/api/wheels", Some(zero_weight)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let mut blank_title = lunch_wheel();
        blank_title["title"] = json!("   ");
        let (status, _) = send(&app, Method::POST, "/api/wheels", Some(blank_title)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, all) = send(&app, Method::GET, "/api/wheels", None).await;
        assert!(all.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spin_records_outcome_and_analytics() {
        let app = app();
        let id = create(&app).await;

        let (status, spin) = send(&app, Method::POST, &format!("/api/wheels/{}/spin", id), None).await;
        assert_eq!(status, StatusCode::OK);
        let winner = spin["winner"]["id"].as_str().unwrap().to_string();
        assert!(["p", "s", "t"].contains(&winner.as_str()));
        assert_eq!(spin["outcome"]["segment_id"], winner.as_str());
        assert!(spin["steps"].as_u64().unwrap() > 0);

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/wheels/{}/results", id),
            Some(json!({ "segment_id": "s" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, results) = send(&app, Method::GET, &format!("/api/wheels/{}/results", id), None).await;
        let results = results.as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1]["segment_label"], "Sushi");

        let (status, analytics) = send(&app, Method::GET, &format!("/api/wheels/{}/analytics", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(analytics["total_spins"], 2);
        assert_eq!(analytics["timeline"].as_array().unwrap().len(), 1);
        assert_eq!(analytics["timeline"][0]["count"], 2);
    }

    #[tokio::test]
    async fn test_seeded_spin_replays() {
        let app = app();
        let id = create(&app).await;
        let uri = format!("/api/wheels/{}/spin", id);

        let (_, first) = send(&app, Method::POST, &uri, Some(json!({ "seed": 4242 }))).await;
        let (_, second) = send(&app, Method::POST, &uri, Some(json!({ "seed": 4242 }))).await;
        assert_eq!(first["seed"], 4242);
        assert_eq!(first["winner"], second["winner"]);
        assert_eq!(first["final_rotation"], second["final_rotation"]);
        assert_eq!(first["steps"], second["steps"]);
    }

    #[tokio::test]
    async fn test_malformed_seed_is_rejected_and_not_recorded() {
        let app = app();
        let id = create(&app).await;
        let uri = format!("/api/wheels/{}/spin", id);

        let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "seed": "4242" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());

        let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "seed": -1 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, results) = send(&app, Method::GET, &format!("/api/wheels/{}/results", id), None).await;
        assert!(results.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_above_replay_range_is_rejected() {
        let app = app();
        let id = create(&app).await;
        let uri = format!("/api/wheels/{}/spin", id);
        let max = shared::constants::MAX_REPLAY_SEED;

        let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "seed": max + 1 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, spin) = send(&app, Method::POST, &uri, Some(json!({ "seed": max }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(spin["seed"], max);

        let (_, results) = send(&app, Method::GET, &format!("/api/wheels/{}/results", id), None).await;
        assert_eq!(results.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_wheel_and_segment() {
        let app = app();
        let missing = uuid::Uuid::new_v4();
        let (status, _) = send(&app, Method::POST, &format!("/api/wheels/{}/spin", missing), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::GET, &format!("/api/wheels/{}/analytics", missing), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let id = create(&app).await;
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/wheels/{}/results", id),
            Some(json!({ "segment_id": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], shared::constants::SEGMENT_NOT_FOUND_ERROR);
    }
}
