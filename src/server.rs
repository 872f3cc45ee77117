//! Web server module.
//!
//! Provides the HTTP API for the people resource plus health and metrics
//! endpoints.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::metrics;
use crate::storage::{NewPerson, PersonStore};

/// Welcome message served at the root endpoint.
const WELCOME_MESSAGE: &str = "Welcome to the Titanic API";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub people: PersonStore,
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    db: Option<String>,
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let app_state = Arc::new(state);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/readyz", get(readyz_handler))
        .route("/metrics", get(metrics_handler))
        .route(
            "/people",
            get(list_people_handler).post(create_person_handler),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Root endpoint with a static welcome message.
async fn root_handler() -> &'static str {
    WELCOME_MESSAGE
}

/// Liveness probe. Always healthy, independent of database state.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        db: None,
    })
}

/// Readiness probe that checks database availability.
async fn readyz_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.people.count().await {
        Ok(_) => Json(HealthResponse {
            status: "ok".to_string(),
            db: Some("ready".to_string()),
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "not_ready".to_string(),
                    db: Some(err.to_string()),
                }),
            )
                .into_response()
        }
    }
}

/// Prometheus metrics endpoint.
async fn metrics_handler() -> Response {
    match metrics::render_metrics() {
        Some(rendered) => rendered.into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics not initialized").into_response(),
    }
}

/// List all passenger records.
async fn list_people_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.people.list_all().await {
        Ok(people) => {
            metrics::inc_people_listed();
            Json(people).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list people");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response()
        }
    }
}

/// Create a passenger record.
///
/// The payload is validated by the `Json` extractor before the store is
/// touched; missing or malformed fields never reach the database.
async fn create_person_handler(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewPerson>,
) -> Response {
    match state.people.create(new).await {
        Ok(person) => {
            metrics::inc_people_created();
            (StatusCode::CREATED, Json(person)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create person");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageBuilder;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tempfile::{TempDir, tempdir};
    use tower::ServiceExt;

    async fn create_test_state() -> (AppState, TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_server.db");
        let url = format!("sqlite:{}?mode=rwc", db_path.display());

        let handles = StorageBuilder::new(url)
            .pool_size(2)
            .build()
            .await
            .expect("Failed to build storage");

        let state = AppState {
            people: handles.people.clone(),
        };

        // Return dir to keep the tempdir alive for the test's duration
        (state, dir)
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let (state, _dir) = create_test_state().await;
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (state, _dir) = create_test_state().await;
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"status":"healthy"}"#);
    }

    #[tokio::test]
    async fn test_readyz_endpoint() {
        let (state, _dir) = create_test_state().await;
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/readyz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_people_empty() {
        let (state, _dir) = create_test_state().await;
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/people")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "[]");
    }

    #[tokio::test]
    async fn test_create_person() {
        let (state, _dir) = create_test_state().await;
        let app = create_router(state);

        let payload = serde_json::json!({
            "survived": 1,
            "passengerClass": 1,
            "name": "Test Person",
            "sex": "male",
            "age": 30.0,
            "siblingsOrSpousesAboard": 0,
            "parentsOrChildrenAboard": 0,
            "fare": 50.0
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/people")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["name"], "Test Person");
        assert_eq!(body["passengerClass"], 1);
        assert!(body["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_create_person_missing_field() {
        let (state, _dir) = create_test_state().await;
        let app = create_router(state.clone());

        // No "name" field
        let payload = serde_json::json!({
            "survived": 1,
            "passengerClass": 1,
            "sex": "male",
            "siblingsOrSpousesAboard": 0,
            "parentsOrChildrenAboard": 0,
            "fare": 50.0
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/people")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());

        // The store must stay unchanged
        assert_eq!(state.people.count().await.unwrap(), 0);
    }
}
