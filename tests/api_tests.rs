use axum::http::StatusCode;
use axum::{body::Body, http::Request, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_availability_shape() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/instance/availability?passengers=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["available"], true);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/no-existe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// Función helper para crear la app de test
fn create_test_app() -> Router {
    Router::new()
        .route(
            "/test",
            get(|| async { Json(json!({"status": "ok", "message": "API de agenda y reservas"})) }),
        )
        .route(
            "/api/instance/availability",
            get(|| async { Json(json!({"available": true})) }),
        )
}
