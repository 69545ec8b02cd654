//! API router.
//!
//! All routes are mounted under `/api/`. The API binds to localhost for
//! the bundled frontend, so CORS is permissive.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::app_state::AppState;

/// Build the API router.
pub fn api_router(state: Arc<AppState>) -> Router {
    let ctx = ApiContext::new(state);

    Router::new()
        .route("/api/health", get(endpoints::health::check))
        .route("/api/home", get(endpoints::home::dashboard))
        .route("/api/journal/record", post(endpoints::journal::record))
        .route("/api/journal/history", get(endpoints::journal::history))
        .route(
            "/api/journal/month/:year/:month",
            get(endpoints::journal::month),
        )
        .route(
            "/api/journal/:date",
            get(endpoints::journal::day).delete(endpoints::journal::delete),
        )
        .route(
            "/api/medications",
            get(endpoints::medications::list).post(endpoints::medications::add),
        )
        .route(
            "/api/medications/:id",
            delete(endpoints::medications::delete),
        )
        .route("/api/reminders/upcoming", get(endpoints::reminders::upcoming))
        .route("/api/screening/analyze", post(endpoints::screening::analyze))
        .route("/api/screening/history", get(endpoints::screening::history))
        .route(
            "/api/games/tapping/high-score",
            get(endpoints::games::high_score),
        )
        .route(
            "/api/games/tapping/score",
            post(endpoints::games::submit_score),
        )
        .route(
            "/api/games/tracing/outline",
            post(endpoints::games::outline),
        )
        .route("/api/content", get(endpoints::content::index))
        .route("/api/content/:slug", get(endpoints::content::article))
        .with_state(ctx)
        .layer(CorsLayer::permissive())
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{FixedScoreModel, ModelRegistry, RiskModel, UnavailableModel};
    use crate::db;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router_with_models(spiral: Box<dyn RiskModel>, wave: Box<dyn RiskModel>) -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("chiron.db");
        db::open_database(&db_path).unwrap();
        let state = Arc::new(AppState::new(db_path, ModelRegistry::new(spiral, wave)));
        (api_router(state), dir)
    }

    fn test_router() -> (Router, tempfile::TempDir) {
        router_with_models(
            Box::new(FixedScoreModel::new(0.9)),
            Box::new(FixedScoreModel::new(0.2)),
        )
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn wave_drawing_json() -> Value {
        json!({
            "strokes": [{
                "points": (0..10)
                    .map(|i| json!({
                        "x": f64::from(i) * 10.0,
                        "y": 20.0,
                        "time_offset": f64::from(i) * 0.05,
                    }))
                    .collect::<Vec<_>>()
            }]
        })
    }

    #[tokio::test]
    async fn health_reports_name_and_version() {
        let (router, _dir) = test_router();
        let (status, body) = send(&router, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Chiron");
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn journal_record_and_history_round_trip() {
        let (router, _dir) = test_router();

        let (status, body) = send(
            &router,
            "POST",
            "/api/journal/record",
            Some(json!({
                "date": "2025-03-10",
                "mood": 3,
                "notes": "Good day",
                "symptoms": ["Tremors"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["entry_id"].is_string());

        let (status, body) = send(&router, "GET", "/api/journal/history", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["mood_label"], "Happy");
    }

    #[tokio::test]
    async fn journal_rejects_out_of_range_mood() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            &router,
            "POST",
            "/api/journal/record",
            Some(json!({"date": "2025-03-10", "mood": 7, "notes": "", "symptoms": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn journal_rejects_unknown_symptom_tag() {
        let (router, _dir) = test_router();
        let (status, _) = send(
            &router,
            "POST",
            "/api/journal/record",
            Some(json!({"date": "2025-03-10", "mood": 2, "notes": "", "symptoms": ["Hiccups"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn journal_day_detail_then_delete() {
        let (router, _dir) = test_router();
        send(
            &router,
            "POST",
            "/api/journal/record",
            Some(json!({"date": "2025-03-10", "mood": 1, "notes": "", "symptoms": []})),
        )
        .await;

        let (status, body) = send(&router, "GET", "/api/journal/2025-03-10", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mood"], 1);

        let (status, _) = send(&router, "DELETE", "/api/journal/2025-03-10", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&router, "GET", "/api/journal/2025-03-10", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn month_view_has_cells() {
        let (router, _dir) = test_router();
        let (status, body) = send(&router, "GET", "/api/journal/month/2025/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["days"].as_array().unwrap().len(), 31);
    }

    #[tokio::test]
    async fn screening_analyze_returns_label_and_stats() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            &router,
            "POST",
            "/api/screening/analyze",
            Some(json!({"kind": "spiral", "drawing": wave_drawing_json()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "not_at_risk"); // spiral model scores 0.9
        assert!(body["stats"]["total_time"].as_f64().unwrap() > 0.0);

        let (status, body) = send(&router, "GET", "/api/screening/history", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn screening_wave_uses_wave_model() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            &router,
            "POST",
            "/api/screening/analyze",
            Some(json!({"kind": "wave", "drawing": wave_drawing_json()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "at_risk"); // wave model scores 0.2
    }

    #[tokio::test]
    async fn screening_failure_surfaces_as_structured_error() {
        let (router, _dir) = router_with_models(
            Box::new(UnavailableModel::new("no model bundled")),
            Box::new(UnavailableModel::new("no model bundled")),
        );
        let (status, body) = send(
            &router,
            "POST",
            "/api/screening/analyze",
            Some(json!({"kind": "spiral", "drawing": wave_drawing_json()})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "CLASSIFIER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn screening_rejects_empty_drawing() {
        let (router, _dir) = test_router();
        let (status, _) = send(
            &router,
            "POST",
            "/api/screening/analyze",
            Some(json!({"kind": "wave", "drawing": {"strokes": []}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn medication_add_populates_reminders() {
        let (router, _dir) = test_router();
        let (status, body) = send(
            &router,
            "POST",
            "/api/medications",
            Some(json!({
                "name": "Levodopa",
                "dosage": "100mg",
                "times": [{"hour": 8, "minute": 0}, {"hour": 20, "minute": 0}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pending_reminders"], 2);

        let (status, body) = send(&router, "GET", "/api/reminders/upcoming", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(&router, "GET", "/api/medications", None).await;
        assert_eq!(status, StatusCode::OK);
        let id = body[0]["id"].as_str().unwrap().to_string();

        let (status, _) = send(&router, "DELETE", &format!("/api/medications/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&router, "GET", "/api/reminders/upcoming", None).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn tapping_score_round_trip() {
        let (router, _dir) = test_router();

        let (status, body) = send(&router, "GET", "/api/games/tapping/high-score", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["high_score"], 0);

        let (_, body) = send(
            &router,
            "POST",
            "/api/games/tapping/score",
            Some(json!({"score": 14})),
        )
        .await;
        assert_eq!(body["high_score"], 14);

        let (_, body) = send(
            &router,
            "POST",
            "/api/games/tapping/score",
            Some(json!({"score": 6})),
        )
        .await;
        assert_eq!(body["high_score"], 14);
    }

    #[tokio::test]
    async fn content_lookup_and_missing_slug() {
        let (router, _dir) = test_router();

        let (status, body) = send(&router, "GET", "/api/content", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 8);

        let (status, body) = send(&router, "GET", "/api/content/treatment", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Treatment");

        let (status, _) = send(&router, "GET", "/api/content/unknown", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn home_dashboard_aggregates() {
        let (router, _dir) = test_router();
        send(
            &router,
            "POST",
            "/api/journal/record",
            Some(json!({
                "date": chrono::Local::now().date_naive().to_string(),
                "mood": 4,
                "notes": "",
                "symptoms": []
            })),
        )
        .await;

        let (status, body) = send(&router, "GET", "/api/home", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mood"]["logged_today"], true);
        assert_eq!(body["tapping_high_score"], 0);
    }
}
