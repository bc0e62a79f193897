use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use exam_seating::seating::{seating_router, CampusDirectory, SeatingRepository, SeatingService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_seating_routes<R, D>(service: Arc<SeatingService<R, D>>) -> axum::Router
where
    R: SeatingRepository + 'static,
    D: CampusDirectory + 'static,
{
    seating_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{sample_campus, InMemorySeatingRepository};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let service = Arc::new(SeatingService::new(
            Arc::new(InMemorySeatingRepository::default()),
            Arc::new(sample_campus()),
        ));
        with_seating_routes(service)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn allocation_is_visible_through_the_grid_route() {
        let router = router();
        let allocate = Request::post("/api/seatings/allocate-smart")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"examId":"exam-ds-2025","roomId":"room-lh1"}"#,
            ))
            .unwrap();
        let response = router.clone().oneshot(allocate).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(
                Request::get("/api/seatings/grid/exam-ds-2025/room-lh1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["totalSeated"], 26);
        assert_eq!(body["room"]["capacity"], 30);
    }

    #[tokio::test]
    async fn undersized_room_is_rejected() {
        let response = router()
            .oneshot(
                Request::post("/api/seatings/allocate-smart")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"examId":"exam-ds-2025","roomId":"room-sem3"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
