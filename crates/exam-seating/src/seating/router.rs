use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ExamId, RoomId, StudentId};
use super::ordering::StudentOrdering;
use super::repository::{CampusDirectory, SeatingRepository};
use super::service::{AllocationRequest, SeatingService};
use crate::error::AppError;

/// Allocation payload as posted by the seating dashboard. Ids are optional
/// here so that missing fields get a 400 with a readable message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AllocatePayload {
    #[serde(default)]
    pub(crate) exam_id: Option<String>,
    #[serde(default)]
    pub(crate) room_id: Option<String>,
    #[serde(default)]
    pub(crate) ordering: Option<StudentOrdering>,
}

/// Router builder exposing seating allocation and lookup endpoints.
pub fn seating_router<R, D>(service: Arc<SeatingService<R, D>>) -> Router
where
    R: SeatingRepository + 'static,
    D: CampusDirectory + 'static,
{
    Router::new()
        .route(
            "/api/seatings/allocate-smart",
            post(allocate_handler::<R, D>),
        )
        .route(
            "/api/seatings/grid/:exam_id/:room_id",
            get(grid_handler::<R, D>),
        )
        .route(
            "/api/seatings/student/:student_id",
            get(student_seats_handler::<R, D>),
        )
        .route(
            "/api/seatings/exam/:exam_id",
            delete(clear_exam_handler::<R, D>),
        )
        .with_state(service)
}

pub(crate) async fn allocate_handler<R, D>(
    State(service): State<Arc<SeatingService<R, D>>>,
    axum::Json(payload): axum::Json<AllocatePayload>,
) -> Result<Response, AppError>
where
    R: SeatingRepository + 'static,
    D: CampusDirectory + 'static,
{
    let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    let (Some(exam_id), Some(room_id)) = (non_blank(payload.exam_id), non_blank(payload.room_id))
    else {
        return Err(AppError::InvalidRequest(
            "examId and roomId are required".to_string(),
        ));
    };

    let request = AllocationRequest {
        exam_id: ExamId(exam_id),
        room_id: RoomId(room_id),
        ordering: payload.ordering,
    };

    let summary = service.allocate(request)?;
    let payload = json!({
        "message": "Smart seating allocation completed",
        "count": summary.chart.seated(),
        "conflicts": summary.chart.conflicts,
        "grid": summary.grid,
        "seatings": summary.chart.assignments,
    });
    Ok((StatusCode::CREATED, axum::Json(payload)).into_response())
}

pub(crate) async fn grid_handler<R, D>(
    State(service): State<Arc<SeatingService<R, D>>>,
    Path((exam_id, room_id)): Path<(String, String)>,
) -> Result<Response, AppError>
where
    R: SeatingRepository + 'static,
    D: CampusDirectory + 'static,
{
    let view = service.grid(&ExamId(exam_id), &RoomId(room_id))?;
    Ok((StatusCode::OK, axum::Json(view)).into_response())
}

pub(crate) async fn student_seats_handler<R, D>(
    State(service): State<Arc<SeatingService<R, D>>>,
    Path(student_id): Path<String>,
) -> Result<Response, AppError>
where
    R: SeatingRepository + 'static,
    D: CampusDirectory + 'static,
{
    let seats = service.seats_for_student(&StudentId(student_id))?;
    Ok((StatusCode::OK, axum::Json(seats)).into_response())
}

pub(crate) async fn clear_exam_handler<R, D>(
    State(service): State<Arc<SeatingService<R, D>>>,
    Path(exam_id): Path<String>,
) -> Result<Response, AppError>
where
    R: SeatingRepository + 'static,
    D: CampusDirectory + 'static,
{
    let exam_id = ExamId(exam_id);
    let removed = service.clear_exam(&exam_id)?;
    let payload = json!({ "examId": exam_id, "removed": removed });
    Ok((StatusCode::OK, axum::Json(payload)).into_response())
}
