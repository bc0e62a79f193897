use crate::config::ConfigError;
use crate::seating::{AllocationError, RosterError, SeatingServiceError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Roster(RosterError),
    Seating(SeatingServiceError),
    InvalidRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Roster(err) => write!(f, "roster error: {}", err),
            AppError::Seating(err) => write!(f, "seating error: {}", err),
            AppError::InvalidRequest(message) => write!(f, "invalid request: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Roster(err) => Some(err),
            AppError::Seating(err) => Some(err),
            AppError::InvalidRequest(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            AppError::Roster(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string() }),
            ),
            AppError::Seating(SeatingServiceError::RoomNotFound(room_id)) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Room not found", "roomId": room_id }),
            ),
            AppError::Seating(SeatingServiceError::Allocation(AllocationError::NoStudents)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "No students found" }),
            ),
            AppError::Seating(SeatingServiceError::Allocation(
                AllocationError::InsufficientCapacity {
                    required,
                    available,
                },
            )) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": self.to_string(),
                    "required": required,
                    "available": available,
                }),
            ),
            AppError::Seating(SeatingServiceError::Allocation(
                AllocationError::InvalidDimensions { .. },
            )) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": self.to_string() }),
            ),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Seating(SeatingServiceError::Repository(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RosterError> for AppError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

impl From<SeatingServiceError> for AppError {
    fn from(value: SeatingServiceError) -> Self {
        Self::Seating(value)
    }
}

impl From<AllocationError> for AppError {
    fn from(value: AllocationError) -> Self {
        Self::Seating(SeatingServiceError::Allocation(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seating::RoomId;

    #[test]
    fn maps_seating_errors_to_http_statuses() {
        let missing = AppError::from(SeatingServiceError::RoomNotFound(RoomId("r9".into())));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let empty = AppError::from(AllocationError::NoStudents);
        assert_eq!(empty.into_response().status(), StatusCode::BAD_REQUEST);

        let full = AppError::from(AllocationError::InsufficientCapacity {
            required: 40,
            available: 30,
        });
        assert_eq!(
            full.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn invalid_requests_are_bad_requests() {
        let err = AppError::InvalidRequest("examId and roomId are required".to_string());
        assert_eq!(
            err.to_string(),
            "invalid request: examId and roomId are required"
        );
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn display_prefixes_the_error_kind() {
        let err = AppError::from(AllocationError::NoStudents);
        assert_eq!(
            err.to_string(),
            "seating error: no students available for allocation"
        );
    }
}
