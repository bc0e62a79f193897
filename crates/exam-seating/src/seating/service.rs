use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::allocator::allocate;
use super::domain::{ExamId, Room, RoomId, SeatAssignment, StudentId};
use super::error::AllocationError;
use super::grid::Grid;
use super::ordering::StudentOrdering;
use super::placement::Conflict;
use super::repository::{CampusDirectory, RepositoryError, SeatingChart, SeatingRepository};
use super::result::{grid_from_assignments, AllocationGrid};

/// Request to (re)allocate one exam room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub exam_id: ExamId,
    pub room_id: RoomId,
    #[serde(default)]
    pub ordering: Option<StudentOrdering>,
}

/// Stored chart plus the rendered snapshot returned to callers.
#[derive(Debug, Clone)]
pub struct AllocationSummary {
    pub chart: SeatingChart,
    pub grid: AllocationGrid,
}

/// Room header shown above a seating grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: RoomId,
    pub room_number: String,
    pub rows: u32,
    pub columns: u32,
    pub capacity: u32,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.clone(),
            room_number: room.room_number.clone(),
            rows: room.rows,
            columns: room.columns,
            capacity: room.capacity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingGridView {
    pub room: RoomSummary,
    pub grid: AllocationGrid,
    pub total_seated: usize,
    pub conflicts: Vec<Conflict>,
}

/// Service tying the allocator to the directory and chart storage.
pub struct SeatingService<R, D> {
    repository: Arc<R>,
    directory: Arc<D>,
    default_ordering: StudentOrdering,
}

impl<R, D> SeatingService<R, D>
where
    R: SeatingRepository + 'static,
    D: CampusDirectory + 'static,
{
    pub fn new(repository: Arc<R>, directory: Arc<D>) -> Self {
        Self::with_ordering(repository, directory, StudentOrdering::AsProvided)
    }

    pub fn with_ordering(
        repository: Arc<R>,
        directory: Arc<D>,
        default_ordering: StudentOrdering,
    ) -> Self {
        Self {
            repository,
            directory,
            default_ordering,
        }
    }

    pub fn default_ordering(&self) -> StudentOrdering {
        self.default_ordering
    }

    /// Allocate every active student to the requested room, replacing any
    /// chart already stored for the same exam and room.
    pub fn allocate(
        &self,
        request: AllocationRequest,
    ) -> Result<AllocationSummary, SeatingServiceError> {
        let AllocationRequest {
            exam_id,
            room_id,
            ordering,
        } = request;

        let room = self.require_room(&room_id)?;
        let active: Vec<_> = self
            .directory
            .students()?
            .into_iter()
            .filter(|student| student.is_active())
            .collect();

        let ordering = ordering.unwrap_or(self.default_ordering);
        let pool = ordering.apply(active);
        let allocation = allocate(&pool, &room)?;

        let chart = SeatingChart {
            assignments: allocation.assignments(&exam_id, &room_id),
            conflicts: allocation.conflicts().to_vec(),
            exam_id,
            room_id,
            allocated_at: Utc::now(),
        };
        let chart = self.repository.replace(chart)?;

        if !chart.conflicts.is_empty() {
            warn!(
                exam = %chart.exam_id,
                room = %chart.room_id,
                conflicts = chart.conflicts.len(),
                "same-department neighbours could not be avoided"
            );
        }
        info!(
            exam = %chart.exam_id,
            room = %chart.room_id,
            seated = chart.seated(),
            capacity = allocation.grid().capacity(),
            ordering = %ordering.label(),
            "seating allocated"
        );

        Ok(AllocationSummary {
            grid: allocation.snapshot(),
            chart,
        })
    }

    /// Render the stored chart for a room. A room without a chart renders as
    /// an empty grid.
    pub fn grid(
        &self,
        exam_id: &ExamId,
        room_id: &RoomId,
    ) -> Result<SeatingGridView, SeatingServiceError> {
        let room = self.require_room(room_id)?;
        let grid = Grid::for_room(&room)?;
        let chart = self.repository.fetch(exam_id, room_id)?;

        let (assignments, conflicts) = match chart {
            Some(chart) => (chart.assignments, chart.conflicts),
            None => (Vec::new(), Vec::new()),
        };

        let students: HashMap<_, _> = self
            .directory
            .students()?
            .into_iter()
            .map(|student| (student.id.clone(), student))
            .collect();

        Ok(SeatingGridView {
            room: RoomSummary::from(&room),
            grid: grid_from_assignments(&assignments, &students, &grid),
            total_seated: assignments.len(),
            conflicts,
        })
    }

    /// Every seat a student holds across exams, for hall-ticket lookups.
    pub fn seats_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<SeatAssignment>, SeatingServiceError> {
        Ok(self.repository.for_student(student_id)?)
    }

    /// Drop the charts of every room used by an exam.
    pub fn clear_exam(&self, exam_id: &ExamId) -> Result<usize, SeatingServiceError> {
        let removed = self.repository.clear_exam(exam_id)?;
        info!(exam = %exam_id, removed, "cleared exam seating");
        Ok(removed)
    }

    fn require_room(&self, room_id: &RoomId) -> Result<Room, SeatingServiceError> {
        self.directory
            .room(room_id)?
            .ok_or_else(|| SeatingServiceError::RoomNotFound(room_id.clone()))
    }
}

/// Error raised by the seating service.
#[derive(Debug, thiserror::Error)]
pub enum SeatingServiceError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("room {0} not found")]
    RoomNotFound(RoomId),
}
