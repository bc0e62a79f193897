use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ExamId, Room, RoomId, SeatAssignment, Student, StudentId};
use super::placement::Conflict;

/// Complete stored allocation for one exam in one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingChart {
    pub exam_id: ExamId,
    pub room_id: RoomId,
    pub assignments: Vec<SeatAssignment>,
    pub conflicts: Vec<Conflict>,
    pub allocated_at: DateTime<Utc>,
}

impl SeatingChart {
    pub fn seated(&self) -> usize {
        self.assignments.len()
    }

    pub fn assignment_for(&self, student_id: &StudentId) -> Option<&SeatAssignment> {
        self.assignments
            .iter()
            .find(|assignment| &assignment.student_id == student_id)
    }
}

/// Storage port for seating charts.
///
/// `replace` must swap the whole chart for an (exam, room) pair as one unit:
/// readers observe either the previous chart or the new one, never a mix.
pub trait SeatingRepository: Send + Sync {
    fn replace(&self, chart: SeatingChart) -> Result<SeatingChart, RepositoryError>;
    fn fetch(
        &self,
        exam_id: &ExamId,
        room_id: &RoomId,
    ) -> Result<Option<SeatingChart>, RepositoryError>;
    fn for_student(&self, student_id: &StudentId) -> Result<Vec<SeatAssignment>, RepositoryError>;
    fn clear_exam(&self, exam_id: &ExamId) -> Result<usize, RepositoryError>;
}

/// Read access to the portal's student and room records.
pub trait CampusDirectory: Send + Sync {
    fn students(&self) -> Result<Vec<Student>, RepositoryError>;
    fn room(&self, room_id: &RoomId) -> Result<Option<Room>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
