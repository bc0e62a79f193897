use std::collections::BTreeMap;

use tracing::debug;

use super::domain::{ExamId, Room, RoomId, Seat, SeatAssignment, Student};
use super::error::AllocationError;
use super::grid::Grid;
use super::interleave::{consecutive_repeats, interleave};
use super::placement::{place, Conflict, Placement};
use super::result::{to_grid, to_seat_assignments, AllocationGrid};

/// Outcome of a single allocation run for one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatAllocation {
    grid: Grid,
    placement: Placement,
}

impl SeatAllocation {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seats(&self) -> &BTreeMap<Seat, Student> {
        &self.placement.seats
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.placement.conflicts
    }

    pub fn seated(&self) -> usize {
        self.placement.seated()
    }

    pub fn seat_of(&self, student: &Student) -> Option<Seat> {
        self.placement
            .seats
            .iter()
            .find(|(_, seated)| seated.id == student.id)
            .map(|(seat, _)| *seat)
    }

    pub fn assignments(&self, exam_id: &ExamId, room_id: &RoomId) -> Vec<SeatAssignment> {
        to_seat_assignments(exam_id, room_id, &self.placement.seats)
    }

    pub fn snapshot(&self) -> AllocationGrid {
        to_grid(&self.placement.seats, &self.grid)
    }

    /// Same-department edge pairs left in the final layout.
    pub fn adjacent_pairs(&self) -> usize {
        self.placement.audit(&self.grid)
    }
}

/// Seat `students` in `room`, keeping same-department students apart where
/// the pool allows it.
///
/// Dimension, pool, and capacity checks run before anything is placed. The
/// result is a pure function of the inputs, including their order.
pub fn allocate(students: &[Student], room: &Room) -> Result<SeatAllocation, AllocationError> {
    let grid = Grid::for_room(room)?;
    let sequence = interleave(students)?;
    debug!(
        room = %room.id,
        repeats_before = consecutive_repeats(students),
        repeats_after = consecutive_repeats(&sequence),
        "interleaved departments"
    );
    let placement = place(&sequence, &grid)?;

    debug!(
        room = %room.id,
        seated = placement.seated(),
        capacity = grid.capacity(),
        conflicts = placement.conflicts.len(),
        "placement finished"
    );

    Ok(SeatAllocation { grid, placement })
}
