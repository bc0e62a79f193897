use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Seat, Student};
use super::error::AllocationError;
use super::grid::Grid;

/// A seat where no remaining student could avoid a same-department neighbour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub seat: Seat,
    pub department: String,
}

/// Seat-to-student pairing produced by the placement walk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    pub seats: BTreeMap<Seat, Student>,
    pub conflicts: Vec<Conflict>,
}

impl Placement {
    pub fn seated(&self) -> usize {
        self.seats.len()
    }

    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn student_at(&self, seat: Seat) -> Option<&Student> {
        self.seats.get(&seat)
    }

    /// Count every same-department pair sharing an edge in the finished
    /// layout. Each pair is counted once.
    pub fn audit(&self, grid: &Grid) -> usize {
        self.seats
            .iter()
            .map(|(seat, student)| {
                grid.adjacent(*seat)
                    .into_iter()
                    .filter(|neighbor| neighbor > seat)
                    .filter_map(|neighbor| self.seats.get(&neighbor))
                    .filter(|other| other.department == student.department)
                    .count()
            })
            .sum()
    }
}

/// Walk the grid in traversal order and seat `sequence` with swap-ahead
/// repair.
///
/// When the queue head shares a department with a placed neighbour, the first
/// student further down the queue who does not is seated instead and the head
/// keeps its place for the next seat. If the whole tail is blocked the head is
/// seated anyway and the seat is reported as a [`Conflict`].
pub fn place(sequence: &[Student], grid: &Grid) -> Result<Placement, AllocationError> {
    if sequence.len() > grid.capacity() {
        return Err(AllocationError::InsufficientCapacity {
            required: sequence.len(),
            available: grid.capacity(),
        });
    }

    let mut queue: VecDeque<&Student> = sequence.iter().collect();
    let mut placement = Placement::default();

    for seat in grid.traversal_order() {
        let Some(candidate) = queue.front().copied() else {
            break;
        };

        let blocked: Vec<&str> = grid
            .neighbors(seat)
            .into_iter()
            .filter_map(|neighbor| placement.seats.get(&neighbor))
            .map(|student| student.department.as_str())
            .collect();

        let is_clear = |student: &Student| !blocked.contains(&student.department.as_str());

        let chosen = if is_clear(candidate) {
            queue.pop_front()
        } else if let Some(index) = queue.iter().skip(1).position(|student| is_clear(*student)) {
            debug!(%seat, pulled_forward = index + 1, "swapped candidate to avoid adjacency");
            queue.remove(index + 1)
        } else {
            debug!(%seat, department = %candidate.department, "no conflict-free candidate left");
            placement.conflicts.push(Conflict {
                seat,
                department: candidate.department.clone(),
            });
            queue.pop_front()
        };

        if let Some(student) = chosen {
            placement.seats.insert(seat, student.clone());
        }
    }

    Ok(placement)
}
