use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::domain::{
    ExamId, RoomId, Seat, SeatAssignment, Student, StudentId, UNKNOWN_DEPARTMENT,
};
use super::grid::Grid;

/// Public fields of a seated student as rendered in the seating grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub student_id: StudentId,
    pub student_name: String,
    pub roll_number: String,
    pub department: String,
}

impl From<&Student> for GridCell {
    fn from(student: &Student) -> Self {
        let department = if student.department.trim().is_empty() {
            UNKNOWN_DEPARTMENT.to_string()
        } else {
            student.department.clone()
        };

        Self {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            roll_number: student.roll_number().to_string(),
            department,
        }
    }
}

/// Rows x columns snapshot of a room. Serializes as a plain 2-D array with
/// `null` for empty seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationGrid {
    cells: Vec<Vec<Option<GridCell>>>,
}

impl AllocationGrid {
    pub fn empty(grid: &Grid) -> Self {
        Self {
            cells: vec![vec![None; grid.columns()]; grid.rows()],
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    pub fn cell(&self, seat: Seat) -> Option<&GridCell> {
        self.cells
            .get(seat.row)
            .and_then(|row| row.get(seat.column))
            .and_then(Option::as_ref)
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    pub fn cells(&self) -> &[Vec<Option<GridCell>>] {
        &self.cells
    }

    fn set(&mut self, seat: Seat, cell: GridCell) {
        if let Some(slot) = self
            .cells
            .get_mut(seat.row)
            .and_then(|row| row.get_mut(seat.column))
        {
            *slot = Some(cell);
        }
    }
}

/// One assignment row per occupied seat, in traversal order.
pub fn to_seat_assignments(
    exam_id: &ExamId,
    room_id: &RoomId,
    seats: &BTreeMap<Seat, Student>,
) -> Vec<SeatAssignment> {
    seats
        .iter()
        .map(|(seat, student)| SeatAssignment {
            exam_id: exam_id.clone(),
            room_id: room_id.clone(),
            student_id: student.id.clone(),
            row: seat.row,
            column: seat.column,
        })
        .collect()
}

pub fn to_grid(seats: &BTreeMap<Seat, Student>, grid: &Grid) -> AllocationGrid {
    let mut snapshot = AllocationGrid::empty(grid);
    for (seat, student) in seats {
        debug_assert!(grid.contains(*seat), "placement outside of room: {seat}");
        snapshot.set(*seat, GridCell::from(student));
    }
    snapshot
}

/// Rebuild a snapshot from stored assignment rows. Rows naming an unknown
/// student or a seat outside the room are skipped.
pub fn grid_from_assignments(
    assignments: &[SeatAssignment],
    students: &HashMap<StudentId, Student>,
    grid: &Grid,
) -> AllocationGrid {
    let mut snapshot = AllocationGrid::empty(grid);
    for assignment in assignments {
        let seat = assignment.seat();
        if !grid.contains(seat) {
            continue;
        }
        if let Some(student) = students.get(&assignment.student_id) {
            snapshot.set(seat, GridCell::from(student));
        }
    }
    snapshot
}
