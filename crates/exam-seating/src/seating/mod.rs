//! Department-aware exam seat allocation.
//!
//! The allocator core (`grid`, `interleave`, `placement`, `result`) is pure
//! and synchronous. `service`, `repository`, and `router` wrap it with chart
//! storage, directory lookups, and HTTP handlers.

pub mod allocator;
pub mod domain;
pub mod error;
pub mod grid;
pub mod interleave;
pub mod ordering;
pub mod placement;
pub mod repository;
pub mod result;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use allocator::{allocate, SeatAllocation};
pub use domain::{
    AcademicStatus, ExamId, Room, RoomId, Seat, SeatAssignment, Student, StudentId,
    UNKNOWN_DEPARTMENT,
};
pub use error::AllocationError;
pub use grid::Grid;
pub use interleave::interleave;
pub use ordering::StudentOrdering;
pub use placement::{place, Conflict, Placement};
pub use repository::{CampusDirectory, RepositoryError, SeatingChart, SeatingRepository};
pub use result::{grid_from_assignments, to_grid, to_seat_assignments, AllocationGrid, GridCell};
pub use roster::{RosterError, RosterImporter};
pub use router::seating_router;
pub use service::{
    AllocationRequest, AllocationSummary, RoomSummary, SeatingGridView, SeatingService,
    SeatingServiceError,
};
