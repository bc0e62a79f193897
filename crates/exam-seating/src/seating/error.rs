/// Fatal allocation failures. All are detected before any seat is filled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("room dimensions must be positive (rows={rows}, columns={columns})")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("no students available for allocation")]
    NoStudents,
    #[error("room holds {available} students but {required} need seats")]
    InsufficientCapacity { required: usize, available: usize },
}
