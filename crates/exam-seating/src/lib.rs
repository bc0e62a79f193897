pub mod config;
pub mod error;
pub mod seating;
pub mod telemetry;
