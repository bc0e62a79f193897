use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::seating::domain::{ExamId, Room, RoomId, SeatAssignment, Student, StudentId};
use crate::seating::repository::{
    CampusDirectory, RepositoryError, SeatingChart, SeatingRepository,
};
use crate::seating::{seating_router, SeatingService};

#[derive(Default)]
pub(super) struct MemoryRepository {
    charts: Mutex<BTreeMap<(ExamId, RoomId), SeatingChart>>,
}

impl MemoryRepository {
    pub(super) fn chart_count(&self) -> usize {
        self.charts.lock().expect("chart mutex").len()
    }
}

impl SeatingRepository for MemoryRepository {
    fn replace(&self, chart: SeatingChart) -> Result<SeatingChart, RepositoryError> {
        let mut guard = self.charts.lock().expect("chart mutex");
        guard.insert((chart.exam_id.clone(), chart.room_id.clone()), chart.clone());
        Ok(chart)
    }

    fn fetch(
        &self,
        exam_id: &ExamId,
        room_id: &RoomId,
    ) -> Result<Option<SeatingChart>, RepositoryError> {
        let guard = self.charts.lock().expect("chart mutex");
        Ok(guard.get(&(exam_id.clone(), room_id.clone())).cloned())
    }

    fn for_student(&self, student_id: &StudentId) -> Result<Vec<SeatAssignment>, RepositoryError> {
        let guard = self.charts.lock().expect("chart mutex");
        Ok(guard
            .values()
            .filter_map(|chart| chart.assignment_for(student_id).cloned())
            .collect())
    }

    fn clear_exam(&self, exam_id: &ExamId) -> Result<usize, RepositoryError> {
        let mut guard = self.charts.lock().expect("chart mutex");
        let before = guard.len();
        guard.retain(|(exam, _), _| exam != exam_id);
        Ok(before - guard.len())
    }
}

pub(super) struct UnavailableRepository;

impl SeatingRepository for UnavailableRepository {
    fn replace(&self, _chart: SeatingChart) -> Result<SeatingChart, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _exam_id: &ExamId,
        _room_id: &RoomId,
    ) -> Result<Option<SeatingChart>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_student(
        &self,
        _student_id: &StudentId,
    ) -> Result<Vec<SeatAssignment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn clear_exam(&self, _exam_id: &ExamId) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct MemoryDirectory {
    students: Vec<Student>,
    rooms: HashMap<RoomId, Room>,
}

impl MemoryDirectory {
    pub(super) fn new(students: Vec<Student>, rooms: Vec<Room>) -> Self {
        Self {
            students,
            rooms: rooms
                .into_iter()
                .map(|room| (room.id.clone(), room))
                .collect(),
        }
    }
}

impl CampusDirectory for MemoryDirectory {
    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(self.students.clone())
    }

    fn room(&self, room_id: &RoomId) -> Result<Option<Room>, RepositoryError> {
        Ok(self.rooms.get(room_id).cloned())
    }
}

/// Four departments of three students each, plus one detained student.
pub(super) fn cohort() -> Vec<Student> {
    let mut students = Vec::new();
    for (code, department) in [("CS", "CSE"), ("EC", "ECE"), ("ME", "MECH"), ("CV", "CIVIL")] {
        for index in 1..=3 {
            students.push(Student::new(
                format!("21{code}{index:03}"),
                format!("{department} student {index}"),
                department,
            ));
        }
    }
    students.push(Student::new("21CS099", "Detained student", "CSE").detained());
    students
}

pub(super) fn rooms() -> Vec<Room> {
    vec![
        Room::new("room-a", "A-101", 3, 4).in_building("Main Block"),
        Room::new("room-b", "B-204", 2, 3),
        Room::new("room-broken", "X-000", 0, 5),
    ]
}

pub(super) fn exam() -> ExamId {
    ExamId("exam-dbms-2025".to_string())
}

pub(super) fn room_a() -> RoomId {
    RoomId("room-a".to_string())
}

pub(super) type TestService = SeatingService<MemoryRepository, MemoryDirectory>;

pub(super) fn build_service() -> (Arc<TestService>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let directory = Arc::new(MemoryDirectory::new(cohort(), rooms()));
    let service = Arc::new(SeatingService::new(repository.clone(), directory));
    (service, repository)
}

pub(super) fn router_with_service(service: Arc<TestService>) -> axum::Router {
    seating_router(service)
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
