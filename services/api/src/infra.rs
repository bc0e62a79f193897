use exam_seating::seating::{
    CampusDirectory, ExamId, RepositoryError, Room, RoomId, SeatAssignment, SeatingChart,
    SeatingRepository, Student, StudentId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Chart store keyed by (exam, room). `replace` swaps a whole chart under a
/// single lock acquisition, so readers never see a half-written allocation.
#[derive(Default, Clone)]
pub(crate) struct InMemorySeatingRepository {
    charts: Arc<Mutex<HashMap<(ExamId, RoomId), SeatingChart>>>,
}

impl SeatingRepository for InMemorySeatingRepository {
    fn replace(&self, chart: SeatingChart) -> Result<SeatingChart, RepositoryError> {
        let mut guard = self.charts.lock().expect("seating mutex poisoned");
        guard.insert((chart.exam_id.clone(), chart.room_id.clone()), chart.clone());
        Ok(chart)
    }

    fn fetch(
        &self,
        exam_id: &ExamId,
        room_id: &RoomId,
    ) -> Result<Option<SeatingChart>, RepositoryError> {
        let guard = self.charts.lock().expect("seating mutex poisoned");
        Ok(guard.get(&(exam_id.clone(), room_id.clone())).cloned())
    }

    fn for_student(&self, student_id: &StudentId) -> Result<Vec<SeatAssignment>, RepositoryError> {
        let guard = self.charts.lock().expect("seating mutex poisoned");
        let mut seats: Vec<SeatAssignment> = guard
            .values()
            .filter_map(|chart| chart.assignment_for(student_id).cloned())
            .collect();
        seats.sort_by(|a, b| (&a.exam_id, &a.room_id).cmp(&(&b.exam_id, &b.room_id)));
        Ok(seats)
    }

    fn clear_exam(&self, exam_id: &ExamId) -> Result<usize, RepositoryError> {
        let mut guard = self.charts.lock().expect("seating mutex poisoned");
        let before = guard.len();
        guard.retain(|(exam, _), _| exam != exam_id);
        Ok(before - guard.len())
    }
}

/// Student and room records held in memory for the demo service.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCampusDirectory {
    students: Arc<RwLock<Vec<Student>>>,
    rooms: Arc<RwLock<HashMap<RoomId, Room>>>,
}

impl InMemoryCampusDirectory {
    pub(crate) fn with_records(students: Vec<Student>, rooms: Vec<Room>) -> Self {
        let directory = Self::default();
        {
            let mut guard = directory.students.write().expect("student lock poisoned");
            *guard = students;
        }
        {
            let mut guard = directory.rooms.write().expect("room lock poisoned");
            guard.extend(rooms.into_iter().map(|room| (room.id.clone(), room)));
        }
        directory
    }

    pub(crate) fn rooms(&self) -> Vec<Room> {
        let guard = self.rooms.read().expect("room lock poisoned");
        let mut rooms: Vec<Room> = guard.values().cloned().collect();
        rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        rooms
    }
}

impl CampusDirectory for InMemoryCampusDirectory {
    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        let guard = self
            .students
            .read()
            .map_err(|_| RepositoryError::Unavailable("student lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn room(&self, room_id: &RoomId) -> Result<Option<Room>, RepositoryError> {
        let guard = self
            .rooms
            .read()
            .map_err(|_| RepositoryError::Unavailable("room lock poisoned".to_string()))?;
        Ok(guard.get(room_id).cloned())
    }
}

/// Small campus used by `serve` and `demo` until a real directory is wired in.
pub(crate) fn sample_campus() -> InMemoryCampusDirectory {
    const DEPARTMENTS: [(&str, &str, usize); 4] = [
        ("CS", "Computer Science", 9),
        ("EC", "Electronics", 7),
        ("ME", "Mechanical", 6),
        ("CV", "Civil", 4),
    ];

    let mut students = Vec::new();
    for (code, department, count) in DEPARTMENTS {
        for index in 1..=count {
            students.push(Student::new(
                format!("22{code}{index:03}"),
                format!("{department} Scholar {index}"),
                department,
            ));
        }
    }
    students.push(Student::new("22CS900", "Held Back Scholar", "Computer Science").detained());

    let rooms = vec![
        Room::new("room-lh1", "LH-101", 5, 6).in_building("Academic Block A"),
        Room::new("room-lab2", "LAB-204", 4, 4).in_building("Academic Block B"),
        Room::new("room-sem3", "SEM-3", 3, 3),
    ];

    InMemoryCampusDirectory::with_records(students, rooms)
}
