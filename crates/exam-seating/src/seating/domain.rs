use std::fmt;

use serde::{Deserialize, Serialize};

/// Department label rendered when a student record carries none.
pub const UNKNOWN_DEPARTMENT: &str = "UNKNOWN";

/// Roll number or other institution-issued student identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ExamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Enrollment standing; detained students are not seated for exams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicStatus {
    #[default]
    Active,
    Detained,
}

impl AcademicStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AcademicStatus::Active => "active",
            AcademicStatus::Detained => "detained",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "active" => Some(Self::Active),
            "detained" => Some(Self::Detained),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub academic_status: AcademicStatus,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        let department = department.into();
        let department = if department.trim().is_empty() {
            UNKNOWN_DEPARTMENT.to_string()
        } else {
            department
        };

        Self {
            id: StudentId(id.into()),
            name: name.into(),
            department,
            academic_status: AcademicStatus::Active,
        }
    }

    pub fn detained(mut self) -> Self {
        self.academic_status = AcademicStatus::Detained;
        self
    }

    pub fn is_active(&self) -> bool {
        self.academic_status == AcademicStatus::Active
    }

    /// Roll numbers are the student identifiers in the portal.
    pub fn roll_number(&self) -> &str {
        &self.id.0
    }
}

/// Examination room; `capacity` is expected to equal `rows * columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub room_number: String,
    pub rows: u32,
    pub columns: u32,
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
}

impl Room {
    pub fn new(
        id: impl Into<String>,
        room_number: impl Into<String>,
        rows: u32,
        columns: u32,
    ) -> Self {
        Self {
            id: RoomId(id.into()),
            room_number: room_number.into(),
            rows,
            columns,
            capacity: rows.saturating_mul(columns),
            building: None,
        }
    }

    pub fn in_building(mut self, building: impl Into<String>) -> Self {
        self.building = Some(building.into());
        self
    }
}

/// Grid coordinate. Ordering is row-major so ordered maps iterate in
/// traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat {
    pub row: usize,
    pub column: usize,
}

impl Seat {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// One persisted seat for one student in one exam room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    pub exam_id: ExamId,
    pub room_id: RoomId,
    pub student_id: StudentId,
    pub row: usize,
    pub column: usize,
}

impl SeatAssignment {
    pub fn seat(&self) -> Seat {
        Seat::new(self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_order_row_major() {
        let mut seats = vec![Seat::new(1, 0), Seat::new(0, 2), Seat::new(0, 1)];
        seats.sort();
        assert_eq!(seats, vec![Seat::new(0, 1), Seat::new(0, 2), Seat::new(1, 0)]);
    }

    #[test]
    fn status_labels_parse_back() {
        for status in [AcademicStatus::Active, AcademicStatus::Detained] {
            assert_eq!(AcademicStatus::parse(status.label()), Some(status));
        }
        assert_eq!(AcademicStatus::parse(" "), Some(AcademicStatus::Active));
    }

    #[test]
    fn blank_department_falls_back_to_unknown() {
        let student = Student::new("21CS001", "Asha", "  ");
        assert_eq!(student.department, UNKNOWN_DEPARTMENT);
        assert_eq!(student.roll_number(), "21CS001");
        assert!(student.is_active());
        assert!(!student.detained().is_active());
    }

    #[test]
    fn academic_status_parses_portal_labels() {
        assert_eq!(AcademicStatus::parse("Detained"), Some(AcademicStatus::Detained));
        assert_eq!(AcademicStatus::parse(""), Some(AcademicStatus::Active));
        assert_eq!(AcademicStatus::parse("graduated"), None);
    }
}
