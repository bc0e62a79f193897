use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{AcademicStatus, Student, StudentId, UNKNOWN_DEPARTMENT};

#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownStatus { student_id: String, value: String },
    DuplicateStudent(String),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Io(err) => write!(f, "failed to read student roster: {}", err),
            RosterError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterError::UnknownStatus { student_id, value } => write!(
                f,
                "student {} has unrecognised academic status '{}'",
                student_id, value
            ),
            RosterError::DuplicateStudent(id) => {
                write!(f, "student {} appears more than once in the roster", id)
            }
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Io(err) => Some(err),
            RosterError::Csv(err) => Some(err),
            RosterError::UnknownStatus { .. } | RosterError::DuplicateStudent(_) => None,
        }
    }
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    department: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    academic_status: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Loads student records from a CSV export with an
/// `id,name,department,academic_status` header. Input order is preserved.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Student>, RosterError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Student>, RosterError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut students: Vec<Student> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for record in csv_reader.deserialize::<RosterRow>() {
            let row = record?;
            if !seen.insert(row.id.clone()) {
                return Err(RosterError::DuplicateStudent(row.id));
            }

            let academic_status = match row.academic_status {
                Some(value) => AcademicStatus::parse(&value).ok_or_else(|| {
                    RosterError::UnknownStatus {
                        student_id: row.id.clone(),
                        value,
                    }
                })?,
                None => AcademicStatus::Active,
            };

            students.push(Student {
                id: StudentId(row.id),
                name: row.name,
                department: row
                    .department
                    .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string()),
                academic_status,
            });
        }

        Ok(students)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_rows_in_order_with_defaults() {
        let csv = "id,name,department,academic_status\n\
                   21CS001, Asha ,CSE,active\n\
                   21EC010,Bharath,,\n\
                   21ME003,Chandra,MECH,Detained\n";
        let students = RosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");

        assert_eq!(students.len(), 3);
        assert_eq!(students[0].name, "Asha");
        assert_eq!(students[1].department, UNKNOWN_DEPARTMENT);
        assert_eq!(students[1].academic_status, AcademicStatus::Active);
        assert_eq!(students[2].academic_status, AcademicStatus::Detained);
    }

    #[test]
    fn status_column_is_optional() {
        let csv = "id,name,department\n21CS001,Asha,CSE\n";
        let students = RosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");
        assert!(students[0].is_active());
    }

    #[test]
    fn rejects_unknown_status() {
        let csv = "id,name,department,academic_status\n21CS001,Asha,CSE,suspended\n";
        match RosterImporter::from_reader(Cursor::new(csv)) {
            Err(RosterError::UnknownStatus { student_id, value }) => {
                assert_eq!(student_id, "21CS001");
                assert_eq!(value, "suspended");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let csv = "id,name,department\n21CS001,Asha,CSE\n21CS001,Asha again,CSE\n";
        assert!(matches!(
            RosterImporter::from_reader(Cursor::new(csv)),
            Err(RosterError::DuplicateStudent(id)) if id == "21CS001"
        ));
    }

    #[test]
    fn large_roster_reports_a_late_duplicate() {
        let mut csv = String::from("id,name,department\n");
        for index in 0..5_000 {
            csv.push_str(&format!("R{index:05},Student {index},D{}\n", index % 7));
        }
        csv.push_str("R00042,Repeat,D0\n");

        assert!(matches!(
            RosterImporter::from_reader(Cursor::new(csv)),
            Err(RosterError::DuplicateStudent(id)) if id == "R00042"
        ));
    }
}
