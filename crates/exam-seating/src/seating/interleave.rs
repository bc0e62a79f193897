use std::collections::{HashMap, VecDeque};

use super::domain::Student;
use super::error::AllocationError;

/// Spread same-department students apart with a round-robin merge.
///
/// Students are bucketed by department, buckets ordered by first appearance,
/// and one student is drawn from each non-empty bucket per round. Balanced
/// cohorts end up spaced roughly one department-count apart; heavily skewed
/// cohorts still cluster at the tail and are left to placement repair.
pub fn interleave(students: &[Student]) -> Result<Vec<Student>, AllocationError> {
    if students.is_empty() {
        return Err(AllocationError::NoStudents);
    }

    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<VecDeque<&Student>> = Vec::new();
    for student in students {
        let slot = *slots
            .entry(student.department.as_str())
            .or_insert_with(|| {
                buckets.push(VecDeque::new());
                buckets.len() - 1
            });
        buckets[slot].push_back(student);
    }

    let mut sequence = Vec::with_capacity(students.len());
    while sequence.len() < students.len() {
        for bucket in buckets.iter_mut() {
            if let Some(student) = bucket.pop_front() {
                sequence.push(student.clone());
            }
        }
    }

    Ok(sequence)
}

/// Number of consecutive same-department pairs in a sequence.
pub fn consecutive_repeats(sequence: &[Student]) -> usize {
    sequence
        .windows(2)
        .filter(|pair| pair[0].department == pair[1].department)
        .count()
}
