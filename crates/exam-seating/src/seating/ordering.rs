use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::domain::Student;

/// How the student pool is ordered before it reaches the allocator.
///
/// The allocator itself is deterministic. Varying seat plans between
/// re-allocations is done here, with an explicit seed that can be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StudentOrdering {
    #[default]
    AsProvided,
    Seeded { seed: u64 },
}

impl StudentOrdering {
    pub fn apply(&self, mut students: Vec<Student>) -> Vec<Student> {
        if let StudentOrdering::Seeded { seed } = self {
            let mut rng = ChaCha8Rng::seed_from_u64(*seed);
            students.shuffle(&mut rng);
        }
        students
    }

    pub fn label(&self) -> String {
        match self {
            StudentOrdering::AsProvided => "as provided".to_string(),
            StudentOrdering::Seeded { seed } => format!("seeded shuffle ({seed})"),
        }
    }
}
