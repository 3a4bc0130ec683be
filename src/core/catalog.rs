//! Built-in class catalog used when no roster file is supplied.

use crate::domain::model::{Class, Member, SkillScores};
use crate::utils::error::{GroupError, Result};
use rand::Rng;

const MOCK_CLASSES: [(&str, &str, &str, &str, usize); 3] = [
    ("CI1-GI", "CI1 - GI", "1st Year", "Computer Engineering", 52),
    ("CI2-GE", "CI2 - GE", "2nd Year", "Electrical Engineering", 48),
    ("CI3-GS", "CI3 - GS", "3rd Year", "Software Engineering", 50),
];

#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    classes: Vec<Class>,
}

impl ClassCatalog {
    pub fn new(classes: Vec<Class>) -> Self {
        Self { classes }
    }

    /// The three sample classes, with skill scores drawn from `rng`.
    pub fn mock<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let classes = MOCK_CLASSES
            .iter()
            .map(|&(id, name, grade, major, size)| Class {
                id: id.to_string(),
                name: name.to_string(),
                grade: grade.to_string(),
                major: major.to_string(),
                students: (1..=size).map(|n| random_student(n, rng)).collect(),
            })
            .collect();
        Self { classes }
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn find(&self, class_id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == class_id)
    }

    pub fn require(&self, class_id: &str) -> Result<&Class> {
        self.find(class_id).ok_or_else(|| GroupError::UnknownClass {
            class_id: class_id.to_string(),
        })
    }
}

fn random_student<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Member {
    Member::new(
        format!("student-{}", n),
        format!("Student {}", n),
        SkillScores {
            frontend: rng.gen_range(0..100),
            backend: rng.gen_range(0..100),
            uiux: rng.gen_range(0..100),
            security: rng.gen_range(0..100),
            devops: rng.gen_range(0..100),
        },
    )
}
