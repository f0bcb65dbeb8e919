// 📘 Course Entry - One itemized course inside a semester
//
// Identity is the CourseId (never changes); credits and grade point are
// values the user keeps editing.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// COURSE ID
// ============================================================================

/// Stable identity of a course row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
    pub fn new() -> Self {
        CourseId(Uuid::new_v4())
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// COURSE ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    #[serde(default)]
    pub id: CourseId,

    /// Credit hours (coerced; may be 0 or negative if the user typed so)
    #[serde(default)]
    pub credits: f64,

    /// Grade point on the active scale (0.0 until a grade is picked)
    #[serde(default)]
    pub grade_point: f64,
}

impl CourseEntry {
    /// Fresh row, as added by "add course"
    pub fn empty() -> Self {
        CourseEntry {
            id: CourseId::new(),
            credits: 0.0,
            grade_point: 0.0,
        }
    }

    pub fn new(credits: f64, grade_point: f64) -> Self {
        CourseEntry {
            id: CourseId::new(),
            credits,
            grade_point,
        }
    }

    /// Whether this row counts toward its semester's weighted sum
    pub fn counts(&self) -> bool {
        self.credits > 0.0 && self.grade_point >= 0.0
    }

    pub fn quality_points(&self) -> f64 {
        self.credits * self.grade_point
    }
}
