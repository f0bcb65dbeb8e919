// 🗓️ Semester - Either a list of courses or a GPA/credits summary
//
// Switching modes never drops data: both representations live side by side
// and the mode only decides which one is read.

use super::course::{CourseEntry, CourseId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// SEMESTER ID
// ============================================================================

/// Stable identity of a semester (survives reordering and renumbering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemesterId(Uuid);

impl SemesterId {
    pub fn new() -> Self {
        SemesterId(Uuid::new_v4())
    }
}

impl Default for SemesterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SemesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SEMESTER MODE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemesterMode {
    /// GPA derived from the course list
    #[default]
    Itemized,

    /// GPA and credits entered directly
    Summary,
}

impl SemesterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemesterMode::Itemized => "Itemized",
            SemesterMode::Summary => "Summary",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SemesterMode::Itemized => SemesterMode::Summary,
            SemesterMode::Summary => SemesterMode::Itemized,
        }
    }
}

// ============================================================================
// SUMMARY ENTRY
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryEntry {
    pub gpa: f64,
    pub credits: f64,
}

impl SummaryEntry {
    pub fn new(gpa: f64, credits: f64) -> Self {
        SummaryEntry { gpa, credits }
    }

    pub fn counts(&self) -> bool {
        self.gpa > 0.0 && self.credits > 0.0
    }
}

// ============================================================================
// SEMESTER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    #[serde(default)]
    pub id: SemesterId,

    /// 1-based position in the ledger; rewritten on every structural change
    #[serde(default)]
    pub number: usize,

    #[serde(default)]
    pub mode: SemesterMode,

    #[serde(default)]
    pub courses: Vec<CourseEntry>,

    #[serde(default)]
    pub summary: SummaryEntry,
}

impl Semester {
    /// New semester: itemized, with exactly one empty course
    pub fn new() -> Self {
        Semester {
            id: SemesterId::new(),
            number: 0,
            mode: SemesterMode::Itemized,
            courses: vec![CourseEntry::empty()],
            summary: SummaryEntry::default(),
        }
    }

    pub fn itemized(courses: Vec<CourseEntry>) -> Self {
        Semester {
            courses,
            ..Semester::new()
        }
    }

    pub fn summarized(gpa: f64, credits: f64) -> Self {
        Semester {
            mode: SemesterMode::Summary,
            summary: SummaryEntry::new(gpa, credits),
            ..Semester::new()
        }
    }

    pub fn label(&self) -> String {
        format!("Semester {}", self.number)
    }

    pub fn course(&self, id: CourseId) -> Option<&CourseEntry> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn course_mut(&mut self, id: CourseId) -> Option<&mut CourseEntry> {
        self.courses.iter_mut().find(|c| c.id == id)
    }
}

impl Default for Semester {
    fn default() -> Self {
        Self::new()
    }
}
