// Entity Models - what a grade ledger is made of
//
// Semesters and courses carry a stable identity (UUID) so the UI layer can
// address them after reorders; everything else is a plain value.

pub mod course;
pub mod semester;
pub mod standing;

pub use course::{CourseEntry, CourseId};
pub use semester::{Semester, SemesterId, SemesterMode, SummaryEntry};
pub use standing::PriorStanding;
