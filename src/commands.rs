// 🎛️ Ledger Commands - Typed interface the UI layer dispatches
//
// One command in, one full recomputation out. The ledger never sees input
// events; front ends translate their events into these values.

use crate::entities::{CourseId, SemesterId, SemesterMode};
use crate::ledger::GradeLedger;
use crate::report::LedgerReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LedgerCommand {
    AddSemester,
    RemoveSemester { semester: SemesterId },
    MoveSemester { semester: SemesterId, to_index: usize },
    AddCourse { semester: SemesterId },
    RemoveCourse { semester: SemesterId, course: CourseId },
    SetMode { semester: SemesterId, mode: SemesterMode },
    ToggleMode { semester: SemesterId },
    SetPriorCgpa { value: f64 },
    SetPriorCredits { value: f64 },
    SetCourseCredits { semester: SemesterId, course: CourseId, value: f64 },
    SetCourseGradePoint { semester: SemesterId, course: CourseId, value: f64 },
    SetSummaryGpa { semester: SemesterId, value: f64 },
    SetSummaryCredits { semester: SemesterId, value: f64 },
    Reset,
}

/// Identity created by a command, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    Semester(SemesterId),
    Course { semester: SemesterId, course: CourseId },
}

#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// False when the command addressed an unknown semester or course
    pub applied: bool,
    pub created: Option<Created>,
    pub report: LedgerReport,
}

impl GradeLedger {
    /// Apply one command, then recompute every figure
    pub fn apply(&mut self, command: LedgerCommand) -> CommandOutcome {
        let mut created = None;

        let applied = match command {
            LedgerCommand::AddSemester => {
                created = Some(Created::Semester(self.add_semester()));
                true
            }
            LedgerCommand::RemoveSemester { semester } => self.remove_semester(semester),
            LedgerCommand::MoveSemester { semester, to_index } => {
                self.move_semester(semester, to_index)
            }
            LedgerCommand::AddCourse { semester } => match self.add_course(semester) {
                Some(course) => {
                    created = Some(Created::Course { semester, course });
                    true
                }
                None => false,
            },
            LedgerCommand::RemoveCourse { semester, course } => {
                self.remove_course(semester, course)
            }
            LedgerCommand::SetMode { semester, mode } => self.set_mode(semester, mode),
            LedgerCommand::ToggleMode { semester } => self.toggle_mode(semester).is_some(),
            LedgerCommand::SetPriorCgpa { value } => {
                self.set_prior_cgpa(value);
                true
            }
            LedgerCommand::SetPriorCredits { value } => {
                self.set_prior_credits(value);
                true
            }
            LedgerCommand::SetCourseCredits { semester, course, value } => {
                self.set_course_credits(semester, course, value)
            }
            LedgerCommand::SetCourseGradePoint { semester, course, value } => {
                self.set_course_grade_point(semester, course, value)
            }
            LedgerCommand::SetSummaryGpa { semester, value } => {
                self.set_summary_gpa(semester, value)
            }
            LedgerCommand::SetSummaryCredits { semester, value } => {
                self.set_summary_credits(semester, value)
            }
            LedgerCommand::Reset => {
                self.reset();
                true
            }
        };

        if !applied {
            log::warn!("command addressed an unknown semester or course");
        }

        CommandOutcome {
            applied,
            created,
            report: self.report(),
        }
    }
}
