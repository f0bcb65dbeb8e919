// GPA Ledger - Core Library
// Semester GPA and cumulative CGPA, shared by the CLI and the terminal UI

pub mod entities;
pub mod input;
pub mod ledger;
pub mod commands;
pub mod report;
pub mod grades;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use entities::{
    CourseEntry, CourseId, PriorStanding, Semester, SemesterId, SemesterMode, SummaryEntry,
};
pub use ledger::{
    compute_overall, compute_semester, renumber, GradeLedger, OverallTotals, SemesterTotals,
};
pub use commands::{CommandOutcome, Created, LedgerCommand};
pub use report::{credits_label, format_credits, format_gpa, LedgerReport, SemesterReport};
pub use grades::{Grade, GradeScale};
pub use input::coerce;
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
