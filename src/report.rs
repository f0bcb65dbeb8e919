// 📊 Ledger Report - What the UI shows after each recomputation
//
// GPA figures are shown with exactly two fractional digits. Rounding is
// applied to the exact binary value of the f64 by the standard formatter;
// exact decimal ties resolve half-to-even, so 3.125 shows as "3.12".

use crate::entities::{SemesterId, SemesterMode};
use crate::ledger::{compute_semester, GradeLedger};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// FORMATTING
// ============================================================================

/// Two fractional digits, e.g. `3.43`
pub fn format_gpa(value: f64) -> String {
    format!("{:.2}", value)
}

/// Credits as a plain number: `7` for whole values, `7.5` otherwise
pub fn format_credits(value: f64) -> String {
    format!("{}", value)
}

pub fn credits_label(value: f64) -> String {
    format!("Total Credits: {}", format_credits(value))
}

// ============================================================================
// REPORTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterReport {
    pub id: SemesterId,
    pub label: String,
    pub mode: SemesterMode,
    pub gpa: f64,
    pub credits: f64,
    pub quality_points: f64,
    pub gpa_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub semesters: Vec<SemesterReport>,
    pub cgpa: f64,
    pub total_credits: f64,
    pub total_quality_points: f64,
    pub cgpa_display: String,
    pub credits_display: String,
}

impl LedgerReport {
    /// Full recomputation pass over the ledger, in display order
    pub fn from_ledger(ledger: &GradeLedger) -> Self {
        let semesters = ledger
            .semesters()
            .iter()
            .map(|semester| {
                let totals = compute_semester(semester);
                SemesterReport {
                    id: semester.id,
                    label: semester.label(),
                    mode: semester.mode,
                    gpa: totals.gpa,
                    credits: totals.credits,
                    quality_points: totals.quality_points,
                    gpa_display: format_gpa(totals.gpa),
                }
            })
            .collect();

        let overall = ledger.compute_overall();

        LedgerReport {
            semesters,
            cgpa: overall.cgpa,
            total_credits: overall.credits,
            total_quality_points: overall.quality_points,
            cgpa_display: format_gpa(overall.cgpa),
            credits_display: credits_label(overall.credits),
        }
    }

    pub fn semester(&self, id: SemesterId) -> Option<&SemesterReport> {
        self.semesters.iter().find(|s| s.id == id)
    }
}

impl GradeLedger {
    pub fn report(&self) -> LedgerReport {
        LedgerReport::from_ledger(self)
    }
}

impl fmt::Display for LedgerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for semester in &self.semesters {
            writeln!(
                f,
                "{:<12} {:<9} GPA {}  ({} credits)",
                semester.label,
                semester.mode.as_str(),
                semester.gpa_display,
                format_credits(semester.credits),
            )?;
        }
        writeln!(f, "CGPA: {}", self.cgpa_display)?;
        write!(f, "{}", self.credits_display)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CourseEntry, PriorStanding, Semester};

    #[test]
    fn test_format_gpa_two_digits() {
        assert_eq!(format_gpa(24.0 / 7.0), "3.43");
        assert_eq!(format_gpa(85.0 / 26.0), "3.27");
        assert_eq!(format_gpa(3.0), "3.00");
        assert_eq!(format_gpa(0.0), "0.00");
    }

    #[test]
    fn test_format_gpa_exact_ties_round_half_to_even() {
        // 3.125 and 0.125 are exact in binary, so these are true ties
        assert_eq!(format_gpa(3.125), "3.12");
        assert_eq!(format_gpa(0.125), "0.12");
        assert_eq!(format_gpa(0.375), "0.38");
        // 1.005 is stored just below the tie
        assert_eq!(format_gpa(1.005), "1.00");
    }

    #[test]
    fn test_summary_gpa_display_on_tie() {
        let ledger = GradeLedger::from_parts(
            PriorStanding::default(),
            vec![Semester::summarized(3.125, 12.0)],
        );
        let report = ledger.report();

        assert_eq!(report.semesters[0].gpa_display, "3.12");
        assert_eq!(report.cgpa_display, "3.12");
    }

    #[test]
    fn test_format_credits() {
        assert_eq!(format_credits(7.0), "7");
        assert_eq!(format_credits(7.5), "7.5");
        assert_eq!(format_credits(0.0), "0");
        assert_eq!(credits_label(26.0), "Total Credits: 26");
    }

    #[test]
    fn test_report_matches_worked_example() {
        let ledger = GradeLedger::from_parts(
            PriorStanding::new(3.2, 20.0),
            vec![Semester::itemized(vec![
                CourseEntry::new(3.0, 4.0),
                CourseEntry::new(3.0, 3.0),
            ])],
        );
        let report = ledger.report();

        assert_eq!(report.semesters.len(), 1);
        assert_eq!(report.semesters[0].label, "Semester 1");
        assert_eq!(report.semesters[0].gpa_display, "3.50");
        assert_eq!(report.cgpa_display, "3.27");
        assert_eq!(report.credits_display, "Total Credits: 26");
    }

    #[test]
    fn test_empty_report() {
        let report = GradeLedger::empty().report();

        assert!(report.semesters.is_empty());
        assert_eq!(report.cgpa_display, "0.00");
        assert_eq!(report.credits_display, "Total Credits: 0");
    }

    #[test]
    fn test_labels_follow_display_order() {
        let mut ledger = GradeLedger::new();
        let first = ledger.semesters()[0].id;
        let second = ledger.add_semester();
        ledger.move_semester(second, 0);
        let report = ledger.report();

        assert_eq!(report.semester(second).unwrap().label, "Semester 1");
        assert_eq!(report.semester(first).unwrap().label, "Semester 2");
    }

    #[test]
    fn test_display_text() {
        let ledger = GradeLedger::from_parts(
            PriorStanding::default(),
            vec![Semester::summarized(3.0, 10.0)],
        );
        let text = ledger.report().to_string();

        assert!(text.contains("Semester 1"));
        assert!(text.contains("GPA 3.00"));
        assert!(text.contains("CGPA: 3.00"));
        assert!(text.ends_with("Total Credits: 10"));
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(GradeLedger::new().report()).unwrap();
        assert_eq!(json["cgpa_display"], "0.00");
        assert_eq!(json["semesters"][0]["mode"], "itemized");
    }
}
