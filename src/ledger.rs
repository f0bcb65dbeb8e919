// 📒 Grade Ledger - Semester GPA and cumulative CGPA
//
// Owns the prior standing and the ordered list of semesters. Every figure is
// a pure function of that state: the UI layer mutates through the commands
// below and asks for a fresh report afterward.

use crate::entities::{
    CourseEntry, CourseId, PriorStanding, Semester, SemesterId, SemesterMode,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// COMPUTED FIGURES
// ============================================================================

/// What one semester contributes to the cumulative totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SemesterTotals {
    pub gpa: f64,
    pub credits: f64,
    pub quality_points: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallTotals {
    pub cgpa: f64,
    pub credits: f64,
    pub quality_points: f64,
}

/// Weighted average of a single semester, reading only its active mode.
pub fn compute_semester(semester: &Semester) -> SemesterTotals {
    match semester.mode {
        SemesterMode::Itemized => {
            let (quality_points, credits) = semester
                .courses
                .iter()
                .filter(|course| course.counts())
                .fold((0.0, 0.0), |(qp, cr), course| {
                    (qp + course.quality_points(), cr + course.credits)
                });

            SemesterTotals {
                gpa: if credits > 0.0 { quality_points / credits } else { 0.0 },
                credits,
                quality_points,
            }
        }
        SemesterMode::Summary => {
            let summary = semester.summary;
            if summary.counts() {
                SemesterTotals {
                    gpa: summary.gpa,
                    credits: summary.credits,
                    quality_points: summary.gpa * summary.credits,
                }
            } else {
                SemesterTotals::default()
            }
        }
    }
}

/// Cumulative CGPA over the prior standing plus every semester.
pub fn compute_overall(prior: &PriorStanding, semesters: &[Semester]) -> OverallTotals {
    let (mut quality_points, mut credits) = prior.contribution();

    for semester in semesters {
        let totals = compute_semester(semester);
        quality_points += totals.quality_points;
        credits += totals.credits;
    }

    OverallTotals {
        cgpa: if credits > 0.0 { quality_points / credits } else { 0.0 },
        credits,
        quality_points,
    }
}

/// Assign 1-based contiguous numbers in display order.
pub fn renumber(semesters: &mut [Semester]) {
    for (index, semester) in semesters.iter_mut().enumerate() {
        semester.number = index + 1;
    }
}

// ============================================================================
// GRADE LEDGER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeLedger {
    #[serde(default)]
    prior: PriorStanding,

    #[serde(default)]
    semesters: Vec<Semester>,
}

impl GradeLedger {
    /// Starting state of the calculator: blank prior standing, one semester
    pub fn new() -> Self {
        let mut ledger = GradeLedger::empty();
        ledger.add_semester();
        ledger
    }

    /// No prior standing, no semesters
    pub fn empty() -> Self {
        GradeLedger {
            prior: PriorStanding::default(),
            semesters: Vec::new(),
        }
    }

    /// Build a ledger from already-populated parts (numbers are reassigned)
    pub fn from_parts(prior: PriorStanding, semesters: Vec<Semester>) -> Self {
        let mut ledger = GradeLedger { prior, semesters };
        ledger.renumber();
        ledger
    }

    /// Load a JSON snapshot as written by `to_snapshot`
    pub fn from_snapshot(json: &str) -> Result<Self> {
        let ledger: GradeLedger =
            serde_json::from_str(json).context("Failed to parse ledger snapshot")?;
        Ok(GradeLedger::from_parts(ledger.prior, ledger.semesters))
    }

    pub fn to_snapshot(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize ledger snapshot")
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn prior(&self) -> &PriorStanding {
        &self.prior
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn semester(&self, id: SemesterId) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == id)
    }

    fn semester_mut(&mut self, id: SemesterId) -> Option<&mut Semester> {
        self.semesters.iter_mut().find(|s| s.id == id)
    }

    fn position(&self, id: SemesterId) -> Option<usize> {
        self.semesters.iter().position(|s| s.id == id)
    }

    fn course_mut(&mut self, semester: SemesterId, course: CourseId) -> Option<&mut CourseEntry> {
        self.semester_mut(semester)?.course_mut(course)
    }

    // ------------------------------------------------------------------------
    // Computation
    // ------------------------------------------------------------------------

    pub fn compute_semester(&self, id: SemesterId) -> Option<SemesterTotals> {
        self.semester(id).map(compute_semester)
    }

    pub fn compute_overall(&self) -> OverallTotals {
        compute_overall(&self.prior, &self.semesters)
    }

    pub fn renumber(&mut self) {
        renumber(&mut self.semesters);
    }

    // ------------------------------------------------------------------------
    // Structural commands
    // ------------------------------------------------------------------------

    pub fn add_semester(&mut self) -> SemesterId {
        let semester = Semester::new();
        let id = semester.id;
        self.semesters.push(semester);
        self.renumber();
        log::debug!("added semester {} ({} total)", id, self.semesters.len());
        id
    }

    pub fn remove_semester(&mut self, id: SemesterId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.semesters.remove(index);
                self.renumber();
                log::debug!("removed semester {}", id);
                true
            }
            None => {
                log::debug!("remove ignored: no semester {}", id);
                false
            }
        }
    }

    /// Move a semester to `to_index` (clamped to the last position)
    pub fn move_semester(&mut self, id: SemesterId, to_index: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let to = to_index.min(self.semesters.len() - 1);
        let semester = self.semesters.remove(from);
        self.semesters.insert(to, semester);
        self.renumber();
        log::debug!("moved semester {} from {} to {}", id, from, to);
        true
    }

    pub fn add_course(&mut self, semester: SemesterId) -> Option<CourseId> {
        let target = self.semester_mut(semester)?;
        let course = CourseEntry::empty();
        let id = course.id;
        target.courses.push(course);
        log::debug!("added course {} to semester {}", id, semester);
        Some(id)
    }

    pub fn remove_course(&mut self, semester: SemesterId, course: CourseId) -> bool {
        let Some(target) = self.semester_mut(semester) else {
            return false;
        };
        let before = target.courses.len();
        target.courses.retain(|c| c.id != course);
        let removed = target.courses.len() != before;
        if removed {
            log::debug!("removed course {} from semester {}", course, semester);
        }
        removed
    }

    pub fn set_mode(&mut self, semester: SemesterId, mode: SemesterMode) -> bool {
        match self.semester_mut(semester) {
            Some(target) => {
                target.mode = mode;
                true
            }
            None => false,
        }
    }

    pub fn toggle_mode(&mut self, semester: SemesterId) -> Option<SemesterMode> {
        let target = self.semester_mut(semester)?;
        target.mode = target.mode.toggled();
        Some(target.mode)
    }

    /// Blank prior standing and a single fresh semester
    pub fn reset(&mut self) {
        self.prior.clear();
        self.semesters.clear();
        self.add_semester();
        log::info!("ledger reset");
    }

    // ------------------------------------------------------------------------
    // Field setters (values already coerced by the UI layer)
    // ------------------------------------------------------------------------

    pub fn set_prior_cgpa(&mut self, cgpa: f64) {
        self.prior.cgpa = cgpa;
    }

    pub fn set_prior_credits(&mut self, credits: f64) {
        self.prior.credits = credits;
    }

    pub fn set_course_credits(&mut self, semester: SemesterId, course: CourseId, credits: f64) -> bool {
        self.course_mut(semester, course)
            .map(|c| c.credits = credits)
            .is_some()
    }

    pub fn set_course_grade_point(
        &mut self,
        semester: SemesterId,
        course: CourseId,
        grade_point: f64,
    ) -> bool {
        self.course_mut(semester, course)
            .map(|c| c.grade_point = grade_point)
            .is_some()
    }

    pub fn set_summary_gpa(&mut self, semester: SemesterId, gpa: f64) -> bool {
        self.semester_mut(semester)
            .map(|s| s.summary.gpa = gpa)
            .is_some()
    }

    pub fn set_summary_credits(&mut self, semester: SemesterId, credits: f64) -> bool {
        self.semester_mut(semester)
            .map(|s| s.summary.credits = credits)
            .is_some()
    }
}

impl Default for GradeLedger {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn itemized(courses: &[(f64, f64)]) -> Semester {
        Semester::itemized(
            courses
                .iter()
                .map(|&(credits, gp)| CourseEntry::new(credits, gp))
                .collect(),
        )
    }

    #[test]
    fn test_itemized_semester() {
        let totals = compute_semester(&itemized(&[(3.0, 4.0), (4.0, 3.0)]));

        assert!((totals.quality_points - 24.0).abs() < EPS);
        assert!((totals.credits - 7.0).abs() < EPS);
        assert!((totals.gpa - 24.0 / 7.0).abs() < EPS);
    }

    #[test]
    fn test_summary_semester() {
        let totals = compute_semester(&Semester::summarized(3.0, 10.0));

        assert!((totals.quality_points - 30.0).abs() < EPS);
        assert_eq!(totals.credits, 10.0);
        assert_eq!(totals.gpa, 3.0);
    }

    #[test]
    fn test_summary_semester_needs_both_values() {
        assert_eq!(compute_semester(&Semester::summarized(0.0, 10.0)), SemesterTotals::default());
        assert_eq!(compute_semester(&Semester::summarized(3.5, 0.0)), SemesterTotals::default());
    }

    #[test]
    fn test_fresh_semester_is_zero() {
        assert_eq!(compute_semester(&Semester::new()), SemesterTotals::default());
    }

    #[test]
    fn test_invalid_courses_are_excluded() {
        let totals = compute_semester(&itemized(&[(3.0, 4.0), (-3.0, 4.0), (2.0, -1.0), (0.0, 4.0)]));

        assert_eq!(totals.credits, 3.0);
        assert_eq!(totals.gpa, 4.0);
    }

    #[test]
    fn test_overall_with_prior_standing() {
        let ledger = GradeLedger::from_parts(
            PriorStanding::new(3.2, 20.0),
            vec![itemized(&[(3.0, 4.0), (3.0, 3.0)])],
        );
        let overall = ledger.compute_overall();

        assert_eq!(overall.credits, 26.0);
        assert!((overall.quality_points - 85.0).abs() < EPS);
        assert!((overall.cgpa - 85.0 / 26.0).abs() < EPS);
    }

    #[test]
    fn test_overall_ignores_unqualified_prior() {
        let ledger = GradeLedger::from_parts(
            PriorStanding::new(3.5, 0.0),
            vec![itemized(&[(3.0, 2.0)])],
        );
        let overall = ledger.compute_overall();

        assert_eq!(overall.credits, 3.0);
        assert_eq!(overall.cgpa, 2.0);
    }

    #[test]
    fn test_overall_zero_credits() {
        assert_eq!(GradeLedger::empty().compute_overall(), OverallTotals::default());
        assert_eq!(GradeLedger::new().compute_overall(), OverallTotals::default());
    }

    #[test]
    fn test_new_ledger_has_one_itemized_semester() {
        let ledger = GradeLedger::new();

        assert_eq!(ledger.semesters().len(), 1);
        assert_eq!(ledger.semesters()[0].number, 1);
        assert_eq!(ledger.semesters()[0].mode, SemesterMode::Itemized);
        assert_eq!(ledger.semesters()[0].courses.len(), 1);
    }

    #[test]
    fn test_add_and_remove_semester_renumbers() {
        let mut ledger = GradeLedger::new();
        let second = ledger.add_semester();
        let third = ledger.add_semester();
        let first = ledger.semesters()[0].id;

        assert!(ledger.remove_semester(second));
        let numbers: Vec<_> = ledger.semesters().iter().map(|s| (s.id, s.number)).collect();
        assert_eq!(numbers, vec![(first, 1), (third, 2)]);
    }

    #[test]
    fn test_remove_unknown_semester_is_noop() {
        let mut ledger = GradeLedger::new();
        assert!(!ledger.remove_semester(SemesterId::new()));
        assert_eq!(ledger.semesters().len(), 1);
    }

    #[test]
    fn test_remove_last_semester_keeps_prior() {
        let mut ledger = GradeLedger::new();
        ledger.set_prior_cgpa(3.0);
        ledger.set_prior_credits(15.0);
        let only = ledger.semesters()[0].id;

        assert!(ledger.remove_semester(only));
        assert!(ledger.semesters().is_empty());
        let overall = ledger.compute_overall();
        assert_eq!(overall.credits, 15.0);
        assert_eq!(overall.cgpa, 3.0);
    }

    #[test]
    fn test_course_commands() {
        let mut ledger = GradeLedger::new();
        let semester = ledger.semesters()[0].id;
        let first = ledger.semesters()[0].courses[0].id;
        let second = ledger.add_course(semester).unwrap();

        assert!(ledger.set_course_credits(semester, first, 3.0));
        assert!(ledger.set_course_grade_point(semester, first, 4.0));
        assert!(ledger.set_course_credits(semester, second, 4.0));
        assert!(ledger.set_course_grade_point(semester, second, 3.0));
        assert!((ledger.compute_overall().quality_points - 24.0).abs() < EPS);

        assert!(ledger.remove_course(semester, second));
        assert!(!ledger.remove_course(semester, second));
        assert_eq!(ledger.compute_overall().credits, 3.0);
    }

    #[test]
    fn test_commands_on_unknown_ids() {
        let mut ledger = GradeLedger::new();
        let semester = ledger.semesters()[0].id;
        let ghost_semester = SemesterId::new();
        let ghost_course = CourseId::new();

        assert!(ledger.add_course(ghost_semester).is_none());
        assert!(!ledger.set_course_credits(semester, ghost_course, 3.0));
        assert!(!ledger.set_summary_gpa(ghost_semester, 3.0));
        assert!(!ledger.set_mode(ghost_semester, SemesterMode::Summary));
        assert!(ledger.toggle_mode(ghost_semester).is_none());
        assert!(!ledger.move_semester(ghost_semester, 0));
    }

    #[test]
    fn test_mode_toggle_retains_data() {
        let mut ledger = GradeLedger::new();
        let semester = ledger.semesters()[0].id;
        let course = ledger.semesters()[0].courses[0].id;
        ledger.set_course_credits(semester, course, 3.0);
        ledger.set_course_grade_point(semester, course, 3.7);
        ledger.set_summary_gpa(semester, 2.0);
        ledger.set_summary_credits(semester, 12.0);

        let before = ledger.compute_semester(semester).unwrap();
        assert_eq!(ledger.toggle_mode(semester), Some(SemesterMode::Summary));
        assert_eq!(ledger.compute_semester(semester).unwrap().credits, 12.0);
        assert_eq!(ledger.toggle_mode(semester), Some(SemesterMode::Itemized));
        assert_eq!(ledger.compute_semester(semester).unwrap(), before);
    }

    #[test]
    fn test_move_semester_clamps_and_renumbers() {
        let mut ledger = GradeLedger::new();
        let first = ledger.semesters()[0].id;
        let second = ledger.add_semester();

        assert!(ledger.move_semester(first, 99));
        assert_eq!(ledger.semesters()[0].id, second);
        assert_eq!(ledger.semesters()[1].id, first);
        assert_eq!(ledger.semester(first).unwrap().number, 2);
    }

    #[test]
    fn test_reset() {
        let mut ledger = GradeLedger::from_parts(
            PriorStanding::new(3.9, 40.0),
            vec![itemized(&[(3.0, 4.0)]), Semester::summarized(3.0, 15.0)],
        );
        ledger.reset();

        assert_eq!(*ledger.prior(), PriorStanding::default());
        assert_eq!(ledger.semesters().len(), 1);
        assert_eq!(ledger.semesters()[0].number, 1);
        assert_eq!(ledger.compute_overall(), OverallTotals::default());
    }

    #[test]
    fn test_snapshot_roundtrip_renumbers() {
        let json = r#"{
            "prior": { "cgpa": 3.2, "credits": 20 },
            "semesters": [
                { "mode": "itemized", "courses": [ { "credits": 3, "grade_point": 4 }, { "credits": 3, "grade_point": 3 } ] },
                { "mode": "summary", "summary": { "gpa": 3.0, "credits": 10 } }
            ]
        }"#;
        let ledger = GradeLedger::from_snapshot(json).unwrap();

        assert_eq!(ledger.semesters()[0].number, 1);
        assert_eq!(ledger.semesters()[1].number, 2);
        assert!((ledger.compute_overall().quality_points - 115.0).abs() < EPS);

        let reloaded = GradeLedger::from_snapshot(&ledger.to_snapshot().unwrap()).unwrap();
        assert_eq!(reloaded, ledger);
    }

    #[test]
    fn test_snapshot_missing_numbers_read_as_zero() {
        let ledger = GradeLedger::from_snapshot(r#"{ "prior": { "cgpa": 3.2 } }"#).unwrap();
        assert_eq!(*ledger.prior(), PriorStanding::new(3.2, 0.0));
        assert_eq!(ledger.compute_overall(), OverallTotals::default());

        let ledger = GradeLedger::from_snapshot(
            r#"{ "semesters": [ { "mode": "summary", "summary": { "gpa": 3.0 } } ] }"#,
        )
        .unwrap();
        assert_eq!(ledger.semesters()[0].summary.gpa, 3.0);
        assert_eq!(ledger.semesters()[0].summary.credits, 0.0);
        assert_eq!(ledger.compute_overall(), OverallTotals::default());
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(GradeLedger::from_snapshot("not json").is_err());
    }

    fn course_strategy() -> impl Strategy<Value = (f64, f64)> {
        (-5.0f64..10.0, -1.0f64..4.5)
    }

    fn semester_strategy() -> impl Strategy<Value = Semester> {
        prop_oneof![
            prop::collection::vec(course_strategy(), 0..6).prop_map(|c| itemized(&c)),
            (-1.0f64..4.5, -5.0f64..30.0).prop_map(|(gpa, cr)| Semester::summarized(gpa, cr)),
        ]
    }

    proptest! {
        #[test]
        fn prop_overall_is_idempotent(semesters in prop::collection::vec(semester_strategy(), 0..6)) {
            let ledger = GradeLedger::from_parts(PriorStanding::new(3.0, 12.0), semesters);
            prop_assert_eq!(ledger.compute_overall(), ledger.compute_overall());
        }

        #[test]
        fn prop_reordering_keeps_cgpa(semesters in prop::collection::vec(semester_strategy(), 1..6)) {
            let forward = GradeLedger::from_parts(PriorStanding::default(), semesters.clone());
            let mut reversed_semesters = semesters;
            reversed_semesters.reverse();
            let reversed = GradeLedger::from_parts(PriorStanding::default(), reversed_semesters);

            let a = forward.compute_overall();
            let b = reversed.compute_overall();
            prop_assert!((a.cgpa - b.cgpa).abs() < 1e-9);
            prop_assert!((a.credits - b.credits).abs() < 1e-9);
        }

        #[test]
        fn prop_negative_courses_match_zeroed(courses in prop::collection::vec(course_strategy(), 0..8)) {
            let zeroed: Vec<(f64, f64)> = courses
                .iter()
                .map(|&(cr, gp)| if cr > 0.0 && gp >= 0.0 { (cr, gp) } else { (0.0, 0.0) })
                .collect();
            prop_assert_eq!(compute_semester(&itemized(&courses)), compute_semester(&itemized(&zeroed)));
        }

        #[test]
        fn prop_cgpa_within_grade_bounds(semesters in prop::collection::vec(semester_strategy(), 0..6)) {
            let overall = compute_overall(&PriorStanding::default(), &semesters);
            prop_assert!(overall.cgpa >= 0.0);
            prop_assert!(overall.cgpa <= 4.5 + 1e-9);
        }
    }
}
