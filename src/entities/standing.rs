// 🎓 Prior Standing - Academic record carried in from earlier terms

use serde::{Deserialize, Serialize};

/// CGPA and credits already earned before the semesters in the ledger.
///
/// Only counts toward the cumulative figures when both values are positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorStanding {
    pub cgpa: f64,
    pub credits: f64,
}

impl PriorStanding {
    pub fn new(cgpa: f64, credits: f64) -> Self {
        PriorStanding { cgpa, credits }
    }

    pub fn qualifies(&self) -> bool {
        self.cgpa > 0.0 && self.credits > 0.0
    }

    /// (quality points, credits) this standing adds to the totals
    pub fn contribution(&self) -> (f64, f64) {
        if self.qualifies() {
            (self.cgpa * self.credits, self.credits)
        } else {
            (0.0, 0.0)
        }
    }

    pub fn clear(&mut self) {
        *self = PriorStanding::default();
    }
}
