// 🅰️ Grade Scales - Letter grades offered by the course grade picker

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// GRADE SCALE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradeScale {
    /// A+ through F with plus/minus steps, 4.0 ceiling
    #[default]
    FourPoint,

    /// Whole letters only: A=4, B=3, C=2, D=1, F=0
    FourPointSimple,

    /// Uniform grading used across Bangladeshi universities
    Bangladesh,
}

/// One selectable grade
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Grade {
    pub letter: &'static str,
    pub point: f64,
}

const FOUR_POINT: &[Grade] = &[
    Grade { letter: "A+", point: 4.0 },
    Grade { letter: "A", point: 4.0 },
    Grade { letter: "A-", point: 3.7 },
    Grade { letter: "B+", point: 3.3 },
    Grade { letter: "B", point: 3.0 },
    Grade { letter: "B-", point: 2.7 },
    Grade { letter: "C+", point: 2.3 },
    Grade { letter: "C", point: 2.0 },
    Grade { letter: "C-", point: 1.7 },
    Grade { letter: "D+", point: 1.3 },
    Grade { letter: "D", point: 1.0 },
    Grade { letter: "F", point: 0.0 },
];

const FOUR_POINT_SIMPLE: &[Grade] = &[
    Grade { letter: "A", point: 4.0 },
    Grade { letter: "B", point: 3.0 },
    Grade { letter: "C", point: 2.0 },
    Grade { letter: "D", point: 1.0 },
    Grade { letter: "F", point: 0.0 },
];

const BANGLADESH: &[Grade] = &[
    Grade { letter: "A+", point: 4.0 },
    Grade { letter: "A", point: 3.75 },
    Grade { letter: "A-", point: 3.5 },
    Grade { letter: "B+", point: 3.25 },
    Grade { letter: "B", point: 3.0 },
    Grade { letter: "B-", point: 2.75 },
    Grade { letter: "C+", point: 2.5 },
    Grade { letter: "C", point: 2.25 },
    Grade { letter: "D", point: 2.0 },
    Grade { letter: "F", point: 0.0 },
];

impl GradeScale {
    pub const ALL: [GradeScale; 3] = [
        GradeScale::FourPoint,
        GradeScale::FourPointSimple,
        GradeScale::Bangladesh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeScale::FourPoint => "four-point",
            GradeScale::FourPointSimple => "four-point-simple",
            GradeScale::Bangladesh => "bangladesh",
        }
    }

    /// Grades from best to worst
    pub fn grades(&self) -> &'static [Grade] {
        match self {
            GradeScale::FourPoint => FOUR_POINT,
            GradeScale::FourPointSimple => FOUR_POINT_SIMPLE,
            GradeScale::Bangladesh => BANGLADESH,
        }
    }
}

impl fmt::Display for GradeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GradeScale::ALL
            .iter()
            .copied()
            .find(|scale| scale.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = GradeScale::ALL.iter().map(|s| s.as_str()).collect();
                format!("unknown grade scale '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

// ============================================================================
// TESTS
// ============================================================================
