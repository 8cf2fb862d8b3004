//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Nominal length class of a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    Long,
    Short,
}

impl LengthClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthClass::Long => "long",
            LengthClass::Short => "short",
        }
    }
}

impl fmt::Display for LengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log: length class plus center diameter in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Log {
    pub length: LengthClass,
    pub diameter: u32,
}

impl Log {
    pub fn new(length: LengthClass, diameter: u32) -> Self {
        Self { length, diameter }
    }

    pub fn long(diameter: u32) -> Self {
        Self::new(LengthClass::Long, diameter)
    }

    pub fn short(diameter: u32) -> Self {
        Self::new(LengthClass::Short, diameter)
    }

    pub fn is_long(&self) -> bool {
        self.length == LengthClass::Long
    }
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.length, self.diameter)
    }
}

/// A felled tree, bucked into exactly two logs (root log first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub logs: [Log; 2],
    /// Breast-height diameter in millimeters
    pub root_diameter: u32,
}

/// Height values of one course, or running totals over several, in millimeters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseHeights {
    /// Average log diameter with bark
    pub raw: f64,
    /// After removing bark on both faces
    pub no_bark: f64,
    /// After drying shrinkage and belly groove
    pub final_height: f64,
}

/// One horizontal ring of the wall: two long and two short logs.
///
/// Only built through [`Course::new`], never deserialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    logs: [Log; 4],
    pub heights: CourseHeights,
    pub cumulative: CourseHeights,
}

/// Flatness grade of a course, from the spread of its log diameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evenness {
    /// Spread of at most 10 mm
    Even,
    /// Spread of at most 20 mm
    Uneven,
    Rough,
}

impl Course {
    /// Build a course from two long and two short logs, longs first.
    pub fn new(longs: [Log; 2], shorts: [Log; 2]) -> DomainResult<Self> {
        if !longs.iter().all(Log::is_long) || shorts.iter().any(Log::is_long) {
            return Err(DomainError::configuration(format!(
                "a course takes 2 long and 2 short logs, got [{}, {}] and [{}, {}]",
                longs[0], longs[1], shorts[0], shorts[1]
            )));
        }
        Ok(Self {
            logs: [longs[0], longs[1], shorts[0], shorts[1]],
            heights: CourseHeights::default(),
            cumulative: CourseHeights::default(),
        })
    }

    pub fn logs(&self) -> &[Log; 4] {
        &self.logs
    }

    pub fn average_diameter(&self) -> f64 {
        self.logs.iter().map(|l| f64::from(l.diameter)).sum::<f64>() / self.logs.len() as f64
    }

    /// Difference between the thickest and thinnest log in millimeters.
    pub fn variation(&self) -> u32 {
        let max = self.logs.iter().map(|l| l.diameter).max().unwrap_or(0);
        let min = self.logs.iter().map(|l| l.diameter).min().unwrap_or(0);
        max - min
    }

    pub fn evenness(&self) -> Evenness {
        match self.variation() {
            0..=10 => Evenness::Even,
            11..=20 => Evenness::Uneven,
            _ => Evenness::Rough,
        }
    }
}

/// Totals of a finished plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WallSummary {
    pub trees_to_cut: usize,
    pub total_height_raw: f64,
    pub total_height_no_bark: f64,
    pub total_height_final: f64,
}

/// Result of planning: trees to fell and the courses bottom to top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallPlan {
    pub trees: Vec<Tree>,
    /// Index 0 is the ground course
    pub courses: Vec<Course>,
    pub summary: WallSummary,
}

impl WallPlan {
    pub fn new(trees: Vec<Tree>, courses: Vec<Course>) -> Self {
        let totals = courses.last().map(|c| c.cumulative).unwrap_or_default();
        let summary = WallSummary {
            trees_to_cut: trees.len(),
            total_height_raw: totals.raw,
            total_height_no_bark: totals.no_bark,
            total_height_final: totals.final_height,
        };
        Self {
            trees,
            courses,
            summary,
        }
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Whether the finished wall is at least `target` millimeters high.
    pub fn reaches(&self, target: f64) -> bool {
        self.summary.total_height_final >= target
    }
}
