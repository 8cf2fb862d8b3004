//! Wall height accounting in three correction layers.
//!
//! - raw: mean log diameter with bark
//! - no bark: bark removed on both faces
//! - final: drying shrinkage, then the belly groove on every course but the bottom one

use crate::domain::entities::{Course, CourseHeights};
use crate::domain::params::WallParameters;

/// Height corrections applied to each course.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightAccumulator {
    bark_thickness_mm: f64,
    shrinkage_percent: f64,
    belly_groove_mm: f64,
}

impl HeightAccumulator {
    pub fn new(bark_thickness_mm: f64, shrinkage_percent: f64, belly_groove_mm: f64) -> Self {
        Self {
            bark_thickness_mm,
            shrinkage_percent,
            belly_groove_mm,
        }
    }

    pub fn from_parameters(params: &WallParameters) -> Self {
        Self::new(
            params.bark_thickness_mm,
            params.shrinkage_percent,
            params.belly_groove_mm,
        )
    }

    /// Heights of a course with mean diameter `avg` at stacking `position`.
    pub fn course_heights(&self, avg: f64, position: usize) -> CourseHeights {
        let no_bark = (avg - 2.0 * self.bark_thickness_mm).max(0.0);
        let shrunk = no_bark * (1.0 - self.shrinkage_percent / 100.0);
        let final_height = if position == 0 {
            shrunk
        } else {
            (shrunk - self.belly_groove_mm).max(0.0)
        };
        CourseHeights {
            raw: avg,
            no_bark,
            final_height,
        }
    }

    /// Fill in own and cumulative heights for every course, bottom first.
    pub fn apply(&self, courses: &mut [Course]) {
        let mut total = CourseHeights::default();
        for (position, course) in courses.iter_mut().enumerate() {
            let own = self.course_heights(course.average_diameter(), position);
            total.raw += own.raw;
            total.no_bark += own.no_bark;
            total.final_height += own.final_height;
            course.heights = own;
            course.cumulative = total;
        }
    }
}
