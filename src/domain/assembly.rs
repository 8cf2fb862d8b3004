//! Course assembly: greedy fill of 2 long + 2 short logs per course.

use tracing::trace;

use crate::domain::entities::{Course, LengthClass};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::pool::LogPool;

/// Orders courses thickest first, keeping input order on ties.
pub fn sort_courses(courses: &mut [Course]) {
    courses.sort_by(|a, b| b.average_diameter().total_cmp(&a.average_diameter()));
}

/// Draws courses from a [`LogPool`].
#[derive(Debug)]
pub struct CourseAssembler {
    pool: LogPool,
}

impl CourseAssembler {
    pub fn new(pool: LogPool) -> Self {
        Self { pool }
    }

    /// Build `count` courses, bottom (thickest) first.
    ///
    /// Each slot takes the two thickest remaining logs of each class. Fails
    /// on the first slot that cannot be completed.
    pub fn assemble(mut self, count: usize) -> DomainResult<Vec<Course>> {
        let mut courses = Vec::with_capacity(count);
        for course_index in 0..count {
            let long_remaining = self.pool.remaining(LengthClass::Long);
            let short_remaining = self.pool.remaining(LengthClass::Short);
            if long_remaining < 2 || short_remaining < 2 {
                return Err(DomainError::Imbalance {
                    course_index,
                    long_remaining,
                    short_remaining,
                });
            }
            let imbalance = || DomainError::Imbalance {
                course_index,
                long_remaining,
                short_remaining,
            };
            let longs = self
                .pool
                .take_pair(LengthClass::Long)
                .ok_or_else(imbalance)?;
            let shorts = self
                .pool
                .take_pair(LengthClass::Short)
                .ok_or_else(imbalance)?;
            let course = Course::new(longs, shorts)?;
            trace!(course_index, avg = course.average_diameter(), "assembled course");
            courses.push(course);
        }
        sort_courses(&mut courses);
        Ok(courses)
    }
}
