//! Planning pipeline: cut → pool → assemble → measure, and the height-target search.

use tracing::{debug, warn};

use crate::domain::assembly::{sort_courses, CourseAssembler};
use crate::domain::bucking::{trees_needed, TreeCutter};
use crate::domain::entities::{Course, Log, Tree, WallPlan};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::height::HeightAccumulator;
use crate::domain::params::{PlanGoal, WallParameters, MAX_COURSES};
use crate::domain::pool::LogPool;
use crate::domain::random::RandomSource;
use crate::domain::taper::{mm_to_m, TaperModel};

/// Logs in one course.
pub const LOGS_PER_COURSE: usize = 4;

/// Plan exactly `course_count` courses (1 to [`MAX_COURSES`]).
pub fn plan_courses(
    existing: &[Log],
    course_count: usize,
    params: &WallParameters,
    rng: &mut dyn RandomSource,
) -> DomainResult<WallPlan> {
    params.validate()?;
    PlanGoal::Courses(course_count).validate()?;
    let required = course_count
        .checked_mul(LOGS_PER_COURSE)
        .ok_or_else(|| DomainError::configuration(format!("course count {course_count} too large")))?;
    if existing.len() > required {
        return Err(DomainError::Capacity {
            required,
            existing: existing.len(),
        });
    }

    let tree_count = trees_needed(required, existing.len());
    debug!(required, existing = existing.len(), tree_count, "planning courses");

    let trees = TreeCutter::new(params).cut_many(tree_count, rng);
    let pool = LogPool::new(existing, trees.iter().flat_map(|t| t.logs.iter()));
    let mut courses = CourseAssembler::new(pool).assemble(course_count)?;
    HeightAccumulator::from_parameters(params).apply(&mut courses);

    Ok(WallPlan::new(trees, courses))
}

/// Searches for the course count that reaches a target wall height.
#[derive(Debug, Clone)]
pub struct WallHeightSolver<'a> {
    params: &'a WallParameters,
    target_mm: f64,
}

impl<'a> WallHeightSolver<'a> {
    pub fn new(params: &'a WallParameters, target_mm: f64) -> Self {
        Self { params, target_mm }
    }

    /// First guess at the course count, from the catalog average.
    pub fn estimate_course_count(&self) -> usize {
        let acc = HeightAccumulator::from_parameters(self.params);
        let avg = self.params.average_diameter();
        let bottom = acc.course_heights(avg, 0).final_height;
        let other = acc.course_heights(avg, 1).final_height;

        if self.target_mm <= bottom {
            return 1;
        }
        if other <= 0.0 {
            return MAX_COURSES;
        }
        let rest = ((self.target_mm - bottom) / other).ceil();
        if rest >= MAX_COURSES as f64 {
            MAX_COURSES
        } else {
            (1 + rest as usize).clamp(1, MAX_COURSES)
        }
    }

    /// Plan a wall at least `target_mm` high, or the tallest the course cap allows.
    ///
    /// A missed target is not an error; check [`WallPlan::reaches`].
    pub fn solve(&self, existing: &[Log], rng: &mut dyn RandomSource) -> DomainResult<WallPlan> {
        self.params.validate()?;
        PlanGoal::Height(self.target_mm).validate()?;
        let floor = existing.len().div_ceil(LOGS_PER_COURSE);
        if floor > MAX_COURSES {
            return Err(DomainError::Capacity {
                required: MAX_COURSES * LOGS_PER_COURSE,
                existing: existing.len(),
            });
        }
        let estimate = self.estimate_course_count().max(floor).max(1);
        debug!(target_mm = self.target_mm, estimate, "seeding course count");

        let seeded = plan_courses(existing, estimate, self.params, rng)?;
        let WallPlan {
            mut trees,
            mut courses,
            ..
        } = seeded;

        let acc = HeightAccumulator::from_parameters(self.params);
        while total_final(&courses) < self.target_mm && courses.len() < MAX_COURSES {
            let (course, tree) = self.synthetic_course()?;
            courses.push(course);
            trees.push(tree);
            sort_courses(&mut courses);
            acc.apply(&mut courses);
            debug!(
                courses = courses.len(),
                height = total_final(&courses),
                "added synthetic course"
            );
        }

        let plan = WallPlan::new(trees, courses);
        if !plan.reaches(self.target_mm) {
            warn!(
                target_mm = self.target_mm,
                reached_mm = plan.summary.total_height_final,
                "course cap reached before target height"
            );
        }
        Ok(plan)
    }

    /// A course of catalog-average logs, and the tree booked for it.
    fn synthetic_course(&self) -> DomainResult<(Course, Tree)> {
        let avg = self.params.average_diameter();
        let d = avg.trunc() as u32;
        let course = Course::new([Log::long(d), Log::long(d)], [Log::short(d), Log::short(d)])?;

        let taper = TaperModel::new(self.params.reduction_per_meter);
        let root = taper.required_root_diameter(avg, mm_to_m(self.params.long_length_mm) / 2.0);
        let tree = Tree {
            logs: [Log::long(d), Log::short(d)],
            root_diameter: root.trunc() as u32,
        };
        Ok((course, tree))
    }
}

fn total_final(courses: &[Course]) -> f64 {
    courses
        .last()
        .map(|c| c.cumulative.final_height)
        .unwrap_or(0.0)
}
