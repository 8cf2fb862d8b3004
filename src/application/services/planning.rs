//! Wall planning service
//!
//! Entry point for planning runs: validates the request, picks a random
//! source and dispatches to fixed-count or height-target planning.

use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    plan_courses, PlanGoal, PlanRequest, RandomSource, WallHeightSolver, WallPlan,
};
use crate::infrastructure::traits::StdRandom;

/// Service for computing wall plans.
#[derive(Debug, Clone, Default)]
pub struct PlanningService {
    /// Seed for the fallback random source (None = OS entropy)
    seed: Option<u64>,
}

impl PlanningService {
    /// Create a new planning service.
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// Compute a plan.
    ///
    /// When `rng` is None, a [`StdRandom`] is created from the configured
    /// seed. It is only drawn from in fixed-root bucking mode.
    #[instrument(skip_all, fields(goal = ?request.goal, existing = request.existing_logs.len()))]
    pub fn plan(
        &self,
        request: &PlanRequest,
        rng: Option<&mut dyn RandomSource>,
    ) -> ApplicationResult<WallPlan> {
        request.validate()?;
        match rng {
            Some(rng) => self.run(request, rng),
            None => self.run(request, &mut StdRandom::new(self.seed)),
        }
    }

    fn run(&self, request: &PlanRequest, rng: &mut dyn RandomSource) -> ApplicationResult<WallPlan> {
        let params = &request.parameters;
        debug!(bucking = ?params.bucking, diameters = ?params.diameters, "plan parameters");

        let plan = match request.goal {
            PlanGoal::Courses(count) => plan_courses(&request.existing_logs, count, params, rng)?,
            PlanGoal::Height(target) => {
                WallHeightSolver::new(params, target).solve(&request.existing_logs, rng)?
            }
        };

        info!(
            trees = plan.summary.trees_to_cut,
            courses = plan.course_count(),
            height_mm = plan.summary.total_height_final,
            "plan complete"
        );
        Ok(plan)
    }
}
