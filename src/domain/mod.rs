//! Domain layer: entities and planning logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod assembly;
pub mod bucking;
pub mod entities;
pub mod error;
pub mod height;
pub mod params;
pub mod planning;
pub mod pool;
pub mod random;
pub mod taper;

pub use assembly::CourseAssembler;
pub use bucking::{trees_needed, BuckingPattern, TreeCutter};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use height::HeightAccumulator;
pub use params::{
    BuckingMode, PlanGoal, PlanRequest, ReductionRange, WallParameters, MAX_COURSES,
};
pub use planning::{plan_courses, WallHeightSolver, LOGS_PER_COURSE};
pub use pool::LogPool;
pub use random::{RandomSource, SequenceRandom};
pub use taper::TaperModel;
