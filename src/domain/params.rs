//! Planning inputs and their validation

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::entities::Log;
use crate::domain::error::{DomainError, DomainResult};

/// Hard upper bound on the number of courses in a wall.
pub const MAX_COURSES: usize = 30;

/// Diameters outside this band are accepted but reported.
const PLAUSIBLE_DIAMETERS_MM: std::ops::RangeInclusive<u32> = 100..=500;

/// How the diameter catalog is interpreted when bucking new trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuckingMode {
    /// Catalog holds root diameters; the top log loses a random amount.
    FixedRoot,
    /// Catalog holds the wanted diameter at the first log's midpoint.
    #[default]
    TargetMidpoint,
}

impl std::str::FromStr for BuckingMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed-root" => Ok(Self::FixedRoot),
            "target-midpoint" => Ok(Self::TargetMidpoint),
            other => Err(DomainError::configuration(format!(
                "unknown bucking mode '{other}' (expected fixed-root or target-midpoint)"
            ))),
        }
    }
}

/// Inclusive millimeter range of the random top-log reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionRange {
    pub min: u32,
    pub max: u32,
}

impl Default for ReductionRange {
    fn default() -> Self {
        Self { min: 40, max: 50 }
    }
}

/// Geometry and correction parameters shared by all planning modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallParameters {
    /// Root diameters or first-midpoint targets, depending on `bucking`
    pub diameters: Vec<u32>,
    pub long_length_mm: u32,
    pub short_length_mm: u32,
    /// Taper in millimeters of diameter per meter of stem
    pub reduction_per_meter: f64,
    pub shrinkage_percent: f64,
    pub bark_thickness_mm: f64,
    pub belly_groove_mm: f64,
    pub bucking: BuckingMode,
    pub random_reduction: ReductionRange,
}

impl Default for WallParameters {
    fn default() -> Self {
        Self {
            diameters: vec![290, 280, 270],
            long_length_mm: 5150,
            short_length_mm: 4050,
            reduction_per_meter: 10.0,
            shrinkage_percent: 4.0,
            bark_thickness_mm: 5.0,
            belly_groove_mm: 20.0,
            bucking: BuckingMode::default(),
            random_reduction: ReductionRange::default(),
        }
    }
}

impl WallParameters {
    /// Mean of the diameter catalog.
    pub fn average_diameter(&self) -> f64 {
        if self.diameters.is_empty() {
            return 0.0;
        }
        self.diameters.iter().map(|&d| f64::from(d)).sum::<f64>() / self.diameters.len() as f64
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.diameters.is_empty() {
            return Err(DomainError::configuration("diameter catalog is empty"));
        }
        if self.diameters.contains(&0) {
            return Err(DomainError::configuration(
                "diameter catalog must only contain positive values",
            ));
        }
        let unusual: Vec<u32> = self
            .diameters
            .iter()
            .copied()
            .filter(|d| !PLAUSIBLE_DIAMETERS_MM.contains(d))
            .collect();
        if !unusual.is_empty() {
            warn!(?unusual, "some diameters look unusual (expected 100-500 mm)");
        }
        if self.long_length_mm == 0 || self.short_length_mm == 0 {
            return Err(DomainError::configuration("log lengths must be positive"));
        }
        non_negative("reduction per meter", self.reduction_per_meter)?;
        non_negative("bark thickness", self.bark_thickness_mm)?;
        non_negative("belly groove", self.belly_groove_mm)?;
        if !(0.0..100.0).contains(&self.shrinkage_percent) {
            return Err(DomainError::configuration(format!(
                "shrinkage must be in [0, 100), got {}",
                self.shrinkage_percent
            )));
        }
        if self.random_reduction.min > self.random_reduction.max {
            return Err(DomainError::configuration(format!(
                "random reduction range is inverted: {}..{}",
                self.random_reduction.min, self.random_reduction.max
            )));
        }
        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> DomainResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DomainError::configuration(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

/// What the plan has to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanGoal {
    /// Build exactly this many courses.
    Courses(usize),
    /// Build until the finished wall is at least this high (millimeters).
    Height(f64),
}

impl PlanGoal {
    /// Pick the goal from two mutually exclusive options.
    pub fn from_options(courses: Option<usize>, height_mm: Option<f64>) -> DomainResult<Self> {
        let goal = match (courses, height_mm) {
            (Some(_), Some(_)) => {
                return Err(DomainError::configuration(
                    "course count and target height are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(DomainError::configuration(
                    "either a course count or a target height is required",
                ))
            }
            (Some(n), None) => PlanGoal::Courses(n),
            (None, Some(h)) => PlanGoal::Height(h),
        };
        goal.validate()?;
        Ok(goal)
    }

    pub fn validate(&self) -> DomainResult<()> {
        match *self {
            PlanGoal::Courses(0) => Err(DomainError::configuration(
                "course count must be at least 1",
            )),
            PlanGoal::Courses(n) if n > MAX_COURSES => Err(DomainError::configuration(format!(
                "course count must be at most {MAX_COURSES}, got {n}"
            ))),
            PlanGoal::Courses(_) => Ok(()),
            PlanGoal::Height(h) if !h.is_finite() || h <= 0.0 => Err(DomainError::configuration(
                format!("target height must be a positive number, got {h}"),
            )),
            PlanGoal::Height(_) => Ok(()),
        }
    }
}

/// Complete input to a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub existing_logs: Vec<Log>,
    pub goal: PlanGoal,
    pub parameters: WallParameters,
}

impl PlanRequest {
    pub fn validate(&self) -> DomainResult<()> {
        self.goal.validate()?;
        self.parameters.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_validating_then_ok() {
        assert!(WallParameters::default().validate().is_ok());
    }

    #[test]
    fn given_empty_catalog_when_validating_then_configuration_error() {
        let params = WallParameters {
            diameters: vec![],
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn given_zero_length_when_validating_then_configuration_error() {
        let params = WallParameters {
            short_length_mm: 0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn given_inverted_reduction_range_when_validating_then_configuration_error() {
        let params = WallParameters {
            random_reduction: ReductionRange { min: 50, max: 40 },
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn given_both_or_neither_goal_when_choosing_then_configuration_error() {
        assert!(PlanGoal::from_options(Some(3), Some(2000.0)).is_err());
        assert!(PlanGoal::from_options(None, None).is_err());
        assert_eq!(
            PlanGoal::from_options(Some(3), None).unwrap(),
            PlanGoal::Courses(3)
        );
    }

    #[test]
    fn given_course_count_above_cap_when_validating_then_configuration_error() {
        assert!(PlanGoal::Courses(MAX_COURSES).validate().is_ok());
        assert!(matches!(
            PlanGoal::Courses(MAX_COURSES + 1).validate(),
            Err(DomainError::Configuration { .. })
        ));
        assert!(PlanGoal::from_options(Some(usize::MAX / 2), None).is_err());
    }

    #[test]
    fn given_non_positive_height_when_choosing_then_configuration_error() {
        assert!(PlanGoal::from_options(None, Some(0.0)).is_err());
        assert!(PlanGoal::from_options(None, Some(f64::NAN)).is_err());
    }

    #[test]
    fn given_mode_name_when_parsing_then_maps_to_variant() {
        assert_eq!("fixed-root".parse::<BuckingMode>().unwrap(), BuckingMode::FixedRoot);
        assert!("sideways".parse::<BuckingMode>().is_err());
    }
}
