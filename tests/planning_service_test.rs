//! Tests for PlanningService

use rstest::rstest;

use logwall::application::services::PlanningService;
use logwall::application::ApplicationError;
use logwall::domain::{
    BuckingMode, DomainError, Log, PlanGoal, PlanRequest, RandomSource, SequenceRandom,
    WallParameters, MAX_COURSES,
};
use logwall::infrastructure::traits::StdRandom;
use logwall::util::testing::{self, assert_plan_invariants};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn request(existing_logs: Vec<Log>, goal: PlanGoal) -> PlanRequest {
    PlanRequest {
        existing_logs,
        goal,
        parameters: WallParameters::default(),
    }
}

#[test]
fn given_no_inventory_when_planning_nine_courses_then_cuts_eighteen_trees() {
    // Arrange
    let service = PlanningService::default();
    let req = request(Vec::new(), PlanGoal::Courses(9));

    // Act
    let plan = service.plan(&req, None).unwrap();

    // Assert
    assert_eq!(plan.summary.trees_to_cut, 18);
    assert_eq!(plan.trees.len(), 18);
    assert_eq!(plan.course_count(), 9);
    assert_plan_invariants(&plan);
}

#[rstest]
#[case(0, 9, 18)]
#[case(8, 3, 2)]
#[case(7, 3, 3)]
#[case(12, 3, 0)]
fn given_existing_logs_when_planning_then_cuts_only_missing_trees(
    #[case] existing: usize,
    #[case] courses: usize,
    #[case] expected_trees: usize,
) {
    // Balanced inventory: alternate long and short
    let logs: Vec<Log> = (0..existing)
        .map(|i| if i % 2 == 0 { Log::long(280) } else { Log::short(280) })
        .collect();
    let req = request(logs, PlanGoal::Courses(courses));

    let plan = PlanningService::default().plan(&req, None).unwrap();

    assert_eq!(plan.summary.trees_to_cut, expected_trees);
    assert_plan_invariants(&plan);
}

#[test]
fn given_target_midpoint_mode_when_planning_twice_then_plans_are_identical() {
    // 7 trees on top of the inventory: 8 long and 8 short in total
    let req = request(vec![Log::long(270), Log::short(260)], PlanGoal::Courses(4));
    let service = PlanningService::default();

    let first = service.plan(&req, None).unwrap();
    let second = service.plan(&req, None).unwrap();

    assert_eq!(first.summary.trees_to_cut, 7);
    assert_eq!(first, second);
    assert_plan_invariants(&first);
}

#[test]
fn given_fixed_root_mode_when_replaying_sequence_then_second_log_is_reduced() {
    // Arrange
    let mut req = request(Vec::new(), PlanGoal::Courses(1));
    req.parameters.bucking = BuckingMode::FixedRoot;
    req.parameters.diameters = vec![300];
    let mut rng = SequenceRandom::new(vec![45]);

    // Act
    let plan = PlanningService::default()
        .plan(&req, Some(&mut rng as &mut dyn RandomSource))
        .unwrap();

    // Assert
    assert_eq!(plan.trees.len(), 2);
    for tree in &plan.trees {
        assert_eq!(tree.root_diameter, 300);
        assert_eq!(tree.logs[0].diameter, 300);
        assert_eq!(tree.logs[1].diameter, 255);
    }
    assert!(plan.trees[0].logs.iter().all(|l| !l.is_long()));
    assert!(plan.trees[1].logs.iter().all(|l| l.is_long()));
    assert_eq!(plan.courses[0].average_diameter(), 277.5);
}

#[test]
fn given_fixed_root_mode_when_same_seed_then_plans_are_identical() {
    let mut req = request(Vec::new(), PlanGoal::Courses(6));
    req.parameters.bucking = BuckingMode::FixedRoot;

    let first = PlanningService::new(Some(42)).plan(&req, None).unwrap();
    let mut rng = StdRandom::new(Some(42));
    let second = PlanningService::default()
        .plan(&req, Some(&mut rng as &mut dyn RandomSource))
        .unwrap();

    assert_eq!(first, second);
    for tree in &first.trees {
        let reduction = tree.logs[0].diameter - tree.logs[1].diameter;
        assert!((40..=50).contains(&reduction), "reduction {reduction}");
    }
}

#[test]
fn given_empty_catalog_when_planning_then_configuration_error() {
    let mut req = request(Vec::new(), PlanGoal::Courses(3));
    req.parameters.diameters.clear();

    let err = PlanningService::default().plan(&req, None).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Configuration { .. })
    ));
}

#[test]
fn given_more_logs_than_courses_hold_when_planning_then_capacity_error() {
    let req = request(vec![Log::long(280); 5], PlanGoal::Courses(1));

    let err = PlanningService::default().plan(&req, None).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Capacity {
            required: 4,
            existing: 5
        })
    ));
}

#[test]
fn given_only_long_logs_when_planning_then_imbalance_names_course() {
    // 2 trees: SS then LL, so 10 long and 2 short for 3 courses
    let req = request(vec![Log::long(280); 8], PlanGoal::Courses(3));

    let err = PlanningService::default().plan(&req, None).unwrap_err();

    match err {
        ApplicationError::Domain(DomainError::Imbalance {
            course_index,
            long_remaining,
            short_remaining,
        }) => {
            assert_eq!(course_index, 1);
            assert_eq!(long_remaining, 8);
            assert_eq!(short_remaining, 0);
        }
        other => panic!("expected imbalance, got {other}"),
    }
}

#[rstest]
#[case(1000.0)]
#[case(2500.0)]
#[case(4000.0)]
fn given_height_target_when_planning_then_reaches_it(#[case] target: f64) {
    let req = request(Vec::new(), PlanGoal::Height(target));

    let plan = PlanningService::default().plan(&req, None).unwrap();

    assert!(plan.reaches(target), "{} < {target}", plan.summary.total_height_final);
    assert!(plan.course_count() <= MAX_COURSES);
    assert_plan_invariants(&plan);
}

#[test]
fn given_unreachable_height_when_planning_then_stops_at_course_cap() {
    let req = request(Vec::new(), PlanGoal::Height(1_000_000.0));

    let plan = PlanningService::default().plan(&req, None).unwrap();

    assert_eq!(plan.course_count(), MAX_COURSES);
    assert!(!plan.reaches(1_000_000.0));
    assert_plan_invariants(&plan);
}

#[test]
fn given_plan_when_measuring_then_groove_skips_bottom_course() {
    let req = request(Vec::new(), PlanGoal::Courses(3));

    let plan = PlanningService::default().plan(&req, None).unwrap();

    let bottom = &plan.courses[0];
    let shrunk = bottom.heights.no_bark * 0.96;
    assert!((bottom.heights.final_height - shrunk).abs() < 1e-9);
    let second = &plan.courses[1];
    let shrunk = second.heights.no_bark * 0.96;
    assert!((second.heights.final_height - (shrunk - 20.0)).abs() < 1e-9);
}
