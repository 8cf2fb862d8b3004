use std::env;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{Course, LengthClass, WallPlan};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Panics unless every course holds exactly two long and two short logs.
pub fn assert_course_composition(course: &Course) {
    let longs = course
        .logs()
        .iter()
        .filter(|l| l.length == LengthClass::Long)
        .count();
    assert_eq!(course.logs().len(), 4, "course must have 4 logs");
    assert_eq!(longs, 2, "course must have 2 long logs: {:?}", course.logs());
}

/// Panics unless `plan` satisfies the structural invariants of a wall.
pub fn assert_plan_invariants(plan: &WallPlan) {
    for course in &plan.courses {
        assert_course_composition(course);
    }
    for pair in plan.courses.windows(2) {
        assert!(
            pair[0].average_diameter() >= pair[1].average_diameter(),
            "courses must be thickest first"
        );
        assert!(
            pair[1].cumulative.final_height >= pair[0].cumulative.final_height,
            "cumulative height must not decrease"
        );
    }
    if let Some(top) = plan.courses.last() {
        assert_eq!(plan.summary.total_height_final, top.cumulative.final_height);
    }
}
