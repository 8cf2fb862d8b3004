//! Human-readable rendering of plans and inventories

use colored::{ColoredString, Colorize};
use itertools::Itertools;

use crate::application::services::InventorySummary;
use crate::cli::output;
use crate::domain::{Course, Evenness, Log, PlanGoal, Tree, WallPlan};

fn format_logs(logs: &[Log]) -> String {
    logs.iter().map(Log::to_string).join(", ")
}

fn evenness_marker(evenness: Evenness) -> ColoredString {
    match evenness {
        Evenness::Even => "●".green(),
        Evenness::Uneven => "●".yellow(),
        Evenness::Rough => "●".red(),
    }
}

pub fn format_tree(number: usize, tree: &Tree) -> String {
    format!(
        "Tree {:2}: [{}] root {} mm",
        number,
        format_logs(&tree.logs),
        tree.root_diameter
    )
}

pub fn format_course(number: usize, course: &Course) -> String {
    format!(
        "Course {:2}: [{}] {} (avg: {:.0}mm, variation: {}mm) height {:.0}mm, total {:.0}mm",
        number,
        format_logs(course.logs()),
        evenness_marker(course.evenness()),
        course.average_diameter(),
        course.variation(),
        course.heights.final_height,
        course.cumulative.final_height
    )
}

pub fn print_plan(plan: &WallPlan, goal: PlanGoal) {
    let summary = &plan.summary;
    output::success("Optimization complete");
    output::action("Trees to cut", &summary.trees_to_cut);
    output::action("Courses", &plan.course_count());
    output::action(
        "Total height",
        &format!(
            "{:.0} mm (without bark {:.0} mm, with bark {:.0} mm)",
            summary.total_height_final, summary.total_height_no_bark, summary.total_height_raw
        ),
    );
    if let PlanGoal::Height(target) = goal {
        if !plan.reaches(target) {
            output::warning(&format!(
                "target height {:.0} mm not reached within the course limit",
                target
            ));
        }
    }

    if !plan.trees.is_empty() {
        output::header("Trees to cut");
        for (i, tree) in plan.trees.iter().enumerate() {
            output::detail(&format_tree(i + 1, tree));
        }
    }

    output::header("Courses (bottom → top)");
    for (i, course) in plan.courses.iter().enumerate() {
        output::detail(&format_course(i + 1, course));
    }
}

pub fn print_inventory(logs: &[Log], summary: &InventorySummary) {
    if logs.is_empty() {
        output::info("No existing logs yet");
        return;
    }
    output::action("Total logs", &summary.total);
    output::action("Long logs", &summary.long);
    output::action("Short logs", &summary.short);

    output::header("Logs");
    for (i, log) in logs.iter().enumerate() {
        output::detail(&format!("{:3}. {}", i + 1, log));
    }

    output::header("Sorted by diameter");
    output::detail(&format_logs(&summary.sorted));
}
