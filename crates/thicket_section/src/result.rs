use std::time::Duration;

use thicket_check::{Location, TestError};

use crate::section::SectionTree;
use thicket_check::SectionId;

/// The public, per-section shape of a finalized test result (spec
/// component G / §6).
#[derive(Debug, Clone)]
pub struct SectionReport {
    pub name: String,
    pub location: Location,
    pub subsections: Vec<SectionReport>,
    pub errors: Vec<TestError>,
    pub executed_checks: u64,
    pub failed_checks: u64,
    pub duration_seconds: f64,
    pub is_considered_failing: bool,
}

/// Recursively aggregates per-leaf stats up to the root.
pub(crate) fn finalize(tree: &SectionTree) -> SectionReport {
    finalize_node(tree, tree.root())
}

fn finalize_node(tree: &SectionTree, id: SectionId) -> SectionReport {
    let node = tree.node(id);

    let mut executed_checks = node.stats.executed_checks;
    let mut failed_checks = node.stats.failed_checks;
    let mut duration = node.stats.duration;
    let mut direct_errors = node.stats.errors.clone();
    let mut aggregated_errors = node.stats.errors.clone();
    let mut child_failing = false;

    let mut subsections = Vec::with_capacity(node.children.len());
    for &child_id in &node.children {
        let child_report = finalize_node(tree, child_id);

        executed_checks += child_report.executed_checks;
        failed_checks += child_report.failed_checks;
        duration += Duration::from_secs_f64(child_report.duration_seconds);
        aggregated_errors.extend(child_report.errors.clone());
        child_failing |= child_report.is_considered_failing;

        // Unreachable-section rule: a child discovered in some earlier run
        // that never got re-declared before this (now-complete) parent
        // finished traversal.
        if node.is_done && !tree.is_done(child_id) {
            let unreachable = TestError::new(
                child_report.name.clone(),
                child_report.location,
                Vec::new(),
                format!("section \"{}\" was discovered but unreachable from parent", child_report.name),
            );
            direct_errors.push(unreachable.clone());
            aggregated_errors.push(unreachable);
            child_failing = true;
        }

        subsections.push(child_report);
    }

    // Empty-checks rule: this node aggregated zero executed checks.
    if executed_checks == 0 {
        let empty = TestError::new(node.name.clone(), node.location, Vec::new(), "test did not contain CHECK/REQUIRE");
        direct_errors.push(empty.clone());
        aggregated_errors.push(empty);
    }

    let is_considered_failing =
        child_failing || executed_checks == 0 || failed_checks > 0 || !direct_errors.is_empty();

    SectionReport {
        name: node.name.clone(),
        location: node.location,
        subsections,
        errors: aggregated_errors,
        executed_checks,
        failed_checks,
        duration_seconds: duration.as_secs_f64(),
        is_considered_failing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thicket_check::Location;

    fn here() -> Location {
        Location { file: "result.rs", line: 1 }
    }

    #[test]
    fn empty_leaf_is_flagged_failing() {
        let tree = SectionTree::new("root", here());
        let report = finalize(&tree);
        assert_eq!(report.executed_checks, 0);
        assert!(report.is_considered_failing);
        assert!(report.errors.iter().any(|e| e.expanded.contains("did not contain")));
    }

    #[test]
    fn leaf_with_checks_and_no_errors_passes() {
        let mut tree = SectionTree::new("root", here());
        let root = tree.root();
        tree.node_mut(root).stats.executed_checks = 3;
        let report = finalize(&tree);
        assert!(!report.is_considered_failing);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn unreachable_child_fails_the_parent() {
        let mut tree = SectionTree::new("root", here());
        let root = tree.root();
        let child = tree.resolve_and_stamp(root, "vanish", here(), 1).unwrap();
        tree.node_mut(child).stats.executed_checks = 1;
        tree.node_mut(root).stats.executed_checks = 1;
        tree.node_mut(root).is_done = true;
        // child.is_done intentionally left false.
        let report = finalize(&tree);
        assert!(report.is_considered_failing);
        assert!(report.errors.iter().any(|e| e.expanded.contains("unreachable")));
    }
}
