//! Tests for compliance report types.

use groupforge_core::{ConstraintKind, Severity};
use groupforge_test::constraints::*;
use groupforge_test::{session, ProblemBuilder};

use super::analysis::*;
use crate::evaluator::evaluate_assignments;

fn sample_report() -> ComplianceReport {
    let problem = ProblemBuilder::new(1)
        .people(&["a", "b", "c", "d"])
        .group("g1", 4)
        .group("g2", 4)
        .constraint(should_not_be_together(&["a", "b", "c"], &[]))
        .constraint(must_stay_together(&["a", "d"], &[]))
        .constraint(immovable_person("d", "g2", &[]))
        .build();
    let schedule = session(0, &[("g1", &["a", "b", "c"]), ("g2", &["d"])]);
    evaluate_assignments(&problem, &schedule).report
}

#[test]
fn test_violation_contribution() {
    let separated = Violation::Separated {
        session: 0,
        people: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        unassigned: vec!["d".into()],
        groups: vec!["g1".into(), "g2".into(), "g3".into()],
    };
    assert_eq!(separated.contribution(), 3);
    assert_eq!(separated.session(), Some(0));

    let balance = Violation::AttributeBalance {
        session: 2,
        group_id: "g".into(),
        value: "x".into(),
        desired: 1,
        actual: 4,
    };
    assert_eq!(balance.contribution(), 3);
    assert!(balance.people().is_empty());
}

#[test]
fn test_summary() {
    let report = sample_report();
    let summary = report.summary();

    assert_eq!(summary.constraint_count, 3);
    assert_eq!(summary.satisfied_count, 1);
    assert_eq!(summary.violated_count, 2);
    assert_eq!(summary.soft_violations, 2);
    assert_eq!(summary.hard_violations, 1);
    assert_eq!(
        summary.violations_by_kind.get(&ConstraintKind::MustStayTogether),
        Some(&1)
    );
}

#[test]
fn test_report_queries() {
    let report = sample_report();

    assert!(!report.is_compliant());
    assert!(!report.is_feasible());
    assert_eq!(report.total_violations(), 3);
    assert_eq!(report.total_penalty(), 3.0);
    assert_eq!(report.violated().count(), 2);
    assert_eq!(report.get(2).map(|e| e.severity), Some(Severity::Hard));
    assert!(report.get(3).is_none());
}

#[test]
fn test_soft_only_violations_are_feasible() {
    let problem = ProblemBuilder::new(1)
        .people(&["a", "b"])
        .group("g1", 2)
        .constraint(should_not_be_together(&["a", "b"], &[]))
        .build();
    let schedule = session(0, &[("g1", &["a", "b"])]);
    let report = evaluate_assignments(&problem, &schedule).report;

    assert!(!report.is_compliant());
    assert!(report.is_feasible());
}

#[test]
fn test_indictments() {
    let report = sample_report();
    let indictments = report.indictments();

    // a: clustered (2) + separated (1); d: separated (1)
    assert_eq!(indictments.get("a").map(|i| i.total), Some(3));
    assert_eq!(indictments.get("a").map(|i| i.constraint_count()), Some(2));
    assert_eq!(indictments.get("d").map(|i| i.total), Some(1));
    assert_eq!(indictments.len(), 4);

    let worst: Vec<&str> = indictments
        .worst()
        .iter()
        .map(|i| i.person_id.as_str())
        .collect();
    assert_eq!(worst, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_empty_report() {
    let report = ComplianceReport::default();
    assert!(report.is_compliant());
    assert!(report.is_feasible());
    assert_eq!(report.total_violations(), 0);
    assert!(report.indictments().is_empty());
}

#[test]
fn test_report_json_round_trip() {
    let report = sample_report();
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"violation\":\"clustered\""));

    let restored: ComplianceReport = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, report);
}
