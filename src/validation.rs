//! Input checks and schedule completeness validation.
//!
//! Input is checked before any generation work:
//! - At least 2 participants
//! - At least 1 leg
//! - No duplicate participant IDs
//!
//! After generation, [`ScheduleValidator`] compares the event count with
//! the calculator's closed-form expectation. A shortfall becomes a
//! [`ScheduleError::Incomplete`] carrying everything needed to render the
//! diagnostic report and tuning suggestions later.

use std::collections::HashSet;
use std::sync::Arc;

use crate::calculator::{AlgorithmParams, ExpectedEventCalculator, RoundRobinCalculator};
use crate::constraints::ViolationCollector;
use crate::error::ScheduleError;
use crate::models::{Participant, Schedule};

/// Violations-per-pairing ratio above which constraints are flagged as too restrictive.
pub const RESTRICTIVE_RATIO: f64 = 0.5;

/// Validates scheduling input.
///
/// # Errors
/// The first failing check, in the order listed in the module docs.
pub fn validate_input(participants: &[Participant], legs: u32) -> Result<(), ScheduleError> {
    if participants.len() < 2 {
        return Err(ScheduleError::TooFewParticipants {
            count: participants.len(),
        });
    }
    if legs == 0 {
        return Err(ScheduleError::InvalidLegs { legs });
    }

    let mut ids = HashSet::new();
    for p in participants {
        if !ids.insert(p.id.as_str()) {
            return Err(ScheduleError::DuplicateParticipant { id: p.id.clone() });
        }
    }
    Ok(())
}

/// State of a run that produced fewer events than expected.
#[derive(Debug, Clone)]
pub struct IncompleteSchedule {
    /// Expected event count.
    pub expected: usize,
    /// Generated event count.
    pub actual: usize,
    /// Every rejection recorded during the run.
    pub violations: ViolationCollector,
    /// Calculator that produced `expected`.
    pub calculator: Arc<dyn ExpectedEventCalculator>,
    /// Participants of the run, in input order.
    pub participants: Vec<Participant>,
    /// Leg count of the run.
    pub legs: u32,
}

impl IncompleteSchedule {
    /// Number of missing events.
    pub fn missing(&self) -> usize {
        self.expected.saturating_sub(self.actual)
    }

    /// Renders the diagnostic report.
    pub fn diagnostic_report(&self) -> String {
        generate_diagnostic_report(
            self.calculator.algorithm_name(),
            self.expected,
            self.actual,
            &self.violations,
        )
    }

    /// Tuning suggestions for the constraint set.
    pub fn constraint_suggestions(&self) -> Result<Vec<String>, ScheduleError> {
        generate_constraint_suggestions(&self.violations, self.participants.len())
    }
}

/// Completeness checker composed into schedulers.
#[derive(Debug, Clone)]
pub struct ScheduleValidator {
    calculator: Arc<dyn ExpectedEventCalculator>,
}

impl ScheduleValidator {
    /// Creates a validator around a calculator.
    pub fn new(calculator: Arc<dyn ExpectedEventCalculator>) -> Self {
        Self { calculator }
    }

    /// Validator for round-robin schedules.
    pub fn round_robin() -> Self {
        Self::new(Arc::new(RoundRobinCalculator))
    }

    /// The calculator in use.
    pub fn calculator(&self) -> &Arc<dyn ExpectedEventCalculator> {
        &self.calculator
    }

    /// Expected event count for the given input.
    pub fn expected_events(
        &self,
        participants: &[Participant],
        legs: u32,
        params: &AlgorithmParams,
    ) -> usize {
        self.calculator
            .calculate_expected_events(participants, legs, params)
    }

    /// Fails if `schedule` has fewer than `expected` events.
    ///
    /// # Errors
    /// [`ScheduleError::Incomplete`] with a snapshot of the run state.
    pub fn validate_schedule_completeness(
        &self,
        schedule: &Schedule,
        expected: usize,
        violations: &ViolationCollector,
        participants: &[Participant],
        legs: u32,
    ) -> Result<(), ScheduleError> {
        let actual = schedule.count();
        if actual >= expected {
            return Ok(());
        }
        Err(ScheduleError::Incomplete(Box::new(IncompleteSchedule {
            expected,
            actual,
            violations: violations.clone(),
            calculator: Arc::clone(&self.calculator),
            participants: participants.to_vec(),
            legs,
        })))
    }
}

impl Default for ScheduleValidator {
    fn default() -> Self {
        Self::round_robin()
    }
}

/// Renders counts and violation breakdowns as text.
///
/// Constraint groups list the affected rounds (sorted, de-duplicated);
/// participant groups list counts only.
pub fn generate_diagnostic_report(
    algorithm: &str,
    expected: usize,
    actual: usize,
    violations: &ViolationCollector,
) -> String {
    let mut lines = vec![
        format!("Schedule incomplete ({algorithm})"),
        format!("  expected events: {expected}"),
        format!("  actual events:   {actual}"),
        format!("  missing events:  {}", expected.saturating_sub(actual)),
    ];

    if violations.is_empty() {
        lines.push("No constraint violations were recorded.".into());
        return join_lines(lines);
    }

    lines.push(String::new());
    lines.push("Violations by constraint:".into());
    for (name, count) in violations.count_by_constraint() {
        let rounds = violations
            .rounds_for_constraint(name)
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("  - {name}: {count} violation(s) in rounds [{rounds}]"));
    }

    lines.push(String::new());
    lines.push("Violations by participant:".into());
    for (id, count) in violations.count_by_participant() {
        lines.push(format!("  - {id}: {count} violation(s)"));
    }
    join_lines(lines)
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Suggests how to relax the constraints that caused rejections.
///
/// # Errors
/// [`ScheduleError::DegenerateRatio`] when `participant_count < 2`, since
/// the violations-per-pairing ratio is undefined.
pub fn generate_constraint_suggestions(
    violations: &ViolationCollector,
    participant_count: usize,
) -> Result<Vec<String>, ScheduleError> {
    let pairings = RoundRobinCalculator::pairings_per_leg(participant_count);
    if pairings == 0 {
        return Err(ScheduleError::DegenerateRatio { participant_count });
    }
    let ratio = violations.len() as f64 / pairings as f64;

    let mut suggestions = Vec::new();
    for (name, count) in violations.count_by_constraint() {
        let lower = name.to_lowercase();
        let advice = if lower.contains("consecutive") {
            "raise the consecutive-appearance limit or combine it with balanced ordering"
        } else if lower.contains("rest") {
            "reduce the required rest between appearances; with an even field every participant plays every round"
        } else if lower.contains("seed") {
            "protect fewer seeds or fewer opening rounds"
        } else {
            "review this constraint's configuration"
        };
        suggestions.push(format!(
            "Constraint '{name}' rejected {count} event(s): {advice}."
        ));
    }

    if suggestions.is_empty() {
        suggestions.push("No violations were recorded; review the scheduler configuration.".into());
    }

    if ratio > RESTRICTIVE_RATIO {
        suggestions.push(format!(
            "Violations amount to {:.0}% of the {pairings} pairings in one leg; \
             the constraints are likely too restrictive for {participant_count} participants.",
            ratio * 100.0
        ));
    }

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintViolation;
    use crate::models::Event;

    fn participants(n: usize) -> Vec<Participant> {
        (1..=n).map(|i| Participant::new(format!("p{i}"))).collect()
    }

    fn violation(constraint: &str, a: &str, b: &str, round: u32) -> ConstraintViolation {
        let event = Event::new(vec![Participant::new(a), Participant::new(b)]).with_round(round);
        ConstraintViolation::new(constraint, event, "rejected")
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&participants(2), 1).is_ok());
        assert!(validate_input(&participants(7), 3).is_ok());
    }

    #[test]
    fn test_too_few_participants() {
        let err = validate_input(&participants(1), 1).unwrap_err();
        assert!(matches!(err, ScheduleError::TooFewParticipants { count: 1 }));
        assert_eq!(
            err.to_string(),
            "round-robin scheduling requires at least 2 participants, got 1"
        );
        assert!(matches!(
            validate_input(&[], 1),
            Err(ScheduleError::TooFewParticipants { count: 0 })
        ));
    }

    #[test]
    fn test_zero_legs() {
        assert!(matches!(
            validate_input(&participants(4), 0),
            Err(ScheduleError::InvalidLegs { legs: 0 })
        ));
    }

    #[test]
    fn test_duplicate_participant() {
        let mut ps = participants(3);
        ps.push(Participant::new("p2").with_label("Again"));
        match validate_input(&ps, 1) {
            Err(ScheduleError::DuplicateParticipant { id }) => assert_eq!(id, "p2"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_complete_schedule_passes() {
        let validator = ScheduleValidator::round_robin();
        let schedule = Schedule::new();
        assert!(validator
            .validate_schedule_completeness(&schedule, 0, &ViolationCollector::new(), &participants(2), 1)
            .is_ok());
    }

    #[test]
    fn test_shortfall_carries_payload() {
        let validator = ScheduleValidator::round_robin();
        let mut collector = ViolationCollector::new();
        collector.record(violation("minimum_rest", "p1", "p2", 2));

        let err = validator
            .validate_schedule_completeness(&Schedule::new(), 6, &collector, &participants(4), 1)
            .unwrap_err();
        let inc = err.as_incomplete().unwrap();
        assert_eq!(inc.expected, 6);
        assert_eq!(inc.actual, 0);
        assert_eq!(inc.missing(), 6);
        assert_eq!(inc.violations.len(), 1);
        assert_eq!(inc.participants.len(), 4);
        assert_eq!(inc.legs, 1);
        assert_eq!(inc.calculator.algorithm_name(), "round-robin");
        assert!(err.to_string().contains("expected 6 events"));
    }

    #[test]
    fn test_report_without_violations() {
        let report = generate_diagnostic_report("round-robin", 6, 4, &ViolationCollector::new());
        assert!(report.contains("expected events: 6"));
        assert!(report.contains("actual events:   4"));
        assert!(report.contains("missing events:  2"));
        assert!(report.contains("No constraint violations"));
    }

    #[test]
    fn test_report_breakdowns() {
        let mut c = ViolationCollector::new();
        c.record(violation("minimum_rest", "p1", "p2", 3));
        c.record(violation("minimum_rest", "p1", "p3", 1));
        c.record(violation("minimum_rest", "p4", "p1", 3));
        c.record(violation("seed_protection", "p2", "p3", 1));

        let report = generate_diagnostic_report("round-robin", 6, 2, &c);
        assert!(report.contains("minimum_rest: 3 violation(s) in rounds [1, 3]"));
        assert!(report.contains("seed_protection: 1 violation(s) in rounds [1]"));
        assert!(report.contains("p1: 3 violation(s)"));
        assert!(report.contains("p4: 1 violation(s)"));
    }

    #[test]
    fn test_report_layout() {
        let mut c = ViolationCollector::new();
        c.record(violation("minimum_rest", "p1", "p2", 2));

        let report = generate_diagnostic_report("round-robin", 6, 5, &c);
        assert!(report.ends_with('\n'));
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines, vec![
            "Schedule incomplete (round-robin)",
            "  expected events: 6",
            "  actual events:   5",
            "  missing events:  1",
            "",
            "Violations by constraint:",
            "  - minimum_rest: 1 violation(s) in rounds [2]",
            "",
            "Violations by participant:",
            "  - p1: 1 violation(s)",
            "  - p2: 1 violation(s)",
        ]);
    }

    #[test]
    fn test_suggestions_match_constraint_names() {
        let mut c = ViolationCollector::new();
        c.record(violation("max_consecutive", "p1", "p2", 3));
        c.record(violation("minimum_rest", "p1", "p3", 2));
        c.record(violation("seed_protection", "p2", "p3", 1));
        c.record(violation("custom_rule", "p3", "p4", 1));

        // 4 violations / 45 pairings → not restrictive
        let s = generate_constraint_suggestions(&c, 10).unwrap();
        assert_eq!(s.len(), 4);
        assert!(s.iter().any(|x| x.contains("max_consecutive") && x.contains("consecutive-appearance")));
        assert!(s.iter().any(|x| x.contains("minimum_rest") && x.contains("rest between")));
        assert!(s.iter().any(|x| x.contains("seed_protection") && x.contains("fewer seeds")));
        assert!(s.iter().any(|x| x.contains("custom_rule") && x.contains("review")));
        assert!(!s.iter().any(|x| x.contains("too restrictive")));
    }

    #[test]
    fn test_suggestions_restrictive_ratio() {
        let mut c = ViolationCollector::new();
        for round in 1..=4 {
            c.record(violation("minimum_rest", "p1", "p2", round));
        }
        // 4 / 6 ≈ 0.67 > 0.5
        let s = generate_constraint_suggestions(&c, 4).unwrap();
        assert!(s.last().unwrap().contains("too restrictive"));

        // 3 / 6 = 0.5 → not above threshold
        let mut c = ViolationCollector::new();
        for round in 1..=3 {
            c.record(violation("minimum_rest", "p1", "p2", round));
        }
        let s = generate_constraint_suggestions(&c, 4).unwrap();
        assert!(!s.iter().any(|x| x.contains("too restrictive")));
    }

    #[test]
    fn test_suggestions_without_violations() {
        let s = generate_constraint_suggestions(&ViolationCollector::new(), 4).unwrap();
        assert_eq!(s.len(), 1);
        assert!(s[0].contains("review the scheduler configuration"));
    }

    #[test]
    fn test_suggestions_degenerate_count() {
        let err = generate_constraint_suggestions(&ViolationCollector::new(), 1).unwrap_err();
        assert!(matches!(err, ScheduleError::DegenerateRatio { participant_count: 1 }));
    }
}
