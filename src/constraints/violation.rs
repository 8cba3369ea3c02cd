//! Rejection records and their per-run accumulator.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::Constraint;
use crate::context::SchedulingContext;
use crate::models::Event;

/// One candidate event rejected by one constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Name of the rejecting constraint.
    pub constraint: String,
    /// The rejected candidate, in its oriented form.
    pub event: Event,
    /// Human-readable reason.
    pub reason: String,
    /// IDs of the participants the rejection affects.
    pub participant_ids: Vec<String>,
    /// Round of the candidate, when it had one.
    pub round: Option<u32>,
}

impl ConstraintViolation {
    /// Creates a violation record.
    pub fn new(
        constraint: impl Into<String>,
        event: Event,
        reason: impl Into<String>,
    ) -> Self {
        let participant_ids = event.participants.iter().map(|p| p.id.clone()).collect();
        let round = event.round;
        Self {
            constraint: constraint.into(),
            event,
            reason: reason.into(),
            participant_ids,
            round,
        }
    }

    /// Builds the record for a constraint that rejected `event`.
    pub fn from_rejection(
        constraint: &dyn Constraint,
        event: &Event,
        context: &SchedulingContext,
    ) -> Self {
        Self::new(
            constraint.name(),
            event.clone(),
            constraint.describe(event, context),
        )
    }
}

/// Accumulates violations for a single scheduling run.
///
/// Groupings are returned as sorted maps so reports are stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViolationCollector {
    violations: Vec<ConstraintViolation>,
}

impl ViolationCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation.
    pub fn record(&mut self, violation: ConstraintViolation) {
        self.violations.push(violation);
    }

    /// All violations in recording order.
    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Discards all records.
    pub fn clear(&mut self) {
        self.violations.clear();
    }

    /// Violations grouped by constraint name.
    pub fn by_constraint(&self) -> BTreeMap<&str, Vec<&ConstraintViolation>> {
        let mut groups: BTreeMap<&str, Vec<&ConstraintViolation>> = BTreeMap::new();
        for v in &self.violations {
            groups.entry(v.constraint.as_str()).or_default().push(v);
        }
        groups
    }

    /// Violations grouped by affected participant ID.
    ///
    /// A violation affecting two participants appears in both groups.
    pub fn by_participant(&self) -> BTreeMap<&str, Vec<&ConstraintViolation>> {
        let mut groups: BTreeMap<&str, Vec<&ConstraintViolation>> = BTreeMap::new();
        for v in &self.violations {
            for id in &v.participant_ids {
                groups.entry(id.as_str()).or_default().push(v);
            }
        }
        groups
    }

    /// Violation count per constraint name.
    pub fn count_by_constraint(&self) -> BTreeMap<&str, usize> {
        self.by_constraint()
            .into_iter()
            .map(|(name, group)| (name, group.len()))
            .collect()
    }

    /// Violation count per participant ID.
    pub fn count_by_participant(&self) -> BTreeMap<&str, usize> {
        self.by_participant()
            .into_iter()
            .map(|(id, group)| (id, group.len()))
            .collect()
    }

    /// Sorted, de-duplicated rounds in which a constraint rejected events.
    pub fn rounds_for_constraint(&self, constraint: &str) -> Vec<u32> {
        self.violations
            .iter()
            .filter(|v| v.constraint == constraint)
            .filter_map(|v| v.round)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
