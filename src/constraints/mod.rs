//! Pairing constraints and constraint sets.
//!
//! A [`Constraint`] is a pure predicate over a candidate event and the
//! accepted history. Rejection is a normal outcome, reported as `false`,
//! never as an error. Constraints are combined into an immutable
//! [`ConstraintSet`] through [`ConstraintSetBuilder`].
//!
//! # Usage
//!
//! ```
//! use u_fixture::constraints::ConstraintSet;
//!
//! let constraints = ConstraintSet::builder()
//!     .no_repeat_pairing()
//!     .minimum_rest(0)
//!     .protect_top_seeds(4, 2)?
//!     .build();
//! assert_eq!(constraints.len(), 3);
//! # Ok::<(), u_fixture::error::ConstraintError>(())
//! ```

pub mod rules;
mod violation;

pub use rules::{MaxConsecutive, MinimumRest, NoRepeatPairing, PredicateConstraint, SeedProtection};
pub use violation::{ConstraintViolation, ViolationCollector};

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::context::SchedulingContext;
use crate::error::ConstraintError;
use crate::models::Event;

/// A rule that accepts or rejects a candidate event.
pub trait Constraint: Send + Sync + Debug {
    /// Stable identifier used in diagnostics.
    fn name(&self) -> &str;

    /// Whether the candidate may be accepted given the history so far.
    fn is_satisfied(&self, event: &Event, context: &SchedulingContext) -> bool;

    /// Reason recorded when the candidate is rejected.
    fn describe(&self, event: &Event, _context: &SchedulingContext) -> String {
        format!(
            "constraint '{}' rejected {}",
            self.name(),
            event.participant_ids().join(" vs ")
        )
    }
}

/// How many failing constraints are reported per rejected candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationPolicy {
    /// Stop at the first failing constraint.
    #[default]
    ShortCircuit,
    /// Evaluate every constraint and report each failure.
    ReportAll,
}

/// An ordered, immutable collection of constraints.
#[derive(Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<Arc<dyn Constraint>>,
    policy: EvaluationPolicy,
}

impl ConstraintSet {
    /// A set with no constraints (accepts everything).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts a builder.
    pub fn builder() -> ConstraintSetBuilder {
        ConstraintSetBuilder::new()
    }

    /// Number of constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// The evaluation policy.
    pub fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    /// Constraint names in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.constraints.iter().map(|c| c.name()).collect()
    }

    /// Iterates the constraints in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Constraint> {
        self.constraints.iter().map(|c| c.as_ref())
    }

    /// Whether every constraint accepts the candidate.
    pub fn is_satisfied(&self, event: &Event, context: &SchedulingContext) -> bool {
        self.first_failure(event, context).is_none()
    }

    /// The first constraint that rejects the candidate.
    pub fn first_failure(
        &self,
        event: &Event,
        context: &SchedulingContext,
    ) -> Option<&dyn Constraint> {
        self.iter().find(|c| !c.is_satisfied(event, context))
    }

    /// Rejecting constraints, according to the evaluation policy.
    ///
    /// Empty when the candidate is accepted.
    pub fn failures(&self, event: &Event, context: &SchedulingContext) -> Vec<&dyn Constraint> {
        match self.policy {
            EvaluationPolicy::ShortCircuit => {
                self.first_failure(event, context).into_iter().collect()
            }
            EvaluationPolicy::ReportAll => self
                .iter()
                .filter(|c| !c.is_satisfied(event, context))
                .collect(),
        }
    }
}

impl Debug for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("constraints", &self.names())
            .field("policy", &self.policy)
            .finish()
    }
}

/// Fluent builder for [`ConstraintSet`].
///
/// Methods whose parameters can be invalid return `Result` so they chain
/// with `?`.
#[derive(Debug, Default)]
pub struct ConstraintSetBuilder {
    set: ConstraintSet,
}

impl ConstraintSetBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a constraint.
    pub fn with<C: Constraint + 'static>(self, constraint: C) -> Self {
        self.with_shared(Arc::new(constraint))
    }

    /// Appends an already shared constraint.
    pub fn with_shared(mut self, constraint: Arc<dyn Constraint>) -> Self {
        self.set.constraints.push(constraint);
        self
    }

    /// Forbids rematches within a leg.
    pub fn no_repeat_pairing(self) -> Self {
        self.with(NoRepeatPairing::new())
    }

    /// Forbids rematches anywhere in the schedule.
    pub fn no_repeat_pairing_across_legs(self) -> Self {
        self.with(NoRepeatPairing::across_legs())
    }

    /// Requires `rounds` idle rounds between appearances.
    pub fn minimum_rest(self, rounds: u32) -> Self {
        self.with(MinimumRest::new(rounds))
    }

    /// Keeps the top `top_seeds` apart for the first `rounds` rounds.
    pub fn protect_top_seeds(self, top_seeds: u32, rounds: u32) -> Result<Self, ConstraintError> {
        Ok(self.with(SeedProtection::new(top_seeds, rounds)?))
    }

    /// Caps same-side streaks at `max`.
    pub fn max_consecutive(self, max: usize) -> Result<Self, ConstraintError> {
        Ok(self.with(MaxConsecutive::new(max)?))
    }

    /// Appends a named closure constraint.
    pub fn predicate<F>(self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Event, &SchedulingContext) -> bool + Send + Sync + 'static,
    {
        self.with(PredicateConstraint::new(name, predicate))
    }

    /// Appends constraints described by configuration records.
    pub fn from_configs(mut self, configs: &[ConstraintConfig]) -> Result<Self, ConstraintError> {
        for config in configs {
            self = self.with_shared(config.build()?);
        }
        Ok(self)
    }

    /// Sets the evaluation policy.
    pub fn with_policy(mut self, policy: EvaluationPolicy) -> Self {
        self.set.policy = policy;
        self
    }

    /// Finishes the set.
    pub fn build(self) -> ConstraintSet {
        self.set
    }
}

/// Serializable description of a built-in constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintConfig {
    NoRepeatPairing {
        #[serde(default)]
        across_legs: bool,
    },
    MinimumRest {
        rounds: u32,
    },
    SeedProtection {
        top_seeds: u32,
        rounds: u32,
    },
    MaxConsecutive {
        max: usize,
    },
}

impl ConstraintConfig {
    /// Instantiates the constraint, validating its parameters.
    pub fn build(&self) -> Result<Arc<dyn Constraint>, ConstraintError> {
        Ok(match *self {
            Self::NoRepeatPairing { across_legs: false } => Arc::new(NoRepeatPairing::new()),
            Self::NoRepeatPairing { across_legs: true } => Arc::new(NoRepeatPairing::across_legs()),
            Self::MinimumRest { rounds } => Arc::new(MinimumRest::new(rounds)),
            Self::SeedProtection { top_seeds, rounds } => {
                Arc::new(SeedProtection::new(top_seeds, rounds)?)
            }
            Self::MaxConsecutive { max } => Arc::new(MaxConsecutive::new(max)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;

    fn event(home: &str, away: &str, round: u32) -> Event {
        Event::new(vec![Participant::new(home), Participant::new(away)]).with_round(round)
    }

    fn busy_history() -> SchedulingContext {
        let mut ctx = SchedulingContext::new();
        ctx.commit(event("a", "b", 1));
        ctx
    }

    #[test]
    fn test_builder_preserves_order() {
        let set = ConstraintSet::builder()
            .minimum_rest(1)
            .no_repeat_pairing()
            .predicate("custom", |_, _| true)
            .build();
        assert_eq!(set.names(), vec!["minimum_rest", "no_repeat_pairing", "custom"]);
        assert_eq!(set.policy(), EvaluationPolicy::ShortCircuit);
    }

    #[test]
    fn test_empty_set_accepts_everything() {
        let set = ConstraintSet::empty();
        assert!(set.is_empty());
        assert!(set.is_satisfied(&event("a", "b", 2), &busy_history()));
        assert!(set.failures(&event("a", "b", 2), &busy_history()).is_empty());
    }

    #[test]
    fn test_short_circuit_reports_first_failure() {
        let set = ConstraintSet::builder()
            .minimum_rest(1)
            .no_repeat_pairing()
            .build();
        let failures = set.failures(&event("b", "a", 2), &busy_history());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name(), "minimum_rest");
    }

    #[test]
    fn test_report_all_policy() {
        let set = ConstraintSet::builder()
            .minimum_rest(1)
            .no_repeat_pairing()
            .predicate("permissive", |_, _| true)
            .with_policy(EvaluationPolicy::ReportAll)
            .build();
        let failures = set.failures(&event("b", "a", 2), &busy_history());
        let names: Vec<&str> = failures.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["minimum_rest", "no_repeat_pairing"]);
    }

    #[test]
    fn test_builder_fails_fast_on_bad_parameters() {
        assert!(ConstraintSet::builder().max_consecutive(0).is_err());
        assert!(ConstraintSet::builder().protect_top_seeds(1, 1).is_err());
    }

    #[test]
    fn test_default_describe() {
        let c = PredicateConstraint::new("blocked", |_, _| false);
        let reason = c.describe(&event("a", "b", 1), &SchedulingContext::new());
        assert_eq!(reason, "constraint 'blocked' rejected a vs b");
    }

    #[test]
    fn test_config_deserialize_and_build() {
        let json = r#"[
            {"type": "no_repeat_pairing"},
            {"type": "minimum_rest", "rounds": 1},
            {"type": "seed_protection", "top_seeds": 4, "rounds": 2},
            {"type": "max_consecutive", "max": 3}
        ]"#;
        let configs: Vec<ConstraintConfig> = serde_json::from_str(json).unwrap();
        assert_eq!(
            configs[0],
            ConstraintConfig::NoRepeatPairing { across_legs: false }
        );

        let set = ConstraintSet::builder().from_configs(&configs).unwrap().build();
        assert_eq!(
            set.names(),
            vec!["no_repeat_pairing", "minimum_rest", "seed_protection", "max_consecutive"]
        );
    }

    #[test]
    fn test_config_rejects_bad_parameters() {
        let bad = ConstraintConfig::MaxConsecutive { max: 0 };
        assert!(bad.build().is_err());
    }
}
