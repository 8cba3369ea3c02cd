//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use super::round_robin::FixtureRequest;
use crate::constraints::{ConstraintConfig, EvaluationPolicy};
use crate::models::Participant;
use crate::ordering::OrderingStrategy;

/// How legs after the first are oriented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegMode {
    /// Even legs swap every pairing's input orientation (home and away).
    #[default]
    Mirrored,
    /// Every leg replays the first leg's input orientation.
    Repeated,
}

/// Serializable round-robin configuration.
///
/// Missing fields take their defaults: 1 leg, mirrored legs, static
/// ordering, no seed, short-circuit evaluation, no constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundRobinConfig {
    /// Number of legs.
    pub legs: u32,
    /// Orientation of later legs.
    pub leg_mode: LegMode,
    /// Orientation strategy.
    pub ordering: OrderingStrategy,
    /// Seating shuffle seed.
    pub seed: Option<u64>,
    /// Constraint evaluation policy.
    pub evaluation: EvaluationPolicy,
    /// Constraints, in evaluation order.
    pub constraints: Vec<ConstraintConfig>,
}

impl Default for RoundRobinConfig {
    fn default() -> Self {
        Self {
            legs: 1,
            leg_mode: LegMode::default(),
            ordering: OrderingStrategy::default(),
            seed: None,
            evaluation: EvaluationPolicy::default(),
            constraints: Vec::new(),
        }
    }
}

impl RoundRobinConfig {
    /// Builds a request for these participants with the configured legs.
    pub fn request(&self, participants: Vec<Participant>) -> FixtureRequest {
        FixtureRequest::new(participants).with_legs(self.legs)
    }
}
