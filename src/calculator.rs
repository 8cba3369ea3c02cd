//! Closed-form expected event counts.
//!
//! The scheduler never searches, so the number of events a complete run
//! must produce is known up front. Validation compares against it.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::models::{MetadataValue, Participant};

/// Algorithm-specific parameters passed to a calculator.
pub type AlgorithmParams = BTreeMap<String, MetadataValue>;

/// Computes how many events a complete schedule contains.
pub trait ExpectedEventCalculator: Send + Sync + Debug {
    /// Algorithm identifier (e.g., "round-robin").
    fn algorithm_name(&self) -> &str;

    /// Expected number of events.
    fn calculate_expected_events(
        &self,
        participants: &[Participant],
        legs: u32,
        params: &AlgorithmParams,
    ) -> usize;
}

/// Round-robin count: every pair meets once per leg.
///
/// `n * (n - 1) / 2 * legs`, or 0 for fewer than 2 participants.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinCalculator;

impl RoundRobinCalculator {
    /// Pairings in one leg for `n` participants.
    #[inline]
    pub fn pairings_per_leg(n: usize) -> usize {
        if n < 2 {
            0
        } else {
            n * (n - 1) / 2
        }
    }
}

impl ExpectedEventCalculator for RoundRobinCalculator {
    fn algorithm_name(&self) -> &str {
        "round-robin"
    }

    fn calculate_expected_events(
        &self,
        participants: &[Participant],
        legs: u32,
        _params: &AlgorithmParams,
    ) -> usize {
        Self::pairings_per_leg(participants.len()) * legs as usize
    }
}
