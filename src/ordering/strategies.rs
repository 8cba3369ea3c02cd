//! Built-in orientation strategies.
//!
//! # Categories
//!
//! - **Stateless**: Static, Alternating, SeededRandom (pure functions of the
//!   candidate and its position)
//! - **History-aware**: Balanced (reads accepted home counts)

use super::ParticipantOrderer;
use crate::context::EventOrderingContext;
use crate::models::Participant;

fn reversed(participants: &[Participant]) -> Vec<Participant> {
    participants.iter().rev().cloned().collect()
}

// ======================== Stateless strategies ========================

/// Keeps the input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticOrderer;

impl ParticipantOrderer for StaticOrderer {
    fn name(&self) -> &'static str {
        "static"
    }

    fn order(
        &self,
        participants: &[Participant],
        _context: &EventOrderingContext<'_>,
    ) -> Vec<Participant> {
        participants.to_vec()
    }
}

/// Reverses candidates at odd positions within their round.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlternatingOrderer;

impl ParticipantOrderer for AlternatingOrderer {
    fn name(&self) -> &'static str {
        "alternating"
    }

    fn order(
        &self,
        participants: &[Participant],
        context: &EventOrderingContext<'_>,
    ) -> Vec<Participant> {
        if context.event_index_in_round % 2 == 1 {
            reversed(participants)
        } else {
            participants.to_vec()
        }
    }
}

/// Pseudo-random orientation derived from the candidate's position.
///
/// The position `(round, index, leg)` is folded into one integer and hashed
/// with a 32-bit FxHash; odd hashes reverse the pair. No RNG is involved,
/// so the result is identical on every run and platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeededRandomOrderer;

impl SeededRandomOrderer {
    /// Position seed: `round * 10000 + index * 100 + leg`.
    pub fn position_seed(round: u32, event_index_in_round: usize, leg: Option<u32>) -> u64 {
        u64::from(round) * 10_000 + event_index_in_round as u64 * 100 + u64::from(leg.unwrap_or(0))
    }

    /// Whether the candidate at this position is reversed.
    pub fn should_reverse(round: u32, event_index_in_round: usize, leg: Option<u32>) -> bool {
        let seed = Self::position_seed(round, event_index_in_round, leg);
        fxhash::hash32(&seed) % 2 == 1
    }
}

impl ParticipantOrderer for SeededRandomOrderer {
    fn name(&self) -> &'static str {
        "seeded_random"
    }

    fn order(
        &self,
        participants: &[Participant],
        context: &EventOrderingContext<'_>,
    ) -> Vec<Participant> {
        if Self::should_reverse(
            context.round_number,
            context.event_index_in_round,
            context.leg,
        ) {
            reversed(participants)
        } else {
            participants.to_vec()
        }
    }
}

// ======================== History-aware strategies ========================

/// Gives home to the participant with fewer accepted home events.
///
/// Ties keep the input order. For events with more than two participants
/// the list is stably sorted by ascending home count.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedOrderer;

impl ParticipantOrderer for BalancedOrderer {
    fn name(&self) -> &'static str {
        "balanced"
    }

    fn order(
        &self,
        participants: &[Participant],
        context: &EventOrderingContext<'_>,
    ) -> Vec<Participant> {
        let history = context.scheduling;
        match participants {
            [first, second] => {
                if history.home_count(&second.id) < history.home_count(&first.id) {
                    vec![second.clone(), first.clone()]
                } else {
                    participants.to_vec()
                }
            }
            _ => {
                let mut ordered = participants.to_vec();
                ordered.sort_by_cached_key(|p| history.home_count(&p.id));
                ordered
            }
        }
    }
}
