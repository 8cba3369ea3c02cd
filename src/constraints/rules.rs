//! Built-in pairing constraints.
//!
//! # Categories
//!
//! - **Pairing**: NoRepeatPairing, SeedProtection
//! - **Load**: MinimumRest, MaxConsecutive
//! - **Ad hoc**: PredicateConstraint
//!
//! All rules are pure predicates over the candidate and the accepted history.

use std::fmt;
use std::sync::Arc;

use super::Constraint;
use crate::context::{SchedulingContext, Side};
use crate::error::ConstraintError;
use crate::models::Event;

fn unordered_pairs(event: &Event) -> impl Iterator<Item = (&str, &str)> + '_ {
    let ps = &event.participants;
    (0..ps.len()).flat_map(move |i| {
        (i + 1..ps.len()).map(move |j| (ps[i].id.as_str(), ps[j].id.as_str()))
    })
}

fn side_at(index: usize) -> Side {
    if index == 0 {
        Side::Home
    } else {
        Side::Away
    }
}

// ======================== Pairing rules ========================

/// Rejects a pairing that has already been accepted.
///
/// By default only meetings within the candidate's own leg count, so a
/// second leg may replay the first. [`NoRepeatPairing::across_legs`]
/// forbids any rematch.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRepeatPairing {
    across_legs: bool,
}

impl NoRepeatPairing {
    /// Rejects rematches within the same leg.
    pub fn new() -> Self {
        Self { across_legs: false }
    }

    /// Rejects rematches anywhere in the schedule.
    pub fn across_legs() -> Self {
        Self { across_legs: true }
    }

    fn leg_filter(&self, event: &Event) -> Option<u32> {
        if self.across_legs {
            None
        } else {
            event.leg
        }
    }
}

impl Constraint for NoRepeatPairing {
    fn name(&self) -> &str {
        "no_repeat_pairing"
    }

    fn is_satisfied(&self, event: &Event, context: &SchedulingContext) -> bool {
        let leg = self.leg_filter(event);
        unordered_pairs(event).all(|(a, b)| !context.have_met(a, b, leg))
    }

    fn describe(&self, event: &Event, _context: &SchedulingContext) -> String {
        format!("{} have already met", event.participant_ids().join(" and "))
    }
}

/// Keeps top seeds apart during the opening rounds.
///
/// A candidate whose participants are all seeded within the top
/// `top_seeds` is rejected in rounds `1..=rounds`.
#[derive(Debug, Clone, Copy)]
pub struct SeedProtection {
    top_seeds: u32,
    rounds: u32,
}

impl SeedProtection {
    /// Creates the constraint.
    ///
    /// # Errors
    /// `top_seeds < 2` (nothing to keep apart) or `rounds == 0`.
    pub fn new(top_seeds: u32, rounds: u32) -> Result<Self, ConstraintError> {
        if top_seeds < 2 {
            return Err(ConstraintError::invalid(
                "seed_protection",
                format!("at least 2 seeds must be protected, got {top_seeds}"),
            ));
        }
        if rounds == 0 {
            return Err(ConstraintError::invalid(
                "seed_protection",
                "protection must cover at least 1 round",
            ));
        }
        Ok(Self { top_seeds, rounds })
    }

    /// Number of protected seeds.
    pub fn top_seeds(&self) -> u32 {
        self.top_seeds
    }

    /// Number of protected rounds.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

impl Constraint for SeedProtection {
    fn name(&self) -> &str {
        "seed_protection"
    }

    fn is_satisfied(&self, event: &Event, _context: &SchedulingContext) -> bool {
        let Some(round) = event.round else {
            return true;
        };
        let all_top = !event.participants.is_empty()
            && event.participants.iter().all(|p| p.is_top_seed(self.top_seeds));
        !(round <= self.rounds && all_top)
    }

    fn describe(&self, event: &Event, _context: &SchedulingContext) -> String {
        format!(
            "top-{} seeds {} may not meet before round {}",
            self.top_seeds,
            event.participant_ids().join(" and "),
            self.rounds + 1
        )
    }
}

// ======================== Load rules ========================

/// Requires idle rounds between a participant's appearances.
///
/// A candidate in round `r` is rejected if any participant appeared in a
/// round `r'` with `r - r' <= rounds`. `rounds = 0` only forbids two
/// appearances in the same round.
#[derive(Debug, Clone, Copy)]
pub struct MinimumRest {
    rounds: u32,
}

impl MinimumRest {
    /// Creates the constraint.
    pub fn new(rounds: u32) -> Self {
        Self { rounds }
    }

    /// Required idle rounds.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    fn rested(&self, round: u32, last: Option<u32>) -> bool {
        match last {
            Some(last) => round > last && round - last > self.rounds,
            None => true,
        }
    }
}

impl Constraint for MinimumRest {
    fn name(&self) -> &str {
        "minimum_rest"
    }

    fn is_satisfied(&self, event: &Event, context: &SchedulingContext) -> bool {
        let Some(round) = event.round else {
            return true;
        };
        event
            .participants
            .iter()
            .all(|p| self.rested(round, context.last_round_for(&p.id)))
    }

    fn describe(&self, event: &Event, context: &SchedulingContext) -> String {
        let round = event.round.unwrap_or_default();
        let tired: Vec<String> = event
            .participants
            .iter()
            .filter_map(|p| {
                let last = context.last_round_for(&p.id);
                (!self.rested(round, last))
                    .then(|| format!("{} (last played round {})", p.id, last.unwrap_or_default()))
            })
            .collect();
        format!(
            "{} rest round(s) required before round {}: {}",
            self.rounds,
            round,
            tired.join(", ")
        )
    }
}

/// Caps consecutive events on the same side.
///
/// A candidate is rejected if it would give any participant more than
/// `max` home (or away) events in a row.
#[derive(Debug, Clone, Copy)]
pub struct MaxConsecutive {
    max: usize,
}

impl MaxConsecutive {
    /// Creates the constraint.
    ///
    /// # Errors
    /// `max == 0`, which would reject every event.
    pub fn new(max: usize) -> Result<Self, ConstraintError> {
        if max == 0 {
            return Err(ConstraintError::invalid(
                "max_consecutive",
                "limit must be at least 1",
            ));
        }
        Ok(Self { max })
    }

    /// Streak limit.
    pub fn max(&self) -> usize {
        self.max
    }

    fn exceeds(&self, context: &SchedulingContext, participant_id: &str, side: Side) -> bool {
        matches!(
            context.trailing_streak(participant_id),
            Some((s, n)) if s == side && n >= self.max
        )
    }
}

impl Constraint for MaxConsecutive {
    fn name(&self) -> &str {
        "max_consecutive"
    }

    fn is_satisfied(&self, event: &Event, context: &SchedulingContext) -> bool {
        event
            .participants
            .iter()
            .enumerate()
            .all(|(i, p)| !self.exceeds(context, &p.id, side_at(i)))
    }

    fn describe(&self, event: &Event, context: &SchedulingContext) -> String {
        let offenders: Vec<String> = event
            .participants
            .iter()
            .enumerate()
            .filter(|(i, p)| self.exceeds(context, &p.id, side_at(*i)))
            .map(|(i, p)| {
                let side = match side_at(i) {
                    Side::Home => "home",
                    Side::Away => "away",
                };
                format!("{} ({side})", p.id)
            })
            .collect();
        format!(
            "more than {} consecutive events on the same side: {}",
            self.max,
            offenders.join(", ")
        )
    }
}

// ======================== Ad hoc ========================

type Predicate = dyn Fn(&Event, &SchedulingContext) -> bool + Send + Sync;

/// A named closure constraint.
///
/// # Example
/// ```
/// use u_fixture::constraints::{Constraint, PredicateConstraint};
/// use u_fixture::context::SchedulingContext;
/// use u_fixture::models::{Event, Participant};
///
/// let no_derby = PredicateConstraint::new("no_derby", |e, _| {
///     !(e.involves("north") && e.involves("south"))
/// });
/// let e = Event::new(vec![Participant::new("north"), Participant::new("south")]);
/// assert!(!no_derby.is_satisfied(&e, &SchedulingContext::new()));
/// ```
#[derive(Clone)]
pub struct PredicateConstraint {
    name: String,
    predicate: Arc<Predicate>,
}

impl PredicateConstraint {
    /// Creates the constraint.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Event, &SchedulingContext) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }
}

impl Constraint for PredicateConstraint {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_satisfied(&self, event: &Event, context: &SchedulingContext) -> bool {
        (self.predicate)(event, context)
    }
}

impl fmt::Debug for PredicateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateConstraint")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;

    fn event(home: &str, away: &str, round: u32) -> Event {
        Event::new(vec![Participant::new(home), Participant::new(away)]).with_round(round)
    }

    fn history(events: Vec<Event>) -> SchedulingContext {
        let mut ctx = SchedulingContext::new();
        for e in events {
            ctx.commit(e);
        }
        ctx
    }

    #[test]
    fn test_no_repeat_pairing() {
        let ctx = history(vec![event("a", "b", 1)]);
        let c = NoRepeatPairing::new();
        assert!(!c.is_satisfied(&event("b", "a", 2), &ctx));
        assert!(c.is_satisfied(&event("a", "c", 2), &ctx));
        assert!(c.describe(&event("b", "a", 2), &ctx).contains("already met"));
    }

    #[test]
    fn test_no_repeat_pairing_leg_scope() {
        let ctx = history(vec![event("a", "b", 1).with_leg(Some(1))]);
        let second_leg = event("b", "a", 4).with_leg(Some(2));

        assert!(NoRepeatPairing::new().is_satisfied(&second_leg, &ctx));
        assert!(!NoRepeatPairing::across_legs().is_satisfied(&second_leg, &ctx));
    }

    #[test]
    fn test_minimum_rest() {
        let ctx = history(vec![event("a", "b", 1)]);
        let c = MinimumRest::new(1);
        assert!(!c.is_satisfied(&event("a", "c", 2), &ctx));
        assert!(c.is_satisfied(&event("a", "c", 3), &ctx));
        assert!(c.is_satisfied(&event("c", "d", 2), &ctx));

        let reason = c.describe(&event("c", "a", 2), &ctx);
        assert!(reason.contains("a (last played round 1)"));
        assert!(!reason.contains("c ("));
    }

    #[test]
    fn test_minimum_rest_zero_blocks_same_round() {
        let ctx = history(vec![event("a", "b", 1)]);
        let c = MinimumRest::new(0);
        assert!(!c.is_satisfied(&event("a", "c", 1), &ctx));
        assert!(c.is_satisfied(&event("a", "c", 2), &ctx));
    }

    #[test]
    fn test_minimum_rest_ignores_unscheduled() {
        let ctx = history(vec![event("a", "b", 1)]);
        let unscheduled = Event::new(vec![Participant::new("a"), Participant::new("c")]);
        assert!(MinimumRest::new(5).is_satisfied(&unscheduled, &ctx));
    }

    #[test]
    fn test_seed_protection() {
        let ctx = SchedulingContext::new();
        let c = SeedProtection::new(2, 2).unwrap();
        let top = |round| {
            Event::new(vec![
                Participant::new("a").with_seed(1),
                Participant::new("b").with_seed(2),
            ])
            .with_round(round)
        };
        let mixed = Event::new(vec![
            Participant::new("a").with_seed(1),
            Participant::new("c").with_seed(3),
        ])
        .with_round(1);

        assert!(!c.is_satisfied(&top(1), &ctx));
        assert!(!c.is_satisfied(&top(2), &ctx));
        assert!(c.is_satisfied(&top(3), &ctx));
        assert!(c.is_satisfied(&mixed, &ctx));
    }

    #[test]
    fn test_seed_protection_rejects_bad_parameters() {
        assert!(SeedProtection::new(1, 3).is_err());
        assert!(SeedProtection::new(4, 0).is_err());
        let err = SeedProtection::new(0, 1).unwrap_err();
        assert!(err.to_string().contains("seed_protection"));
    }

    #[test]
    fn test_max_consecutive() {
        let ctx = history(vec![event("a", "b", 1), event("a", "c", 2)]);
        let c = MaxConsecutive::new(2).unwrap();
        // a has been home twice in a row
        assert!(!c.is_satisfied(&event("a", "d", 3), &ctx));
        assert!(c.is_satisfied(&event("d", "a", 3), &ctx));
        // b: one away so far
        assert!(c.is_satisfied(&event("d", "b", 3), &ctx));
        assert!(c.describe(&event("a", "d", 3), &ctx).contains("a (home)"));
    }

    #[test]
    fn test_max_consecutive_rejects_zero() {
        assert!(MaxConsecutive::new(0).is_err());
    }

    #[test]
    fn test_predicate_constraint() {
        let c = PredicateConstraint::new("no_p1", |e, _| !e.involves("p1"));
        let ctx = SchedulingContext::new();
        assert_eq!(c.name(), "no_p1");
        assert!(!c.is_satisfied(&event("p1", "p2", 1), &ctx));
        assert!(c.is_satisfied(&event("p2", "p3", 1), &ctx));
        assert!(format!("{c:?}").contains("no_p1"));
    }
}
