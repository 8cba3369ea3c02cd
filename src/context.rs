//! Scheduling state shared with orderers and constraints.
//!
//! [`SchedulingContext`] is the read side of the schedule being built: it
//! only ever contains events the scheduler has already accepted.
//! [`EventOrderingContext`] describes the single candidate currently being
//! oriented.

use std::collections::{HashMap, HashSet};

use crate::models::{Event, Schedule};

/// Which side of an event a participant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// First position.
    Home,
    /// Second position.
    Away,
}

/// Per-participant summary of the accepted history.
#[derive(Debug, Clone, Default)]
struct ParticipantHistory {
    /// Schedule positions of the participant's events.
    appearances: Vec<usize>,
    home_count: usize,
    last_round: Option<u32>,
    streak: Option<(Side, usize)>,
    /// Opponent id → legs in which they met (`None` = untagged).
    opponents: HashMap<String, HashSet<Option<u32>>>,
}

impl ParticipantHistory {
    fn record(&mut self, position: usize, side: Side, event: &Event, self_id: &str) {
        self.appearances.push(position);
        if side == Side::Home {
            self.home_count += 1;
        }
        if let Some(round) = event.round {
            self.last_round = Some(self.last_round.map_or(round, |last| last.max(round)));
        }
        self.streak = match self.streak {
            Some((prev, n)) if prev == side => Some((side, n + 1)),
            _ => Some((side, 1)),
        };
        for opponent in event.participants.iter().filter(|p| p.id != self_id) {
            self.opponents
                .entry(opponent.id.clone())
                .or_default()
                .insert(event.leg);
        }
    }
}

/// Accepted-so-far schedule state for one scheduling run.
///
/// Owned by the scheduler for the duration of a run; collaborators get
/// shared references only. Every commit also updates per-participant
/// indexes, so history queries are hash lookups rather than scans.
#[derive(Debug, Clone, Default)]
pub struct SchedulingContext {
    schedule: Schedule,
    /// Participant id → history summary.
    history: HashMap<String, ParticipantHistory>,
}

impl SchedulingContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context seeded with existing history.
    pub fn from_schedule(schedule: Schedule) -> Self {
        let mut context = Self::new();
        for (position, event) in schedule.events().iter().enumerate() {
            context.index(position, event);
        }
        context.schedule = schedule;
        context
    }

    /// Makes an accepted event visible to later decisions.
    pub(crate) fn commit(&mut self, event: Event) {
        self.index(self.schedule.count(), &event);
        let schedule = std::mem::take(&mut self.schedule);
        self.schedule = schedule.with_event(event);
    }

    fn index(&mut self, position: usize, event: &Event) {
        for (i, participant) in event.participants.iter().enumerate() {
            let side = if i == 0 { Side::Home } else { Side::Away };
            self.history
                .entry(participant.id.clone())
                .or_default()
                .record(position, side, event, &participant.id);
        }
    }

    /// Consumes the context and returns the accumulated schedule.
    pub(crate) fn into_schedule(self) -> Schedule {
        self.schedule
    }

    /// The schedule accepted so far.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Number of accepted events.
    pub fn event_count(&self) -> usize {
        self.schedule.count()
    }

    /// All accepted events involving a participant, in acceptance order.
    pub fn events_for_participant(&self, participant_id: &str) -> Vec<&Event> {
        let events = self.schedule.events();
        self.history
            .get(participant_id)
            .map(|h| h.appearances.iter().map(|&i| &events[i]).collect())
            .unwrap_or_default()
    }

    /// Number of accepted events where the participant was home.
    pub fn home_count(&self, participant_id: &str) -> usize {
        self.history.get(participant_id).map_or(0, |h| h.home_count)
    }

    /// Whether two participants have already met.
    ///
    /// With `leg = Some(l)`, only meetings in leg `l` count.
    pub fn have_met(&self, a: &str, b: &str, leg: Option<u32>) -> bool {
        self.history
            .get(a)
            .and_then(|h| h.opponents.get(b))
            .is_some_and(|legs| leg.is_none() || legs.contains(&leg))
    }

    /// Latest round the participant appeared in.
    pub fn last_round_for(&self, participant_id: &str) -> Option<u32> {
        self.history.get(participant_id).and_then(|h| h.last_round)
    }

    /// The side the participant took in its most recent events and how many
    /// times in a row. `None` if it has not appeared yet.
    pub fn trailing_streak(&self, participant_id: &str) -> Option<(Side, usize)> {
        self.history.get(participant_id).and_then(|h| h.streak)
    }
}

/// Descriptor of the candidate event being oriented.
///
/// Built fresh for each candidate and never mutated.
#[derive(Debug, Clone, Copy)]
pub struct EventOrderingContext<'a> {
    /// Round number (1-based).
    pub round_number: u32,
    /// Position of the candidate within its round (0-based).
    pub event_index_in_round: usize,
    /// Leg number, when the competition has more than one leg.
    pub leg: Option<u32>,
    /// Accepted history at the time of the call.
    pub scheduling: &'a SchedulingContext,
}

impl<'a> EventOrderingContext<'a> {
    /// Creates a descriptor.
    pub fn new(
        round_number: u32,
        event_index_in_round: usize,
        leg: Option<u32>,
        scheduling: &'a SchedulingContext,
    ) -> Self {
        Self {
            round_number,
            event_index_in_round,
            leg,
            scheduling,
        }
    }
}
