//! Event (fixture) model.
//!
//! An event is one scheduled pairing. The order of `participants`
//! encodes orientation: index 0 is home, index 1 is away.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Participant;

/// A scheduled pairing of participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Ordered participants (home first).
    pub participants: Vec<Participant>,
    /// Round number (1-based). `None` = unscheduled.
    pub round: Option<u32>,
    /// Leg number (1-based) in multi-leg competitions.
    pub leg: Option<u32>,
    /// Domain-specific key-value metadata.
    pub metadata: BTreeMap<String, String>,
}

impl Event {
    /// Creates an unscheduled event.
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            participants,
            round: None,
            leg: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Sets the round number.
    pub fn with_round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    /// Sets the leg number.
    pub fn with_leg(mut self, leg: Option<u32>) -> Self {
        self.leg = leg;
        self
    }

    /// Adds a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The first (home) participant.
    #[inline]
    pub fn home(&self) -> Option<&Participant> {
        self.participants.first()
    }

    /// The second (away) participant.
    #[inline]
    pub fn away(&self) -> Option<&Participant> {
        self.participants.get(1)
    }

    /// Whether the given participant takes part in this event.
    pub fn involves(&self, participant_id: &str) -> bool {
        self.participants.iter().any(|p| p.id == participant_id)
    }

    /// Participant IDs in event order.
    pub fn participant_ids(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.id.as_str()).collect()
    }

    /// Orientation-independent pairing key (IDs sorted ascending).
    pub fn pairing_key(&self) -> Vec<&str> {
        let mut ids = self.participant_ids();
        ids.sort_unstable();
        ids
    }
}
