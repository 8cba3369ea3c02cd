//! Schedule (fixture list) model.
//!
//! A schedule is the ordered list of accepted events plus run metadata.
//! Event order is the order in which the scheduler accepted them and is
//! preserved by every operation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::Event;

/// A metadata value attached to a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Integer value (counts, round numbers, seeds).
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// Free-form text.
    Text(String),
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<usize> for MetadataValue {
    fn from(v: usize) -> Self {
        Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

/// Values above `i64::MAX` are kept as decimal text.
impl From<u64> for MetadataValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => Self::Int(v),
            Err(_) => Self::Text(v.to_string()),
        }
    }
}

impl From<u32> for MetadataValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// An ordered fixture list.
///
/// Updates consume the schedule and return the extended one, so a
/// schedule value never changes underneath a reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    events: Vec<Event>,
    metadata: BTreeMap<String, MetadataValue>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from an event list.
    pub fn from_events(events: Vec<Event>) -> Self {
        Self {
            events,
            metadata: BTreeMap::new(),
        }
    }

    /// Appends an event.
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Sets a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// All events in acceptance order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events.
    pub fn count(&self) -> usize {
        self.events.len()
    }

    /// Whether the schedule has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events scheduled in the given round, in acceptance order.
    pub fn events_in_round(&self, round: u32) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.round == Some(round))
            .collect()
    }

    /// Events involving the given participant, in acceptance order.
    pub fn events_for_participant(&self, participant_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.involves(participant_id))
            .collect()
    }

    /// Highest round number present. `None` if no event carries a round.
    pub fn max_round(&self) -> Option<u32> {
        self.events.iter().filter_map(|e| e.round).max()
    }

    /// Distinct round numbers, ascending.
    pub fn rounds(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| e.round)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Orientation-independent pairings, one per event, in event order.
    pub fn pairings(&self) -> Vec<(String, String)> {
        self.events
            .iter()
            .filter_map(|e| match e.pairing_key().as_slice() {
                [a, b] => Some((a.to_string(), b.to_string())),
                _ => None,
            })
            .collect()
    }

    /// Raw metadata lookup.
    pub fn metadata(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    /// All metadata entries, sorted by key.
    pub fn metadata_entries(&self) -> &BTreeMap<String, MetadataValue> {
        &self.metadata
    }

    /// Integer metadata lookup with a default.
    pub fn metadata_int(&self, key: &str, default: i64) -> i64 {
        match self.metadata.get(key) {
            Some(MetadataValue::Int(v)) => *v,
            _ => default,
        }
    }

    /// Text metadata lookup with a default.
    pub fn metadata_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.metadata.get(key) {
            Some(MetadataValue::Text(v)) => v.as_str(),
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;

    fn event(a: &str, b: &str, round: u32) -> Event {
        Event::new(vec![Participant::new(a), Participant::new(b)]).with_round(round)
    }

    fn sample_schedule() -> Schedule {
        Schedule::new()
            .with_event(event("p1", "p4", 1))
            .with_event(event("p2", "p3", 1))
            .with_event(event("p1", "p3", 2))
            .with_metadata("algorithm", "round-robin")
            .with_metadata("participant_count", 4usize)
    }

    #[test]
    fn test_count_and_order() {
        let s = sample_schedule();
        assert_eq!(s.count(), 3);
        assert_eq!(s.events()[0].participant_ids(), vec!["p1", "p4"]);
        assert_eq!(s.events()[2].participant_ids(), vec!["p1", "p3"]);
    }

    #[test]
    fn test_events_in_round() {
        let s = sample_schedule();
        assert_eq!(s.events_in_round(1).len(), 2);
        assert_eq!(s.events_in_round(2).len(), 1);
        assert!(s.events_in_round(9).is_empty());
    }

    #[test]
    fn test_events_for_participant() {
        let s = sample_schedule();
        assert_eq!(s.events_for_participant("p1").len(), 2);
        assert_eq!(s.events_for_participant("p4").len(), 1);
        assert!(s.events_for_participant("p9").is_empty());
    }

    #[test]
    fn test_max_round() {
        assert_eq!(sample_schedule().max_round(), Some(2));
        assert_eq!(Schedule::new().max_round(), None);

        let unscheduled =
            Schedule::new().with_event(Event::new(vec![Participant::new("a"), Participant::new("b")]));
        assert_eq!(unscheduled.max_round(), None);
        assert!(unscheduled.rounds().is_empty());
    }

    #[test]
    fn test_metadata_lookup_with_default() {
        let s = sample_schedule();
        assert_eq!(s.metadata_str("algorithm", "none"), "round-robin");
        assert_eq!(s.metadata_int("participant_count", 0), 4);
        assert_eq!(s.metadata_int("missing", -1), -1);
        // Type mismatch falls back to the default
        assert_eq!(s.metadata_int("algorithm", 7), 7);
    }

    #[test]
    fn test_u64_metadata() {
        let s = Schedule::new()
            .with_metadata("small", 42u64)
            .with_metadata("huge", u64::MAX);
        assert_eq!(s.metadata_int("small", 0), 42);
        assert_eq!(s.metadata_int("huge", 0), 0);
        assert_eq!(s.metadata_str("huge", ""), u64::MAX.to_string());
    }

    #[test]
    fn test_pairings_normalized() {
        let s = Schedule::new().with_event(event("p3", "p1", 1));
        assert_eq!(s.pairings(), vec![("p1".to_string(), "p3".to_string())]);
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new();
        assert!(s.is_empty());
        assert_eq!(s.count(), 0);
        assert!(s.metadata_entries().is_empty());
    }

    #[test]
    fn test_metadata_display() {
        assert_eq!(MetadataValue::from(3u32).to_string(), "3");
        assert_eq!(MetadataValue::from("x").to_string(), "x");
        assert_eq!(MetadataValue::from(true).to_string(), "true");
    }
}
