//! Home/away orientation strategies.
//!
//! A [`ParticipantOrderer`] receives the participants of one candidate
//! event and returns them in their final order; the first participant is
//! home. Orderers never mutate their input.
//!
//! # Usage
//!
//! ```
//! use u_fixture::context::{EventOrderingContext, SchedulingContext};
//! use u_fixture::models::Participant;
//! use u_fixture::ordering::{AlternatingOrderer, ParticipantOrderer};
//!
//! let history = SchedulingContext::new();
//! let pair = vec![Participant::new("p1"), Participant::new("p2")];
//! let ctx = EventOrderingContext::new(1, 1, None, &history);
//!
//! let ordered = AlternatingOrderer.order(&pair, &ctx);
//! assert_eq!(ordered[0].id, "p2");
//! ```

pub mod strategies;

pub use strategies::{AlternatingOrderer, BalancedOrderer, SeededRandomOrderer, StaticOrderer};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

use crate::context::EventOrderingContext;
use crate::models::Participant;

/// Decides which participant of a candidate event is home.
pub trait ParticipantOrderer: Send + Sync + Debug {
    /// Strategy name (e.g., "static", "balanced").
    fn name(&self) -> &'static str;

    /// Returns the participants in their final order.
    fn order(&self, participants: &[Participant], context: &EventOrderingContext<'_>)
        -> Vec<Participant>;
}

/// Serializable selector for the built-in orderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingStrategy {
    /// Input order preserved.
    #[default]
    Static,
    /// Reverse on odd in-round positions.
    Alternating,
    /// Hash-driven, reproducible coin flip.
    SeededRandom,
    /// Home goes to the participant with fewer home events.
    Balanced,
}

impl OrderingStrategy {
    /// Instantiates the orderer.
    pub fn build(self) -> Arc<dyn ParticipantOrderer> {
        match self {
            Self::Static => Arc::new(StaticOrderer),
            Self::Alternating => Arc::new(AlternatingOrderer),
            Self::SeededRandom => Arc::new(SeededRandomOrderer),
            Self::Balanced => Arc::new(BalancedOrderer),
        }
    }
}
