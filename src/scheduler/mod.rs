//! Round-robin fixture scheduler.
//!
//! # Algorithm
//!
//! `RoundRobinScheduler` enumerates pairings with the circle (polygon)
//! method, orients each candidate with a `ParticipantOrderer`, filters it
//! through a `ConstraintSet`, and appends accepted events to the schedule.
//! Rejections are recorded, never retried. A run that ends short of the
//! closed-form count fails with a diagnosable `ScheduleError::Incomplete`.
//!
//! # Configuration
//!
//! Code-first through `with_*` builders, or from a serde-loaded
//! `RoundRobinConfig`.

mod config;
mod round_robin;

pub use config::{LegMode, RoundRobinConfig};
pub use round_robin::{circle_pairings, FixtureRequest, Generation, RoundRobinScheduler};
