//! Fixture domain models.
//!
//! Plain value records carried through the whole pipeline. None of them
//! holds scheduling logic.
//!
//! # Domain Mappings
//!
//! | u-fixture | Football league | Chess tournament | Esports |
//! |-----------|-----------------|------------------|---------|
//! | Participant | Club | Player | Team |
//! | Event | Match | Game | Series |
//! | Schedule | Fixture list | Pairing table | Season calendar |

mod event;
mod participant;
mod schedule;

pub use event::Event;
pub use participant::Participant;
pub use schedule::{MetadataValue, Schedule};
