//! Participant model.
//!
//! A participant is a team, player, or entrant that takes part in a
//! competition. Identity is the `id`; everything else is descriptive.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// A competition participant.
///
/// Two participants are equal when their IDs are equal, regardless of
/// label, seed, or attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Unique, stable identifier.
    pub id: String,
    /// Display name.
    pub label: String,
    /// Seeding rank (1 = top seed). `None` = unseeded.
    pub seed: Option<u32>,
    /// Domain-specific key-value metadata.
    pub attributes: BTreeMap<String, String>,
}

impl Participant {
    /// Creates a participant whose label equals its ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            seed: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the seeding rank.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Adds a metadata attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether this participant is seeded within the top `n`.
    #[inline]
    pub fn is_top_seed(&self, n: u32) -> bool {
        self.seed.is_some_and(|s| s <= n)
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
