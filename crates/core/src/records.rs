//! Snapshot views of persisted clinical records.
//!
//! These types mirror what the external persistence layer materialises for a
//! visit: the visit itself, its encounters, and each encounter's top-level
//! observations and orders. The timeline engine treats them as read-only
//! values with identity; the one mutation in the whole crate is the visit
//! closer writing [`Visit::stopped_at`].
//!
//! Role meaning (which encounter type represents an admission, a discharge, a
//! transfer) is *not* encoded here. Types are opaque identity tags; roles are
//! supplied by [`crate::config::RoleConfig`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chronology::{Chronological, Voided};

/// Identity of an entry in the external concept dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptId(Uuid);

impl ConceptId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

/// Identity of an encounter type.
///
/// Treated as an opaque equality-comparable key; whether a given type means
/// "admission" or "discharge" is configuration, not identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncounterTypeId(Uuid);

impl EncounterTypeId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

/// Identity of a physical care location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(Uuid);

impl LocationId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

/// A recorded clinical fact, optionally grouping member observations.
///
/// One level of grouping is consumed by the timeline engine: a disposition is
/// stored as a group observation whose member carries the coded value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obs {
    /// Store identifier; absent until first saved.
    #[serde(default)]
    pub id: Option<i64>,
    pub uuid: Uuid,
    pub concept: ConceptId,
    #[serde(default)]
    pub value_coded: Option<ConceptId>,
    /// System-assigned creation timestamp.
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub voided: bool,
    #[serde(default)]
    pub members: Vec<Obs>,
}

impl Obs {
    /// Creates an unsaved observation of the given concept.
    pub fn new(concept: ConceptId) -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            concept,
            value_coded: None,
            recorded_at: None,
            voided: false,
            members: Vec::new(),
        }
    }
}

// Observations carry no clinical timestamp in this model; recency among them
// follows creation order.
impl Chronological for Obs {
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn recorded_at(&self) -> Option<DateTime<Utc>> {
        self.recorded_at
    }

    fn record_id(&self) -> Option<i64> {
        self.id
    }
}

impl Voided for Obs {
    fn is_voided(&self) -> bool {
        self.voided
    }
}

/// A clinical order scoped to an encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: Option<i64>,
    pub uuid: Uuid,
    pub concept: ConceptId,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub voided: bool,
}

impl Order {
    /// Creates an unsaved order for the given concept.
    pub fn new(concept: ConceptId) -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            concept,
            recorded_at: None,
            voided: false,
        }
    }
}

impl Chronological for Order {
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn recorded_at(&self) -> Option<DateTime<Utc>> {
        self.recorded_at
    }

    fn record_id(&self) -> Option<i64> {
        self.id
    }
}

impl Voided for Order {
    fn is_voided(&self) -> bool {
        self.voided
    }
}

/// A single recorded clinical event belonging to a visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    /// Store identifier; absent until first saved. Used only as a last-resort
    /// ordering tie-break.
    #[serde(default)]
    pub id: Option<i64>,
    pub uuid: Uuid,
    pub encounter_type: EncounterTypeId,
    /// Nominal clinical timestamp; may be absent or collide with other
    /// encounters.
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    /// System-assigned creation timestamp.
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<LocationId>,
    #[serde(default)]
    pub voided: bool,
    #[serde(default)]
    pub observations: Vec<Obs>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Encounter {
    /// Creates an unsaved encounter of the given type.
    pub fn new(encounter_type: EncounterTypeId) -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            encounter_type,
            occurred_at: None,
            recorded_at: None,
            location: None,
            voided: false,
            observations: Vec::new(),
            orders: Vec::new(),
        }
    }

    /// Returns the encounter's top-level observations, excluding voided ones
    /// unless `include_voided` is set.
    pub fn top_level_observations(&self, include_voided: bool) -> Vec<&Obs> {
        self.observations
            .iter()
            .filter(|obs| include_voided || !obs.voided)
            .collect()
    }
}

impl Chronological for Encounter {
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.occurred_at
    }

    fn recorded_at(&self) -> Option<DateTime<Utc>> {
        self.recorded_at
    }

    fn record_id(&self) -> Option<i64> {
        self.id
    }
}

impl Voided for Encounter {
    fn is_voided(&self) -> bool {
        self.voided
    }
}

/// A bounded episode of care owning a set of encounters.
///
/// `stopped_at` of `None` means the visit is still open. All non-voided
/// encounters are assumed, not enforced, to have `occurred_at >= started_at`
/// when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub uuid: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub stopped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub encounters: Vec<Encounter>,
}

impl Visit {
    /// Creates an open visit with no encounters.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            started_at,
            stopped_at: None,
            encounters: Vec::new(),
        }
    }
}
