//! Transport boundary for encounter export.
//!
//! This crate is responsible for assembling the transport view of an
//! encounter before it is handed to a higher-level mapping or API layer.
//! Temporal concerns live here: the encounter's top-level observations and
//! its orders are sorted most-recent-first through the core comparator, so
//! transport output has a deterministic, recency-first ordering independent
//! of the storage layer's iteration order.
//!
//! Per-field mapping of observation and order content is delegated to
//! collaborator traits; this crate only fixes identity, timing, and order.

use careline_core::{most_recent_first, Encounter, EncounterTypeId, LocationId, Obs, Order, Visit};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Transport view of a single encounter.
///
/// The `observations` and `orders` payloads are opaque to this crate; they
/// are whatever the mapping collaborators produce, in the recency order this
/// crate guarantees.
#[derive(Debug, Clone, Serialize)]
pub struct EncounterTransaction {
    pub visit_uuid: Uuid,
    pub encounter_uuid: Uuid,
    pub encounter_type: EncounterTypeId,
    pub location: Option<LocationId>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub observations: Vec<serde_json::Value>,
    pub orders: Vec<serde_json::Value>,
}

/// Maps observation content onto a transaction. Receives the encounter's
/// top-level observations already sorted most-recent-first.
pub trait ObservationMapper {
    fn update(&self, transaction: &mut EncounterTransaction, observations: &[&Obs]);
}

/// Maps order content onto a transaction. Receives the encounter's orders
/// already sorted most-recent-first.
pub trait OrderMapper {
    fn update(&self, transaction: &mut EncounterTransaction, orders: &[&Order]);
}

/// Assembles [`EncounterTransaction`]s from visit snapshots.
pub struct EncounterTransactionMapper<'a> {
    observation_mapper: &'a dyn ObservationMapper,
    order_mapper: &'a dyn OrderMapper,
}

impl<'a> EncounterTransactionMapper<'a> {
    pub fn new(
        observation_mapper: &'a dyn ObservationMapper,
        order_mapper: &'a dyn OrderMapper,
    ) -> Self {
        Self {
            observation_mapper,
            order_mapper,
        }
    }

    /// Maps `encounter` (belonging to `visit`) onto its transport view.
    ///
    /// `include_voided_observations` controls whether voided top-level
    /// observations are offered to the observation mapper; orders are always
    /// passed through in full.
    pub fn map(
        &self,
        visit: &Visit,
        encounter: &Encounter,
        include_voided_observations: bool,
    ) -> EncounterTransaction {
        let mut transaction = EncounterTransaction {
            visit_uuid: visit.uuid,
            encounter_uuid: encounter.uuid,
            encounter_type: encounter.encounter_type,
            location: encounter.location,
            occurred_at: encounter.occurred_at,
            observations: Vec::new(),
            orders: Vec::new(),
        };

        let mut observations = encounter.top_level_observations(include_voided_observations);
        observations.sort_by(|a, b| most_recent_first(a, b));
        self.observation_mapper
            .update(&mut transaction, &observations);

        let mut orders: Vec<&Order> = encounter.orders.iter().collect();
        orders.sort_by(|a, b| most_recent_first(a, b));
        self.order_mapper.update(&mut transaction, &orders);

        transaction
    }
}
