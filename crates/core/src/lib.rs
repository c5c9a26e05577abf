//! # Careline Core
//!
//! Encounter-timeline reasoning for the careline clinical-records module.
//!
//! This crate derives temporal facts about a patient's care episode from a
//! visit's encounter log:
//! - canonical recency ordering under absent or colliding timestamps
//! - admission state and inpatient location as of a reference instant
//! - "last event of type X not yet superseded by type Y" detection
//! - the most recently recorded clinical disposition
//! - visit closure on the last encounter datetime
//!
//! **No persistence or API concerns**: visits and encounters arrive as
//! fully-materialised read-only snapshots; the single write side effect is
//! the visit closer stamping [`Visit::stopped_at`], which the caller hands
//! back to its persistence layer. Role meaning (admission, discharge,
//! transfer, check-in) is injected through [`RoleConfig`], and "now" through
//! the [`Clock`] trait, keeping every derivation deterministic under test.

pub mod chronology;
pub mod clock;
pub mod config;
pub mod disposition;
pub mod error;
pub mod records;
pub mod selectors;
pub mod visit;

pub use chronology::{most_recent_first, oldest_first, Chronological, Voided};
pub use clock::{Clock, SystemClock};
pub use config::RoleConfig;
pub use disposition::{Disposition, DispositionDescriptor, DispositionRegistry};
pub use error::{TimelineError, TimelineResult};
pub use records::{ConceptId, Encounter, EncounterTypeId, LocationId, Obs, Order, Visit};
pub use visit::{close_on_last_encounter, VisitReview};
