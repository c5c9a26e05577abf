//! Visit timeline derivations.
//!
//! [`VisitReview`] is a read-only view over a visit snapshot, the role
//! configuration, and a clock. It answers the temporal questions about a
//! care episode: admission state and inpatient location as of a reference
//! instant, selector views over the encounter log, and the most recently
//! recorded disposition. [`close_on_last_encounter`] is the one operation
//! with a write side effect: it stamps the visit's stop time from its
//! encounter log.
//!
//! Callers must hand in a stable snapshot; the derivations make multiple
//! passes over the encounter collection and offer no isolation against
//! concurrent mutation.

use chrono::{DateTime, Utc};

use crate::chronology::most_recent_first;
use crate::clock::Clock;
use crate::config::RoleConfig;
use crate::disposition::{Disposition, DispositionDescriptor, DispositionRegistry};
use crate::error::{TimelineError, TimelineResult};
use crate::records::{Encounter, EncounterTypeId, LocationId, Visit};
use crate::selectors;

/// Read-only timeline view over a visit.
pub struct VisitReview<'a> {
    visit: &'a Visit,
    roles: &'a RoleConfig,
    clock: &'a dyn Clock,
}

impl<'a> VisitReview<'a> {
    pub fn new(visit: &'a Visit, roles: &'a RoleConfig, clock: &'a dyn Clock) -> Self {
        Self {
            visit,
            roles,
            clock,
        }
    }

    pub fn visit(&self) -> &Visit {
        self.visit
    }

    /// The most recent non-voided encounter, or `None` on an encounter-less
    /// visit.
    pub fn most_recent_encounter(&self) -> Option<&Encounter> {
        selectors::most_recent(&self.visit.encounters)
    }

    /// The oldest non-voided encounter.
    pub fn oldest_encounter(&self) -> Option<&Encounter> {
        selectors::oldest(&self.visit.encounters)
    }

    /// The most recent non-voided encounter of the configured check-in type.
    pub fn check_in_encounter(&self) -> Option<&Encounter> {
        let check_in = self.roles.check_in();
        selectors::last_matching(&self.visit.encounters, |e| e.encounter_type == check_in)
    }

    /// Returns true iff the most recent non-voided encounter typed `target`
    /// or `cancel` is typed `target`. No time filter is applied.
    pub fn has_encounter_without_subsequent(
        &self,
        target: EncounterTypeId,
        cancel: Option<EncounterTypeId>,
    ) -> bool {
        selectors::last_matching_without_superseding(
            &self.visit.encounters,
            |e| e.encounter_type,
            &target,
            cancel.as_ref(),
        )
    }

    /// Whether the patient is admitted as an inpatient right now.
    pub fn is_admitted(&self) -> TimelineResult<bool> {
        self.is_admitted_at(self.clock.now())
    }

    /// Whether the patient is admitted as an inpatient as of `as_of`.
    ///
    /// True iff the most recent admission-or-discharge encounter at or
    /// before `as_of` is an admission. Transfers never end an admission and
    /// are ignored here. An encounter without a clinical timestamp passes
    /// the time filter; when the tie-break chain ranks it most recent it
    /// still counts.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::ReferenceBeforeVisitStart`] when `as_of`
    /// precedes the visit's start.
    pub fn is_admitted_at(&self, as_of: DateTime<Utc>) -> TimelineResult<bool> {
        if as_of < self.visit.started_at {
            return Err(TimelineError::ReferenceBeforeVisitStart {
                as_of,
                started_at: self.visit.started_at,
            });
        }

        let in_range: Vec<&Encounter> = self
            .visit
            .encounters
            .iter()
            .filter(|e| e.occurred_at.map_or(true, |t| t <= as_of))
            .collect();

        Ok(selectors::last_matching_without_superseding(
            &in_range,
            |e| e.encounter_type,
            &self.roles.admission(),
            Some(&self.roles.discharge()),
        ))
    }

    /// The patient's current physical location, if admitted right now.
    pub fn inpatient_location(&self) -> TimelineResult<Option<LocationId>> {
        self.inpatient_location_at(self.clock.now())
    }

    /// The patient's physical location as of `as_of`, or `None` when not
    /// admitted at that instant.
    ///
    /// A transfer updates location but does not itself represent admission
    /// or discharge, so transfers are included in this scan even though
    /// [`Self::is_admitted_at`] ignores them.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::ReferenceBeforeVisitStart`] when `as_of`
    /// precedes the visit's start.
    pub fn inpatient_location_at(
        &self,
        as_of: DateTime<Utc>,
    ) -> TimelineResult<Option<LocationId>> {
        if !self.is_admitted_at(as_of)? {
            return Ok(None);
        }

        let admission = self.roles.admission();
        let transfer = self.roles.transfer();
        let moves: Vec<&Encounter> = self
            .visit
            .encounters
            .iter()
            .filter(|e| e.encounter_type == admission || e.encounter_type == transfer)
            .filter(|e| e.occurred_at.map_or(true, |t| t <= as_of))
            .collect();

        Ok(selectors::most_recent(&moves).and_then(|e| e.location))
    }

    /// Whole-day difference between today and the visit's start, computed on
    /// calendar-day granularity rather than elapsed hours.
    pub fn days_since_start(&self) -> i64 {
        let today = self.clock.now().date_naive();
        (today - self.visit.started_at.date_naive()).num_days()
    }

    /// Upper bound for encounter queries over this visit: the stop time when
    /// the visit is closed, otherwise the current instant.
    pub fn encounter_stop_range(&self) -> DateTime<Utc> {
        self.visit.stopped_at.unwrap_or_else(|| self.clock.now())
    }

    /// The most recently recorded disposition across the visit's encounters.
    ///
    /// Non-voided encounters are ranked most-recent-first; the first one
    /// bearing a non-voided top-level disposition group wins, and its group
    /// is handed to `registry` for value resolution. `None` when no
    /// encounter bears a disposition group.
    pub fn most_recent_disposition(
        &self,
        descriptor: &DispositionDescriptor,
        registry: &dyn DispositionRegistry,
    ) -> Option<Disposition> {
        let mut ranked: Vec<&Encounter> = self
            .visit
            .encounters
            .iter()
            .filter(|e| !e.voided)
            .collect();
        ranked.sort_by(|a, b| most_recent_first(a, b));

        for encounter in ranked {
            let group = encounter
                .observations
                .iter()
                .filter(|obs| !obs.voided)
                .find(|obs| descriptor.is_disposition_group(obs));
            if let Some(group) = group {
                let disposition = registry.disposition_from_obs_group(group);
                if disposition.is_none() {
                    tracing::warn!(
                        obs = %group.uuid,
                        "disposition group has no resolvable disposition"
                    );
                }
                return disposition;
            }
        }

        None
    }
}

/// Closes `visit` on the latest encounter datetime.
///
/// Voided encounters participate: the closing timestamp reflects the true
/// last administrative event, deleted or not.
///
/// # Errors
///
/// Returns [`TimelineError::NoEncountersToClose`] when the visit has no
/// encounter carrying a clinical timestamp; a visit with no recorded
/// activity cannot be closed.
pub fn close_on_last_encounter(visit: &mut Visit) -> TimelineResult<()> {
    let last = visit
        .encounters
        .iter()
        .filter_map(|e| e.occurred_at)
        .max()
        .ok_or(TimelineError::NoEncountersToClose)?;

    visit.stopped_at = Some(last);
    tracing::debug!(visit = %visit.uuid, stopped_at = %last, "closed visit on last encounter");
    Ok(())
}
