//! Disposition concept set handling.
//!
//! A disposition (the recorded outcome or decision for a patient at a point
//! in care) is stored as a two-level observation tree: an outer group tagged
//! with the disposition-set concept, containing one member tagged with the
//! disposition concept whose coded value identifies the disposition itself.
//! This module describes that concept set and builds/locates the trees;
//! mapping a coded value back to a disposition identity is delegated to the
//! external vocabulary service behind [`DispositionRegistry`].

use careline_types::ConceptCode;

use crate::error::{TimelineError, TimelineResult};
use crate::records::{ConceptId, Obs};

/// The recorded outcome/decision for a patient at a point in care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disposition {
    /// Vocabulary code identifying the disposition (e.g. an admit or
    /// discharge code in the hosting system's dictionary).
    pub code: ConceptCode,
    /// Human-readable name.
    pub name: String,
}

/// External vocabulary collaborator resolving dispositions to and from
/// concepts.
pub trait DispositionRegistry {
    /// Maps the coded member value of a disposition group back to a
    /// disposition identity. `None` when the group carries no resolvable
    /// value.
    fn disposition_from_obs_group(&self, group: &Obs) -> Option<Disposition>;

    /// Looks up the dictionary concept for a disposition code.
    fn concept_for_code(&self, code: &ConceptCode) -> Option<ConceptId>;
}

/// Describes the concepts necessary for recording a disposition concept set.
#[derive(Clone, Debug)]
pub struct DispositionDescriptor {
    set_concept: ConceptId,
    disposition_concept: ConceptId,
}

impl DispositionDescriptor {
    pub fn new(set_concept: ConceptId, disposition_concept: ConceptId) -> Self {
        Self {
            set_concept,
            disposition_concept,
        }
    }

    /// Concept marking an observation group as a disposition set.
    pub fn set_concept(&self) -> ConceptId {
        self.set_concept
    }

    /// Concept marking the member observation carrying the coded disposition
    /// value.
    pub fn disposition_concept(&self) -> ConceptId {
        self.disposition_concept
    }

    /// Returns true iff `obs` is a disposition group.
    pub fn is_disposition_group(&self, obs: &Obs) -> bool {
        obs.concept == self.set_concept
    }

    /// Returns the non-voided member of `group` carrying the disposition
    /// concept, or `None` when the group has no such member.
    pub fn disposition_obs<'a>(&self, group: &'a Obs) -> Option<&'a Obs> {
        group
            .members
            .iter()
            .filter(|member| !member.voided)
            .find(|member| member.concept == self.disposition_concept)
    }

    /// Builds the observation tree recording `disposition`: an outer group
    /// tagged with the set concept, containing one member tagged with the
    /// disposition concept and a coded value equal to the resolved concept
    /// for the disposition's code.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::UnknownDispositionCode`] when the registry
    /// has no concept for the disposition's code.
    pub fn build_obs_group(
        &self,
        disposition: &Disposition,
        registry: &dyn DispositionRegistry,
    ) -> TimelineResult<Obs> {
        let value = registry
            .concept_for_code(&disposition.code)
            .ok_or_else(|| TimelineError::UnknownDispositionCode(disposition.code.clone()))?;

        let mut member = Obs::new(self.disposition_concept);
        member.value_coded = Some(value);

        let mut group = Obs::new(self.set_concept);
        group.members.push(member);
        Ok(group)
    }
}
