//! Role configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into timeline derivations. The engine never
//! hard-codes which encounter types represent admission, discharge, transfer
//! or check-in; the hosting system supplies those identities here.

use crate::error::{TimelineError, TimelineResult};
use crate::records::EncounterTypeId;

/// Maps logical encounter roles to concrete encounter-type identities.
#[derive(Clone, Debug)]
pub struct RoleConfig {
    admission: EncounterTypeId,
    discharge: EncounterTypeId,
    transfer: EncounterTypeId,
    check_in: EncounterTypeId,
}

impl RoleConfig {
    /// Create a new `RoleConfig`.
    ///
    /// The four role types must be pairwise distinct; a shared identity would
    /// make admission and discharge detection ill-defined.
    pub fn new(
        admission: EncounterTypeId,
        discharge: EncounterTypeId,
        transfer: EncounterTypeId,
        check_in: EncounterTypeId,
    ) -> TimelineResult<Self> {
        let roles = [admission, discharge, transfer, check_in];
        for (i, a) in roles.iter().enumerate() {
            if roles[i + 1..].contains(a) {
                return Err(TimelineError::InvalidRoleConfig(
                    "encounter role types must be pairwise distinct".into(),
                ));
            }
        }

        Ok(Self {
            admission,
            discharge,
            transfer,
            check_in,
        })
    }

    /// Type of an encounter that admits the patient as an inpatient.
    pub fn admission(&self) -> EncounterTypeId {
        self.admission
    }

    /// Type of an encounter that ends an inpatient stay.
    pub fn discharge(&self) -> EncounterTypeId {
        self.discharge
    }

    /// Type of an encounter that moves an admitted patient within the
    /// facility. Updates location without ending the admission.
    pub fn transfer(&self) -> EncounterTypeId {
        self.transfer
    }

    /// Type of an encounter that checks the patient in at the start of a
    /// visit.
    pub fn check_in(&self) -> EncounterTypeId {
        self.check_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn role() -> EncounterTypeId {
        EncounterTypeId::new(Uuid::new_v4())
    }

    #[test]
    fn accepts_distinct_role_types() {
        assert!(RoleConfig::new(role(), role(), role(), role()).is_ok());
    }

    #[test]
    fn rejects_duplicate_role_types() {
        let admission = role();
        let err = RoleConfig::new(admission, admission, role(), role())
            .expect_err("should reject duplicate");
        assert!(matches!(err, TimelineError::InvalidRoleConfig(_)));
    }
}
