//! Generic queries over a record collection.
//!
//! All selectors exclude voided records before ranking, tolerate unordered
//! input of any size including duplicates and ties, and represent "nothing
//! found" as `None` or `false` rather than an error.

use crate::chronology::{most_recent_first, oldest_first, Chronological, Voided};

/// Returns the most recent non-voided record, or `None` if there is none.
pub fn most_recent<T>(records: &[T]) -> Option<&T>
where
    T: Chronological + Voided,
{
    records
        .iter()
        .filter(|record| !record.is_voided())
        .min_by(|a, b| most_recent_first(*a, *b))
}

/// Returns the oldest non-voided record, or `None` if there is none.
///
/// Voided records are excluded even when they would otherwise be
/// chronologically extreme.
pub fn oldest<T>(records: &[T]) -> Option<&T>
where
    T: Chronological + Voided,
{
    records
        .iter()
        .filter(|record| !record.is_voided())
        .min_by(|a, b| oldest_first(*a, *b))
}

/// Returns the most recent non-voided record satisfying `predicate`, or
/// `None` if no record matches.
pub fn last_matching<T, P>(records: &[T], predicate: P) -> Option<&T>
where
    T: Chronological + Voided,
    P: Fn(&T) -> bool,
{
    records
        .iter()
        .filter(|record| !record.is_voided() && predicate(record))
        .min_by(|a, b| most_recent_first(*a, *b))
}

/// Returns true iff the most recent non-voided record keyed `target` or
/// `cancel` is keyed `target`.
///
/// With `cancel` of `None` only `target` records are considered, so the
/// query degenerates to "does at least one non-voided `target` record
/// exist". An empty filtered set yields false.
pub fn last_matching_without_superseding<T, K, F>(
    records: &[T],
    key: F,
    target: &K,
    cancel: Option<&K>,
) -> bool
where
    T: Chronological + Voided,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let last = last_matching(records, |record| {
        let k = key(record);
        k == *target || cancel.map_or(false, |c| k == *c)
    });
    last.map_or(false, |record| key(record) == *target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Encounter, EncounterTypeId};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2013, 1, 15, 12, 0, 0).unwrap()
    }

    fn encounter(encounter_type: EncounterTypeId, hours_ago: i64) -> Encounter {
        let mut encounter = Encounter::new(encounter_type);
        encounter.occurred_at = Some(now() - Duration::hours(hours_ago));
        encounter
    }

    fn some_type() -> EncounterTypeId {
        EncounterTypeId::new(Uuid::new_v4())
    }

    #[test]
    fn most_recent_and_oldest_of_empty_are_none() {
        let encounters: Vec<Encounter> = Vec::new();

        assert!(most_recent(&encounters).is_none());
        assert!(oldest(&encounters).is_none());
    }

    #[test]
    fn most_recent_of_singleton_is_that_element() {
        let only = encounter(some_type(), 1);
        let uuid = only.uuid;

        let binding = [only];
        let found = most_recent(&binding).expect("singleton");
        assert_eq!(found.uuid, uuid);
    }

    #[test]
    fn selection_is_independent_of_insertion_order() {
        let check_in_type = some_type();

        let check_in = encounter(check_in_type, 3);
        let vitals = encounter(some_type(), 2);
        let consult = encounter(some_type(), 1);
        let mut voided = Encounter::new(some_type());
        voided.voided = true;

        let consult_uuid = consult.uuid;
        let check_in_uuid = check_in.uuid;

        let encounters = vec![voided, consult, vitals, check_in];

        let recent = most_recent(&encounters).expect("non-empty");
        assert_eq!(recent.uuid, consult_uuid);

        let last_check_in = last_matching(&encounters, |e| e.encounter_type == check_in_type)
            .expect("check-in present");
        assert_eq!(last_check_in.uuid, check_in_uuid);
    }

    #[test]
    fn oldest_excludes_voided_even_when_chronologically_extreme() {
        let mut voided = encounter(some_type(), 10);
        voided.voided = true;
        let older = encounter(some_type(), 5);
        let newer = encounter(some_type(), 1);

        let older_uuid = older.uuid;
        let encounters = vec![voided, newer, older];

        let found = oldest(&encounters).expect("non-voided present");
        assert_eq!(found.uuid, older_uuid);
    }

    #[test]
    fn last_matching_without_match_is_none() {
        let encounters = vec![encounter(some_type(), 1)];
        let missing = some_type();

        assert!(last_matching(&encounters, |e| e.encounter_type == missing).is_none());
    }

    #[test]
    fn unsuperseded_query_on_empty_set_is_false() {
        let encounters: Vec<Encounter> = Vec::new();

        assert!(!last_matching_without_superseding(
            &encounters,
            |e| e.encounter_type,
            &some_type(),
            Some(&some_type()),
        ));
    }

    #[test]
    fn single_target_record_is_unsuperseded() {
        let target = some_type();
        let encounters = vec![encounter(target, 1)];

        assert!(last_matching_without_superseding(
            &encounters,
            |e| e.encounter_type,
            &target,
            None,
        ));
    }

    #[test]
    fn single_unrelated_record_is_not_a_match() {
        let encounters = vec![encounter(some_type(), 1)];

        assert!(!last_matching_without_superseding(
            &encounters,
            |e| e.encounter_type,
            &some_type(),
            None,
        ));
    }

    #[test]
    fn target_after_cancel_counts_even_with_later_unrelated_record() {
        let target = some_type();
        let cancel = some_type();

        let encounters = vec![
            encounter(target, 3),
            encounter(cancel, 2),
            encounter(target, 1),
            encounter(some_type(), 0),
        ];

        assert!(last_matching_without_superseding(
            &encounters,
            |e| e.encounter_type,
            &target,
            Some(&cancel),
        ));
    }

    #[test]
    fn cancel_after_target_supersedes() {
        let target = some_type();
        let cancel = some_type();

        let encounters = vec![encounter(target, 2), encounter(cancel, 1)];

        assert!(!last_matching_without_superseding(
            &encounters,
            |e| e.encounter_type,
            &target,
            Some(&cancel),
        ));
    }
}
