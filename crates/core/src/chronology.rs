//! Recency ordering over timestamped records.
//!
//! Clinical timestamps are frequently absent, equal, or unreliable, so
//! "most recent" cannot be a plain `occurred_at` comparison. This module
//! defines the one ordering used everywhere recency is asked: a primary key
//! on the clinical timestamp with a deterministic fallback chain through the
//! creation timestamp and the store identifier.
//!
//! The comparator is a pure function with no shared state; it is safe to
//! reuse across concurrent derivations over different visits.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// A record that can be placed on the visit timeline.
pub trait Chronological {
    /// Nominal clinical timestamp. May be absent on transient or
    /// bulk-imported records.
    fn occurred_at(&self) -> Option<DateTime<Utc>>;

    /// System-assigned creation timestamp.
    fn recorded_at(&self) -> Option<DateTime<Utc>>;

    /// Store identifier; larger values are interpreted as more recently
    /// created.
    fn record_id(&self) -> Option<i64>;
}

/// A record that can be logically deleted without being removed from its
/// collection.
pub trait Voided {
    fn is_voided(&self) -> bool;
}

impl<T: Chronological> Chronological for &T {
    fn occurred_at(&self) -> Option<DateTime<Utc>> {
        (**self).occurred_at()
    }

    fn recorded_at(&self) -> Option<DateTime<Utc>> {
        (**self).recorded_at()
    }

    fn record_id(&self) -> Option<i64> {
        (**self).record_id()
    }
}

impl<T: Voided> Voided for &T {
    fn is_voided(&self) -> bool {
        (**self).is_voided()
    }
}

/// Orders two records most-recent-first.
///
/// Records with a later `occurred_at` sort first. When either clinical
/// timestamp is absent, or both are equal, the tie-break chain applies:
///
/// 1. both `recorded_at` present and unequal: later creation sorts first;
/// 2. both `recorded_at` present and equal: higher `record_id` sorts first
///    when both ids are present, otherwise the records rank equal;
/// 3. either `recorded_at` absent: the records rank equal, whatever their
///    ids.
///
/// The id step deliberately does not apply in case 3; two unsaved records
/// with comparable ids but no creation timestamps stay at rank 0. Ties of
/// rank 0 are possible and acceptable; consumers must not assume uniqueness
/// of rank. A stable sort over the same input always yields the same total
/// order.
pub fn most_recent_first<T: Chronological>(a: &T, b: &T) -> Ordering {
    match (a.occurred_at(), b.occurred_at()) {
        (Some(ours), Some(theirs)) if ours != theirs => theirs.cmp(&ours),
        _ => creation_order(a, b),
    }
}

/// Orders two records oldest-first. The exact reverse of
/// [`most_recent_first`].
pub fn oldest_first<T: Chronological>(a: &T, b: &T) -> Ordering {
    most_recent_first(a, b).reverse()
}

fn creation_order<T: Chronological>(a: &T, b: &T) -> Ordering {
    match (a.recorded_at(), b.recorded_at()) {
        (Some(ours), Some(theirs)) => {
            if ours == theirs {
                match (a.record_id(), b.record_id()) {
                    (Some(our_id), Some(their_id)) => their_id.cmp(&our_id),
                    _ => Ordering::Equal,
                }
            } else {
                theirs.cmp(&ours)
            }
        }
        _ => Ordering::Equal,
    }
}
