use careline_types::ConceptCode;
use chrono::{DateTime, Utc};

/// Errors returned by timeline derivations.
///
/// Absent values ("no most recent encounter", "no disposition recorded",
/// "no current location") are not errors; they are `Option` results. The
/// variants here cover caller mistakes and unresolvable data states only.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error(
        "reference instant {as_of} precedes visit start {started_at}",
        as_of = as_of.to_rfc3339(),
        started_at = started_at.to_rfc3339()
    )]
    ReferenceBeforeVisitStart {
        as_of: DateTime<Utc>,
        started_at: DateTime<Utc>,
    },
    #[error("cannot close a visit with no datable encounters")]
    NoEncountersToClose,
    #[error("invalid role configuration: {0}")]
    InvalidRoleConfig(String),
    #[error("no concept mapped for disposition code '{0}'")]
    UnknownDispositionCode(ConceptCode),
}

pub type TimelineResult<T> = std::result::Result<T, TimelineError>;
