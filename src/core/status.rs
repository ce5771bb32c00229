use crate::models::{Match, MatchStatus};

/// Derive the confirmation status of a match
///
/// Pure and total over the two flags; `Finalized` requires both.
#[inline]
pub fn derive_status(record: &Match) -> MatchStatus {
    MatchStatus::derive(record.host_confirmed, record.student_confirmed)
}
