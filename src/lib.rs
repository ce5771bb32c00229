//! Shabbat Match - match resolution and dual-confirmation service
//!
//! Students submit hospitality requests, an external process assigns hosts,
//! and a match is finalized only once both the host and the student confirm.
//! This library resolves which matches a user can see and applies
//! confirmations idempotently.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{derive_status, Confirmation, ConfirmationEngine, MatchError, MatchResolver};
pub use models::{Match, MatchId, MatchStatus, OneOrMany, Role, User};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let record = Match {
            id: 1,
            student_request_id: 1,
            host_id: 2,
            host_confirmed: true,
            student_confirmed: true,
            created_at: chrono::Utc::now(),
        };
        assert_eq!(derive_status(&record), MatchStatus::Finalized);
    }
}
