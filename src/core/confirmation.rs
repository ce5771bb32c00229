use crate::core::error::MatchError;
use crate::models::{Match, MatchId, MatchStatus, Role, User};
use crate::services::{MatchStore, RequestStore};
use std::sync::Arc;

/// Outcome of one confirmation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Match state after the call
    pub record: Match,
    /// Status before the call
    pub previous: MatchStatus,
    /// True only when this call's store write set the flag; false when the
    /// flag was already set, including when a concurrent call set it first
    pub applied: bool,
}

impl Confirmation {
    pub fn status(&self) -> MatchStatus {
        self.record.status()
    }

    /// True only for the call that moved the match into `Finalized`
    pub fn newly_finalized(&self) -> bool {
        self.applied && self.previous != MatchStatus::Finalized && self.status() == MatchStatus::Finalized
    }
}

/// Applies one role's confirmation to one match
///
/// Confirmation is idempotent: re-confirming an already set flag succeeds
/// without a write. The host flag and the student flag never affect each
/// other.
#[derive(Clone)]
pub struct ConfirmationEngine {
    requests: Arc<dyn RequestStore>,
    matches: Arc<dyn MatchStore>,
}

impl ConfirmationEngine {
    pub fn new(requests: Arc<dyn RequestStore>, matches: Arc<dyn MatchStore>) -> Self {
        Self { requests, matches }
    }

    /// Confirm `match_id` on behalf of `role` and return the updated record
    pub async fn confirm_match(&self, match_id: MatchId, role: Role) -> Result<Match, MatchError> {
        self.confirm(match_id, role).await.map(|c| c.record)
    }

    /// Confirm `match_id` on behalf of `role`, reporting whether a write happened
    ///
    /// The caller's asserted role is trusted; use [`Self::confirm_match_as`]
    /// to also check the caller is the party on the match.
    pub async fn confirm(&self, match_id: MatchId, role: Role) -> Result<Confirmation, MatchError> {
        ensure_confirming_role(role)?;

        let current = self
            .matches
            .get_match(match_id)
            .await
            .map_err(MatchError::from_store)?;

        self.apply(current, role).await
    }

    /// Confirm `match_id` as `actor`, rejecting callers that are not the
    /// match's host or the owner of its request
    pub async fn confirm_match_as(&self, match_id: MatchId, actor: &User) -> Result<Confirmation, MatchError> {
        ensure_confirming_role(actor.role)?;

        let current = self
            .matches
            .get_match(match_id)
            .await
            .map_err(MatchError::from_store)?;

        let party = match actor.role {
            Role::Host => current.host_id,
            _ => {
                self.requests
                    .get_request(current.student_request_id)
                    .await
                    .map_err(MatchError::from_store)?
                    .student_id
            }
        };

        if party != actor.id {
            tracing::warn!(
                "User {} tried to confirm match {} as {} but is not that party",
                actor.id,
                match_id,
                actor.role
            );
            return Err(MatchError::Forbidden(format!(
                "user {} is not the {} on match {}",
                actor.id, actor.role, match_id
            )));
        }

        self.apply(current, actor.role).await
    }

    async fn apply(&self, current: Match, role: Role) -> Result<Confirmation, MatchError> {
        let previous = current.status();

        if current.is_confirmed_by(role) {
            tracing::debug!("Match {} already confirmed by {}, nothing to write", current.id, role);
            return Ok(Confirmation {
                record: current,
                previous,
                applied: false,
            });
        }

        let update = match role {
            Role::Host => self.matches.set_host_confirmed(current.id).await,
            _ => self.matches.set_student_confirmed(current.id).await,
        }
        .map_err(MatchError::from_store)?;

        if !update.written {
            tracing::debug!("Match {} was confirmed by {} concurrently", current.id, role);
            return Ok(Confirmation {
                previous: update.record.status(),
                record: update.record,
                applied: false,
            });
        }

        // The flag was unset when the write landed, whatever else changed meanwhile
        let mut before = update.record.clone();
        match role {
            Role::Host => before.host_confirmed = false,
            _ => before.student_confirmed = false,
        }
        let previous = before.status();

        tracing::info!(
            "Match {} confirmed by {}: {:?} -> {:?}",
            update.record.id,
            role,
            previous,
            update.record.status()
        );

        Ok(Confirmation {
            record: update.record,
            previous,
            applied: true,
        })
    }
}

fn ensure_confirming_role(role: Role) -> Result<(), MatchError> {
    match role {
        Role::Student | Role::Host => Ok(()),
        Role::Unknown => Err(MatchError::Validation(
            "role must be one of: student, host".to_string(),
        )),
    }
}
