use crate::models::{
    Contact, Match, MatchId, MatchLookup, NewStudentRequest, ProfileUpdate, RequestId, StudentRequest,
    UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by a backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of setting one confirmation flag
///
/// `written` is true only for the call whose write changed the flag. A call
/// that found the flag already set, including one that lost a race against a
/// concurrent confirmation, reports false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagUpdate {
    pub record: Match,
    pub written: bool,
}

/// Read access to student requests
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Ids of every request owned by the student, in store order
    async fn list_requests(&self, student_id: UserId) -> Result<Vec<RequestId>, StoreError>;

    async fn list_requests_for_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<StudentRequest>, StoreError>;

    async fn get_request(&self, request_id: RequestId) -> Result<StudentRequest, StoreError>;

    async fn create_request(&self, request: NewStudentRequest) -> Result<StudentRequest, StoreError>;
}

/// Access to match records and their confirmation flags
///
/// `set_*_confirmed` must be idempotent and must fail with
/// [`StoreError::NotFound`] when the match does not exist.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn find_matches_by_request(&self, request_id: RequestId) -> Result<MatchLookup, StoreError>;

    async fn find_matches_by_host(&self, host_id: UserId) -> Result<MatchLookup, StoreError>;

    async fn get_match(&self, match_id: MatchId) -> Result<Match, StoreError>;

    async fn set_host_confirmed(&self, match_id: MatchId) -> Result<FlagUpdate, StoreError>;

    async fn set_student_confirmed(&self, match_id: MatchId) -> Result<FlagUpdate, StoreError>;

    /// Matches created in `[from, until)` that still miss at least one confirmation
    async fn list_unfinalized_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Match>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Stored users: contact details for notifications and editable profiles
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn get_contact(&self, user_id: UserId) -> Result<Option<Contact>, StoreError>;

    /// Apply the present fields of `update`; `None` when the user does not exist
    async fn update_contact(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<Option<Contact>, StoreError>;
}
