use crate::models::{
    Contact, Match, MatchId, MatchLookup, NewStudentRequest, OneOrMany, ProfileUpdate, RequestId,
    RequestStatus, StudentRequest, UserId,
};
use crate::services::store::{ContactStore, FlagUpdate, MatchStore, RequestStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    contacts: BTreeMap<UserId, Contact>,
    requests: BTreeMap<RequestId, StudentRequest>,
    matches: BTreeMap<MatchId, Match>,
    next_request_id: RequestId,
    next_match_id: MatchId,
}

/// In-process store for development and tests
///
/// Lookups report their results in the narrowest shape: nothing, a single
/// match, or a list. Records are kept in id order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_contact(&self, contact: Contact) {
        self.state.write().await.contacts.insert(contact.id, contact);
    }

    /// Insert a request with a caller-chosen id
    pub async fn insert_request(&self, request: StudentRequest) {
        let mut state = self.state.write().await;
        state.next_request_id = state.next_request_id.max(request.id);
        state.requests.insert(request.id, request);
    }

    /// Insert a match with a caller-chosen id, as the external assignment process would
    pub async fn insert_match(&self, record: Match) {
        let mut state = self.state.write().await;
        state.next_match_id = state.next_match_id.max(record.id);
        state.matches.insert(record.id, record);
    }

    /// Assign a host to a request, creating an unconfirmed match
    pub async fn assign_host(&self, request_id: RequestId, host_id: UserId) -> Result<Match, StoreError> {
        let mut state = self.state.write().await;
        if !state.requests.contains_key(&request_id) {
            return Err(StoreError::NotFound(format!("request {}", request_id)));
        }

        state.next_match_id += 1;
        let record = Match {
            id: state.next_match_id,
            student_request_id: request_id,
            host_id,
            host_confirmed: false,
            student_confirmed: false,
            created_at: Utc::now(),
        };
        state.matches.insert(record.id, record.clone());

        Ok(record)
    }

    /// Set one flag under the write lock; only the call that flips it reports a write
    async fn set_flag<F>(&self, match_id: MatchId, flag: F) -> Result<FlagUpdate, StoreError>
    where
        F: FnOnce(&mut Match) -> &mut bool,
    {
        let mut state = self.state.write().await;
        let record = state
            .matches
            .get_mut(&match_id)
            .ok_or_else(|| StoreError::NotFound(format!("match {}", match_id)))?;

        let slot = flag(record);
        let written = !*slot;
        *slot = true;

        Ok(FlagUpdate {
            record: record.clone(),
            written,
        })
    }
}

#[async_trait]
impl RequestStore for InMemoryStore {
    async fn list_requests(&self, student_id: UserId) -> Result<Vec<RequestId>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .requests
            .values()
            .filter(|r| r.student_id == student_id)
            .map(|r| r.id)
            .collect())
    }

    async fn list_requests_for_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<StudentRequest>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .requests
            .values()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn get_request(&self, request_id: RequestId) -> Result<StudentRequest, StoreError> {
        self.state
            .read()
            .await
            .requests
            .get(&request_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("request {}", request_id)))
    }

    async fn create_request(&self, request: NewStudentRequest) -> Result<StudentRequest, StoreError> {
        let mut state = self.state.write().await;
        state.next_request_id += 1;
        let created = StudentRequest {
            id: state.next_request_id,
            student_id: request.student_id,
            location: request.location,
            num_guests: request.num_guests,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };
        state.requests.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl MatchStore for InMemoryStore {
    async fn find_matches_by_request(&self, request_id: RequestId) -> Result<MatchLookup, StoreError> {
        let state = self.state.read().await;
        let found = state
            .matches
            .values()
            .filter(|m| m.student_request_id == request_id)
            .cloned()
            .collect();
        Ok(OneOrMany::from_vec(found))
    }

    async fn find_matches_by_host(&self, host_id: UserId) -> Result<MatchLookup, StoreError> {
        let state = self.state.read().await;
        let found = state
            .matches
            .values()
            .filter(|m| m.host_id == host_id)
            .cloned()
            .collect();
        Ok(OneOrMany::from_vec(found))
    }

    async fn get_match(&self, match_id: MatchId) -> Result<Match, StoreError> {
        self.state
            .read()
            .await
            .matches
            .get(&match_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("match {}", match_id)))
    }

    async fn set_host_confirmed(&self, match_id: MatchId) -> Result<FlagUpdate, StoreError> {
        self.set_flag(match_id, |m| &mut m.host_confirmed).await
    }

    async fn set_student_confirmed(&self, match_id: MatchId) -> Result<FlagUpdate, StoreError> {
        self.set_flag(match_id, |m| &mut m.student_confirmed).await
    }

    async fn list_unfinalized_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Match>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .matches
            .values()
            .filter(|m| m.created_at >= from && m.created_at < until && !m.is_finalized())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ContactStore for InMemoryStore {
    async fn get_contact(&self, user_id: UserId) -> Result<Option<Contact>, StoreError> {
        Ok(self.state.read().await.contacts.get(&user_id).cloned())
    }

    async fn update_contact(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<Option<Contact>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.contacts.get_mut(&user_id).map(|contact| {
            update.apply_to(contact);
            contact.clone()
        }))
    }
}
