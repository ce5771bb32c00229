use crate::core::error::MatchError;
use crate::core::normalize::{extend_match_ids, match_ids};
use crate::models::{MatchId, Role, User};
use crate::services::{MatchStore, RequestStore};
use std::sync::Arc;

/// Discovers which matches are visible to a user
///
/// Students see the matches of every request they own, concatenated in
/// request order. Hosts see the matches assigned to them. Any other role
/// sees nothing. Resolution is read-only.
#[derive(Clone)]
pub struct MatchResolver {
    requests: Arc<dyn RequestStore>,
    matches: Arc<dyn MatchStore>,
}

impl MatchResolver {
    pub fn new(requests: Arc<dyn RequestStore>, matches: Arc<dyn MatchStore>) -> Self {
        Self { requests, matches }
    }

    /// Resolve the ids of every match visible to `user`
    ///
    /// The first store failure aborts resolution with
    /// [`MatchError::Resolution`]; ids gathered before it are discarded.
    pub async fn resolve_matches_for_user(&self, user: &User) -> Result<Vec<MatchId>, MatchError> {
        let ids = match user.role {
            Role::Student => self.resolve_for_student(user.id).await?,
            Role::Host => {
                let lookup = self
                    .matches
                    .find_matches_by_host(user.id)
                    .await
                    .map_err(MatchError::Resolution)?;
                match_ids(lookup)
            }
            Role::Unknown => {
                tracing::debug!("User {} has no match-bearing role", user.id);
                Vec::new()
            }
        };

        tracing::debug!("Resolved {} matches for {} {}", ids.len(), user.role, user.id);
        Ok(ids)
    }

    async fn resolve_for_student(&self, student_id: i64) -> Result<Vec<MatchId>, MatchError> {
        let request_ids = self
            .requests
            .list_requests(student_id)
            .await
            .map_err(MatchError::Resolution)?;

        let mut ids = Vec::new();
        for request_id in request_ids {
            let lookup = self
                .matches
                .find_matches_by_request(request_id)
                .await
                .map_err(MatchError::Resolution)?;
            extend_match_ids(&mut ids, lookup);
        }

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Match, MatchLookup, NewStudentRequest, RequestId, StudentRequest, UserId};
    use crate::services::{FlagUpdate, InMemoryStore, StoreError};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    /// Store whose request lookups fail for one request id
    struct FlakyStore {
        inner: InMemoryStore,
        failing_request: RequestId,
    }

    #[async_trait]
    impl RequestStore for FlakyStore {
        async fn list_requests(&self, student_id: UserId) -> Result<Vec<RequestId>, StoreError> {
            self.inner.list_requests(student_id).await
        }
        async fn list_requests_for_student(&self, student_id: UserId) -> Result<Vec<StudentRequest>, StoreError> {
            self.inner.list_requests_for_student(student_id).await
        }
        async fn get_request(&self, request_id: RequestId) -> Result<StudentRequest, StoreError> {
            self.inner.get_request(request_id).await
        }
        async fn create_request(&self, request: NewStudentRequest) -> Result<StudentRequest, StoreError> {
            self.inner.create_request(request).await
        }
    }

    #[async_trait]
    impl MatchStore for FlakyStore {
        async fn find_matches_by_request(&self, request_id: RequestId) -> Result<MatchLookup, StoreError> {
            if request_id == self.failing_request {
                return Err(StoreError::Unavailable("connection reset".to_string()));
            }
            self.inner.find_matches_by_request(request_id).await
        }
        async fn find_matches_by_host(&self, host_id: UserId) -> Result<MatchLookup, StoreError> {
            self.inner.find_matches_by_host(host_id).await
        }
        async fn get_match(&self, match_id: MatchId) -> Result<Match, StoreError> {
            self.inner.get_match(match_id).await
        }
        async fn set_host_confirmed(&self, match_id: MatchId) -> Result<FlagUpdate, StoreError> {
            self.inner.set_host_confirmed(match_id).await
        }
        async fn set_student_confirmed(&self, match_id: MatchId) -> Result<FlagUpdate, StoreError> {
            self.inner.set_student_confirmed(match_id).await
        }
        async fn list_unfinalized_between(
            &self,
            from: DateTime<Utc>,
            until: DateTime<Utc>,
        ) -> Result<Vec<Match>, StoreError> {
            self.inner.list_unfinalized_between(from, until).await
        }
    }

    async fn seeded_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        for location in ["Jerusalem", "Tel Aviv"] {
            store
                .create_request(NewStudentRequest {
                    student_id: 1,
                    location: location.to_string(),
                    num_guests: 1,
                })
                .await
                .unwrap();
        }
        store.assign_host(1, 100).await.unwrap();
        store.assign_host(1, 101).await.unwrap();
        store.assign_host(2, 100).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_student_concatenates_in_request_order() {
        let store = Arc::new(seeded_store().await);
        let resolver = MatchResolver::new(store.clone(), store);

        let ids = resolver.resolve_matches_for_user(&User::student(1)).await.unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_host_sees_assigned_matches() {
        let store = Arc::new(seeded_store().await);
        let resolver = MatchResolver::new(store.clone(), store);

        let ids = resolver.resolve_matches_for_user(&User::host(100)).await.unwrap();
        assert_eq!(ids, vec![1, 3]);

        let single = resolver.resolve_matches_for_user(&User::host(101)).await.unwrap();
        assert_eq!(single, vec![2]);
    }

    #[tokio::test]
    async fn test_unknown_role_is_empty() {
        let store = Arc::new(seeded_store().await);
        let resolver = MatchResolver::new(store.clone(), store);

        let ids = resolver
            .resolve_matches_for_user(&User::new(1, Role::Unknown))
            .await
            .unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_failure_discards_partial_results() {
        let store = Arc::new(FlakyStore {
            inner: seeded_store().await,
            failing_request: 2,
        });
        let resolver = MatchResolver::new(store.clone(), store);

        let result = resolver.resolve_matches_for_user(&User::student(1)).await;
        assert!(matches!(result, Err(MatchError::Resolution(StoreError::Unavailable(_)))));
    }
}
