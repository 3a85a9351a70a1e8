//! In-memory backends. One instance of each is constructed at startup and
//! shared behind `Arc`; there are no process-wide statics.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{
    category::Category,
    request::{Decision, LeaveRequest, RequestState},
    user::UserRecord,
};
use crate::store::{
    CategoryCatalog, DirectoryError, RequestPatch, RequestStore, StoreError, UserDirectory,
};

#[derive(Default)]
pub struct MemoryStore {
    requests: RwLock<HashMap<Uuid, LeaveRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut requests: Vec<LeaveRequest>) -> Vec<LeaveRequest> {
    requests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    requests
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn insert(&self, request: LeaveRequest) {
        self.requests
            .write()
            .expect("request store lock poisoned")
            .insert(request.id, request);
    }

    async fn get(&self, id: Uuid) -> Option<LeaveRequest> {
        self.requests
            .read()
            .expect("request store lock poisoned")
            .get(&id)
            .cloned()
    }

    async fn list_all(&self) -> Vec<LeaveRequest> {
        let requests = self
            .requests
            .read()
            .expect("request store lock poisoned")
            .values()
            .cloned()
            .collect();
        newest_first(requests)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Vec<LeaveRequest> {
        let requests = self
            .requests
            .read()
            .expect("request store lock poisoned")
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        newest_first(requests)
    }

    async fn update_if_pending(
        &self,
        id: Uuid,
        patch: RequestPatch,
    ) -> Result<LeaveRequest, StoreError> {
        let mut requests = self.requests.write().expect("request store lock poisoned");
        let request = requests.get_mut(&id).ok_or(StoreError::NotFound)?;
        if !request.state.is_pending() {
            return Err(StoreError::NotPending);
        }
        request.category_id = patch.category_id;
        request.start_date = patch.start_date;
        request.end_date = patch.end_date;
        request.justification = patch.justification;
        Ok(request.clone())
    }

    async fn decide_if_pending(
        &self,
        id: Uuid,
        state: RequestState,
        decision: Decision,
    ) -> Result<LeaveRequest, StoreError> {
        let mut requests = self.requests.write().expect("request store lock poisoned");
        let request = requests.get_mut(&id).ok_or(StoreError::NotFound)?;
        if !request.state.is_pending() {
            return Err(StoreError::NotPending);
        }
        // State and decision metadata change in the same write; no observer
        // can see a terminal request without its decision.
        request.state = state;
        request.decision = Some(decision);
        Ok(request.clone())
    }

    async fn delete_if_pending(&self, id: Uuid) -> Result<(), StoreError> {
        let mut requests = self.requests.write().expect("request store lock poisoned");
        let request = requests.get(&id).ok_or(StoreError::NotFound)?;
        if !request.state.is_pending() {
            return Err(StoreError::NotPending);
        }
        requests.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDirectory {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_by_id(&self, id: Uuid) -> Option<UserRecord> {
        self.users
            .read()
            .expect("user directory lock poisoned")
            .get(&id)
            .cloned()
    }

    async fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        self.users
            .read()
            .expect("user directory lock poisoned")
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned()
    }

    async fn insert(&self, user: UserRecord) -> Result<(), DirectoryError> {
        let mut users = self.users.write().expect("user directory lock poisoned");
        if users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(DirectoryError::UsernameTaken);
        }
        users.insert(user.id, user);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCatalog {
    categories: RwLock<Vec<Category>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog contents are fixed by the seed at startup; the trait surface
    /// stays read-only.
    pub fn add(&self, category: Category) {
        self.categories
            .write()
            .expect("catalog lock poisoned")
            .push(category);
    }
}

#[async_trait]
impl CategoryCatalog for MemoryCatalog {
    async fn list(&self) -> Vec<Category> {
        self.categories
            .read()
            .expect("catalog lock poisoned")
            .clone()
    }

    async fn exists(&self, id: Uuid) -> bool {
        self.categories
            .read()
            .expect("catalog lock poisoned")
            .iter()
            .any(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn pending_request(owner_id: Uuid) -> LeaveRequest {
        LeaveRequest {
            id: Uuid::new_v4(),
            owner_id,
            category_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
            justification: "family trip".into(),
            state: RequestState::Pending,
            submitted_at: Utc::now(),
            decision: None,
        }
    }

    #[actix_web::test]
    async fn decide_is_conditional_on_pending() {
        let store = MemoryStore::new();
        let request = pending_request(Uuid::new_v4());
        let id = request.id;
        store.insert(request).await;

        let first = Decision {
            decided_at: Utc::now(),
            decider_id: Uuid::new_v4(),
        };
        let decided = store
            .decide_if_pending(id, RequestState::Approved, first)
            .await
            .unwrap();
        assert_eq!(decided.state, RequestState::Approved);
        assert_eq!(decided.decision, Some(first));

        let second = Decision {
            decided_at: Utc::now(),
            decider_id: Uuid::new_v4(),
        };
        let lost = store
            .decide_if_pending(id, RequestState::Rejected, second)
            .await;
        assert_eq!(lost, Err(StoreError::NotPending));

        // the winner's write is untouched by the losing attempt
        let current = store.get(id).await.unwrap();
        assert_eq!(current.state, RequestState::Approved);
        assert_eq!(current.decision, Some(first));
    }

    #[actix_web::test]
    async fn concurrent_decisions_have_exactly_one_winner() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let request = pending_request(Uuid::new_v4());
        let id = request.id;
        store.insert(request).await;

        let approve = store.decide_if_pending(
            id,
            RequestState::Approved,
            Decision {
                decided_at: Utc::now(),
                decider_id: Uuid::new_v4(),
            },
        );
        let reject = store.decide_if_pending(
            id,
            RequestState::Rejected,
            Decision {
                decided_at: Utc::now(),
                decider_id: Uuid::new_v4(),
            },
        );
        let (a, b) = futures::future::join(approve, reject).await;
        assert!(a.is_ok() != b.is_ok());

        let current = store.get(id).await.unwrap();
        let winner = if a.is_ok() { a.unwrap() } else { b.unwrap() };
        assert_eq!(current.state, winner.state);
    }

    #[actix_web::test]
    async fn update_and_delete_refuse_terminal_requests() {
        let store = MemoryStore::new();
        let request = pending_request(Uuid::new_v4());
        let id = request.id;
        store.insert(request).await;
        store
            .decide_if_pending(
                id,
                RequestState::Rejected,
                Decision {
                    decided_at: Utc::now(),
                    decider_id: Uuid::new_v4(),
                },
            )
            .await
            .unwrap();

        let patch = RequestPatch {
            category_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
            justification: "changed".into(),
        };
        assert_eq!(
            store.update_if_pending(id, patch).await.unwrap_err(),
            StoreError::NotPending
        );
        assert_eq!(
            store.delete_if_pending(id).await.unwrap_err(),
            StoreError::NotPending
        );
        assert!(store.get(id).await.is_some());
    }

    #[actix_web::test]
    async fn list_by_owner_filters_and_orders() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        let mut older = pending_request(owner);
        older.submitted_at = Utc::now() - chrono::Duration::hours(2);
        let newer = pending_request(owner);
        store.insert(older.clone()).await;
        store.insert(newer.clone()).await;
        store.insert(pending_request(other)).await;

        let mine = store.list_by_owner(owner).await;
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, newer.id);
        assert_eq!(mine[1].id, older.id);
        assert_eq!(store.list_all().await.len(), 3);
    }

    #[actix_web::test]
    async fn directory_rejects_duplicate_usernames() {
        let directory = MemoryDirectory::new();
        let user = UserRecord {
            id: Uuid::new_v4(),
            username: "anna".into(),
            display_name: "Anna Rossi".into(),
            password_hash: "x".into(),
            role: crate::model::role::Role::Employee,
        };
        directory.insert(user.clone()).await.unwrap();

        let mut dup = user.clone();
        dup.id = Uuid::new_v4();
        dup.username = "ANNA".into();
        assert_eq!(
            directory.insert(dup).await,
            Err(DirectoryError::UsernameTaken)
        );
        assert!(directory.find_by_username("Anna").await.is_some());
    }
}
