//! The lifecycle engine. All transition guards live here; the store is only
//! ever asked to mutate after the guards pass, and its conditional writes
//! settle any race the guards could not see.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::{
    request::{Decision, DecisionKind, LeaveRequest, RequestState},
    role::Role,
};
use crate::store::{CategoryCatalog, RequestPatch, RequestStore, StoreError};

/// Fields accepted from a submitter, for both create and edit.
#[derive(Debug, Clone)]
pub struct RequestInput {
    pub category_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub justification: String,
}

/// Decision rules that are policy rather than invariant.
#[derive(Debug, Copy, Clone)]
pub struct DecisionPolicy {
    /// Whether a manager may decide a request they submitted themselves.
    pub allow_self_decision: bool,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            allow_self_decision: true,
        }
    }
}

pub struct LifecycleEngine {
    store: Arc<dyn RequestStore>,
    catalog: Arc<dyn CategoryCatalog>,
    policy: DecisionPolicy,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::NotPending => ApiError::InvalidState,
        }
    }
}

impl LifecycleEngine {
    pub fn new(
        store: Arc<dyn RequestStore>,
        catalog: Arc<dyn CategoryCatalog>,
        policy: DecisionPolicy,
    ) -> Self {
        Self {
            store,
            catalog,
            policy,
        }
    }

    async fn validate(&self, input: &RequestInput) -> Result<(), ApiError> {
        if input.start_date > input.end_date {
            return Err(ApiError::validation("start_date cannot be after end_date"));
        }
        if input.justification.trim().is_empty() {
            return Err(ApiError::validation("justification must not be empty"));
        }
        if !self.catalog.exists(input.category_id).await {
            return Err(ApiError::validation("unknown category"));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        caller: &AuthUser,
        input: RequestInput,
    ) -> Result<LeaveRequest, ApiError> {
        if caller.role != Role::Employee {
            return Err(ApiError::Forbidden);
        }
        self.validate(&input).await?;

        let request = LeaveRequest {
            id: Uuid::new_v4(),
            owner_id: caller.user_id,
            category_id: input.category_id,
            start_date: input.start_date,
            end_date: input.end_date,
            justification: input.justification,
            state: RequestState::Pending,
            submitted_at: Utc::now(),
            decision: None,
        };
        self.store.insert(request.clone()).await;

        info!(request_id = %request.id, owner = %caller.user_id, "leave request created");
        Ok(request)
    }

    /// Guard order is fixed: existence, then ownership, then state. A caller
    /// probing a request that does not exist always sees `NotFound`; one
    /// probing someone else's existing request sees `Forbidden` before any
    /// state information leaks.
    pub async fn edit(
        &self,
        caller: &AuthUser,
        id: Uuid,
        input: RequestInput,
    ) -> Result<LeaveRequest, ApiError> {
        let existing = self.store.get(id).await.ok_or(ApiError::NotFound)?;
        if existing.owner_id != caller.user_id {
            return Err(ApiError::Forbidden);
        }
        if !existing.state.is_pending() {
            return Err(ApiError::InvalidState);
        }
        self.validate(&input).await?;

        let patch = RequestPatch {
            category_id: input.category_id,
            start_date: input.start_date,
            end_date: input.end_date,
            justification: input.justification,
        };
        let updated = self.store.update_if_pending(id, patch).await?;

        info!(request_id = %id, owner = %caller.user_id, "leave request updated");
        Ok(updated)
    }

    pub async fn delete(&self, caller: &AuthUser, id: Uuid) -> Result<(), ApiError> {
        let existing = self.store.get(id).await.ok_or(ApiError::NotFound)?;
        if existing.owner_id != caller.user_id {
            return Err(ApiError::Forbidden);
        }
        if !existing.state.is_pending() {
            return Err(ApiError::InvalidState);
        }
        self.store.delete_if_pending(id).await?;

        info!(request_id = %id, owner = %caller.user_id, "leave request deleted");
        Ok(())
    }

    pub async fn decide(
        &self,
        caller: &AuthUser,
        id: Uuid,
        kind: DecisionKind,
    ) -> Result<LeaveRequest, ApiError> {
        let existing = self.store.get(id).await.ok_or(ApiError::NotFound)?;
        if !caller.is_manager() {
            return Err(ApiError::Forbidden);
        }
        if !self.policy.allow_self_decision && existing.owner_id == caller.user_id {
            return Err(ApiError::Forbidden);
        }
        if !existing.state.is_pending() {
            return Err(ApiError::InvalidState);
        }

        let decision = Decision {
            decided_at: Utc::now(),
            decider_id: caller.user_id,
        };
        // The conditional write settles concurrent decisions: the loser of a
        // race that passed the guards above gets NotPending here.
        let decided = self
            .store
            .decide_if_pending(id, kind.terminal_state(), decision)
            .await?;

        info!(
            request_id = %id,
            decider = %caller.user_id,
            state = %decided.state,
            "leave request decided"
        );
        Ok(decided)
    }

    pub async fn get(&self, caller: &AuthUser, id: Uuid) -> Result<LeaveRequest, ApiError> {
        let request = self.store.get(id).await.ok_or(ApiError::NotFound)?;
        if !caller.is_manager() && request.owner_id != caller.user_id {
            return Err(ApiError::Forbidden);
        }
        Ok(request)
    }

    /// Managers see every request; employees see only their own.
    pub async fn list(&self, caller: &AuthUser) -> Vec<LeaveRequest> {
        if caller.is_manager() {
            self.store.list_all().await
        } else {
            self.store.list_by_owner(caller.user_id).await
        }
    }
}
