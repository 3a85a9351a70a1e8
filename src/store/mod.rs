//! Storage abstractions for the lifecycle engine and its collaborators.
//!
//! The traits here are implemented by backends (currently the in-memory
//! store in [`memory`]); the engine and handlers depend on the abstraction,
//! never on a concrete backend. None of the stores perform authorization —
//! the lifecycle engine has already run its guards by the time a mutator is
//! called.

mod memory;
pub mod seed;

pub use memory::{MemoryCatalog, MemoryDirectory, MemoryStore};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::{
    category::Category,
    request::{Decision, LeaveRequest, RequestState},
    user::UserRecord,
};

/// Failure modes of conditional mutations.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StoreError {
    /// No request with the given id.
    NotFound,
    /// The request exists but is no longer `Pending`; the caller lost the
    /// race or is retrying a decided request.
    NotPending,
}

/// Field replacement applied by an edit. The owner, state, and timestamps
/// are never part of a patch.
#[derive(Debug, Clone)]
pub struct RequestPatch {
    pub category_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub justification: String,
}

/// Persistence for [`LeaveRequest`] entities.
///
/// The three `*_if_pending` mutators are conditional writes: each checks the
/// record is still `Pending` and applies the change as one indivisible
/// operation, so two concurrent decisions on the same request produce
/// exactly one winner.
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn insert(&self, request: LeaveRequest);

    async fn get(&self, id: Uuid) -> Option<LeaveRequest>;

    /// Every request regardless of owner, most recent submission first.
    async fn list_all(&self) -> Vec<LeaveRequest>;

    /// Requests submitted by `owner_id`, most recent submission first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Vec<LeaveRequest>;

    async fn update_if_pending(
        &self,
        id: Uuid,
        patch: RequestPatch,
    ) -> Result<LeaveRequest, StoreError>;

    /// Moves the request to `state` and records the decision metadata in the
    /// same write.
    async fn decide_if_pending(
        &self,
        id: Uuid,
        state: RequestState,
        decision: Decision,
    ) -> Result<LeaveRequest, StoreError>;

    async fn delete_if_pending(&self, id: Uuid) -> Result<(), StoreError>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DirectoryError {
    UsernameTaken,
}

/// The user directory backing both login and display-name resolution.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Option<UserRecord>;

    async fn find_by_username(&self, username: &str) -> Option<UserRecord>;

    /// Registers a new account; usernames are unique case-insensitively.
    async fn insert(&self, user: UserRecord) -> Result<(), DirectoryError>;
}

/// Read-only passthrough over the permitted leave categories.
#[async_trait]
pub trait CategoryCatalog: Send + Sync {
    async fn list(&self) -> Vec<Category>;

    async fn exists(&self, id: Uuid) -> bool;
}
