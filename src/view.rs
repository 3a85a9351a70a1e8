//! Read-side enrichment: joins a request with its submitter's display name.
//! Owner lookups go through the user directory and are memoized in a moka
//! cache owned by the composer.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use moka::future::Cache;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::request::{LeaveRequest, RequestState};
use crate::store::UserDirectory;

/// Shown when the owner record no longer exists; a deleted account must not
/// break listing.
pub const UNKNOWN_USER: &str = "Unknown User";

/// A request as presented to callers: entity fields plus the submitter's
/// display name, with the decision metadata flattened.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestView {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[schema(example = "Anna Rossi")]
    pub submitted_by: String,
    pub category_id: Uuid,
    #[schema(example = "2026-09-07", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2026-09-11", value_type = String, format = "date")]
    pub end_date: NaiveDate,
    #[schema(example = "moving house")]
    pub justification: String,
    pub state: RequestState,
    #[schema(value_type = String, format = "date-time")]
    pub submitted_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub decided_at: Option<DateTime<Utc>>,
    pub decider_id: Option<Uuid>,
}

pub struct ViewComposer {
    directory: Arc<dyn UserDirectory>,
    names: Cache<Uuid, String>,
}

impl ViewComposer {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            directory,
            names: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(Duration::from_secs(300))
                .build(),
        }
    }

    pub async fn enrich(&self, request: LeaveRequest) -> RequestView {
        let submitted_by = self.display_name(request.owner_id).await;
        RequestView {
            id: request.id,
            owner_id: request.owner_id,
            submitted_by,
            category_id: request.category_id,
            start_date: request.start_date,
            end_date: request.end_date,
            justification: request.justification,
            state: request.state,
            submitted_at: request.submitted_at,
            decided_at: request.decision.map(|d| d.decided_at),
            decider_id: request.decision.map(|d| d.decider_id),
        }
    }

    pub async fn enrich_all(&self, requests: Vec<LeaveRequest>) -> Vec<RequestView> {
        let mut views = Vec::with_capacity(requests.len());
        for request in requests {
            views.push(self.enrich(request).await);
        }
        views
    }

    async fn display_name(&self, owner_id: Uuid) -> String {
        if let Some(name) = self.names.get(&owner_id).await {
            return name;
        }
        match self.directory.find_by_id(owner_id).await {
            Some(user) => {
                self.names
                    .insert(owner_id, user.display_name.clone())
                    .await;
                user.display_name
            }
            // not cached: the account may appear later
            None => UNKNOWN_USER.to_string(),
        }
    }
}
