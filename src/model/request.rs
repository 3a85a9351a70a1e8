use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of a leave request. `Pending` is the only state that
/// permits mutation; `Approved` and `Rejected` are terminal.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum RequestState {
    Pending,
    Approved,
    Rejected,
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        *self == RequestState::Pending
    }
}

/// The outcome requested by a manager on a pending request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum DecisionKind {
    Approve,
    Reject,
}

impl DecisionKind {
    pub fn terminal_state(&self) -> RequestState {
        match self {
            DecisionKind::Approve => RequestState::Approved,
            DecisionKind::Reject => RequestState::Rejected,
        }
    }
}

/// Decision metadata, set exactly once when a request leaves `Pending`.
/// Kept as a single struct so a terminal request can never carry a
/// timestamp without a decider or vice versa.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Decision {
    pub decided_at: DateTime<Utc>,
    pub decider_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Uuid,
    /// Submitting employee; fixed at creation.
    pub owner_id: Uuid,
    pub category_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub justification: String,
    pub state: RequestState,
    pub submitted_at: DateTime<Utc>,
    /// `None` while `Pending`, `Some` once terminal.
    pub decision: Option<Decision>,
}
