use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Leave category as served by the catalog. Referential integrity is checked
/// only when a request is submitted; requests keep their `category_id` even
/// if the category disappears later.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    #[schema(example = "Annual leave")]
    pub label: String,
}
