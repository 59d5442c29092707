use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::content::entities::BoxItem;

/// Search hits exactly as upstream returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResults {
    pub entries: Vec<BoxItem>,
    pub total_count: u64,
    pub limit: u32,
    pub offset: u32,
}
