//! Category Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<String>,
    /// Display label; menu items reference categories by this name
    pub name: String,
    /// Sort key for menu display
    pub display_order: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryCreate {
    #[validate(length(min = 1))]
    pub name: String,
    pub display_order: Option<i32>,
}
