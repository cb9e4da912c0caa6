use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, ImageUrl};

/// Category record as served by the remote catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub image_url: ImageUrl,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body sent to the store when creating or updating a [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: CategoryName,
    pub image_url: ImageUrl,
}
