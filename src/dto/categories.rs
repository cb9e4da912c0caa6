use serde::Serialize;

use crate::domain::category::Category;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub created_at: Option<String>,
}

impl From<&Category> for CategoryDto {
    fn from(value: &Category) -> Self {
        Self {
            id: value.id.as_str().to_string(),
            name: value.name.as_str().to_string(),
            image_url: value.image_url.as_str().to_string(),
            created_at: value.created_at.map(|t| t.format("%d %b %Y").to_string()),
        }
    }
}
