use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::editor::{Draft, EditorState};

/// Editor dialog contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DraftDto {
    /// Form target for submission.
    pub action: String,
    pub editing: bool,
    pub name: String,
    pub description: String,
    pub actual_price: String,
    pub discounted_price: String,
    pub preview: Option<String>,
}

impl DraftDto {
    pub fn category(state: &EditorState<Category>) -> Option<Self> {
        let draft: &Draft<Category> = state.draft()?;
        let action = match &draft.target {
            Some(target) => format!("/admin/categories/{}/update", target.id),
            None => "/admin/categories".to_string(),
        };
        Some(Self {
            action,
            editing: draft.is_edit(),
            name: draft.fields.name.clone(),
            preview: draft.preview.clone(),
            ..Self::default()
        })
    }

    pub fn product(state: &EditorState<Product>) -> Option<Self> {
        let draft: &Draft<Product> = state.draft()?;
        let fields = &draft.fields;
        let action = match &draft.target {
            Some(target) => format!(
                "/admin/categories/{}/products/{}/update",
                fields.category_id, target.id
            ),
            None => format!("/admin/categories/{}/products", fields.category_id),
        };
        Some(Self {
            action,
            editing: draft.is_edit(),
            name: fields.name.clone(),
            description: fields.description.clone(),
            actual_price: fields.actual_price.as_str().to_string(),
            discounted_price: fields.discounted_price.as_str().to_string(),
            preview: draft.preview.clone(),
        })
    }
}
