//! Create-or-edit workflow for a single catalog entity.
//!
//! The workflow is a value: [`transition`] takes the current [`EditorState`]
//! by ownership together with an [`EditorEvent`] and returns the next state
//! plus the [`Effect`]s that have to be performed. Nothing in this module
//! touches the network; `services::editor` runs the effects and feeds their
//! outcome back in as events.

use std::fmt::Debug;

use thiserror::Error;

use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::types::{CategoryId, ImageUrl, PriceText, ProductId};
use crate::domain::upload::SelectedFile;

pub const UPLOAD_FAILED_ALERT: &str = "Failed to upload image. Please try again.";

/// Entity that can be edited through the workflow.
pub trait Editable: Clone + Debug + Send + Sync + 'static {
    type Id: Clone + Debug + PartialEq + Send + Sync;
    type Fields: Clone + Debug + PartialEq + Send + Sync;

    /// Lower-case label used in user-facing messages.
    const LABEL: &'static str;

    fn id(&self) -> &Self::Id;
    fn image_url(&self) -> &ImageUrl;
    fn fields(&self) -> Self::Fields;
    fn name(fields: &Self::Fields) -> &str;
}

/// Editable text fields of a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: String,
}

/// Editable text fields of a product. Prices stay free text until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub actual_price: PriceText,
    pub discounted_price: PriceText,
    pub category_id: CategoryId,
}

impl ProductFields {
    /// Blank fields for a new product in `category_id`.
    pub fn for_category(category_id: CategoryId) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            actual_price: PriceText::default(),
            discounted_price: PriceText::default(),
            category_id,
        }
    }
}

impl Editable for Category {
    type Id = CategoryId;
    type Fields = CategoryFields;

    const LABEL: &'static str = "category";

    fn id(&self) -> &CategoryId {
        &self.id
    }

    fn image_url(&self) -> &ImageUrl {
        &self.image_url
    }

    fn fields(&self) -> CategoryFields {
        CategoryFields {
            name: self.name.as_str().to_string(),
        }
    }

    fn name(fields: &CategoryFields) -> &str {
        &fields.name
    }
}

impl Editable for Product {
    type Id = ProductId;
    type Fields = ProductFields;

    const LABEL: &'static str = "product";

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn image_url(&self) -> &ImageUrl {
        &self.image_url
    }

    fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.as_str().to_string(),
            description: self.description.clone(),
            actual_price: self.actual_price.clone(),
            discounted_price: self.discounted_price.clone(),
            category_id: self.category_id.clone(),
        }
    }

    fn name(fields: &ProductFields) -> &str {
        &fields.name
    }
}

/// Existing entity a draft is editing.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTarget<Id> {
    pub id: Id,
    pub image_url: ImageUrl,
}

/// Submission precondition failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EditorValidationError {
    #[error("name is required")]
    EmptyName,
    #[error("an image is required")]
    MissingImage,
}

/// In-progress form state of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<E: Editable> {
    pub target: Option<EditTarget<E::Id>>,
    pub fields: E::Fields,
    pub file: Option<SelectedFile>,
    pub preview: Option<String>,
}

impl<E: Editable> Draft<E> {
    pub fn new(fields: E::Fields) -> Self {
        Self {
            target: None,
            fields,
            file: None,
            preview: None,
        }
    }

    pub fn from_entity(entity: &E) -> Self {
        Self {
            target: Some(EditTarget {
                id: entity.id().clone(),
                image_url: entity.image_url().clone(),
            }),
            fields: entity.fields(),
            file: None,
            preview: Some(entity.image_url().as_str().to_string()),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    /// Checks that the draft may be submitted: a name and an image source.
    pub fn validate(&self) -> Result<(), EditorValidationError> {
        if E::name(&self.fields).is_empty() {
            return Err(EditorValidationError::EmptyName);
        }
        if self.file.is_none() && self.target.is_none() {
            return Err(EditorValidationError::MissingImage);
        }
        Ok(())
    }
}

/// Create or update request produced once the image URL is final.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest<E: Editable> {
    pub target: Option<E::Id>,
    pub fields: E::Fields,
    pub image_url: ImageUrl,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState<E: Editable> {
    Idle,
    Editing(Draft<E>),
    Uploading(Draft<E>),
    Submitting { draft: Draft<E>, image_url: ImageUrl },
}

impl<E: Editable> EditorState<E> {
    pub fn draft(&self) -> Option<&Draft<E>> {
        match self {
            Self::Idle => None,
            Self::Editing(draft) | Self::Uploading(draft) => Some(draft),
            Self::Submitting { draft, .. } => Some(draft),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent<E: Editable> {
    Create(E::Fields),
    Edit(E),
    UpdateFields(E::Fields),
    SelectFile(SelectedFile),
    Submit,
    UploadSucceeded(ImageUrl),
    UploadFailed(String),
    SaveSucceeded,
    SaveFailed(String),
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect<E: Editable> {
    UploadImage(SelectedFile),
    Save(SaveRequest<E>),
    Delete(E::Id),
    Reload,
    Alert(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition<E: Editable> {
    pub state: EditorState<E>,
    pub effects: Vec<Effect<E>>,
}

impl<E: Editable> Transition<E> {
    fn to(state: EditorState<E>) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: EditorState<E>, effect: Effect<E>) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

pub fn save_failed_alert<E: Editable>() -> String {
    format!("Failed to save {}. Please try again.", E::LABEL)
}

pub fn delete_failed_alert<E: Editable>() -> String {
    format!("Failed to delete {}. Please try again.", E::LABEL)
}

/// Computes the next state of an editing session.
pub fn transition<E: Editable>(state: EditorState<E>, event: EditorEvent<E>) -> Transition<E> {
    use EditorEvent as Ev;
    use EditorState as St;

    match (state, event) {
        (St::Idle, Ev::Create(fields)) => Transition::to(St::Editing(Draft::new(fields))),
        (St::Idle, Ev::Edit(entity)) => Transition::to(St::Editing(Draft::from_entity(&entity))),

        (St::Editing(mut draft), Ev::UpdateFields(fields)) => {
            draft.fields = fields;
            Transition::to(St::Editing(draft))
        }
        (St::Editing(mut draft), Ev::SelectFile(file)) => {
            draft.preview = Some(file.preview_data_url());
            draft.file = Some(file);
            Transition::to(St::Editing(draft))
        }
        (St::Editing(draft), Ev::Submit) => {
            if let Err(e) = draft.validate() {
                log::debug!("Submission blocked: {e}");
                return Transition::to(St::Editing(draft));
            }
            if let Some(file) = draft.file.clone() {
                return Transition::with(St::Uploading(draft), Effect::UploadImage(file));
            }
            match draft.target.as_ref().map(|t| t.image_url.clone()) {
                Some(image_url) => submit(draft, image_url),
                // Rejected by `validate` above.
                None => Transition::to(St::Editing(draft)),
            }
        }
        (St::Editing(_), Ev::Cancel) => Transition::to(St::Idle),

        (St::Uploading(draft), Ev::UploadSucceeded(image_url)) => submit(draft, image_url),
        (St::Uploading(draft), Ev::UploadFailed(message)) => {
            log::error!("Image upload error: {message}");
            Transition::with(
                St::Editing(draft),
                Effect::Alert(UPLOAD_FAILED_ALERT.to_string()),
            )
        }

        (St::Submitting { .. }, Ev::SaveSucceeded) => Transition::with(St::Idle, Effect::Reload),
        (St::Submitting { draft, .. }, Ev::SaveFailed(message)) => {
            log::error!("Error creating/updating {}: {message}", E::LABEL);
            Transition::with(
                St::Editing(draft),
                Effect::Alert(save_failed_alert::<E>()),
            )
        }

        (state, event) => {
            log::debug!("Ignoring {event:?} while {}", state_name(&state));
            Transition::to(state)
        }
    }
}

fn submit<E: Editable>(draft: Draft<E>, image_url: ImageUrl) -> Transition<E> {
    let request = SaveRequest {
        target: draft.target.as_ref().map(|t| t.id.clone()),
        fields: draft.fields.clone(),
        image_url: image_url.clone(),
    };
    Transition::with(
        EditorState::Submitting { draft, image_url },
        Effect::Save(request),
    )
}

fn state_name<E: Editable>(state: &EditorState<E>) -> &'static str {
    match state {
        EditorState::Idle => "idle",
        EditorState::Editing(_) => "editing",
        EditorState::Uploading(_) => "uploading",
        EditorState::Submitting { .. } => "submitting",
    }
}

/// Effects of a delete action. Nothing happens unless the user confirmed.
pub fn delete_effects<E: Editable>(id: E::Id, confirmed: bool) -> Vec<Effect<E>> {
    if confirmed {
        vec![Effect::Delete(id)]
    } else {
        Vec::new()
    }
}
