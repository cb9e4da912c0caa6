//! Runs editor sessions against the remote catalog and the image host.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryName, ProductName};
use crate::editor::{
    Editable, EditorEvent, EditorState, Effect, SaveRequest, delete_effects, delete_failed_alert,
    transition,
};
use crate::repository::{CategoryReader, CategoryWriter, ImageHost, ProductReader, ProductWriter};

use super::ServiceResult;
use super::catalog::{CategoryCatalog, ProductCatalog};

/// Persistence side of an editor session.
#[async_trait]
pub trait EditorBackend<E: Editable>: Send {
    /// Create or update, without reloading.
    async fn save(&mut self, request: &SaveRequest<E>) -> ServiceResult<()>;
    /// Delete, without reloading.
    async fn remove(&mut self, id: &E::Id) -> ServiceResult<()>;
    /// Re-read the authoritative collection.
    async fn reload(&mut self);
}

/// Final state of a session run plus the alerts raised along the way.
#[derive(Debug)]
pub struct EditorRun<E: Editable> {
    pub state: EditorState<E>,
    pub alerts: Vec<String>,
}

impl<E: Editable> EditorRun<E> {
    /// The session finished and the draft was discarded.
    pub fn is_done(&self) -> bool {
        matches!(self.state, EditorState::Idle)
    }
}

/// Outcome of a delete action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; nothing was sent.
    Declined,
    Deleted,
    Failed(String),
}

/// Feeds `events` through the editor, performing every effect it asks for
/// and feeding the results back in until nothing is left to do.
pub async fn run<E, B, H>(
    state: EditorState<E>,
    events: impl IntoIterator<Item = EditorEvent<E>>,
    backend: &mut B,
    images: &H,
) -> EditorRun<E>
where
    E: Editable,
    B: EditorBackend<E>,
    H: ImageHost + ?Sized,
{
    let mut queue: VecDeque<EditorEvent<E>> = events.into_iter().collect();
    let mut state = state;
    let mut alerts = Vec::new();

    while let Some(event) = queue.pop_front() {
        let next = transition(state, event);
        state = next.state;
        for effect in next.effects {
            match effect {
                Effect::UploadImage(file) => match images.upload_image(&file).await {
                    Ok(url) => queue.push_back(EditorEvent::UploadSucceeded(url)),
                    Err(e) => queue.push_back(EditorEvent::UploadFailed(e.to_string())),
                },
                Effect::Save(request) => match backend.save(&request).await {
                    Ok(()) => queue.push_back(EditorEvent::SaveSucceeded),
                    Err(e) => queue.push_back(EditorEvent::SaveFailed(e.to_string())),
                },
                Effect::Delete(id) => {
                    if let DeleteOutcome::Failed(_) = perform_delete::<E, B>(backend, &id).await {
                        alerts.push(delete_failed_alert::<E>());
                    }
                }
                Effect::Reload => backend.reload().await,
                Effect::Alert(message) => alerts.push(message),
            }
        }
    }

    EditorRun { state, alerts }
}

/// Removes `id` and reloads on success.
async fn perform_delete<E, B>(backend: &mut B, id: &E::Id) -> DeleteOutcome
where
    E: Editable,
    B: EditorBackend<E>,
{
    match backend.remove(id).await {
        Ok(()) => {
            backend.reload().await;
            DeleteOutcome::Deleted
        }
        Err(e) => DeleteOutcome::Failed(e.to_string()),
    }
}

/// Deletes `id` when `confirmed`, then reloads on success.
pub async fn delete<E, B>(backend: &mut B, id: E::Id, confirmed: bool) -> DeleteOutcome
where
    E: Editable,
    B: EditorBackend<E>,
{
    let mut outcome = DeleteOutcome::Declined;
    for effect in delete_effects::<E>(id, confirmed) {
        if let Effect::Delete(id) = effect {
            outcome = perform_delete::<E, B>(backend, &id).await;
        }
    }
    outcome
}

#[async_trait]
impl<'a, R> EditorBackend<Category> for CategoryCatalog<'a, R>
where
    R: CategoryReader + CategoryWriter,
{
    async fn save(&mut self, request: &SaveRequest<Category>) -> ServiceResult<()> {
        let body = NewCategory {
            name: CategoryName::new(request.fields.name.clone())?,
            image_url: request.image_url.clone(),
        };
        match &request.target {
            Some(id) => self.update(id, &body).await,
            None => self.create(&body).await,
        }
    }

    async fn remove(&mut self, id: &<Category as Editable>::Id) -> ServiceResult<()> {
        self.delete(id).await
    }

    async fn reload(&mut self) {
        self.load().await;
    }
}

#[async_trait]
impl<'a, R> EditorBackend<Product> for ProductCatalog<'a, R>
where
    R: ProductReader + ProductWriter,
{
    async fn save(&mut self, request: &SaveRequest<Product>) -> ServiceResult<()> {
        let fields = &request.fields;
        let body = NewProduct {
            name: ProductName::new(fields.name.clone())?,
            description: fields.description.clone(),
            actual_price: fields.actual_price.as_integer(),
            discounted_price: fields.discounted_price.as_integer(),
            image_url: request.image_url.clone(),
            category_id: fields.category_id.clone(),
        };
        match &request.target {
            Some(id) => self.update(id, &body).await,
            None => self.create(&body).await,
        }
    }

    async fn remove(&mut self, id: &<Product as Editable>::Id) -> ServiceResult<()> {
        self.delete(id).await
    }

    async fn reload(&mut self) {
        self.load().await;
    }
}
