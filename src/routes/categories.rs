use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::dto::editor::DraftDto;
use crate::editor::{CategoryFields, EditorEvent, EditorState, delete_failed_alert, transition};
use crate::forms::categories::{CategoryFormPayload, CategoryUploadForm};
use crate::forms::delete::{DeleteForm, DeleteFormPayload};
use crate::repository::http::HttpCatalogStore;
use crate::repository::imgbb::ImgbbImageHost;
use crate::routes::{ListQuery, base_context, editor_alerts, redirect, render_template};
use crate::services::catalog::CategoryCatalog;
use crate::services::editor::{self, DeleteOutcome};

fn render_categories(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    catalog: &CategoryCatalog<'_, HttpCatalogStore>,
    query: &str,
    state: &EditorState<Category>,
    errors: &[String],
) -> HttpResponse {
    let categories = catalog
        .search(query)
        .into_iter()
        .map(CategoryDto::from)
        .collect::<Vec<_>>();

    let mut context = base_context(flash_messages, errors, "admin");
    context.insert("categories", &categories);
    context.insert("query", query);
    context.insert("draft", &DraftDto::category(state));
    render_template(tera, "admin/categories.html", &context)
}

/// Runs the editor for `events` and either redirects back to the list or
/// re-renders it with the draft and the alerts raised.
async fn submit_category(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    mut catalog: CategoryCatalog<'_, HttpCatalogStore>,
    images: &ImgbbImageHost,
    events: Vec<EditorEvent<Category>>,
) -> HttpResponse {
    let run = editor::run(EditorState::Idle, events, &mut catalog, images).await;
    if run.is_done() {
        FlashMessage::success("Category saved.").send();
        return redirect("/admin");
    }
    let errors = editor_alerts(&run);
    if catalog.categories().is_empty() {
        catalog.load().await;
    }
    render_categories(tera, flash_messages, &catalog, "", &run.state, &errors)
}

#[get("/admin")]
pub async fn show_categories(
    params: web::Query<ListQuery>,
    flash_messages: IncomingFlashMessages,
    store: web::Data<HttpCatalogStore>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut catalog = CategoryCatalog::new(store.get_ref());
    catalog.load().await;

    let mut state = EditorState::Idle;
    if params.new.is_some() {
        state = transition(state, EditorEvent::Create(CategoryFields::default())).state;
    } else if let Some(id) = params.edit.as_deref() {
        match CategoryId::new(id).ok().and_then(|id| catalog.find(&id).cloned()) {
            Some(category) => state = transition(state, EditorEvent::Edit(category)).state,
            None => {
                FlashMessage::error("Category not found.").send();
                return redirect("/admin");
            }
        }
    }

    render_categories(
        &tera,
        &flash_messages,
        &catalog,
        params.query(),
        &state,
        &[],
    )
}

#[post("/admin/categories")]
pub async fn create_category(
    flash_messages: IncomingFlashMessages,
    store: web::Data<HttpCatalogStore>,
    images: web::Data<ImgbbImageHost>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<CategoryUploadForm>,
) -> impl Responder {
    let payload: CategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/admin?new=1");
        }
    };

    let mut events = vec![EditorEvent::Create(payload.fields)];
    if let Some(file) = payload.image {
        events.push(EditorEvent::SelectFile(file));
    }
    events.push(EditorEvent::Submit);

    let catalog = CategoryCatalog::new(store.get_ref());
    submit_category(&tera, &flash_messages, catalog, images.get_ref(), events).await
}

#[post("/admin/categories/{category_id}/update")]
pub async fn update_category(
    category_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    store: web::Data<HttpCatalogStore>,
    images: web::Data<ImgbbImageHost>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<CategoryUploadForm>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    let payload: CategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&format!("/admin?edit={category_id}"));
        }
    };

    let mut catalog = CategoryCatalog::new(store.get_ref());
    catalog.load().await;
    let category = match CategoryId::new(category_id)
        .ok()
        .and_then(|id| catalog.find(&id).cloned())
    {
        Some(category) => category,
        None => {
            FlashMessage::error("Category not found.").send();
            return redirect("/admin");
        }
    };

    let mut events = vec![
        EditorEvent::Edit(category),
        EditorEvent::UpdateFields(payload.fields),
    ];
    if let Some(file) = payload.image {
        events.push(EditorEvent::SelectFile(file));
    }
    events.push(EditorEvent::Submit);

    submit_category(&tera, &flash_messages, catalog, images.get_ref(), events).await
}

#[post("/admin/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<String>,
    store: web::Data<HttpCatalogStore>,
    web::Form(form): web::Form<DeleteForm>,
) -> impl Responder {
    let payload: DeleteFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/admin");
        }
    };
    let category_id = match CategoryId::new(category_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/admin");
        }
    };

    let mut catalog = CategoryCatalog::new(store.get_ref());
    match editor::delete::<Category, _>(&mut catalog, category_id, payload.confirmed).await {
        DeleteOutcome::Declined => FlashMessage::info("Category was not deleted.").send(),
        DeleteOutcome::Deleted => FlashMessage::success("Category deleted.").send(),
        DeleteOutcome::Failed(e) => {
            log::error!("Failed to delete category: {e}");
            FlashMessage::error(delete_failed_alert::<Category>()).send();
        }
    }

    redirect("/admin")
}
