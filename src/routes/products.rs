use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::product::Product;
use crate::domain::types::{CategoryId, ProductId};
use crate::dto::categories::CategoryDto;
use crate::dto::editor::DraftDto;
use crate::dto::products::ProductDto;
use crate::editor::{EditorEvent, EditorState, ProductFields, delete_failed_alert, transition};
use crate::forms::delete::{DeleteForm, DeleteFormPayload};
use crate::forms::products::{ProductFormPayload, ProductUploadForm};
use crate::repository::http::HttpCatalogStore;
use crate::repository::imgbb::ImgbbImageHost;
use crate::routes::{ListQuery, base_context, editor_alerts, redirect, render_template};
use crate::services::catalog::{CategoryCatalog, ProductCatalog};
use crate::services::editor::{self, DeleteOutcome};
use crate::views::ProductSearch;

fn products_url(category_id: &str) -> String {
    format!("/admin/categories/{category_id}")
}

async fn load_category(store: &HttpCatalogStore, category_id: &CategoryId) -> Option<CategoryDto> {
    let mut categories = CategoryCatalog::new(store);
    categories.load().await;
    categories.find(category_id).map(CategoryDto::from)
}

async fn render_products(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    catalog: &ProductCatalog<'_, HttpCatalogStore>,
    query: &str,
    state: &EditorState<Product>,
    errors: &[String],
) -> HttpResponse {
    let category = load_category(catalog.repo(), catalog.category_id()).await;
    let products = catalog
        .search(query, ProductSearch::Name)
        .into_iter()
        .map(ProductDto::for_admin)
        .collect::<Vec<_>>();

    let mut context = base_context(flash_messages, errors, "admin");
    context.insert("category_id", catalog.category_id().as_str());
    context.insert("category", &category);
    context.insert("products", &products);
    context.insert("query", query);
    context.insert("draft", &DraftDto::product(state));
    render_template(tera, "admin/products.html", &context)
}

async fn submit_product(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    mut catalog: ProductCatalog<'_, HttpCatalogStore>,
    images: &ImgbbImageHost,
    events: Vec<EditorEvent<Product>>,
) -> HttpResponse {
    let run = editor::run(EditorState::Idle, events, &mut catalog, images).await;
    if run.is_done() {
        FlashMessage::success("Product saved.").send();
        return redirect(&products_url(catalog.category_id()));
    }
    let errors = editor_alerts(&run);
    if catalog.products().is_empty() {
        catalog.load().await;
    }
    render_products(tera, flash_messages, &catalog, "", &run.state, &errors).await
}

#[get("/admin/categories/{category_id}")]
pub async fn show_products(
    category_id: web::Path<String>,
    params: web::Query<ListQuery>,
    flash_messages: IncomingFlashMessages,
    store: web::Data<HttpCatalogStore>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category_id = match CategoryId::new(category_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let mut catalog = ProductCatalog::new(store.get_ref(), category_id.clone());
    catalog.load().await;

    let mut state = EditorState::Idle;
    if params.new.is_some() {
        let fields = ProductFields::for_category(category_id.clone());
        state = transition(state, EditorEvent::Create(fields)).state;
    } else if let Some(id) = params.edit.as_deref() {
        match ProductId::new(id).ok().and_then(|id| catalog.find(&id).cloned()) {
            Some(product) => state = transition(state, EditorEvent::Edit(product)).state,
            None => {
                FlashMessage::error("Product not found.").send();
                return redirect(&products_url(&category_id));
            }
        }
    }

    render_products(
        &tera,
        &flash_messages,
        &catalog,
        params.query(),
        &state,
        &[],
    )
    .await
}

#[post("/admin/categories/{category_id}/products")]
pub async fn create_product(
    category_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    store: web::Data<HttpCatalogStore>,
    images: web::Data<ImgbbImageHost>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<ProductUploadForm>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    let (fields, image) = match ProductFormPayload::try_from(form)
        .and_then(|payload| Ok((payload.fields(&category_id)?, payload.image)))
    {
        Ok(fields) => fields,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&format!("{}?new=1", products_url(&category_id)));
        }
    };

    let mut events = vec![EditorEvent::Create(fields.clone())];
    if let Some(file) = image {
        events.push(EditorEvent::SelectFile(file));
    }
    events.push(EditorEvent::Submit);

    let catalog = ProductCatalog::new(store.get_ref(), fields.category_id);
    submit_product(&tera, &flash_messages, catalog, images.get_ref(), events).await
}

#[post("/admin/categories/{category_id}/products/{product_id}/update")]
pub async fn update_product(
    path: web::Path<(String, String)>,
    flash_messages: IncomingFlashMessages,
    store: web::Data<HttpCatalogStore>,
    images: web::Data<ImgbbImageHost>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<ProductUploadForm>,
) -> impl Responder {
    let (category_id, product_id) = path.into_inner();
    let list_url = products_url(&category_id);
    let (fields, image) = match ProductFormPayload::try_from(form)
        .and_then(|payload| Ok((payload.fields(&category_id)?, payload.image)))
    {
        Ok(fields) => fields,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&format!("{list_url}?edit={product_id}"));
        }
    };

    let mut catalog = ProductCatalog::new(store.get_ref(), fields.category_id.clone());
    catalog.load().await;
    let product = match ProductId::new(product_id)
        .ok()
        .and_then(|id| catalog.find(&id).cloned())
    {
        Some(product) => product,
        None => {
            FlashMessage::error("Product not found.").send();
            return redirect(&list_url);
        }
    };

    let mut events = vec![EditorEvent::Edit(product), EditorEvent::UpdateFields(fields)];
    if let Some(file) = image {
        events.push(EditorEvent::SelectFile(file));
    }
    events.push(EditorEvent::Submit);

    submit_product(&tera, &flash_messages, catalog, images.get_ref(), events).await
}

#[post("/admin/categories/{category_id}/products/{product_id}/delete")]
pub async fn delete_product(
    path: web::Path<(String, String)>,
    store: web::Data<HttpCatalogStore>,
    web::Form(form): web::Form<DeleteForm>,
) -> impl Responder {
    let (category_id, product_id) = path.into_inner();
    let list_url = products_url(&category_id);
    let payload: DeleteFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&list_url);
        }
    };
    let (category_id, product_id) =
        match (CategoryId::new(category_id), ProductId::new(product_id)) {
            (Ok(category_id), Ok(product_id)) => (category_id, product_id),
            (Err(e), _) | (_, Err(e)) => {
                FlashMessage::error(e.to_string()).send();
                return redirect(&list_url);
            }
        };

    let mut catalog = ProductCatalog::new(store.get_ref(), category_id);
    match editor::delete::<Product, _>(&mut catalog, product_id, payload.confirmed).await {
        DeleteOutcome::Declined => FlashMessage::info("Product was not deleted.").send(),
        DeleteOutcome::Deleted => FlashMessage::success("Product deleted.").send(),
        DeleteOutcome::Failed(e) => {
            log::error!("Failed to delete product: {e}");
            FlashMessage::error(delete_failed_alert::<Product>()).send();
        }
    }

    redirect(&list_url)
}
