use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::dto::products::ProductDto;
use crate::models::config::ServerConfig;
use crate::repository::http::HttpCatalogStore;
use crate::routes::{ListQuery, base_context, redirect, render_template};
use crate::services::catalog::{CategoryCatalog, ProductCatalog};
use crate::views::ProductSearch;

#[get("/")]
pub async fn index(
    params: web::Query<ListQuery>,
    flash_messages: IncomingFlashMessages,
    store: web::Data<HttpCatalogStore>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut catalog = CategoryCatalog::new(store.get_ref());
    catalog.load().await;

    let query = params.query();
    let categories = catalog
        .search(query)
        .into_iter()
        .map(CategoryDto::from)
        .collect::<Vec<_>>();

    let mut context = base_context(&flash_messages, &[], "store");
    context.insert("categories", &categories);
    context.insert("query", query);
    render_template(&tera, "store/index.html", &context)
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    category_id: web::Path<String>,
    params: web::Query<ListQuery>,
    flash_messages: IncomingFlashMessages,
    store: web::Data<HttpCatalogStore>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category_id = match CategoryId::new(category_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let mut categories = CategoryCatalog::new(store.get_ref());
    let loaded = categories.load().await;
    let category = categories.find(&category_id).map(CategoryDto::from);
    if loaded && category.is_none() {
        FlashMessage::error("Category not found.").send();
        return redirect("/");
    }

    let mut catalog = ProductCatalog::new(store.get_ref(), category_id);
    catalog.load().await;

    let query = params.query();
    let products = catalog
        .search(query, ProductSearch::NameOrDescription)
        .into_iter()
        .map(|p| ProductDto::for_storefront(p, &server_config.order_phone))
        .collect::<Vec<_>>();

    let mut context = base_context(&flash_messages, &[], "store");
    context.insert("category", &category);
    context.insert("products", &products);
    context.insert("query", query);
    render_template(&tera, "store/products.html", &context)
}
