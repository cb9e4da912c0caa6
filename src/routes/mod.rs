use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::editor::Editable;
use crate::services::editor::EditorRun;

pub mod categories;
pub mod products;
pub mod storefront;

/// Query string shared by the listing pages.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive search text.
    pub q: Option<String>,
    /// Opens the editor for a new entity.
    pub new: Option<String>,
    /// Opens the editor for the entity with this id.
    pub edit: Option<String>,
}

impl ListQuery {
    /// Search text as typed. Surrounding spaces are part of the match.
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Template context with flash alerts followed by `errors` raised while
/// handling the current request.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    errors: &[String],
    current_page: &str,
) -> Context {
    let mut alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();
    alerts.extend(errors.iter().map(|e| (e.clone(), "danger")));

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Alerts to show after an editor run that did not finish. A submission
/// blocked by its precondition raises no alert of its own.
pub fn editor_alerts<E: Editable>(run: &EditorRun<E>) -> Vec<String> {
    if !run.alerts.is_empty() {
        return run.alerts.clone();
    }
    match run.state.draft().map(|draft| draft.validate()) {
        Some(Err(e)) => vec![format!("Cannot save {}: {e}.", E::LABEL)],
        _ => Vec::new(),
    }
}

/// Registers every catalog route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(storefront::index)
        .service(storefront::show_category)
        .service(categories::show_categories)
        .service(categories::create_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(products::show_products)
        .service(products::create_product)
        .service(products::update_product)
        .service(products::delete_product);
}
