#![cfg(feature = "server")]

use actix_web::body::MessageBody;
use actix_web::cookie::Key;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use mohar_catalog::models::config::ServerConfig;
use mohar_catalog::repository::http::HttpCatalogStore;
use mohar_catalog::repository::imgbb::ImgbbImageHost;
use mohar_catalog::routes::configure;
use serde_json::json;
use tera::Tera;

mod common;

fn server_config(server: &common::TestServer) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        api_base_url: server.base_url.clone(),
        image_upload_url: server.upload_url(),
        image_api_key: "test-key".to_string(),
        order_phone: "919382884078".to_string(),
        templates_dir: "templates".to_string(),
        assets_dir: "assets".to_string(),
        secret: "0123456789abcdef0123456789abcdef".to_string(),
    }
}

macro_rules! app {
    ($server:expr) => {{
        let config = server_config(&$server);
        let client = reqwest::Client::new();
        let tera = Tera::new(&config.templates_glob()).expect("templates should parse");
        let store = HttpCatalogStore::new(client.clone(), &config.api_base_url);
        let images = ImgbbImageHost::new(client, &config.image_upload_url, &config.image_api_key);
        let message_store = CookieMessageStore::builder(Key::generate()).build();
        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(message_store).build())
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new(store))
                .app_data(web::Data::new(images))
                .app_data(web::Data::new(config))
                .configure(configure),
        )
        .await
    }};
}

async fn body_of<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[actix_web::test]
async fn index_lists_matching_categories() {
    let server = common::seeded();
    let app = app!(server);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/?q=sar").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;

    assert!(body.contains("Sarees"));
    assert!(!body.contains("Kurtis"));
}

#[actix_web::test]
async fn category_page_links_orders_and_discounts() {
    let server = common::seeded();
    let app = app!(server);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/categories/c1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;

    assert!(body.contains("Banarasi Silk"));
    assert!(body.contains("Kanjivaram"));
    assert!(!body.contains("Cotton Kurti"));
    assert!(body.contains("https://wa.me/919382884078?text=I%20would%20like%20to%20order%20Banarasi%20Silk"));
    assert!(body.contains("25% off"));
}

#[actix_web::test]
async fn unknown_category_redirects_home() {
    let server = common::seeded();
    let app = app!(server);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/categories/c9").to_request()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/");
}

#[actix_web::test]
async fn admin_opens_editor_for_existing_category() {
    let server = common::seeded();
    let app = app!(server);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/admin?edit=c2").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;

    assert!(body.contains(r#"value="Kurtis""#));
    assert!(body.contains("kurtis.png"));
}

#[actix_web::test]
async fn declined_delete_redirects_without_request() {
    let server = common::seeded();
    let app = app!(server);

    let req = test::TestRequest::post()
        .uri("/admin/categories/c1/delete")
        .set_form([("confirmed", "false")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(server.store.mutations().is_empty());
}

#[actix_web::test]
async fn confirmed_product_delete_hits_store() {
    let server = common::seeded();
    let app = app!(server);

    let req = test::TestRequest::post()
        .uri("/admin/categories/c1/products/p3/delete")
        .set_form([("confirmed", "true")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("location").unwrap(),
        "/admin/categories/c1"
    );
    let paths: Vec<String> = server
        .store
        .mutations()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec!["/api/products/p3".to_string()]);
}

const BOUNDARY: &str = "mohar-form-boundary";

/// Builds a `multipart/form-data` body the way a browser sends the editor dialog.
fn multipart(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\
                 Content-Type: text/plain; charset=utf-8\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn post_multipart(uri: &str, body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

const PNG: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

#[actix_web::test]
async fn editor_dialog_disables_save_on_submit() {
    let server = common::seeded();
    let app = app!(server);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/admin?new=1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;

    assert!(body.contains(r#"enctype="multipart/form-data""#));
    assert!(body.contains(".disabled = true;"));
}

#[actix_web::test]
async fn new_category_uploads_then_posts() {
    let server = common::seeded();
    let app = app!(server);

    let body = multipart(&[("name", "Lehengas")], Some(("lehenga.png", PNG)));
    let req = post_multipart("/admin/categories", body).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/admin");
    let mutations = server.store.mutations();
    assert_eq!(mutations.len(), 2);
    assert_eq!(mutations[0].path, "/upload");
    assert_eq!(mutations[1].method, "POST");
    assert_eq!(mutations[1].path, "/api/category");
    assert_eq!(
        mutations[1].body,
        Some(json!({ "name": "Lehengas", "imageUrl": "https://img/abc.png" }))
    );
}

#[actix_web::test]
async fn failed_upload_rerenders_category_draft() {
    let server = common::seeded();
    server.store.set_failing_uploads(true);
    let app = app!(server);

    let body = multipart(&[("name", "Lehengas")], Some(("lehenga.png", PNG)));
    let req = post_multipart("/admin/categories", body).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;
    assert!(body.contains(r#"value="Lehengas""#));
    assert!(body.contains("Failed to upload image. Please try again."));
    let paths: Vec<String> = server
        .store
        .mutations()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec!["/upload".to_string()]);
}

#[actix_web::test]
async fn category_update_without_file_keeps_image() {
    let server = common::seeded();
    let app = app!(server);

    let body = multipart(&[("name", "Silk Sarees")], None);
    let req = post_multipart("/admin/categories/c1/update", body).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/admin");
    let mutations = server.store.mutations();
    assert_eq!(mutations.len(), 1);
    assert_eq!(mutations[0].method, "PUT");
    assert_eq!(mutations[0].path, "/api/category/c1");
    assert_eq!(
        mutations[0].body,
        Some(json!({ "name": "Silk Sarees", "imageUrl": "https://img/sarees.png" }))
    );
}

#[actix_web::test]
async fn new_product_posts_integer_prices() {
    let server = common::seeded();
    let app = app!(server);

    let body = multipart(
        &[
            ("name", "Chanderi"),
            ("description", "Light silk"),
            ("actual_price", "1200"),
            ("discounted_price", "999"),
        ],
        Some(("chanderi.png", PNG)),
    );
    let req = post_multipart("/admin/categories/c1/products", body).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("location").unwrap(),
        "/admin/categories/c1"
    );
    let mutations = server.store.mutations();
    assert_eq!(mutations.len(), 2);
    assert_eq!(mutations[0].path, "/upload");
    assert_eq!(mutations[1].path, "/api/products");
    assert_eq!(
        mutations[1].body,
        Some(json!({
            "name": "Chanderi",
            "description": "Light silk",
            "actualPrice": 1200,
            "discountedPrice": 999,
            "imageUrl": "https://img/abc.png",
            "categoryId": "c1",
        }))
    );
}

#[actix_web::test]
async fn failed_product_update_rerenders_draft() {
    let server = common::seeded();
    server.store.set_failing_writes(true);
    let app = app!(server);

    let body = multipart(
        &[
            ("name", "Banarasi Silk Saree"),
            ("description", "Handwoven zari border"),
            ("actual_price", "1000"),
            ("discounted_price", "700"),
        ],
        None,
    );
    let req = post_multipart("/admin/categories/c1/products/p1/update", body).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;
    assert!(body.contains(r#"value="Banarasi Silk Saree""#));
    assert!(body.contains(r#"value="700""#));
    assert!(body.contains("Failed to save product. Please try again."));
    let mutations = server.store.mutations();
    assert_eq!(mutations.len(), 1);
    assert_eq!(mutations[0].method, "PUT");
    assert_eq!(mutations[0].path, "/api/products/p1");
    assert_eq!(mutations[0].body.as_ref().unwrap()["imageUrl"], "https://img/p1.png");
}

#[actix_web::test]
async fn equal_prices_show_one_price() {
    let server = common::seeded();
    let app = app!(server);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/categories/c2").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;

    assert!(body.contains("Cotton Kurti"));
    assert!(!body.contains("<s>"));
}
