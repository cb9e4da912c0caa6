//! Helpers for integration tests.
//!
//! [`FakeStore`] serves the catalog API and an image upload endpoint from an
//! in-process actix-web server bound to an ephemeral port.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

/// Request received by the fake store: method, path and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Received {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Collections {
    categories: Vec<Value>,
    products: Vec<Value>,
    received: Vec<Received>,
    next_id: usize,
}

#[derive(Default)]
pub struct FakeStore {
    collections: Mutex<Collections>,
    failing_reads: AtomicBool,
    failing_writes: AtomicBool,
    failing_uploads: AtomicBool,
}

impl FakeStore {
    pub fn received(&self) -> Vec<Received> {
        self.collections.lock().unwrap().received.clone()
    }

    /// Mutating requests only.
    pub fn mutations(&self) -> Vec<Received> {
        self.received()
            .into_iter()
            .filter(|r| r.method != "GET")
            .collect()
    }

    /// Fails every request, uploads included.
    pub fn set_failing(&self, failing: bool) {
        self.set_failing_reads(failing);
        self.set_failing_writes(failing);
        self.set_failing_uploads(failing);
    }

    pub fn set_failing_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }

    pub fn set_failing_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    pub fn set_failing_uploads(&self, failing: bool) {
        self.failing_uploads.store(failing, Ordering::SeqCst);
    }

    fn record(&self, method: &'static str, path: String, body: Option<Value>) {
        self.collections
            .lock()
            .unwrap()
            .received
            .push(Received { method, path, body });
    }

    fn fails_reads(&self) -> bool {
        self.failing_reads.load(Ordering::SeqCst)
    }

    fn fails_writes(&self) -> bool {
        self.failing_writes.load(Ordering::SeqCst)
    }

    fn fails_uploads(&self) -> bool {
        self.failing_uploads.load(Ordering::SeqCst)
    }
}

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<FakeStore>,
}

impl TestServer {
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }
}

pub fn seed_categories() -> Vec<Value> {
    vec![
        json!({
            "id": "c1",
            "name": "Sarees",
            "imageUrl": "https://img/sarees.png",
            "createdAt": "2024-05-01T10:00:00.000Z",
        }),
        json!({
            "id": "c2",
            "name": "Kurtis",
            "imageUrl": "https://img/kurtis.png",
            "createdAt": "2024-05-02T10:00:00.000Z",
        }),
    ]
}

pub fn seed_products() -> Vec<Value> {
    vec![
        json!({
            "id": "p1",
            "name": "Banarasi Silk",
            "imageUrl": "https://img/p1.png",
            "description": "Handwoven zari border",
            "actualPrice": 1000,
            "discountedPrice": "750",
            "categoryId": "c1",
            "category": { "id": "c1", "name": "Sarees" },
        }),
        json!({
            "id": "p2",
            "name": "Cotton Kurti",
            "imageUrl": "https://img/p2.png",
            "description": "Block print",
            "actualPrice": "800",
            "discountedPrice": "800",
            "categoryId": "c2",
        }),
        json!({
            "id": "p3",
            "name": "Kanjivaram",
            "imageUrl": "https://img/p3.png",
            "description": "Temple border silk",
            "actualPrice": "2500",
            "discountedPrice": null,
            "categoryId": "c1",
        }),
    ]
}

fn collection<'a>(collections: &'a mut Collections, kind: &str) -> &'a mut Vec<Value> {
    if kind == "category" {
        &mut collections.categories
    } else {
        &mut collections.products
    }
}

async fn list(store: web::Data<FakeStore>, kind: web::Path<String>) -> HttpResponse {
    let kind = kind.into_inner();
    store.record("GET", format!("/api/{kind}"), None);
    if store.fails_reads() {
        return HttpResponse::InternalServerError().finish();
    }
    let mut collections = store.collections.lock().unwrap();
    HttpResponse::Ok().json(collection(&mut collections, &kind).clone())
}

async fn create(
    store: web::Data<FakeStore>,
    kind: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let kind = kind.into_inner();
    let body = body.into_inner();
    store.record("POST", format!("/api/{kind}"), Some(body.clone()));
    if store.fails_writes() {
        return HttpResponse::InternalServerError().finish();
    }
    let mut collections = store.collections.lock().unwrap();
    collections.next_id += 1;
    let mut item = body;
    item["id"] = json!(format!("new-{}", collections.next_id));
    item["createdAt"] = json!("2024-06-01T00:00:00.000Z");
    collection(&mut collections, &kind).push(item.clone());
    HttpResponse::Created().json(item)
}

async fn update(
    store: web::Data<FakeStore>,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> HttpResponse {
    let (kind, id) = path.into_inner();
    let body = body.into_inner();
    store.record("PUT", format!("/api/{kind}/{id}"), Some(body.clone()));
    if store.fails_writes() {
        return HttpResponse::InternalServerError().finish();
    }
    let mut collections = store.collections.lock().unwrap();
    let Some(item) = collection(&mut collections, &kind)
        .iter_mut()
        .find(|item| item["id"] == json!(id))
    else {
        return HttpResponse::NotFound().finish();
    };
    if let (Some(item), Some(body)) = (item.as_object_mut(), body.as_object()) {
        for (key, value) in body {
            item.insert(key.clone(), value.clone());
        }
    }
    HttpResponse::Ok().json(item.clone())
}

async fn remove(store: web::Data<FakeStore>, path: web::Path<(String, String)>) -> HttpResponse {
    let (kind, id) = path.into_inner();
    store.record("DELETE", format!("/api/{kind}/{id}"), None);
    if store.fails_writes() {
        return HttpResponse::InternalServerError().finish();
    }
    let mut collections = store.collections.lock().unwrap();
    collection(&mut collections, &kind).retain(|item| item["id"] != json!(id));
    HttpResponse::NoContent().finish()
}

/// ImgBB-style endpoint. Accepts any multipart body carrying a `key` field.
async fn upload(store: web::Data<FakeStore>, body: web::Bytes) -> HttpResponse {
    store.record("POST", "/upload".to_string(), None);
    let body = String::from_utf8_lossy(&body);
    if store.fails_uploads() || !body.contains("name=\"key\"") {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": { "message": "Invalid API v1 key." },
        }));
    }
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": { "url": "https://img/abc.png" },
    }))
}

/// Starts the fake store seeded with `categories` and `products`.
pub fn start(categories: Vec<Value>, products: Vec<Value>) -> TestServer {
    let store = Arc::new(FakeStore {
        collections: Mutex::new(Collections {
            categories,
            products,
            ..Collections::default()
        }),
        ..FakeStore::default()
    });
    let data = web::Data::from(store.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/api/{kind}", web::get().to(list))
            .route("/api/{kind}", web::post().to(create))
            .route("/api/{kind}/{id}", web::put().to(update))
            .route("/api/{kind}/{id}", web::delete().to(remove))
            .route("/upload", web::post().to(upload))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind fake store");

    let address = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    TestServer {
        base_url: format!("http://{address}"),
        store,
    }
}

pub fn seeded() -> TestServer {
    start(seed_categories(), seed_products())
}
