use axum::http::StatusCode;
use axum_test::TestServer;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::{
    abstract_trait::{DynHashing, DynJwtService, JwtServiceTrait},
    config::{Hashing, JwtConfig},
    di::DependenciesInjectDeps,
    domain::requests::CreateProductRequest,
    model::UserRole,
    repository::{MemoryStore, ProductRepository, UserRepository},
};
use std::sync::Arc;
use storefront::{handler::AppRouter, state::AppState};
use tokio::sync::Mutex;
use uuid::Uuid;

struct TestApp {
    server: TestServer,
    store: Arc<MemoryStore>,
    jwt: DynJwtService,
}

impl TestApp {
    async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let jwt = Arc::new(JwtConfig::new("integration-secret")) as DynJwtService;

        let state = AppState::from_deps(DependenciesInjectDeps {
            products: ProductRepository {
                query: store.clone(),
                command: store.clone(),
            },
            users: UserRepository {
                query: store.clone(),
                command: store.clone(),
            },
            hash: Arc::new(Hashing::with_cost(4)) as DynHashing,
            jwt_config: jwt.clone(),
            registry: Arc::new(Mutex::new(Default::default())),
            rng_seed: Some(7),
        })
        .await;

        let server = TestServer::new(AppRouter::build(state)).unwrap();
        Self { server, store, jwt }
    }

    async fn with_prices(prices: &[i64]) -> Self {
        let app = Self::new().await;
        for (i, price) in prices.iter().enumerate() {
            app.insert(&format!("Ring {i}"), Decimal::from(*price)).await;
        }
        app
    }

    async fn insert(&self, name: &str, price: Decimal) -> Uuid {
        use shared::abstract_trait::ProductCommandRepositoryTrait;

        let product = self
            .store
            .create_product(&CreateProductRequest {
                name: name.to_string(),
                description: format!("{name} in gold"),
                price,
                original_price: None,
                category: "Rings".to_string(),
                material: Some("Gold".to_string()),
                collection: None,
                images: vec![],
                rating: 4.5,
                stock: 3,
                featured: false,
                is_new: false,
                on_sale: false,
            })
            .await
            .unwrap();
        product.id
    }

    fn token(&self, role: UserRole) -> String {
        self.jwt.generate_token(Uuid::new_v4(), role).unwrap()
    }
}

fn location(response: &axum_test::TestResponse) -> String {
    response.header("location").to_str().unwrap().to_string()
}

#[tokio::test]
async fn listing_sorted_by_price_desc() {
    let app = TestApp::with_prices(&[10, 50, 30]).await;

    let response = app.server.get("/api/products?sort=price_desc").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let prices: Vec<f64> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![50.0, 30.0, 10.0]);
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["products"][0]["image"], "/images/ring.jpg");
}

#[tokio::test]
async fn listing_tolerates_malformed_parameters() {
    let app = TestApp::with_prices(&[10, 20]).await;

    let response = app
        .server
        .get("/api/products?page=abc&limit=-4&minPrice=cheap&featured=yes")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["totalCount"], 2);
    assert_eq!(body["currentPage"], 1);
}

#[tokio::test]
async fn listing_rejects_other_verbs() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/products").await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn detail_status_codes() {
    let app = TestApp::new().await;
    let id = app.insert("Halo", Decimal::from(400)).await;

    let found = app.server.get(&format!("/api/products/{id}")).await;
    assert_eq!(found.status_code(), StatusCode::OK);
    let body: Value = found.json();
    assert_eq!(body["name"], "Halo");
    assert_eq!(body["stock"], 3);
    assert_eq!(body["reviews"], json!([]));

    let malformed = app.server.get("/api/products/not-an-id").await;
    assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);

    let missing = app
        .server
        .get(&format!("/api/products/{}", Uuid::new_v4()))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_requires_fields_then_applies() {
    let app = TestApp::new().await;
    let id = app.insert("Halo", Decimal::from(400)).await;
    let path = format!("/api/products/{id}");

    let incomplete = app
        .server
        .put(&path)
        .json(&json!({ "name": "Halo", "price": "420" }))
        .await;
    assert_eq!(incomplete.status_code(), StatusCode::BAD_REQUEST);

    let updated = app
        .server
        .put(&path)
        .json(&json!({
            "name": "Halo Deluxe",
            "description": "Pavé halo",
            "price": "420.50",
            "category": "Rings",
            "featured": "true",
            "stock": "9"
        }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let body: Value = updated.json();
    assert_eq!(body["name"], "Halo Deluxe");
    assert_eq!(body["featured"], true);
    assert_eq!(body["stock"], 9);

    let missing = app
        .server
        .put(&format!("/api/products/{}", Uuid::new_v4()))
        .json(&json!({
            "name": "Ghost",
            "description": "Nothing",
            "price": 1,
            "category": "Rings"
        }))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_unreadable_body_is_json_400() {
    let app = TestApp::new().await;
    let id = app.insert("Halo", Decimal::from(400)).await;
    let path = format!("/api/products/{id}");

    let wrong_type = app
        .server
        .put(&path)
        .json(&json!({
            "name": 5,
            "description": "Pavé halo",
            "price": "420",
            "category": "Rings"
        }))
        .await;
    assert_eq!(wrong_type.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = wrong_type.json();
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON"));

    let not_json = app.server.put(&path).text("{name:").await;
    assert_eq!(not_json.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = not_json.json();
    assert_eq!(body["status"], "error");

    let unchanged = app.server.get(&path).await;
    let body: Value = unchanged.json();
    assert_eq!(body["name"], "Halo");
}

#[tokio::test]
async fn delete_then_missing() {
    let app = TestApp::new().await;
    let id = app.insert("Halo", Decimal::from(400)).await;
    let path = format!("/api/products/{id}");

    let deleted = app.server.delete(&path).await;
    assert_eq!(deleted.status_code(), StatusCode::OK);
    let body: Value = deleted.json();
    assert_eq!(body["status"], "success");

    let again = app.server.delete(&path).await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn seed_writes_sample_set() {
    let app = TestApp::with_prices(&[1, 2]).await;

    let response = app.server.post("/api/seed").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Database seeded successfully");
    assert_eq!(body["products"].as_array().unwrap().len(), 12);
    assert_eq!(app.store.products().await.len(), 12);

    let wrong_verb = app.server.get("/api/seed").await;
    assert_eq!(wrong_verb.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn seed_failure_reports_detail() {
    let app = TestApp::new().await;
    app.store.set_failing(true);

    let response = app.server.post("/api/seed").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Failed to seed database")
    );
}

#[tokio::test]
async fn home_buckets_are_disjoint() {
    let app = TestApp::new().await;
    app.server.post("/api/seed").await;

    let response = app.server.get("/api/home").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let ids = |key: &str| -> Vec<String> {
        body[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect()
    };
    let (best, fresh, deals) = (ids("bestsellers"), ids("newArrivals"), ids("hotDeals"));
    assert!(!best.is_empty());
    assert!(best.iter().all(|id| !fresh.contains(id) && !deals.contains(id)));
    assert!(fresh.iter().all(|id| !deals.contains(id)));
    assert_eq!(body["summary"]["total"], 12);
}

#[tokio::test]
async fn home_survives_storage_failure() {
    let app = TestApp::new().await;
    app.store.set_failing(true);

    let response = app.server.get("/api/home").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["bestsellers"], json!([]));
    assert_eq!(body["newArrivals"], json!([]));
    assert_eq!(body["hotDeals"], json!([]));
}

#[tokio::test]
async fn dashboard_without_session_redirects_to_login() {
    let app = TestApp::new().await;

    let response = app.server.get("/admin/dashboard").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&response),
        "/account/login?callbackUrl=%2Fadmin%2Fdashboard"
    );
}

#[tokio::test]
async fn dashboard_rejects_non_admin() {
    let app = TestApp::new().await;
    let token = app.token(UserRole::User);

    let response = app
        .server
        .get("/admin/dashboard")
        .authorization_bearer(token)
        .await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert!(location(&response).starts_with("/account/login?callbackUrl="));
}

#[tokio::test]
async fn dashboard_serves_admin() {
    let app = TestApp::with_prices(&[10, 20]).await;
    let token = app.token(UserRole::Admin);

    let response = app
        .server
        .get("/admin/dashboard")
        .authorization_bearer(token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn forged_token_is_redirected() {
    let app = TestApp::new().await;
    let forged = JwtConfig::new("someone-else")
        .generate_token(Uuid::new_v4(), UserRole::Admin)
        .unwrap();

    let response = app
        .server
        .get("/admin/dashboard")
        .authorization_bearer(forged)
        .await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn account_login_page_is_public() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/account/login?callbackUrl=%2Faccount%2Fprofile")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["callbackUrl"], "/account/profile");
}

#[tokio::test]
async fn register_login_and_view_profile() {
    let app = TestApp::new().await;

    let registered = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Sari",
            "email": "Sari@Example.com",
            "password": "emerald-cut"
        }))
        .await;
    assert_eq!(registered.status_code(), StatusCode::CREATED);
    let body: Value = registered.json();
    assert_eq!(body["user"]["email"], "sari@example.com");
    assert_eq!(body["user"]["role"], "USER");

    let duplicate = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Sari",
            "email": "sari@example.com",
            "password": "emerald-cut"
        }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let login = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "sari@example.com", "password": "emerald-cut" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);
    assert!(login.cookie("token").http_only().unwrap_or(false));
    let token = login.json::<Value>()["token"].as_str().unwrap().to_string();

    let profile = app
        .server
        .get("/account/profile")
        .authorization_bearer(token)
        .await;
    assert_eq!(profile.status_code(), StatusCode::OK);
    let body: Value = profile.json();
    assert_eq!(body["data"]["name"], "Sari");
}

#[tokio::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "whatever" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_validates_body() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "name": "S", "email": "not-an-email", "password": "short" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_and_metrics_are_exposed() {
    let app = TestApp::with_prices(&[10]).await;
    app.server.get("/api/products").await;

    let health = app.server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);

    let metrics = app.server.get("/metrics").await;
    assert_eq!(metrics.status_code(), StatusCode::OK);
    assert!(metrics.text().contains("product_query_service_request_counter"));
}
