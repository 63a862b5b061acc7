//! Shared HTTP helpers for endpoint integration tests.
//!
//! Integration tests under `backend/tests/` compile as separate crates, so
//! app bootstrap and catalog seeding helpers live here to avoid copy/paste
//! drift.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use backend::domain::{CartService, CatalogService};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::{HttpState, HttpStatePorts, ListDefaults};
use backend::outbound::persistence::InMemoryStore;
use backend::server::{AppDependencies, build_app};
use mockable::DefaultClock;
use serde_json::{Value, json};

/// Wire the real catalog and cart services over a fresh in-memory store.
pub(crate) fn http_state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStore::new(Arc::new(DefaultClock)));
    let catalog = Arc::new(CatalogService::new(store.clone()));
    let carts = Arc::new(CartService::new(store.clone(), store));
    web::Data::new(HttpState::new(
        HttpStatePorts {
            catalog: catalog.clone(),
            catalog_query: catalog,
            carts: carts.clone(),
            carts_query: carts,
        },
        ListDefaults::default(),
    ))
}

/// Initialise the full application with the given health state.
pub(crate) async fn init_app(
    health_state: web::Data<HealthState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    actix_test::init_service(build_app(AppDependencies {
        health_state,
        http_state: http_state(),
    }))
    .await
}

/// Initialise the full application over a fresh store.
pub(crate) async fn fresh_app()
-> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    init_app(web::Data::new(HealthState::new())).await
}

/// Seed one product through the API and return its assigned id.
pub(crate) async fn create_product(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    name: &str,
    price: f64,
) -> i64 {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/products")
            .set_json(json!({"name": name, "price": price}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "create {name}");
    let body: Value = actix_test::read_body_json(response).await;
    body.get("product")
        .and_then(|product| product.get("id"))
        .and_then(Value::as_i64)
        .expect("created product id")
}
