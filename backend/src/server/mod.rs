//! Server construction and middleware wiring.

mod settings;

pub use settings::AppSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::domain::{CartService, CatalogService};
use crate::inbound::http::cart::{add_items, cart_history, confirm_cart, create_cart, edit_items};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::products::{
    create_product, delete_product, list_products, update_product,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts, ListDefaults};
use crate::middleware::Trace;
use crate::outbound::persistence::InMemoryStore;

/// Bundled per-worker application state.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
}

/// Assemble the Actix application serving the catalog, cart, and health
/// endpoints.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(list_products)
        .service(create_product)
        .service(update_product)
        .service(delete_product)
        .service(create_cart)
        .service(add_items)
        .service(edit_items)
        .service(confirm_cart)
        .service(cart_history)
        .service(ready)
        .service(live)
}

fn build_http_state(settings: &AppSettings) -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStore::new(Arc::new(mockable::DefaultClock)));
    let catalog = Arc::new(CatalogService::new(store.clone()));
    let carts = Arc::new(CartService::new(store.clone(), store));
    web::Data::new(HttpState::new(
        HttpStatePorts {
            catalog: catalog.clone(),
            catalog_query: catalog,
            carts: carts.clone(),
            carts_query: carts,
        },
        ListDefaults {
            page: 1,
            limit: settings.page_limit(),
        },
    ))
}

/// Construct an Actix HTTP server using the provided health state and
/// settings. Readiness flips once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: AppSettings,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&settings);
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(settings.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
