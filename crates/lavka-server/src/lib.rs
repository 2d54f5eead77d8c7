#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use lavka_store::Store;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod auth;
mod carrier;
mod config;
mod http;
mod middleware;

pub const CRATE_NAME: &str = "lavka-server";

pub use carrier::{
    CarrierCall, CarrierClient, CarrierError, FakeCarrierClient, HttpCarrierClient, RetryPolicy,
};
pub use config::{validate_startup_config_contract, ApiConfig};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub api: Arc<ApiConfig>,
    pub carrier: Arc<dyn CarrierClient>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
    pub(crate) salt_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Store, carrier: Arc<dyn CarrierClient>) -> Self {
        Self::with_config(store, carrier, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Store, carrier: Arc<dyn CarrierClient>, api: ApiConfig) -> Self {
        Self {
            store,
            api: Arc::new(api),
            carrier,
            request_id_seed: Arc::new(AtomicU64::new(1)),
            salt_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping/", get(http::meta::ping_handler))
        .route("/api/schema/", get(http::meta::schema_handler))
        .route("/api/docs/", get(http::meta::docs_handler))
        .route("/user/", post(http::users::create_user_handler))
        .route(
            "/user/:id",
            get(http::users::get_user_handler)
                .put(http::users::put_user_handler)
                .patch(http::users::patch_user_handler)
                .delete(http::users::delete_user_handler),
        )
        .route("/token/", post(http::tokens::obtain_token_handler))
        .route("/token/refresh/", post(http::tokens::refresh_token_handler))
        .route("/product/", get(http::catalog::list_products_handler))
        .route("/product/:id", get(http::catalog::get_product_handler))
        .route("/order/", post(http::orders::create_order_handler))
        .route(
            "/delivery/settlements/",
            get(http::delivery::settlements_handler),
        )
        .route(
            "/delivery/warehouses/",
            get(http::delivery::warehouses_handler),
        )
        .route(
            "/delivery/warehouse-types/",
            get(http::delivery::warehouse_types_handler),
        )
        .route("/delivery/addresses/", get(http::delivery::addresses_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
