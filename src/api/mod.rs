pub mod amend;
pub mod health;
pub mod tax_position;
pub mod transactions;

use crate::service::PositionService;
use axum::routing::{get, patch, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PositionService>,
}

impl AppState {
    pub fn new(service: Arc<PositionService>) -> Self {
        Self { service }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/transactions", post(transactions::ingest_transaction))
        .route("/sale", patch(amend::amend_sale))
        .route("/tax-position", get(tax_position::query_tax_position))
        .layer(cors)
        .with_state(state)
}
