use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use serde::Deserialize;

use almacen_ledger::CardFilter;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/control-card", get(control_card))
        .route("/consumption", get(consumption))
        .route("/stock", get(stock))
        .route("/dashboard", get(dashboard))
        .route("/integrity", get(integrity))
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

pub async fn control_card(
    Extension(services): Extension<Arc<AppServices>>,
    Query(filter): Query<CardFilter>,
) -> axum::response::Response {
    match services.inventory.control_card(&filter) {
        Ok(card) => Json(card).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn consumption(
    Extension(services): Extension<Arc<AppServices>>,
    Query(period): Query<PeriodQuery>,
) -> axum::response::Response {
    match services.inventory.consumption(period.month, period.year) {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn stock(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.inventory.stock_summary() {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.inventory.dashboard() {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn integrity(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.inventory.audit() {
        Ok(violations) => Json(violations).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
