use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::Utc;

use almacen_export::{
    articles_csv, control_card_csv, control_card_html, movements_csv, render_page, stock_csv,
    ExportFilters,
};
use almacen_ledger::CardFilter;
use almacen_service::MovementQuery;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/articles.csv", get(export_articles))
        .route("/movements.csv", get(export_movements))
        .route("/stock.csv", get(export_stock))
        .route("/control-card.csv", get(export_control_card_csv))
        .route("/control-card.html", get(export_control_card_html))
}

fn csv_response(body: String) -> axum::response::Response {
    (
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    )
        .into_response()
}

fn html_response(body: String) -> axum::response::Response {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        body,
    )
        .into_response()
}

fn export_failure(e: impl std::fmt::Display) -> axum::response::Response {
    errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "export_error", e.to_string())
}

pub async fn export_articles(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let rows = match services.inventory.stock_summary() {
        Ok(rows) => rows,
        Err(e) => return errors::service_error_to_response(e),
    };
    match articles_csv(&rows) {
        Ok(csv) => csv_response(csv),
        Err(e) => export_failure(e),
    }
}

pub async fn export_movements(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<MovementQuery>,
) -> axum::response::Response {
    let movements = match services.inventory.list_movements(&query) {
        Ok(movements) => movements,
        Err(e) => return errors::service_error_to_response(e),
    };
    let articles = match services.inventory.list_articles() {
        Ok(articles) => articles,
        Err(e) => return errors::service_error_to_response(e),
    };
    match movements_csv(&movements, &articles) {
        Ok(csv) => csv_response(csv),
        Err(e) => export_failure(e),
    }
}

pub async fn export_stock(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let rows = match services.inventory.stock_summary() {
        Ok(rows) => rows,
        Err(e) => return errors::service_error_to_response(e),
    };
    match stock_csv(&rows) {
        Ok(csv) => csv_response(csv),
        Err(e) => export_failure(e),
    }
}

pub async fn export_control_card_csv(
    Extension(services): Extension<Arc<AppServices>>,
    Query(filter): Query<CardFilter>,
) -> axum::response::Response {
    let card = match services.inventory.control_card(&filter) {
        Ok(card) => card,
        Err(e) => return errors::service_error_to_response(e),
    };
    match control_card_csv(&card.rows, filter.article.is_none()) {
        Ok(csv) => csv_response(csv),
        Err(e) => export_failure(e),
    }
}

pub async fn export_control_card_html(
    Extension(services): Extension<Arc<AppServices>>,
    Query(filter): Query<CardFilter>,
) -> axum::response::Response {
    let card = match services.inventory.control_card(&filter) {
        Ok(card) => card,
        Err(e) => return errors::service_error_to_response(e),
    };

    let article_name = match filter.article {
        Some(id) => match services.inventory.get_article(id) {
            Ok(article) => Some(article.name),
            Err(e) => return errors::service_error_to_response(e),
        },
        None => None,
    };

    let title = match &article_name {
        Some(name) => format!("Tarjeta de Control - {name}"),
        None => "Tarjeta de Control - Todos los artículos".to_string(),
    };
    let export_filters = ExportFilters {
        article: article_name,
        month: filter.month,
        year: filter.year,
        ..Default::default()
    };

    let body = control_card_html(&card.rows, filter.article.is_none());
    html_response(render_page(&title, &body, &export_filters, Utc::now()))
}
