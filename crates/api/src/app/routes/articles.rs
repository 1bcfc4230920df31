use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use almacen_core::ArticleId;
use almacen_inventory::{ArticleUpdate, NewArticle};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_articles).post(create_article))
        .route(
            "/:id",
            get(get_article).put(update_article).delete(delete_article),
        )
}

pub async fn list_articles(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.inventory.list_articles() {
        Ok(articles) => Json(articles).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_article(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<ArticleId>,
) -> axum::response::Response {
    match services.inventory.get_article(id) {
        Ok(article) => Json(article).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_article(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateArticleRequest>,
) -> axum::response::Response {
    let article = NewArticle {
        name: body.name,
        unit_cost: body.unit_cost,
    };
    match services.inventory.add_article(article) {
        Ok(article) => (StatusCode::CREATED, Json(article)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_article(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<ArticleId>,
    Json(body): Json<ArticleUpdate>,
) -> axum::response::Response {
    match services.inventory.update_article(id, body) {
        Ok(article) => Json(article).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_article(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<ArticleId>,
) -> axum::response::Response {
    match services.inventory.delete_article(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
