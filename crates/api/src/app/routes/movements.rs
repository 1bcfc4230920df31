use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use almacen_core::MovementId;
use almacen_inventory::{MovementUpdate, NewMovement};
use almacen_service::MovementQuery;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_movements).post(create_movement))
        .route("/:id", put(update_movement).delete(delete_movement))
        .route("/backfill-costs", post(backfill_costs))
}

pub async fn list_movements(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<MovementQuery>,
) -> axum::response::Response {
    match services.inventory.list_movements(&query) {
        Ok(movements) => Json(movements).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<dto::CreateMovementRequest>,
) -> axum::response::Response {
    let movement = NewMovement {
        article_id: body.article_id,
        kind: body.kind,
        quantity: body.quantity,
        date: body.date,
        description: body.description,
    };
    let author = Some(user.display_name().to_string());
    match services.inventory.add_movement(movement, author) {
        Ok(movement) => (StatusCode::CREATED, Json(movement)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<MovementId>,
    Json(body): Json<MovementUpdate>,
) -> axum::response::Response {
    match services.inventory.update_movement(id, body) {
        Ok(movement) => Json(movement).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<MovementId>,
) -> axum::response::Response {
    match services.inventory.delete_movement(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn backfill_costs(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.inventory.backfill_costs() {
        Ok(updated) => Json(dto::BackfillResponse { updated }).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
