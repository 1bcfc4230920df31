use axum::{
    routing::{get, post},
    Router,
};

pub mod articles;
pub mod auth;
pub mod exports;
pub mod movements;
pub mod reports;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/auth/logout", post(auth::logout))
        .nest("/articles", articles::router())
        .nest("/movements", movements::router())
        .nest("/reports", reports::router())
        .nest("/exports", exports::router())
}
