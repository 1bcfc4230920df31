use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use almacen_auth::{Credentials, Session};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::CurrentUser;

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let credentials = Credentials {
        username: body.username,
        password: body.password,
    };
    let Some(account) = services.directory.verify(&credentials) else {
        tracing::warn!(username = %credentials.username, "login rejected");
        return errors::json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid credentials",
        );
    };

    let session = Session::issue(account, Utc::now());
    if let Err(e) = services.sessions.insert(session.clone()) {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "session_error", e.to_string());
    }

    tracing::info!(username = %session.username, "login accepted");
    Json(dto::LoginResponse {
        token: session.token,
        display_name: session.display_name,
        expires_at: session.expires_at,
    })
    .into_response()
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
) -> axum::response::Response {
    if let Err(e) = services.sessions.revoke(user.token()) {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "session_error", e.to_string());
    }
    StatusCode::NO_CONTENT.into_response()
}
