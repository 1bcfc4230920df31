use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use almacen_core::ArticleId;
use almacen_inventory::MovementKind;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub name: String,
    #[serde(default)]
    pub unit_cost: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateMovementRequest {
    pub article_id: ArticleId,
    pub kind: MovementKind,
    pub quantity: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub display_name: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BackfillResponse {
    pub updated: usize,
}
