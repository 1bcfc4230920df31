use almacen_core::{ArticleId, MovementId};
use almacen_inventory::{Article, ArticleUpdate, Movement, MovementUpdate, NewArticle};

use crate::error::StoreError;

/// Storage seam for articles and movements.
///
/// Implementations assign ids on insert and return the persisted record.
/// Listing returns a consistent snapshot: articles ordered by name,
/// movements by (date, id). Callers must not assume any caching — every
/// call goes to the source of truth.
pub trait InventoryStore: Send + Sync {
    // Articles -----------------------------------------------------------

    fn list_articles(&self) -> Result<Vec<Article>, StoreError>;

    fn get_article(&self, id: ArticleId) -> Result<Article, StoreError>;

    fn insert_article(&self, article: NewArticle) -> Result<Article, StoreError>;

    fn update_article(&self, id: ArticleId, update: ArticleUpdate) -> Result<Article, StoreError>;

    /// Delete an article. Fails with [`StoreError::ReferentialIntegrity`]
    /// while any movement references it.
    fn delete_article(&self, id: ArticleId) -> Result<(), StoreError>;

    // Movements ----------------------------------------------------------

    fn list_movements(&self) -> Result<Vec<Movement>, StoreError>;

    fn get_movement(&self, id: MovementId) -> Result<Movement, StoreError>;

    /// Referential lookup used to gate article deletion.
    fn movements_by_article(&self, article_id: ArticleId) -> Result<Vec<Movement>, StoreError>;

    /// Insert a fully-formed movement (cost and author already captured by
    /// the write path). The store assigns the id.
    fn insert_movement(&self, movement: MovementDraft) -> Result<Movement, StoreError>;

    fn update_movement(
        &self,
        id: MovementId,
        update: MovementUpdate,
    ) -> Result<Movement, StoreError>;

    fn delete_movement(&self, id: MovementId) -> Result<(), StoreError>;
}

/// A movement ready for insertion: everything but the store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDraft {
    pub article_id: ArticleId,
    pub kind: almacen_inventory::MovementKind,
    pub quantity: i64,
    pub date: chrono::NaiveDate,
    pub description: String,
    pub unit_cost: rust_decimal::Decimal,
    pub author: Option<String>,
}
