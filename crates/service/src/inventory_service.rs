use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use almacen_core::{ArticleId, MovementId};
use almacen_inventory::{
    Article, ArticleUpdate, Movement, MovementKind, MovementUpdate, NewArticle, NewMovement,
};
use almacen_ledger::{
    audit_integrity, build_control_card, consumption_report, current_stock, dashboard_stats,
    stock_summary, CardFilter, CardRow, ConsumptionRow, DashboardStats, FilterWarning,
    IntegrityViolation, StockSummaryRow,
};
use almacen_store::{InventoryStore, MovementDraft};

use crate::error::{ServiceError, ServiceResult};
use crate::query::MovementQuery;

/// A computed control card plus any filter warning worth relaying.
#[derive(Debug, Clone, Serialize)]
pub struct ControlCard {
    pub rows: Vec<CardRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<FilterWarning>,
}

/// Coordinates validation, the store, and the ledger engine. Every write
/// re-reads the snapshot it needs; the service holds no cached state.
pub struct InventoryService<S> {
    store: S,
}

impl<S: InventoryStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // Articles -----------------------------------------------------------

    pub fn list_articles(&self) -> ServiceResult<Vec<Article>> {
        Ok(self.store.list_articles()?)
    }

    pub fn get_article(&self, id: ArticleId) -> ServiceResult<Article> {
        Ok(self.store.get_article(id)?)
    }

    pub fn add_article(&self, article: NewArticle) -> ServiceResult<Article> {
        let article = self.store.insert_article(article.normalized()?)?;
        info!(article = %article.id, name = %article.name, "article created");
        Ok(article)
    }

    pub fn update_article(&self, id: ArticleId, update: ArticleUpdate) -> ServiceResult<Article> {
        let article = self.store.update_article(id, update.normalized()?)?;
        info!(article = %article.id, "article updated");
        Ok(article)
    }

    /// Remove an article. Rejected while it still holds units or while any
    /// movement references it.
    pub fn delete_article(&self, id: ArticleId) -> ServiceResult<()> {
        let history = self.store.movements_by_article(id)?;
        let stock: i64 = history.iter().map(Movement::signed_quantity).sum();
        if stock > 0 {
            warn!(article = %id, stock, "article delete rejected: stock on hand");
            return Err(ServiceError::ArticleHasStock { stock });
        }
        self.store.delete_article(id)?;
        info!(article = %id, "article deleted");
        Ok(())
    }

    // Movements ----------------------------------------------------------

    pub fn list_movements(&self, query: &MovementQuery) -> ServiceResult<Vec<Movement>> {
        let movements = self.store.list_movements()?;
        Ok(movements.into_iter().filter(|m| query.matches(m)).collect())
    }

    pub fn get_movement(&self, id: MovementId) -> ServiceResult<Movement> {
        Ok(self.store.get_movement(id)?)
    }

    /// Record a movement. The unit cost is captured from the article at
    /// this moment; exits must be covered by current stock.
    pub fn add_movement(
        &self,
        movement: NewMovement,
        author: Option<String>,
    ) -> ServiceResult<Movement> {
        let movement = movement.normalized()?;
        let article = self.store.get_article(movement.article_id)?;

        if movement.kind == MovementKind::Salida {
            let history = self.store.movements_by_article(movement.article_id)?;
            let available: i64 = history.iter().map(Movement::signed_quantity).sum();
            if available < movement.quantity {
                warn!(
                    article = %article.id,
                    available,
                    requested = movement.quantity,
                    "exit rejected: insufficient stock"
                );
                return Err(ServiceError::InsufficientStock {
                    available,
                    requested: movement.quantity,
                });
            }
        }

        let recorded = self.store.insert_movement(MovementDraft {
            article_id: movement.article_id,
            kind: movement.kind,
            quantity: movement.quantity,
            date: movement.date,
            description: movement.description,
            unit_cost: article.unit_cost,
            author,
        })?;
        info!(
            movement = %recorded.id,
            article = %recorded.article_id,
            kind = %recorded.kind,
            quantity = recorded.quantity,
            "movement recorded"
        );
        Ok(recorded)
    }

    /// Edit a movement's quantity, date, description, or cost. Its kind is
    /// fixed. The edit is checked against the rest of the history at the
    /// movement's new date and quantity.
    pub fn update_movement(
        &self,
        id: MovementId,
        update: MovementUpdate,
    ) -> ServiceResult<Movement> {
        let update = update.normalized()?;
        let existing = self.store.get_movement(id)?;
        let quantity = update.quantity.unwrap_or(existing.quantity);
        let date = update.date.unwrap_or(existing.date);

        match existing.kind {
            MovementKind::Entrada => {
                let committed = self.committed_exits_since(existing.article_id, date)?;
                if quantity < committed {
                    warn!(movement = %id, quantity, committed, "entry edit rejected");
                    return Err(ServiceError::DependentExits { committed });
                }
            }
            MovementKind::Salida => {
                let history = self.store.movements_by_article(existing.article_id)?;
                let available: i64 = history
                    .iter()
                    .filter(|m| m.id != id)
                    .map(Movement::signed_quantity)
                    .sum();
                if available < quantity {
                    warn!(movement = %id, available, requested = quantity, "exit edit rejected");
                    return Err(ServiceError::InsufficientStock {
                        available,
                        requested: quantity,
                    });
                }
            }
        }

        let movement = self.store.update_movement(id, update)?;
        info!(movement = %id, "movement updated");
        Ok(movement)
    }

    /// Remove a movement. An entry cannot be removed while exits dated on
    /// or after it exist for the same article.
    pub fn delete_movement(&self, id: MovementId) -> ServiceResult<()> {
        let existing = self.store.get_movement(id)?;
        if existing.kind == MovementKind::Entrada {
            let committed = self.committed_exits_since(existing.article_id, existing.date)?;
            if committed > 0 {
                warn!(movement = %id, committed, "entry delete rejected");
                return Err(ServiceError::DependentExits { committed });
            }
        }
        self.store.delete_movement(id)?;
        info!(movement = %id, "movement deleted");
        Ok(())
    }

    /// Copy the owning article's current cost onto every movement recorded
    /// with a zero cost. Returns how many movements were touched.
    pub fn backfill_costs(&self) -> ServiceResult<usize> {
        let articles = self.store.list_articles()?;
        let movements = self.store.list_movements()?;
        let mut updated = 0;
        for movement in &movements {
            if !movement.unit_cost.is_zero() {
                continue;
            }
            let Some(article) = articles.iter().find(|a| a.id == movement.article_id) else {
                continue;
            };
            if article.unit_cost <= Decimal::ZERO {
                continue;
            }
            self.store.update_movement(
                movement.id,
                MovementUpdate {
                    unit_cost: Some(article.unit_cost),
                    ..Default::default()
                },
            )?;
            updated += 1;
        }
        if updated > 0 {
            info!(updated, "movement costs backfilled");
        }
        Ok(updated)
    }

    // Reports ------------------------------------------------------------

    pub fn current_stock(&self, article_id: ArticleId) -> ServiceResult<i64> {
        let history = self.store.movements_by_article(article_id)?;
        Ok(current_stock(&history, article_id))
    }

    pub fn control_card(&self, filter: &CardFilter) -> ServiceResult<ControlCard> {
        let articles = self.store.list_articles()?;
        let movements = self.store.list_movements()?;
        Ok(ControlCard {
            rows: build_control_card(&articles, &movements, filter),
            warning: filter.warning(),
        })
    }

    pub fn stock_summary(&self) -> ServiceResult<Vec<StockSummaryRow>> {
        let articles = self.store.list_articles()?;
        let movements = self.store.list_movements()?;
        Ok(stock_summary(&articles, &movements))
    }

    pub fn consumption(
        &self,
        month: Option<u32>,
        year: Option<i32>,
    ) -> ServiceResult<Vec<ConsumptionRow>> {
        let articles = self.store.list_articles()?;
        let movements = self.store.list_movements()?;
        Ok(consumption_report(&articles, &movements, month, year))
    }

    pub fn dashboard(&self) -> ServiceResult<DashboardStats> {
        let articles = self.store.list_articles()?;
        let movements = self.store.list_movements()?;
        Ok(dashboard_stats(&articles, &movements))
    }

    pub fn audit(&self) -> ServiceResult<Vec<IntegrityViolation>> {
        let articles = self.store.list_articles()?;
        let movements = self.store.list_movements()?;
        Ok(audit_integrity(&articles, &movements))
    }

    /// Units drawn by exits dated on or after `date` for one article.
    fn committed_exits_since(&self, article_id: ArticleId, date: NaiveDate) -> ServiceResult<i64> {
        let history = self.store.movements_by_article(article_id)?;
        Ok(history
            .iter()
            .filter(|m| m.kind == MovementKind::Salida && m.date >= date)
            .map(|m| m.quantity)
            .sum())
    }
}
