use std::collections::BTreeMap;
use std::sync::RwLock;

use almacen_core::{ArticleId, MovementId};
use almacen_inventory::{Article, ArticleUpdate, Movement, MovementUpdate, NewArticle};

use crate::error::StoreError;
use crate::r#trait::{InventoryStore, MovementDraft};

#[derive(Debug, Default)]
struct Inner {
    articles: BTreeMap<ArticleId, Article>,
    movements: BTreeMap<MovementId, Movement>,
    next_article_id: i64,
    next_movement_id: i64,
}

/// In-memory store with sequential id assignment.
///
/// Intended for tests/dev; stands in for the hosted backend. Not optimized
/// for performance.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }
}

impl InventoryStore for InMemoryStore {
    fn list_articles(&self) -> Result<Vec<Article>, StoreError> {
        let inner = self.read()?;
        let mut articles: Vec<Article> = inner.articles.values().cloned().collect();
        articles.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(articles)
    }

    fn get_article(&self, id: ArticleId) -> Result<Article, StoreError> {
        self.read()?
            .articles
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn insert_article(&self, article: NewArticle) -> Result<Article, StoreError> {
        let mut inner = self.write()?;
        inner.next_article_id += 1;
        let id = ArticleId::new(inner.next_article_id);
        let stored = Article {
            id,
            name: article.name,
            unit_cost: article.unit_cost,
        };
        inner.articles.insert(id, stored.clone());
        tracing::debug!(article_id = %id, name = %stored.name, "article inserted");
        Ok(stored)
    }

    fn update_article(&self, id: ArticleId, update: ArticleUpdate) -> Result<Article, StoreError> {
        let mut inner = self.write()?;
        let article = inner.articles.get_mut(&id).ok_or(StoreError::NotFound)?;
        article.apply(&update);
        Ok(article.clone())
    }

    fn delete_article(&self, id: ArticleId) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if !inner.articles.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if inner.movements.values().any(|m| m.article_id == id) {
            return Err(StoreError::ReferentialIntegrity(format!(
                "article {id} has registered movements"
            )));
        }
        inner.articles.remove(&id);
        tracing::debug!(article_id = %id, "article deleted");
        Ok(())
    }

    fn list_movements(&self) -> Result<Vec<Movement>, StoreError> {
        let inner = self.read()?;
        let mut movements: Vec<Movement> = inner.movements.values().cloned().collect();
        movements.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(movements)
    }

    fn get_movement(&self, id: MovementId) -> Result<Movement, StoreError> {
        self.read()?
            .movements
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn movements_by_article(&self, article_id: ArticleId) -> Result<Vec<Movement>, StoreError> {
        let inner = self.read()?;
        let mut movements: Vec<Movement> = inner
            .movements
            .values()
            .filter(|m| m.article_id == article_id)
            .cloned()
            .collect();
        movements.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(movements)
    }

    fn insert_movement(&self, draft: MovementDraft) -> Result<Movement, StoreError> {
        let mut inner = self.write()?;
        if !inner.articles.contains_key(&draft.article_id) {
            return Err(StoreError::ReferentialIntegrity(format!(
                "article {} does not exist",
                draft.article_id
            )));
        }
        inner.next_movement_id += 1;
        let id = MovementId::new(inner.next_movement_id);
        let stored = Movement {
            id,
            article_id: draft.article_id,
            kind: draft.kind,
            quantity: draft.quantity,
            date: draft.date,
            description: draft.description,
            unit_cost: draft.unit_cost,
            author: draft.author,
        };
        inner.movements.insert(id, stored.clone());
        tracing::debug!(movement_id = %id, article_id = %stored.article_id, kind = %stored.kind, "movement inserted");
        Ok(stored)
    }

    fn update_movement(
        &self,
        id: MovementId,
        update: MovementUpdate,
    ) -> Result<Movement, StoreError> {
        let mut inner = self.write()?;
        let movement = inner.movements.get_mut(&id).ok_or(StoreError::NotFound)?;
        movement.apply(&update);
        Ok(movement.clone())
    }

    fn delete_movement(&self, id: MovementId) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner
            .movements
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
