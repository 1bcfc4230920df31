use almacen_core::ArticleId;
use almacen_inventory::{Movement, MovementKind};
use serde::Deserialize;

/// Listing filters for the movements journal. All fields combine with
/// logical AND; an empty query returns everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementQuery {
    pub article: Option<ArticleId>,
    pub kind: Option<MovementKind>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    /// Case-insensitive substring match on the description.
    pub description: Option<String>,
}

impl MovementQuery {
    pub fn matches(&self, movement: &Movement) -> bool {
        use chrono::Datelike;

        if self.article.is_some_and(|a| a != movement.article_id) {
            return false;
        }
        if self.kind.is_some_and(|k| k != movement.kind) {
            return false;
        }
        if self.month.is_some_and(|m| m != movement.date.month()) {
            return false;
        }
        if self.year.is_some_and(|y| y != movement.date.year()) {
            return false;
        }
        if let Some(needle) = &self.description {
            let needle = needle.to_uppercase();
            if !movement.description.to_uppercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}
