use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use almacen_core::{ArticleId, DomainError};

/// An article (product) tracked by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    /// Uppercased before persistence.
    pub name: String,
    /// Most recent known acquisition cost. Never negative.
    pub unit_cost: Decimal,
}

/// Payload for creating an article. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub name: String,
    pub unit_cost: Decimal,
}

impl NewArticle {
    /// Validate and normalize (uppercase name) into a persistable payload.
    pub fn normalized(self) -> Result<Self, DomainError> {
        let name = self.name.trim().to_uppercase();
        if name.is_empty() {
            return Err(DomainError::validation("article name cannot be empty"));
        }
        if self.unit_cost < Decimal::ZERO {
            return Err(DomainError::validation("unit cost cannot be negative"));
        }
        Ok(Self {
            name,
            unit_cost: self.unit_cost,
        })
    }
}

/// Partial update for an article. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub name: Option<String>,
    pub unit_cost: Option<Decimal>,
}

impl ArticleUpdate {
    pub fn normalized(self) -> Result<Self, DomainError> {
        let name = match self.name {
            Some(n) => {
                let n = n.trim().to_uppercase();
                if n.is_empty() {
                    return Err(DomainError::validation("article name cannot be empty"));
                }
                Some(n)
            }
            None => None,
        };
        if let Some(cost) = self.unit_cost {
            if cost < Decimal::ZERO {
                return Err(DomainError::validation("unit cost cannot be negative"));
            }
        }
        Ok(Self {
            name,
            unit_cost: self.unit_cost,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.unit_cost.is_none()
    }
}

impl Article {
    /// Apply a (normalized) update in place.
    pub fn apply(&mut self, update: &ArticleUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(cost) = update.unit_cost {
            self.unit_cost = cost;
        }
    }
}
