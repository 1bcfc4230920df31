use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use almacen_core::{ArticleId, DomainError, MovementId};

/// Direction of a stock movement.
///
/// `Entrada` increases stock, `Salida` decreases it. The kind is fixed at
/// creation; updates cannot flip a movement's direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    Entrada,
    Salida,
}

impl MovementKind {
    /// Signed stock contribution per unit.
    pub fn sign(&self) -> i64 {
        match self {
            MovementKind::Entrada => 1,
            MovementKind::Salida => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entrada => "Entrada",
            MovementKind::Salida => "Salida",
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Entrada" => Ok(MovementKind::Entrada),
            "Salida" => Ok(MovementKind::Salida),
            other => Err(DomainError::validation(format!(
                "movement kind must be Entrada or Salida, got '{other}'"
            ))),
        }
    }
}

/// A recorded entry/exit of stock for one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub article_id: ArticleId,
    pub kind: MovementKind,
    /// Strictly positive; the sign lives in `kind`.
    pub quantity: i64,
    pub date: NaiveDate,
    /// Uppercased before persistence.
    pub description: String,
    /// Cost attached to this movement, captured from the article at
    /// insertion time. Zero means "unknown"; the ledger falls back to the
    /// last known entry cost when valuing such rows.
    pub unit_cost: Decimal,
    /// Opaque identity of whoever recorded the movement (auth collaborator).
    pub author: Option<String>,
}

/// Payload for recording a movement. The store assigns the id; the service
/// captures `unit_cost` from the article and `author` from the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovement {
    pub article_id: ArticleId,
    pub kind: MovementKind,
    pub quantity: i64,
    pub date: NaiveDate,
    pub description: String,
}

impl NewMovement {
    pub fn normalized(self) -> Result<Self, DomainError> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be greater than 0"));
        }
        Ok(Self {
            description: self.description.trim().to_uppercase(),
            ..self
        })
    }
}

/// Partial update for a movement. Deliberately has no `kind` field: a
/// movement's direction is immutable after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementUpdate {
    pub quantity: Option<i64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub unit_cost: Option<Decimal>,
}

impl MovementUpdate {
    pub fn normalized(self) -> Result<Self, DomainError> {
        if let Some(q) = self.quantity {
            if q <= 0 {
                return Err(DomainError::validation("quantity must be greater than 0"));
            }
        }
        if let Some(cost) = self.unit_cost {
            if cost < Decimal::ZERO {
                return Err(DomainError::validation("unit cost cannot be negative"));
            }
        }
        Ok(Self {
            description: self.description.map(|d| d.trim().to_uppercase()),
            ..self
        })
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.unit_cost.is_none()
    }
}

impl Movement {
    /// Apply a (normalized) update in place. Kind is untouched by design.
    pub fn apply(&mut self, update: &MovementUpdate) {
        if let Some(q) = update.quantity {
            self.quantity = q;
        }
        if let Some(d) = update.date {
            self.date = d;
        }
        if let Some(desc) = &update.description {
            self.description = desc.clone();
        }
        if let Some(cost) = update.unit_cost {
            self.unit_cost = cost;
        }
    }

    /// Signed stock delta of this movement.
    pub fn signed_quantity(&self) -> i64 {
        self.kind.sign() * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = NewMovement {
            article_id: ArticleId::new(1),
            kind: MovementKind::Entrada,
            quantity: 0,
            date: date("2024-03-01"),
            description: "compra".to_string(),
        }
        .normalized()
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn description_is_uppercased() {
        let m = NewMovement {
            article_id: ArticleId::new(1),
            kind: MovementKind::Salida,
            quantity: 3,
            date: date("2024-03-15"),
            description: "  entrega a secretaría ".to_string(),
        }
        .normalized()
        .unwrap();
        assert_eq!(m.description, "ENTREGA A SECRETARÍA");
    }

    #[test]
    fn update_cannot_flip_kind() {
        let mut m = Movement {
            id: MovementId::new(1),
            article_id: ArticleId::new(1),
            kind: MovementKind::Entrada,
            quantity: 10,
            date: date("2024-03-01"),
            description: "COMPRA".to_string(),
            unit_cost: dec!(3.00),
            author: None,
        };
        m.apply(
            &MovementUpdate {
                quantity: Some(5),
                ..Default::default()
            }
            .normalized()
            .unwrap(),
        );
        assert_eq!(m.kind, MovementKind::Entrada);
        assert_eq!(m.quantity, 5);
        assert_eq!(m.signed_quantity(), 5);
    }

    #[test]
    fn kind_parses_exact_labels_only() {
        assert_eq!("Entrada".parse::<MovementKind>().unwrap(), MovementKind::Entrada);
        assert!("entrada".parse::<MovementKind>().is_err());
        assert!("Ajuste".parse::<MovementKind>().is_err());
    }
}
