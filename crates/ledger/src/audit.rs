//! Integrity audit: detect negative running balances after the fact.
//!
//! The write path rejects movements that would take stock negative, but
//! edits made out-of-band (directly against the hosted store) can still
//! break the invariant. This replays each article's full history in ledger
//! order and reports every point where the balance dips below zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use almacen_core::{ArticleId, MovementId};
use almacen_inventory::{Article, Movement, MovementKind};

use crate::order::ledger_order;

/// A point in an article's history where the running balance went negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityViolation {
    pub article_id: ArticleId,
    pub article_name: String,
    pub movement_id: MovementId,
    pub date: NaiveDate,
    pub balance: i64,
}

/// Replay every article's history and collect negative-balance points.
///
/// An empty result means the snapshot satisfies the non-negativity
/// invariant at every point in time.
pub fn audit_integrity(articles: &[Article], movements: &[Movement]) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();

    for article in articles {
        let mut history: Vec<&Movement> = movements
            .iter()
            .filter(|m| m.article_id == article.id)
            .collect();
        history.sort_by(|a, b| ledger_order(a, b));

        let mut balance = 0i64;
        for m in history {
            match m.kind {
                MovementKind::Entrada => balance += m.quantity,
                MovementKind::Salida => balance -= m.quantity,
            }
            if balance < 0 {
                violations.push(IntegrityViolation {
                    article_id: article.id,
                    article_name: article.name.clone(),
                    movement_id: m.id,
                    date: m.date,
                    balance,
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn article(id: i64, name: &str) -> Article {
        Article {
            id: ArticleId::new(id),
            name: name.to_string(),
            unit_cost: dec!(1.00),
        }
    }

    fn mv(id: i64, art: i64, kind: MovementKind, qty: i64, date: &str) -> Movement {
        Movement {
            id: MovementId::new(id),
            article_id: ArticleId::new(art),
            kind,
            quantity: qty,
            date: date.parse().unwrap(),
            description: String::new(),
            unit_cost: Decimal::ZERO,
            author: None,
        }
    }

    #[test]
    fn clean_history_has_no_violations() {
        let articles = vec![article(1, "PAPEL")];
        let movements = vec![
            mv(1, 1, MovementKind::Entrada, 10, "2024-01-01"),
            mv(2, 1, MovementKind::Salida, 10, "2024-01-15"),
        ];
        assert!(audit_integrity(&articles, &movements).is_empty());
    }

    #[test]
    fn out_of_band_overdraw_is_reported() {
        let articles = vec![article(1, "PAPEL")];
        let movements = vec![
            mv(1, 1, MovementKind::Entrada, 5, "2024-01-01"),
            // Edited out-of-band to exceed what ever entered.
            mv(2, 1, MovementKind::Salida, 8, "2024-01-15"),
            mv(3, 1, MovementKind::Entrada, 10, "2024-02-01"),
        ];

        let violations = audit_integrity(&articles, &movements);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].movement_id, MovementId::new(2));
        assert_eq!(violations[0].balance, -3);
    }

    #[test]
    fn same_day_pair_is_not_a_false_positive() {
        let articles = vec![article(1, "PAPEL")];
        // Salida has the lower id but the Entrada must fold first.
        let movements = vec![
            mv(1, 1, MovementKind::Salida, 4, "2024-03-01"),
            mv(2, 1, MovementKind::Entrada, 10, "2024-03-01"),
        ];
        assert!(audit_integrity(&articles, &movements).is_empty());
    }
}
