//! Ledger ordering of movements.

use std::cmp::Ordering;

use almacen_inventory::{Movement, MovementKind};

/// Total order used by every ledger fold: date ascending, then Entrada
/// before Salida, then id (insertion order).
///
/// The Entrada-before-Salida tie-break is load-bearing, not cosmetic: with a
/// same-day entry/exit pair the intermediate balance differs depending on
/// which side is folded first, and folding the Salida first can show a
/// spurious negative reading.
pub fn ledger_order(a: &Movement, b: &Movement) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| kind_rank(a.kind).cmp(&kind_rank(b.kind)))
        .then_with(|| a.id.cmp(&b.id))
}

fn kind_rank(kind: MovementKind) -> u8 {
    match kind {
        MovementKind::Entrada => 0,
        MovementKind::Salida => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almacen_core::{ArticleId, MovementId};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn mv(id: i64, date: &str, kind: MovementKind) -> Movement {
        Movement {
            id: MovementId::new(id),
            article_id: ArticleId::new(1),
            kind,
            quantity: 1,
            date: date.parse::<NaiveDate>().unwrap(),
            description: String::new(),
            unit_cost: Decimal::ZERO,
            author: None,
        }
    }

    #[test]
    fn entrada_precedes_salida_on_equal_dates() {
        let salida = mv(1, "2024-03-01", MovementKind::Salida);
        let entrada = mv(2, "2024-03-01", MovementKind::Entrada);
        assert_eq!(ledger_order(&entrada, &salida), Ordering::Less);
        assert_eq!(ledger_order(&salida, &entrada), Ordering::Greater);
    }

    #[test]
    fn date_dominates_kind() {
        let earlier_salida = mv(1, "2024-02-28", MovementKind::Salida);
        let later_entrada = mv(2, "2024-03-01", MovementKind::Entrada);
        assert_eq!(ledger_order(&earlier_salida, &later_entrada), Ordering::Less);
    }

    #[test]
    fn id_breaks_remaining_ties() {
        let first = mv(1, "2024-03-01", MovementKind::Entrada);
        let second = mv(2, "2024-03-01", MovementKind::Entrada);
        assert_eq!(ledger_order(&first, &second), Ordering::Less);
    }
}
