//! The ledger folds: current stock, as-of seeding, and the control card.

use std::collections::HashMap;

use rust_decimal::Decimal;

use almacen_core::ArticleId;
use almacen_inventory::{Article, Movement, MovementKind};

use crate::card::{CardFilter, CardRow, MovementRow, OpeningRow};
use crate::order::ledger_order;

/// Seeded starting point for a windowed card: balance and last-known unit
/// cost accumulated from all movements strictly before the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningBalance {
    pub balance: i64,
    pub last_cost: Decimal,
}

/// Current stock of an article over the entire unfiltered history.
///
/// Unknown article ids yield 0 (empty sum). A negative result means the
/// non-negativity invariant was broken by an out-of-band write; callers
/// should treat it as a data-integrity alarm, not a normal state.
pub fn current_stock(movements: &[Movement], article_id: ArticleId) -> i64 {
    movements
        .iter()
        .filter(|m| m.article_id == article_id)
        .map(Movement::signed_quantity)
        .sum()
}

/// Fold all movements strictly before the filter window into an opening
/// balance and last-known unit cost for one article.
///
/// Entrada rows add to the balance and update the cost whenever their own
/// cost is > 0; Salida rows only subtract. Starts from (0, article cost).
pub fn opening_balance(
    movements: &[Movement],
    article: &Article,
    filter: &CardFilter,
) -> OpeningBalance {
    let mut prior: Vec<&Movement> = movements
        .iter()
        .filter(|m| m.article_id == article.id && filter.precedes_window(m.date))
        .collect();
    prior.sort_by(|a, b| ledger_order(a, b));

    let mut balance = 0i64;
    let mut last_cost = article.unit_cost;
    for m in prior {
        match m.kind {
            MovementKind::Entrada => {
                balance += m.quantity;
                if m.unit_cost > Decimal::ZERO {
                    last_cost = m.unit_cost;
                }
            }
            MovementKind::Salida => balance -= m.quantity,
        }
    }

    OpeningBalance { balance, last_cost }
}

/// Build the control card: one row per movement in the filter window, each
/// carrying the running balance, last-known unit cost, and valuations.
///
/// Pure function of its inputs — re-invoking with identical snapshots yields
/// identical output. Movements referencing an unknown article are skipped.
/// With no article filter the rows come out concatenated per article
/// (ascending id), each article's run in ledger order. A windowed request
/// for a single article is prefixed with a synthetic opening row.
pub fn build_control_card(
    articles: &[Article],
    movements: &[Movement],
    filter: &CardFilter,
) -> Vec<CardRow> {
    let mut selected: Vec<&Movement> = movements
        .iter()
        .filter(|m| filter.article.is_none_or(|a| m.article_id == a))
        .filter(|m| filter.window_contains(m.date))
        .collect();
    selected.sort_by(|a, b| ledger_order(a, b));

    let mut running: HashMap<ArticleId, (i64, Decimal)> = HashMap::new();
    let mut rows: Vec<CardRow> = Vec::with_capacity(selected.len());

    for m in selected {
        let Some(article) = articles.iter().find(|a| a.id == m.article_id) else {
            continue;
        };

        let (balance, last_cost) = running.entry(article.id).or_insert_with(|| {
            if filter.is_windowed() {
                let seed = opening_balance(movements, article, filter);
                (seed.balance, seed.last_cost)
            } else {
                (0, article.unit_cost)
            }
        });

        match m.kind {
            MovementKind::Entrada => {
                *balance += m.quantity;
                if m.unit_cost > Decimal::ZERO {
                    *last_cost = m.unit_cost;
                }
            }
            MovementKind::Salida => *balance -= m.quantity,
        }

        let effective_cost = if m.unit_cost > Decimal::ZERO {
            m.unit_cost
        } else {
            *last_cost
        };

        rows.push(CardRow::Movement(MovementRow {
            movement_id: m.id,
            article_id: article.id,
            article_name: article.name.clone(),
            date: m.date,
            kind: m.kind,
            quantity: m.quantity,
            description: m.description.clone(),
            unit_cost: m.unit_cost,
            balance: *balance,
            last_cost: *last_cost,
            total_value: Decimal::from(m.quantity) * effective_cost,
            balance_value: Decimal::from(*balance) * *last_cost,
            author: m.author.clone(),
        }));
    }

    // "All articles" output is concatenated per article. The sort is stable,
    // so each article's rows keep their ledger order; regrouping cannot
    // change any balance because balances are tracked per article.
    if filter.article.is_none() {
        rows.sort_by_key(CardRow::article_id);
    }

    if filter.is_windowed() {
        if let Some(article_id) = filter.article {
            if let Some(article) = articles.iter().find(|a| a.id == article_id) {
                let seed = opening_balance(movements, article, filter);
                rows.insert(
                    0,
                    CardRow::Opening(OpeningRow {
                        article_id,
                        article_name: article.name.clone(),
                        balance: seed.balance,
                        last_cost: seed.last_cost,
                        balance_value: Decimal::from(seed.balance) * seed.last_cost,
                    }),
                );
            }
        }
    }

    rows
}
