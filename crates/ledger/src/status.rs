//! Stock classification and summary figures for the dashboard views.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use almacen_core::ArticleId;
use almacen_inventory::{Article, Movement, MovementKind};

use crate::engine::current_stock;

/// Stock at or below this (and above zero) is flagged as low.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    SinStock,
    StockBajo,
    StockNormal,
}

impl StockStatus {
    pub fn classify(stock: i64) -> Self {
        if stock == 0 {
            StockStatus::SinStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            StockStatus::StockBajo
        } else {
            StockStatus::StockNormal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::SinStock => "Sin Stock",
            StockStatus::StockBajo => "Stock Bajo",
            StockStatus::StockNormal => "Stock Normal",
        }
    }
}

/// One line of the existencias (stock on hand) report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummaryRow {
    pub article_id: ArticleId,
    pub name: String,
    pub stock: i64,
    pub unit_cost: Decimal,
    pub total_value: Decimal,
    pub status: StockStatus,
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_articles: usize,
    pub total_value: Decimal,
    pub low_stock_items: usize,
    pub recent_movements: Vec<Movement>,
}

/// Per-article stock, valuation, and status, ordered by article name.
pub fn stock_summary(articles: &[Article], movements: &[Movement]) -> Vec<StockSummaryRow> {
    let mut rows: Vec<StockSummaryRow> = articles
        .iter()
        .map(|article| {
            let stock = current_stock(movements, article.id);
            StockSummaryRow {
                article_id: article.id,
                name: article.name.clone(),
                stock,
                unit_cost: article.unit_cost,
                total_value: Decimal::from(stock) * article.unit_cost,
                status: StockStatus::classify(stock),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.article_id.cmp(&b.article_id)));
    rows
}

/// One line of the consumption (consumo de papelería) report.
///
/// Consumption is always valued at the article's current unit cost, not the
/// cost recorded on each exit, so the figures match the catalogue valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRow {
    pub article_id: ArticleId,
    pub name: String,
    /// Exits in the selected month/year, valued at the article cost.
    pub period_consumption: Decimal,
    /// Exits across the whole selected year (every year when unfiltered).
    pub annual_consumption: Decimal,
    /// Stock on hand at the end of the selected period.
    pub stock: i64,
    pub unit_cost: Decimal,
    /// `stock × unit_cost`.
    pub balance_value: Decimal,
}

/// Per-article consumption over a month/year window, ordered by article name.
///
/// Without a year the report spans all history and the month is ignored, since
/// a month alone anchors no calendar boundary. Stock is cut off at the end of
/// the selected period rather than windowed, so an article consumed in March
/// still shows what remained after March.
pub fn consumption_report(
    articles: &[Article],
    movements: &[Movement],
    month: Option<u32>,
    year: Option<i32>,
) -> Vec<ConsumptionRow> {
    let in_period = |m: &Movement| match (year, month) {
        (None, _) => true,
        (Some(y), None) => m.date.year() == y,
        (Some(y), Some(mo)) => m.date.year() == y && m.date.month() == mo,
    };
    let in_year = |m: &Movement| year.map_or(true, |y| m.date.year() == y);
    let through_period = |m: &Movement| match (year, month) {
        (None, _) => true,
        (Some(y), None) => m.date.year() <= y,
        (Some(y), Some(mo)) => {
            m.date.year() < y || (m.date.year() == y && m.date.month() <= mo)
        }
    };

    let mut rows: Vec<ConsumptionRow> = articles
        .iter()
        .map(|article| {
            let mut period_exits = 0i64;
            let mut yearly_exits = 0i64;
            let mut stock = 0i64;
            for movement in movements.iter().filter(|m| m.article_id == article.id) {
                if movement.kind == MovementKind::Salida {
                    if in_period(movement) {
                        period_exits += movement.quantity;
                    }
                    if in_year(movement) {
                        yearly_exits += movement.quantity;
                    }
                }
                if through_period(movement) {
                    stock += match movement.kind {
                        MovementKind::Entrada => movement.quantity,
                        MovementKind::Salida => -movement.quantity,
                    };
                }
            }
            ConsumptionRow {
                article_id: article.id,
                name: article.name.clone(),
                period_consumption: Decimal::from(period_exits) * article.unit_cost,
                annual_consumption: Decimal::from(yearly_exits) * article.unit_cost,
                stock,
                unit_cost: article.unit_cost,
                balance_value: Decimal::from(stock) * article.unit_cost,
            }
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.article_id.cmp(&b.article_id)));
    rows
}

/// Dashboard headline figures: article count, total inventory value, number
/// of low-or-empty articles, and the five most recent movements.
pub fn dashboard_stats(articles: &[Article], movements: &[Movement]) -> DashboardStats {
    let mut total_value = Decimal::ZERO;
    let mut low_stock_items = 0;
    for article in articles {
        let stock = current_stock(movements, article.id);
        total_value += Decimal::from(stock) * article.unit_cost;
        if stock <= LOW_STOCK_THRESHOLD {
            low_stock_items += 1;
        }
    }

    let mut recent: Vec<&Movement> = movements.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    let recent_movements = recent.into_iter().take(5).cloned().collect();

    DashboardStats {
        total_articles: articles.len(),
        total_value,
        low_stock_items,
        recent_movements,
    }
}
