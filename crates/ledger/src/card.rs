//! Control card rows and filters.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use almacen_core::{ArticleId, MovementId};
use almacen_inventory::MovementKind;

/// Filter for a control card request.
///
/// `article: None` means "all articles, concatenated by article". Month is
/// 1–12; year is a calendar year. A month without a year is accepted but
/// ambiguous — see [`CardFilter::warning`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilter {
    pub article: Option<ArticleId>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Non-blocking condition a caller must surface alongside the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterWarning {
    /// A month filter without a year cannot anchor a calendar boundary: the
    /// window matches that month in every year and the opening seed is empty.
    MonthWithoutYear,
}

impl CardFilter {
    /// True when any month/year bound is present (triggers as-of seeding).
    pub fn is_windowed(&self) -> bool {
        self.month.is_some() || self.year.is_some()
    }

    /// Whether `date` falls strictly before the filter window, i.e. should be
    /// folded into the opening seed. Month alone defines no boundary.
    pub fn precedes_window(&self, date: NaiveDate) -> bool {
        let Some(year) = self.year else {
            return false;
        };
        if date.year() < year {
            return true;
        }
        match self.month {
            Some(month) => date.year() == year && date.month() < month,
            None => false,
        }
    }

    /// Whether `date` falls inside the filter window. No filters → everything.
    pub fn window_contains(&self, date: NaiveDate) -> bool {
        let month_ok = self.month.map_or(true, |m| date.month() == m);
        let year_ok = self.year.map_or(true, |y| date.year() == y);
        month_ok && year_ok
    }

    pub fn warning(&self) -> Option<FilterWarning> {
        if self.month.is_some() && self.year.is_none() {
            Some(FilterWarning::MonthWithoutYear)
        } else {
            None
        }
    }
}

/// One line of a control card.
///
/// The synthetic opening row is a distinct variant so it can never be
/// mistaken for a persisted movement by edit/delete paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum CardRow {
    Opening(OpeningRow),
    Movement(MovementRow),
}

impl CardRow {
    pub fn article_id(&self) -> ArticleId {
        match self {
            CardRow::Opening(r) => r.article_id,
            CardRow::Movement(r) => r.article_id,
        }
    }

    pub fn balance(&self) -> i64 {
        match self {
            CardRow::Opening(r) => r.balance,
            CardRow::Movement(r) => r.balance,
        }
    }

    pub fn balance_value(&self) -> Decimal {
        match self {
            CardRow::Opening(r) => r.balance_value,
            CardRow::Movement(r) => r.balance_value,
        }
    }
}

/// Seeded starting balance shown when a card is restricted to a window that
/// starts after some prior history. Display-only; not a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningRow {
    pub article_id: ArticleId,
    pub article_name: String,
    pub balance: i64,
    pub last_cost: Decimal,
    pub balance_value: Decimal,
}

/// One real movement with its running figures after the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRow {
    pub movement_id: MovementId,
    pub article_id: ArticleId,
    pub article_name: String,
    pub date: NaiveDate,
    pub kind: MovementKind,
    pub quantity: i64,
    pub description: String,
    /// Cost recorded on the movement itself (may be zero = unknown).
    pub unit_cost: Decimal,
    /// Running balance after this row.
    pub balance: i64,
    /// Running last-known unit cost after this row.
    pub last_cost: Decimal,
    /// `quantity × (unit_cost if > 0 else last_cost)`.
    pub total_value: Decimal,
    /// `balance × last_cost`.
    pub balance_value: Decimal,
    pub author: Option<String>,
}
