//! `almacen-ledger` — the stock ledger engine.
//!
//! Pure, deterministic computation over an in-memory snapshot of articles and
//! movements: current stock, chronological running-balance traces ("control
//! cards") with as-of seeding, stock classification, dashboard figures, and
//! an integrity audit. No I/O; callers fetch the snapshot from the store and
//! pass it in by reference.

pub mod audit;
pub mod card;
pub mod engine;
pub mod order;
pub mod status;

pub use audit::{audit_integrity, IntegrityViolation};
pub use card::{CardFilter, CardRow, FilterWarning, MovementRow, OpeningRow};
pub use engine::{build_control_card, current_stock, opening_balance, OpeningBalance};
pub use order::ledger_order;
pub use status::{
    consumption_report, dashboard_stats, stock_summary, ConsumptionRow, DashboardStats,
    StockStatus, StockSummaryRow, LOW_STOCK_THRESHOLD,
};
