//! Application services coordinating validation, the store, and the
//! ledger engine. Routes talk to [`InventoryService`], never to the
//! store directly.

mod error;
mod inventory_service;
mod query;

pub use error::{ServiceError, ServiceResult};
pub use inventory_service::{ControlCard, InventoryService};
pub use query::MovementQuery;
