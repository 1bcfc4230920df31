//! `almacen-store` — the data-store collaborator boundary.
//!
//! The hosted backend is the sole source of truth; this crate defines the
//! seam the application talks through (`InventoryStore`) and ships an
//! in-memory implementation for tests/dev. A remote client implementing the
//! same trait slots in without touching the service or ledger layers.

pub mod error;
pub mod in_memory;
pub mod r#trait;

pub use error::StoreError;
pub use in_memory::InMemoryStore;
pub use r#trait::{InventoryStore, MovementDraft};
