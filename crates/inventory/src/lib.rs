//! `almacen-inventory` — domain records for articles and stock movements.
//!
//! Pure data + validation; persistence lives behind the store boundary and
//! all derived figures (stock, balances) live in `almacen-ledger`.

pub mod article;
pub mod movement;

pub use article::{Article, ArticleUpdate, NewArticle};
pub use movement::{Movement, MovementKind, MovementUpdate, NewMovement};
