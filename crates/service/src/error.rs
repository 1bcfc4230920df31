use almacen_core::DomainError;
use almacen_store::StoreError;

/// Errors surfaced by the service layer. Domain and store failures are
/// wrapped as-is; the remaining variants are business rules enforced
/// here because they need a view across articles and movements.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// An exit would draw more units than the article currently holds.
    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },

    /// An entry cannot shrink below the exits already committed against it.
    #[error("exits dated on or after this entry already commit {committed} units")]
    DependentExits { committed: i64 },

    /// An article still holding units cannot be removed.
    #[error("article still holds {stock} units")]
    ArticleHasStock { stock: i64 },
}

pub type ServiceResult<T> = Result<T, ServiceError>;
