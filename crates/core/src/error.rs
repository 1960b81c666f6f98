//! Domain error model.

use thiserror::Error;

use crate::id::{OrderId, ProductId, SupplierId};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// missing references, conflicts). Persistence concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An operation referenced a product that is not in the inventory.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// An operation referenced a supplier that is not in the inventory.
    #[error("supplier not found: {0}")]
    SupplierNotFound(SupplierId),

    /// An operation referenced an order that is not in the inventory.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// A record with the same identifier already exists.
    #[error("duplicate identifier: {0}")]
    DuplicateId(String),

    /// The requested report kind has no generator.
    #[error("unsupported report kind: {0:?}")]
    UnsupportedReportKind(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::DuplicateId(msg.into())
    }

    pub fn unsupported_report(kind: impl Into<String>) -> Self {
        Self::UnsupportedReportKind(kind.into())
    }
}
