//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation, missing
/// records, stock shortfalls). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. non-positive quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced record is absent; the message names it.
    #[error("not found: {0}")]
    NotFound(String),

    /// A requested quantity exceeds what the catalog item can supply.
    #[error("insufficient stock for {title}: available {available}, requested {requested}")]
    InsufficientStock {
        title: String,
        available: i64,
        requested: i64,
    },

    /// Checkout was attempted with no cart lines.
    #[error("cart is empty")]
    EmptyCart,

    /// The package definition is not active for purchase.
    #[error("package is not active")]
    PackageInactive,

    /// No active, non-exhausted, non-expired entitlement exists for the user.
    #[error("no active package entitlement")]
    NoActiveEntitlement,

    /// A domain invariant was violated (e.g. illegal status transition).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn insufficient_stock(title: impl Into<String>, available: i64, requested: i64) -> Self {
        Self::InsufficientStock {
            title: title.into(),
            available,
            requested,
        }
    }
}
