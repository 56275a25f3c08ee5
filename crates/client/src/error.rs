//! Unified error type for library consumers.
//!
//! Each layer keeps its own error enum (`StoreError`, `RemoteError`,
//! `CheckoutError`, `ConfigError`); this module folds them into a single
//! `ClientError` for callers like the CLI that cross all of them.

use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::remote::RemoteError;
use crate::store::StoreError;

/// Top-level error for ToyCart client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local store backend failed to open.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Remote cart or order service failed.
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Checkout flow failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;
