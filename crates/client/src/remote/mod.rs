//! Interfaces to the server-side cart mirror and order service.
//!
//! The server holds its own per-user cart collection, keyed by product id.
//! It is the authoritative source for order creation, but it is only brought
//! into agreement with the local cart at checkout time - see
//! [`checkout`](crate::checkout).
//!
//! Both collaborators are traits so the checkout flow can be exercised
//! against in-memory fakes; [`HttpCartService`] is the production
//! implementation over the ToyCart JSON API.

mod http;
pub mod types;

pub use http::HttpCartService;
pub use types::{OrderConfirmation, OrderRequest, RemoteCartLine, ShippingDetails};

use thiserror::Error;

use toycart_core::ProductId;

/// Errors from the remote cart and order services.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed (connect, timeout, body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected the request.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Bearer credential missing or rejected.
    #[error("not authenticated")]
    Unauthorized,

    /// Rate limited, retry after the given number of seconds.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The server-side cart mirror for the authenticated user.
///
/// Lines are keyed by product id: at most one line per product, so two
/// mutations in one reconciliation pass never target the same key.
#[allow(async_fn_in_trait)] // implementations stay within this workspace
pub trait RemoteCart {
    /// Fetch the full mirror contents.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the mirror cannot be fetched.
    async fn list(&self) -> Result<Vec<RemoteCartLine>, RemoteError>;

    /// Add a line for a product with the given quantity.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the mutation is rejected.
    async fn add(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError>;

    /// Replace the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the mutation is rejected.
    async fn set_quantity(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError>;

    /// Remove a product's line.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the mutation is rejected.
    async fn remove(&self, product_id: ProductId) -> Result<(), RemoteError>;
}

/// The order service: turns the reconciled server cart into a durable order.
#[allow(async_fn_in_trait)] // implementations stay within this workspace
pub trait OrderGateway {
    /// Create an order from the server cart plus shipping/payment fields.
    ///
    /// On success the server snapshots the cart lines into the order record;
    /// later cart mutations do not affect a placed order.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError` if the order is rejected (empty server cart,
    /// validation failure, network error). No order is created in that case.
    async fn create(&self, order: &OrderRequest) -> Result<OrderConfirmation, RemoteError>;
}
