//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod wishlist;

use rust_decimal::Decimal;
use thiserror::Error;

use toycart_client::cart::CartManager;
use toycart_client::config::ClientConfig;
use toycart_client::error::ClientError;
use toycart_client::store::{FileStore, LocalStore};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Client library error (config, store, remote, checkout).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A price argument was not a valid decimal.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

/// Load config and open the persisted cart manager.
fn open_manager() -> Result<(ClientConfig, CartManager), CommandError> {
    let config = ClientConfig::from_env().map_err(ClientError::from)?;
    let backend = FileStore::open(&config.store_dir).map_err(ClientError::from)?;
    let manager = CartManager::new(LocalStore::new(Box::new(backend)));
    Ok((config, manager))
}

/// Parse a price argument into a `Decimal`.
fn parse_price(raw: &str) -> Result<Decimal, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidPrice(raw.to_owned()))
}
