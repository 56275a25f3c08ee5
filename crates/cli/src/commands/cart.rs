//! Local cart commands.
//!
//! These never touch the network: the cart is local until checkout.

use toycart_client::cart::CartItemInput;
use toycart_core::{CurrencyCode, Price, ProductId};

use super::{CommandError, open_manager, parse_price};

/// Add a product to the cart, or increment its quantity if present.
pub fn add(id: i32, name: &str, price: &str, image: &str) -> Result<(), CommandError> {
    let (_, mut cart) = open_manager()?;
    let unit_price = Price::new(parse_price(price)?, CurrencyCode::INR);

    cart.add_to_cart(CartItemInput {
        product_id: ProductId::new(id),
        name: name.to_owned(),
        unit_price,
        image_ref: image.to_owned(),
    });

    tracing::info!(
        "Added product {id} to cart ({} items, total {})",
        cart.item_count(),
        cart.cart_total()
    );
    Ok(())
}

/// Remove a product's line from the cart.
pub fn remove(id: i32) -> Result<(), CommandError> {
    let (_, mut cart) = open_manager()?;
    cart.remove_from_cart(ProductId::new(id));
    tracing::info!("Removed product {id} ({} items left)", cart.item_count());
    Ok(())
}

/// Set a product's quantity; 0 removes the line.
pub fn set_quantity(id: i32, quantity: u32) -> Result<(), CommandError> {
    let (_, mut cart) = open_manager()?;
    cart.set_quantity(ProductId::new(id), quantity);
    tracing::info!(
        "Set product {id} quantity to {quantity} (total {})",
        cart.cart_total()
    );
    Ok(())
}

/// Print the cart lines and derived totals.
pub fn show() -> Result<(), CommandError> {
    let (_, cart) = open_manager()?;

    if cart.lines().is_empty() {
        tracing::info!("Cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        tracing::info!(
            "  {} x{} @ {} = {}",
            line.name,
            line.quantity,
            line.unit_price.display(),
            line.line_total()
        );
    }
    tracing::info!(
        "{} items, total {}",
        cart.item_count(),
        cart.cart_total()
    );
    Ok(())
}

/// Empty the cart.
pub fn clear() -> Result<(), CommandError> {
    let (_, mut cart) = open_manager()?;
    cart.clear_cart();
    tracing::info!("Cart cleared");
    Ok(())
}
