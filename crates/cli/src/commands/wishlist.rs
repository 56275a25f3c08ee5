//! Local wishlist commands.

use toycart_client::cart::WishlistEntry;
use toycart_core::{CurrencyCode, Price, ProductId};

use super::{CommandError, open_manager, parse_price};

/// Toggle a product's wishlist membership.
pub fn toggle(
    id: i32,
    name: &str,
    price: &str,
    category: &str,
    image: &str,
) -> Result<(), CommandError> {
    let (_, mut cart) = open_manager()?;
    let product_id = ProductId::new(id);

    cart.toggle_wishlist(WishlistEntry {
        product_id,
        name: name.to_owned(),
        price: Price::new(parse_price(price)?, CurrencyCode::INR),
        image_ref: image.to_owned(),
        category: category.to_owned(),
    });

    if cart.is_wishlisted(product_id) {
        tracing::info!("Added product {id} to wishlist");
    } else {
        tracing::info!("Removed product {id} from wishlist");
    }
    Ok(())
}

/// Print the wishlist entries.
pub fn show() -> Result<(), CommandError> {
    let (_, cart) = open_manager()?;

    if cart.wishlist().is_empty() {
        tracing::info!("Wishlist is empty");
        return Ok(());
    }

    for entry in cart.wishlist() {
        tracing::info!(
            "  {} ({}) - {}",
            entry.name,
            entry.category,
            entry.price.display()
        );
    }
    Ok(())
}
