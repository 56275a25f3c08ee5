//! Cart and wishlist manager.
//!
//! [`CartManager`] is the canonical in-memory view of the shopper's cart and
//! wishlist, hydrated from the [`LocalStore`](crate::store::LocalStore) at
//! construction and persisted after every mutation. All operations are
//! synchronous and infallible: there is no network here, and persistence
//! failures degrade to in-memory-only inside the store layer.
//!
//! Stock validation is deliberately absent - the server validates at order
//! placement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use toycart_core::{Price, ProductId};

use crate::store::{CART_KEY, LocalStore, WISHLIST_KEY};

/// A single cart line: one product with a quantity.
///
/// At most one line exists per product id within a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub image_ref: String,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.amount * Decimal::from(self.quantity)
    }
}

/// Input for adding a product to the cart (quantity starts at 1).
#[derive(Debug, Clone)]
pub struct CartItemInput {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image_ref: String,
}

/// A saved-for-later product reference, independent of the cart lifecycle.
///
/// At most one entry exists per product id; membership is toggled, never
/// auto-cleared by order placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_ref: String,
    pub category: String,
}

/// The cart/wishlist manager for the current session.
pub struct CartManager {
    store: LocalStore,
    lines: Vec<CartLine>,
    wishlist: Vec<WishlistEntry>,
}

impl CartManager {
    /// Create a manager hydrated from the given store.
    #[must_use]
    pub fn new(store: LocalStore) -> Self {
        let lines: Vec<CartLine> = store.load(CART_KEY);
        let wishlist: Vec<WishlistEntry> = store.load(WISHLIST_KEY);
        Self {
            store,
            lines,
            wishlist,
        }
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Current wishlist entries, in insertion order.
    #[must_use]
    pub fn wishlist(&self) -> &[WishlistEntry] {
        &self.wishlist
    }

    /// Add a product to the cart.
    ///
    /// If a line for this product already exists its quantity is incremented
    /// by 1; otherwise a new line is inserted with quantity 1.
    pub fn add_to_cart(&mut self, item: CartItemInput) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == item.product_id)
        {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product_id: item.product_id,
                name: item.name,
                unit_price: item.unit_price,
                quantity: 1,
                image_ref: item.image_ref,
            });
        }
        self.persist_cart();
    }

    /// Remove a product's line from the cart; no-op if absent.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() != before {
            self.persist_cart();
        }
    }

    /// Set a line's quantity (replace, not increment).
    ///
    /// A quantity of 0 removes the line, matching `remove_from_cart`.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
            self.persist_cart();
        }
    }

    /// Empty the cart collection. The wishlist is untouched.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.persist_cart();
    }

    /// Toggle a product's wishlist membership: add if absent, remove if
    /// present.
    pub fn toggle_wishlist(&mut self, entry: WishlistEntry) {
        let before = self.wishlist.len();
        self.wishlist.retain(|e| e.product_id != entry.product_id);
        if self.wishlist.len() == before {
            self.wishlist.push(entry);
        }
        self.persist_wishlist();
    }

    /// Whether a product is currently wishlisted.
    #[must_use]
    pub fn is_wishlisted(&self, product_id: ProductId) -> bool {
        self.wishlist.iter().any(|e| e.product_id == product_id)
    }

    /// Cart total: sum of unit price times quantity over all lines.
    ///
    /// Always derived from the current lines, never cached, so it cannot
    /// drift from the collection.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total item quantity across all lines (the cart badge number).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    fn persist_cart(&mut self) {
        self.store.save(CART_KEY, &self.lines);
    }

    fn persist_wishlist(&mut self) {
        self.store.save(WISHLIST_KEY, &self.wishlist);
    }
}
