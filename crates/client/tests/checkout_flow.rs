//! End-to-end checkout tests against an in-memory server fake.
//!
//! The fake implements both `RemoteCart` and `OrderGateway` over one shared
//! line map, with switches to reject mutations for chosen products, fail the
//! cart fetch, or reject orders - enough to exercise every reconciliation
//! and placement path without a network.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;

use toycart_client::cart::{CartItemInput, CartManager};
use toycart_client::checkout::{self, CheckoutFlow, CheckoutError, order_totals};
use toycart_client::remote::types::{
    OrderConfirmation, OrderRequest, RemoteCartLine, ShippingDetails,
};
use toycart_client::remote::{OrderGateway, RemoteCart, RemoteError};
use toycart_client::store::LocalStore;
use toycart_core::{CurrencyCode, OrderId, PaymentMethod, PaymentStatus, Price, ProductId};

// =============================================================================
// Fake server
// =============================================================================

#[derive(Default)]
struct FakeServer {
    lines: Mutex<BTreeMap<ProductId, RemoteCartLine>>,
    catalog: HashMap<ProductId, (String, Decimal)>,
    /// Mutations targeting these products are rejected.
    fail_products: HashSet<ProductId>,
    /// Whether `list` fails outright.
    fail_list: bool,
    /// Whether order creation is rejected.
    reject_orders: bool,
    mutations: AtomicUsize,
}

impl FakeServer {
    fn new(catalog: &[(i32, i64)]) -> Self {
        Self {
            catalog: catalog
                .iter()
                .map(|&(id, price)| {
                    (
                        ProductId::new(id),
                        (format!("Toy {id}"), Decimal::from(price)),
                    )
                })
                .collect(),
            ..Self::default()
        }
    }

    fn seed(&self, id: i32, quantity: u32) {
        let product_id = ProductId::new(id);
        let (name, unit_price) = self.catalog.get(&product_id).cloned().unwrap();
        self.lines.lock().unwrap().insert(
            product_id,
            RemoteCartLine {
                product_id,
                name,
                unit_price,
                quantity,
            },
        );
    }

    fn quantities(&self) -> BTreeMap<i32, u32> {
        self.lines
            .lock()
            .unwrap()
            .values()
            .map(|l| (l.product_id.as_i32(), l.quantity))
            .collect()
    }

    fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn check_mutation(&self, product_id: ProductId) -> Result<(), RemoteError> {
        if self.fail_products.contains(&product_id) {
            return Err(RemoteError::Api {
                status: 500,
                message: "simulated failure".to_string(),
            });
        }
        self.mutations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl RemoteCart for FakeServer {
    async fn list(&self) -> Result<Vec<RemoteCartLine>, RemoteError> {
        if self.fail_list {
            return Err(RemoteError::Api {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(self.lines.lock().unwrap().values().cloned().collect())
    }

    async fn add(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError> {
        self.check_mutation(product_id)?;
        let (name, unit_price) = self
            .catalog
            .get(&product_id)
            .cloned()
            .unwrap_or((String::new(), Decimal::ZERO));
        self.lines.lock().unwrap().insert(
            product_id,
            RemoteCartLine {
                product_id,
                name,
                unit_price,
                quantity,
            },
        );
        Ok(())
    }

    async fn set_quantity(&self, product_id: ProductId, quantity: u32) -> Result<(), RemoteError> {
        self.check_mutation(product_id)?;
        if let Some(line) = self.lines.lock().unwrap().get_mut(&product_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    async fn remove(&self, product_id: ProductId) -> Result<(), RemoteError> {
        self.check_mutation(product_id)?;
        self.lines.lock().unwrap().remove(&product_id);
        Ok(())
    }
}

impl OrderGateway for FakeServer {
    async fn create(&self, _order: &OrderRequest) -> Result<OrderConfirmation, RemoteError> {
        if self.reject_orders {
            return Err(RemoteError::Api {
                status: 402,
                message: "payment declined".to_string(),
            });
        }
        let lines: Vec<RemoteCartLine> = self.lines.lock().unwrap().values().cloned().collect();
        if lines.is_empty() {
            return Err(RemoteError::Api {
                status: 400,
                message: "cart is empty".to_string(),
            });
        }
        let totals = order_totals(&lines);
        // The server keeps its cart; clearing is a separate server-side
        // concern, not part of order creation.
        Ok(OrderConfirmation {
            order_id: OrderId::new(1001),
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping: totals.shipping,
            total: totals.total,
            created_at: chrono::Utc::now(),
        })
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn manager() -> CartManager {
    CartManager::new(LocalStore::in_memory())
}

fn add_item(cart: &mut CartManager, id: i32, price: i64, quantity: u32) {
    for _ in 0..quantity {
        cart.add_to_cart(CartItemInput {
            product_id: ProductId::new(id),
            name: format!("Toy {id}"),
            unit_price: Price::new(Decimal::from(price), CurrencyCode::INR),
            image_ref: format!("/images/{id}.jpg"),
        });
    }
}

fn shipping() -> ShippingDetails {
    ShippingDetails {
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9000000000".to_string(),
        address: "1 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "KA".to_string(),
        postal_code: "560001".to_string(),
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

#[tokio::test]
async fn reconcile_updates_and_removes_to_match_local() {
    // local {A: 2}, remote {A: 1, B: 3} => remote {A: 2}
    let server = FakeServer::new(&[(1, 1000), (2, 500)]);
    server.seed(1, 1);
    server.seed(2, 3);

    let mut cart = manager();
    add_item(&mut cart, 1, 1000, 2);

    let report = checkout::reconcile(&server, cart.lines()).await;

    assert_eq!(server.quantities(), BTreeMap::from([(1, 2)]));
    assert_eq!(report.updated, vec![ProductId::new(1)]);
    assert_eq!(report.removed, vec![ProductId::new(2)]);
    assert!(report.added.is_empty());
    assert!(report.is_clean());
}

#[tokio::test]
async fn reconcile_converges_from_arbitrary_divergence() {
    let server = FakeServer::new(&[(1, 100), (2, 200), (3, 300), (4, 400)]);
    server.seed(2, 5);
    server.seed(3, 7);
    server.seed(4, 1);

    let mut cart = manager();
    add_item(&mut cart, 1, 100, 1);
    add_item(&mut cart, 2, 200, 5);
    add_item(&mut cart, 3, 300, 2);

    let report = checkout::reconcile(&server, cart.lines()).await;

    assert_eq!(server.quantities(), BTreeMap::from([(1, 1), (2, 5), (3, 2)]));
    assert_eq!(report.added, vec![ProductId::new(1)]);
    assert_eq!(report.updated, vec![ProductId::new(3)]);
    assert_eq!(report.removed, vec![ProductId::new(4)]);
    assert_eq!(report.unchanged, 1);
}

#[tokio::test]
async fn reconcile_twice_issues_no_mutations_on_second_run() {
    let server = FakeServer::new(&[(1, 100), (2, 200)]);
    server.seed(2, 9);

    let mut cart = manager();
    add_item(&mut cart, 1, 100, 3);
    add_item(&mut cart, 2, 200, 2);

    let first = checkout::reconcile(&server, cart.lines()).await;
    assert!(first.mutations() > 0);

    let issued_before = server.mutation_count();
    let second = checkout::reconcile(&server, cart.lines()).await;

    assert_eq!(second.mutations(), 0);
    assert_eq!(second.unchanged, cart.lines().len());
    assert_eq!(server.mutation_count(), issued_before);
}

#[tokio::test]
async fn reconcile_continues_past_individual_failures() {
    let mut server = FakeServer::new(&[(1, 100), (2, 200), (3, 300)]);
    server.fail_products.insert(ProductId::new(1));
    server.seed(1, 1);
    server.seed(3, 4);

    let mut cart = manager();
    add_item(&mut cart, 1, 100, 2);
    add_item(&mut cart, 2, 200, 1);

    let report = checkout::reconcile(&server, cart.lines()).await;

    // Product 1's update failed, but 2 was still added and 3 removed
    assert_eq!(report.failed, vec![ProductId::new(1)]);
    assert_eq!(report.added, vec![ProductId::new(2)]);
    assert_eq!(report.removed, vec![ProductId::new(3)]);
    assert!(!report.is_clean());
    assert_eq!(server.quantities(), BTreeMap::from([(1, 1), (2, 1)]));
}

// =============================================================================
// Checkout flow
// =============================================================================

#[test]
fn empty_cart_is_rejected_before_any_network() {
    let cart = manager();
    let result = CheckoutFlow::begin(&cart);
    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
}

#[tokio::test]
async fn successful_order_clears_local_cart_only() {
    let server = FakeServer::new(&[(1, 1000)]);
    let mut cart = manager();
    add_item(&mut cart, 1, 1000, 2);

    let confirmation = checkout::place_order(
        &mut cart,
        &server,
        &server,
        shipping(),
        PaymentMethod::CashOnDelivery,
        PaymentStatus::Pending,
    )
    .await
    .unwrap();

    assert_eq!(confirmation.subtotal, Decimal::from(2000));
    assert_eq!(confirmation.tax, Decimal::from(360));
    assert_eq!(confirmation.shipping, Decimal::ZERO);
    assert_eq!(confirmation.total, Decimal::from(2360));

    // Local cart cleared; remote cart left to server-side cleanup
    assert!(cart.lines().is_empty());
    assert_eq!(server.quantities(), BTreeMap::from([(1, 2)]));
}

#[tokio::test]
async fn failed_order_leaves_local_cart_unchanged() {
    let mut server = FakeServer::new(&[(1, 1000)]);
    server.reject_orders = true;

    let mut cart = manager();
    add_item(&mut cart, 1, 1000, 2);
    let lines_before = cart.lines().to_vec();

    let result = checkout::place_order(
        &mut cart,
        &server,
        &server,
        shipping(),
        PaymentMethod::Online,
        PaymentStatus::Paid,
    )
    .await;

    assert!(matches!(result, Err(CheckoutError::Order(_))));
    assert_eq!(cart.lines(), lines_before.as_slice());
}

#[tokio::test]
async fn reconciliation_failure_does_not_block_order() {
    let mut server = FakeServer::new(&[(1, 500)]);
    server.fail_list = true;
    // Remote cart already holds the line from an earlier session
    server.seed(1, 2);

    let mut cart = manager();
    add_item(&mut cart, 1, 500, 2);

    let confirmation = checkout::place_order(
        &mut cart,
        &server,
        &server,
        shipping(),
        PaymentMethod::CashOnDelivery,
        PaymentStatus::Pending,
    )
    .await
    .unwrap();

    assert_eq!(confirmation.subtotal, Decimal::from(1000));
    assert!(cart.lines().is_empty());
}

#[tokio::test]
async fn flow_report_exposes_partial_failures_to_caller() {
    let mut server = FakeServer::new(&[(1, 100), (2, 200)]);
    server.fail_products.insert(ProductId::new(2));
    server.seed(1, 1);

    let mut cart = manager();
    add_item(&mut cart, 1, 100, 1);
    add_item(&mut cart, 2, 200, 3);

    let flow = CheckoutFlow::begin(&cart).unwrap().sync(&server).await;
    assert_eq!(flow.report().failed, vec![ProductId::new(2)]);
    assert_eq!(flow.report().unchanged, 1);

    // Placement still proceeds from whatever state the mirror reached
    let confirmation = flow
        .place_order(
            &server,
            shipping(),
            PaymentMethod::CashOnDelivery,
            PaymentStatus::Pending,
        )
        .await
        .unwrap();
    assert_eq!(confirmation.subtotal, Decimal::from(100));
}

#[tokio::test]
async fn checkout_never_touches_the_wishlist() {
    use toycart_client::cart::WishlistEntry;

    let server = FakeServer::new(&[(1, 1000)]);
    let mut cart = manager();
    add_item(&mut cart, 1, 1000, 1);
    cart.toggle_wishlist(WishlistEntry {
        product_id: ProductId::new(7),
        name: "Toy 7".to_string(),
        price: Price::new(Decimal::from(750), CurrencyCode::INR),
        image_ref: "/images/7.jpg".to_string(),
        category: "plush".to_string(),
    });

    checkout::place_order(
        &mut cart,
        &server,
        &server,
        shipping(),
        PaymentMethod::CashOnDelivery,
        PaymentStatus::Pending,
    )
    .await
    .unwrap();

    assert!(cart.lines().is_empty());
    assert!(cart.is_wishlisted(ProductId::new(7)));
}
