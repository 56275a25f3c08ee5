//! Checkout: reconcile the server cart, then place the order.
//!
//! The local cart is canonical while the user shops; the server cart is the
//! authoritative source for order creation. This module bridges the two:
//!
//! 1. [`reconcile`] diffs the local cart against the server mirror and
//!    issues the minimal set of mutations to make the mirror match.
//! 2. [`CheckoutFlow`] sequences reconciliation before order placement at
//!    the type level: `place_order` only exists on a synced flow, so caller
//!    discipline is not relied on.
//!
//! Reconciliation is best-effort by design: individual mutation failures are
//! recorded in the [`ReconcileReport`] and logged, but never block the order
//! attempt that follows. Order placement failures, by contrast, do block
//! progress and leave the local cart untouched for retry.

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

use rust_decimal::Decimal;
use thiserror::Error;

use toycart_core::{PaymentMethod, PaymentStatus, ProductId};

use crate::cart::{CartLine, CartManager};
use crate::remote::types::{OrderConfirmation, OrderRequest, RemoteCartLine, ShippingDetails};
use crate::remote::{OrderGateway, RemoteCart, RemoteError};

/// GST rate applied to every order.
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The local cart has no lines; nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// Order creation failed; no order was created and the local cart is
    /// unchanged.
    #[error("order creation failed: {0}")]
    Order(#[from] RemoteError),
}

// =============================================================================
// Order totals
// =============================================================================

/// Order money breakdown: subtotal, 18% tax, free shipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Compute the totals the server will charge for the given cart lines.
#[must_use]
pub fn order_totals(lines: &[RemoteCartLine]) -> OrderTotals {
    let subtotal: Decimal = lines
        .iter()
        .map(|l| l.unit_price * Decimal::from(l.quantity))
        .sum();
    let tax = (subtotal * TAX_RATE).round_dp(2);
    let shipping = Decimal::ZERO;
    OrderTotals {
        subtotal,
        tax,
        shipping,
        total: subtotal + tax + shipping,
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Outcome of one reconciliation pass.
///
/// Failures are collected here instead of propagated: the caller may inspect
/// them, but they never abort the pass or the order attempt that follows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Products added to the mirror (present locally, absent remotely).
    pub added: Vec<ProductId>,
    /// Products whose remote quantity was replaced with the local one.
    pub updated: Vec<ProductId>,
    /// Products removed from the mirror (absent locally).
    pub removed: Vec<ProductId>,
    /// Products whose mutation was rejected by the server.
    pub failed: Vec<ProductId>,
    /// Lines already in agreement; no mutation was issued.
    pub unchanged: usize,
    /// The initial mirror fetch failed, so no mutations were attempted.
    pub fetch_failed: bool,
}

impl ReconcileReport {
    /// Number of mutations successfully issued in this pass.
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }

    /// Whether the pass completed with no failures at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.fetch_failed
    }
}

/// Make the server cart mirror match the local cart lines exactly.
///
/// For each local line: add it remotely if missing, replace the remote
/// quantity if it differs, and issue nothing if already in agreement. Remote
/// lines with no local counterpart are removed. Mutations are issued
/// sequentially; each targets a distinct product id, so no ordering between
/// them is load-bearing.
///
/// Best-effort: per-line failures are logged and recorded in the report, and
/// the pass continues. A failed initial fetch yields a report with
/// `fetch_failed` set and no mutations.
pub async fn reconcile<R: RemoteCart>(remote: &R, local: &[CartLine]) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    let remote_lines = match remote.list().await {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch remote cart, skipping reconciliation");
            report.fetch_failed = true;
            return report;
        }
    };

    let remote_quantities: HashMap<ProductId, u32> = remote_lines
        .iter()
        .map(|l| (l.product_id, l.quantity))
        .collect();

    for line in local {
        match remote_quantities.get(&line.product_id) {
            Some(&quantity) if quantity == line.quantity => report.unchanged += 1,
            Some(_) => match remote.set_quantity(line.product_id, line.quantity).await {
                Ok(()) => report.updated.push(line.product_id),
                Err(e) => {
                    tracing::warn!(
                        product_id = %line.product_id,
                        error = %e,
                        "Failed to update remote cart line"
                    );
                    report.failed.push(line.product_id);
                }
            },
            None => match remote.add(line.product_id, line.quantity).await {
                Ok(()) => report.added.push(line.product_id),
                Err(e) => {
                    tracing::warn!(
                        product_id = %line.product_id,
                        error = %e,
                        "Failed to add remote cart line"
                    );
                    report.failed.push(line.product_id);
                }
            },
        }
    }

    let local_ids: HashSet<ProductId> = local.iter().map(|l| l.product_id).collect();
    for line in &remote_lines {
        if !local_ids.contains(&line.product_id) {
            match remote.remove(line.product_id).await {
                Ok(()) => report.removed.push(line.product_id),
                Err(e) => {
                    tracing::warn!(
                        product_id = %line.product_id,
                        error = %e,
                        "Failed to remove remote cart line"
                    );
                    report.failed.push(line.product_id);
                }
            }
        }
    }

    report
}

// =============================================================================
// Checkout flow
// =============================================================================

/// Marker state: reconciliation has not run yet.
pub struct Unsynced(());

/// Marker state: the server cart has been reconciled.
pub struct Synced(());

/// The two-step checkout protocol.
///
/// A flow begins `Unsynced`; [`CheckoutFlow::sync`] consumes it and returns
/// a `Synced` flow, the only state on which
/// [`place_order`](CheckoutFlow::place_order) exists.
pub struct CheckoutFlow<State> {
    lines: Vec<CartLine>,
    report: ReconcileReport,
    _state: PhantomData<State>,
}

impl CheckoutFlow<Unsynced> {
    /// Begin a checkout from the manager's current cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` before any network activity if the
    /// local cart has no lines.
    pub fn begin(manager: &CartManager) -> Result<Self, CheckoutError> {
        if manager.lines().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            lines: manager.lines().to_vec(),
            report: ReconcileReport::default(),
            _state: PhantomData,
        })
    }

    /// Reconcile the server cart against the local lines.
    ///
    /// Never fails: reconciliation is best-effort, and its outcome is
    /// carried in the synced flow's report.
    pub async fn sync<R: RemoteCart>(self, remote: &R) -> CheckoutFlow<Synced> {
        let report = reconcile(remote, &self.lines).await;
        if !report.is_clean() {
            tracing::warn!(?report, "Reconciliation completed with failures");
        }
        CheckoutFlow {
            lines: self.lines,
            report,
            _state: PhantomData,
        }
    }
}

impl CheckoutFlow<Synced> {
    /// The reconciliation outcome for this flow.
    #[must_use]
    pub const fn report(&self) -> &ReconcileReport {
        &self.report
    }

    /// Place the order from the reconciled server cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Order` if the order service rejects the
    /// request; no order is created and the local cart is untouched.
    pub async fn place_order<G: OrderGateway>(
        self,
        gateway: &G,
        shipping: ShippingDetails,
        payment_method: PaymentMethod,
        payment_status: PaymentStatus,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let request = OrderRequest {
            shipping,
            payment_method,
            payment_status,
        };
        let confirmation = gateway.create(&request).await?;
        tracing::info!(order_id = %confirmation.order_id, "Order placed");
        Ok(confirmation)
    }
}

/// Run the full checkout: sync the server cart, place the order, and clear
/// the local cart on confirmed success.
///
/// On any failure the local cart is left unchanged so the user can retry.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if the local cart is empty, or
/// `CheckoutError::Order` if order creation fails.
pub async fn place_order<R: RemoteCart, G: OrderGateway>(
    manager: &mut CartManager,
    remote: &R,
    gateway: &G,
    shipping: ShippingDetails,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
) -> Result<OrderConfirmation, CheckoutError> {
    let flow = CheckoutFlow::begin(manager)?.sync(remote).await;
    let confirmation = flow
        .place_order(gateway, shipping, payment_method, payment_status)
        .await?;
    // Clear only after a confirmed success, never speculatively. The remote
    // cart is left to server-side cleanup.
    manager.clear_cart();
    Ok(confirmation)
}
