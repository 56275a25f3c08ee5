//! Wire types shared by the remote cart and order services.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use toycart_core::{OrderId, PaymentMethod, PaymentStatus, ProductId};

/// A line in the server-side cart, keyed by (user, product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Shipping fields collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Request body for order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(flatten)]
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

/// A confirmed order, with server-computed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_flattens_shipping() {
        let request = OrderRequest {
            shipping: ShippingDetails {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: "9000000000".to_string(),
                address: "1 MG Road".to_string(),
                city: "Bengaluru".to_string(),
                state: "KA".to_string(),
                postal_code: "560001".to_string(),
            },
            payment_method: PaymentMethod::CashOnDelivery,
            payment_status: PaymentStatus::Pending,
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["name"], "Asha");
        assert_eq!(json["payment_method"], "cash-on-delivery");
        assert_eq!(json["payment_status"], "pending");
    }
}
