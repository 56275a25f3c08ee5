//! Checkout command: reconcile the server cart, place the order, clear the
//! local cart on success.

use clap::{Args, ValueEnum};

use toycart_client::checkout;
use toycart_client::error::ClientError;
use toycart_client::remote::{HttpCartService, ShippingDetails};
use toycart_core::{PaymentMethod, PaymentStatus};

use super::{CommandError, open_manager};

/// Shipping and payment arguments for checkout.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Recipient name
    #[arg(long)]
    pub name: String,

    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Contact phone
    #[arg(long)]
    pub phone: String,

    /// Street address
    #[arg(long)]
    pub address: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// State
    #[arg(long)]
    pub state: String,

    /// Postal code
    #[arg(long)]
    pub postal_code: String,

    /// Payment method
    #[arg(long, value_enum, default_value_t = PaymentArg::CashOnDelivery)]
    pub payment: PaymentArg,
}

/// CLI-facing payment method choice.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaymentArg {
    Online,
    CashOnDelivery,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Online => Self::Online,
            PaymentArg::CashOnDelivery => Self::CashOnDelivery,
        }
    }
}

/// Run the checkout flow end to end.
pub async fn run(args: CheckoutArgs) -> Result<(), CommandError> {
    let (config, mut cart) = open_manager()?;
    let service = HttpCartService::new(&config);

    let payment_method = PaymentMethod::from(args.payment);
    // Online payments are simulated as already captured; COD stays pending
    let payment_status = match payment_method {
        PaymentMethod::Online => PaymentStatus::Paid,
        PaymentMethod::CashOnDelivery => PaymentStatus::Pending,
    };

    let shipping = ShippingDetails {
        name: args.name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        city: args.city,
        state: args.state,
        postal_code: args.postal_code,
    };

    let confirmation = checkout::place_order(
        &mut cart,
        &service,
        &service,
        shipping,
        payment_method,
        payment_status,
    )
    .await
    .map_err(ClientError::from)?;

    tracing::info!(
        "Order {} placed: subtotal {}, tax {}, shipping {}, total {}",
        confirmation.order_id,
        confirmation.subtotal,
        confirmation.tax,
        confirmation.shipping,
        confirmation.total
    );
    Ok(())
}
