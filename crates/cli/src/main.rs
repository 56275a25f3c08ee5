//! ToyCart CLI - drive the cart client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Cart operations (local, no network)
//! toycart cart add -i 1 -n "Plush Dino" -p 1999
//! toycart cart set-qty -i 1 -q 3
//! toycart cart remove -i 1
//! toycart cart show
//! toycart cart clear
//!
//! # Wishlist
//! toycart wishlist toggle -i 2 -n "Wooden Train" -p 999 -c vehicles
//! toycart wishlist show
//!
//! # Checkout (reconciles the server cart, then places the order)
//! toycart checkout --name "Asha" --email asha@example.com --phone 9000000000 \
//!     --address "1 MG Road" --city Bengaluru --state KA --postal-code 560001 \
//!     --payment cash-on-delivery
//! ```
//!
//! # Environment Variables
//!
//! - `TOYCART_API_BASE_URL` - Base URL of the ToyCart backend
//! - `TOYCART_API_TOKEN` - Bearer credential for the authenticated user
//! - `TOYCART_STORE_DIR` - Local store directory (default: `.toycart`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "toycart")]
#[command(author, version, about = "ToyCart Studio CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the local wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Reconcile the server cart and place an order
    Checkout {
        #[command(flatten)]
        args: commands::checkout::CheckoutArgs,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart (or increment its quantity)
    Add {
        /// Product ID
        #[arg(short = 'i', long)]
        id: i32,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price (e.g. 1999 or 19.99)
        #[arg(short, long)]
        price: String,

        /// Image reference
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        #[arg(short = 'i', long)]
        id: i32,
    },
    /// Set a product's quantity (0 removes it)
    SetQty {
        /// Product ID
        #[arg(short = 'i', long)]
        id: i32,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,
    },
    /// Show the cart lines and total
    Show,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Toggle a product's wishlist membership
    Toggle {
        /// Product ID
        #[arg(short = 'i', long)]
        id: i32,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price (e.g. 999)
        #[arg(short, long)]
        price: String,

        /// Product category
        #[arg(short, long, default_value = "")]
        category: String,

        /// Image reference
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Show the wishlist
    Show,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                name,
                price,
                image,
            } => commands::cart::add(id, &name, &price, &image)?,
            CartAction::Remove { id } => commands::cart::remove(id)?,
            CartAction::SetQty { id, quantity } => commands::cart::set_quantity(id, quantity)?,
            CartAction::Show => commands::cart::show()?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Toggle {
                id,
                name,
                price,
                category,
                image,
            } => commands::wishlist::toggle(id, &name, &price, &category, &image)?,
            WishlistAction::Show => commands::wishlist::show()?,
        },
        Commands::Checkout { args } => commands::checkout::run(args).await?,
    }
    Ok(())
}
