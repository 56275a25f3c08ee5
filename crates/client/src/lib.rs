//! ToyCart Client library.
//!
//! This crate is the client-side cart core for ToyCart Studio:
//!
//! - [`store`] - durable key-value persistence for the cart and wishlist
//! - [`cart`] - the in-memory cart/wishlist manager over that store
//! - [`remote`] - interfaces to the server-side cart mirror and order service
//! - [`checkout`] - the reconcile-then-place-order flow
//!
//! # Architecture
//!
//! The local store is the canonical cart while the user browses; the
//! server-side cart is only brought into agreement at checkout time, by the
//! reconciliation routine in [`checkout`]. Order placement then reads the
//! reconciled server cart, and the local cart is cleared only after a
//! confirmed success.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod remote;
pub mod store;
