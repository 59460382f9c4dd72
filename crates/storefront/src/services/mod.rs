//! Storefront services.

pub mod auth;
pub mod checkout;
pub mod order_feed;
pub mod tips;
