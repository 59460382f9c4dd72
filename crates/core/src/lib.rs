//! Boostline Core - Shared domain library.
//!
//! This crate provides the domain model used across all Boostline components:
//! - `storefront` - Public-facing ordering API
//! - `admin` - Internal order-management panel
//! - `cli` - Command-line tools for account management and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain logic - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, phone numbers,
//!   emails, and statuses
//! - [`catalog`] - Platforms, boost types, and quantity options
//! - [`pricing`] - The static price table
//! - [`cart`] - Cart line items and cart arithmetic
//! - [`wizard`] - The five-step order-configuration state machine
//! - [`order`] - Payment proof and persisted order records
//! - [`user`] - User identity

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod pricing;
pub mod types;
pub mod user;
pub mod wizard;

pub use cart::{Cart, CartItem};
pub use catalog::{BoostType, Platform};
pub use order::{OrderError, PaymentDetails, PaymentError, PaymentMethod, StoredOrder};
pub use types::*;
pub use user::{User, UserRole};
pub use wizard::{WizardError, WizardState, WizardStep};
