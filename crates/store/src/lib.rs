//! Boostline persistent store.
//!
//! The store is a set of independent keyed JSON documents in a data
//! directory - `users.json`, `orders.json`, `sessions.json`, `carts.json` -
//! each read and replaced whole. There are no partial-field updates: every
//! write serializes the full collection and swaps it in atomically via a
//! temp file and rename.
//!
//! # Concurrency
//!
//! One logical writer per deployment. Within a process, each document has
//! its own async mutex held across read-modify-write, which makes the
//! registration uniqueness checks and the per-order version checks
//! effective critical sections. Reads always hit disk, so a second process
//! polling the order document observes the other's committed writes.
//!
//! # Modules
//!
//! - [`engine`] - the document engine ([`JsonStore`])
//! - [`users`] - user records and registration uniqueness
//! - [`orders`] - order records, version-checked mutations
//! - [`sessions`] - token sessions holding user snapshots
//! - [`carts`] - per-device cart mirrors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carts;
pub mod engine;
pub mod error;
pub mod orders;
pub mod sessions;
pub mod users;

pub use carts::CartRepository;
pub use engine::JsonStore;
pub use error::StoreError;
pub use orders::OrderRepository;
pub use sessions::{SessionRecord, SessionRepository};
pub use users::{RegisterError, UserRecord, UserRepository};
