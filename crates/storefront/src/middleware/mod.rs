//! Middleware for the storefront.

pub mod session;

pub use session::{Device, OptionalAuth, RequireAuth, device_cookie};
