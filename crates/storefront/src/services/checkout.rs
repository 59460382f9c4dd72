//! Checkout: turn the device's cart plus a payment proof into a persisted
//! order.
//!
//! The submit is all-or-nothing from the caller's point of view: payment
//! validation happens before anything is touched, the order write is a
//! single atomic document swap, and the cart is cleared only after the
//! order is safely on disk. A failed submit leaves the cart exactly as it
//! was, so retrying is always safe.

use thiserror::Error;
use tracing::instrument;

use boostline_core::order::{OrderError, PaymentDetails, PaymentError, StoredOrder};
use boostline_core::types::{CustomerId, DeviceId};
use boostline_store::{JsonStore, StoreError};

/// Raw checkout form input.
#[derive(Debug, Clone)]
pub struct CheckoutInput {
    /// 10-digit payment-app sender number.
    pub sender_phone: String,
    /// 14-digit transfer reference, if provided.
    pub reference_number: Option<String>,
    /// Base64 receipt image (raw or data URL), if provided.
    pub receipt_image: Option<String>,
}

/// Errors rejecting a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The device's cart is empty.
    #[error("cannot submit an empty cart")]
    EmptyCart,
    /// The payment proof failed validation.
    #[error("{0}")]
    Payment(#[from] PaymentError),
    /// Persistence failed; the cart is untouched.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Checkout service.
pub struct CheckoutService<'a> {
    store: &'a JsonStore,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Submit the device's cart as an order.
    ///
    /// `customer` of `None` records the guest sentinel; the route layer
    /// normally enforces authentication before it gets here.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Payment`] before any mutation for an
    /// invalid proof, [`CheckoutError::EmptyCart`] for an empty cart, and
    /// [`CheckoutError::Store`] if persistence fails - in which case no
    /// order exists and the cart is untouched.
    #[instrument(skip(self, input), fields(device = %device))]
    pub async fn submit(
        &self,
        device: DeviceId,
        customer: Option<CustomerId>,
        input: CheckoutInput,
    ) -> Result<StoredOrder, CheckoutError> {
        // Validate the proof before reading any state.
        let payment = PaymentDetails::new(
            &input.sender_phone,
            input.reference_number.as_deref(),
            input.receipt_image,
        )?;

        let cart = self.store.carts().get(device).await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order = StoredOrder::submit(customer, &cart, payment).map_err(|e| match e {
            OrderError::EmptyCart => CheckoutError::EmptyCart,
        })?;

        // The one real persistence point. Failure here means no order and an
        // unchanged cart.
        let order = self.store.orders().insert(order).await?;

        // Only now clear the live cart. If this fails the order stands and
        // the submission still counts as succeeded; the leftover cart is a
        // cosmetic problem, not a correctness one.
        if let Err(e) = self.store.carts().clear(device).await {
            tracing::warn!(order_id = %order.order_id, error = %e, "order persisted but cart clear failed");
        }

        Ok(order)
    }
}
