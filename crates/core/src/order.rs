//! Payment proof and persisted order records.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem};
use crate::types::{CustomerId, OrderId, OrderStatus, Price, SenderPhone, WhatsappNumber};

/// Maximum receipt image size before encoding, in bytes.
pub const MAX_RECEIPT_BYTES: usize = 2 * 1024 * 1024;

/// Required digit count for a payment reference number.
pub const REFERENCE_DIGITS: usize = 14;

/// Payment methods. There is exactly one today; the enum keeps the stored
/// value stable if more arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Ez Cash")]
    EzCash,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EzCash => write!(f, "Ez Cash"),
        }
    }
}

/// Errors rejecting a payment proof. All of these are validation errors:
/// they surface inline, before any state mutation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentError {
    /// The sender phone is not a 10-digit local number.
    #[error("{0}")]
    InvalidSenderPhone(#[from] crate::types::PhoneError),
    /// A reference number was given but is not exactly 14 digits.
    #[error("reference number must be exactly {REFERENCE_DIGITS} digits")]
    InvalidReference,
    /// Neither a reference number nor a receipt image was provided.
    #[error("a reference number or a receipt image is required")]
    MissingProof,
    /// The receipt attachment is not valid base64.
    #[error("receipt image is not valid base64 data")]
    ReceiptUndecodable,
    /// The receipt image exceeds the upload limit.
    #[error("receipt image exceeds {MAX_RECEIPT_BYTES} bytes")]
    ReceiptTooLarge,
}

/// Manual payment proof collected at checkout.
///
/// The sender phone is a 10-digit *local* payment-app number - deliberately
/// a different format from the 11-digit WhatsApp contact numbers used on
/// cart items. At least one of `reference_number` / `receipt_image` must be
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Payment method (fixed).
    pub method: PaymentMethod,
    /// 10-digit sender number the transfer came from.
    pub sender_phone: SenderPhone,
    /// 14-digit transfer reference, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    /// Base64-encoded receipt image (raw base64 or data URL), if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
}

impl PaymentDetails {
    /// Validate raw checkout input into a payment proof.
    ///
    /// # Errors
    ///
    /// Rejects a malformed sender phone, a non-14-digit reference, an
    /// undecodable or oversized receipt, and the absence of both proofs.
    /// Nothing is mutated on rejection.
    pub fn new(
        sender_phone: &str,
        reference_number: Option<&str>,
        receipt_image: Option<String>,
    ) -> Result<Self, PaymentError> {
        let sender_phone = SenderPhone::parse(sender_phone)?;

        let reference_number = match reference_number.map(str::trim).filter(|s| !s.is_empty()) {
            Some(reference) => {
                let well_formed = reference.len() == REFERENCE_DIGITS
                    && reference.bytes().all(|b| b.is_ascii_digit());
                if !well_formed {
                    return Err(PaymentError::InvalidReference);
                }
                Some(reference.to_owned())
            }
            None => None,
        };

        let receipt_image = match receipt_image.filter(|s| !s.is_empty()) {
            Some(receipt) => {
                check_receipt_size(&receipt)?;
                Some(receipt)
            }
            None => None,
        };

        if reference_number.is_none() && receipt_image.is_none() {
            return Err(PaymentError::MissingProof);
        }

        Ok(Self {
            method: PaymentMethod::EzCash,
            sender_phone,
            reference_number,
            receipt_image,
        })
    }
}

/// Decode the receipt payload (raw base64 or a `data:` URL) and enforce the
/// pre-encoding size limit.
fn check_receipt_size(receipt: &str) -> Result<(), PaymentError> {
    let encoded = receipt
        .split_once(";base64,")
        .map_or(receipt, |(_, data)| data);
    let bytes = BASE64
        .decode(encoded)
        .map_err(|_| PaymentError::ReceiptUndecodable)?;
    if bytes.len() > MAX_RECEIPT_BYTES {
        return Err(PaymentError::ReceiptTooLarge);
    }
    Ok(())
}

/// Errors creating an order record.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderError {
    /// Checkout requires at least one cart item.
    #[error("cannot submit an empty cart")]
    EmptyCart,
}

/// A persisted order.
///
/// `items` and `total_amount` are immutable once created; only `status` and
/// `admin_note` change afterwards, exclusively through admin actions, which
/// carry `version` for optimistic concurrency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOrder {
    /// 15-character random alphanumeric ID (distinct from customer IDs).
    pub order_id: OrderId,
    /// Owning customer, or the guest sentinel.
    pub customer_id: CustomerId,
    /// Primary contact, denormalized from the FIRST cart item's whatsapp.
    pub customer_contact: WhatsappNumber,
    /// Human-readable submission timestamp. Not sortable; ordering comes
    /// from insert position (newest first).
    pub order_date: String,
    /// Deep snapshot of the cart at submission time.
    pub items: Vec<CartItem>,
    /// Total computed from the snapshot.
    pub total_amount: Price,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Payment proof.
    pub payment: PaymentDetails,
    /// Customer-visible note from the admin, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    /// Optimistic-concurrency stamp, bumped on every mutation.
    #[serde(default)]
    pub version: u64,
}

impl StoredOrder {
    /// Build a pending order from the live cart.
    ///
    /// The cart is deep-copied: later cart mutations never reach the order.
    /// `customer` of `None` records the guest sentinel. The generated order
    /// ID may still be swapped by the repository's uniqueness recheck.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`] for an empty cart.
    pub fn submit(
        customer: Option<CustomerId>,
        cart: &Cart,
        payment: PaymentDetails,
    ) -> Result<Self, OrderError> {
        let items = cart.snapshot();
        let first = items.first().ok_or(OrderError::EmptyCart)?;
        let customer_contact = first.whatsapp.clone();
        let total_amount = items.iter().map(CartItem::line_total).sum();

        Ok(Self {
            order_id: OrderId::generate(),
            customer_id: customer.unwrap_or_else(CustomerId::guest),
            customer_contact,
            order_date: chrono::Local::now().format("%d/%m/%Y, %H:%M:%S").to_string(),
            items,
            total_amount,
            status: OrderStatus::Pending,
            payment,
            admin_note: None,
            version: 0,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{BoostType, Platform};
    use crate::types::CartItemId;

    fn cart_with(amounts: &[(i64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for &(amount, count) in amounts {
            cart.add(CartItem {
                id: CartItemId::new(),
                platform: Platform::Tiktok,
                boost_type: BoostType::Likes,
                quantity_label: "1k".to_owned(),
                link: "https://example.com".to_owned(),
                whatsapp: WhatsappNumber::parse("94712345678").unwrap(),
                note: None,
                price: Price::from_major(amount),
                count,
            });
        }
        cart
    }

    fn proof() -> PaymentDetails {
        PaymentDetails::new("0771234567", Some("12345678901234"), None).unwrap()
    }

    #[test]
    fn test_payment_requires_some_proof() {
        assert!(matches!(
            PaymentDetails::new("0771234567", None, None),
            Err(PaymentError::MissingProof)
        ));
    }

    #[test]
    fn test_payment_reference_alone_suffices() {
        let p = PaymentDetails::new("0771234567", Some("12345678901234"), None).unwrap();
        assert_eq!(p.reference_number.as_deref(), Some("12345678901234"));
        assert_eq!(p.method, PaymentMethod::EzCash);
    }

    #[test]
    fn test_payment_receipt_alone_suffices() {
        let receipt = BASE64.encode(b"fake image bytes");
        assert!(PaymentDetails::new("0771234567", None, Some(receipt)).is_ok());
    }

    #[test]
    fn test_payment_rejects_bad_sender_phone() {
        assert!(matches!(
            PaymentDetails::new("94712345678", Some("12345678901234"), None),
            Err(PaymentError::InvalidSenderPhone(_))
        ));
    }

    #[test]
    fn test_payment_rejects_malformed_reference() {
        assert!(matches!(
            PaymentDetails::new("0771234567", Some("1234"), None),
            Err(PaymentError::InvalidReference)
        ));
        assert!(matches!(
            PaymentDetails::new("0771234567", Some("1234567890123x"), None),
            Err(PaymentError::InvalidReference)
        ));
    }

    #[test]
    fn test_payment_accepts_data_url_receipt() {
        let receipt = format!("data:image/png;base64,{}", BASE64.encode(b"png"));
        assert!(PaymentDetails::new("0771234567", None, Some(receipt)).is_ok());
    }

    #[test]
    fn test_payment_rejects_oversized_receipt() {
        let receipt = BASE64.encode(vec![0u8; MAX_RECEIPT_BYTES + 1]);
        assert!(matches!(
            PaymentDetails::new("0771234567", None, Some(receipt)),
            Err(PaymentError::ReceiptTooLarge)
        ));
    }

    #[test]
    fn test_submit_snapshots_cart() {
        let mut cart = cart_with(&[(150, 1), (1200, 2)]);
        let order = StoredOrder::submit(Some(CustomerId::generate()), &cart, proof()).unwrap();

        assert_eq!(order.total_amount, Price::from_major(2550));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.version, 0);

        // Mutating the cart afterwards must not reach the order.
        let id = cart.items()[0].id;
        cart.set_count(id, 10);
        cart.clear();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_amount, Price::from_major(2550));
    }

    #[test]
    fn test_submit_rejects_empty_cart() {
        let cart = Cart::new();
        assert!(matches!(
            StoredOrder::submit(None, &cart, proof()),
            Err(OrderError::EmptyCart)
        ));
    }

    #[test]
    fn test_guest_sentinel_when_unauthenticated() {
        let cart = cart_with(&[(70, 1)]);
        let order = StoredOrder::submit(None, &cart, proof()).unwrap();
        assert!(order.customer_id.is_guest());
    }

    #[test]
    fn test_contact_comes_from_first_item() {
        let mut cart = cart_with(&[(150, 1)]);
        cart.add(CartItem {
            whatsapp: WhatsappNumber::parse("94700000000").unwrap(),
            ..cart.items()[0].clone()
        });
        let order = StoredOrder::submit(None, &cart, proof()).unwrap();
        assert_eq!(order.customer_contact.as_str(), "94712345678");
    }
}
