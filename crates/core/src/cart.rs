//! Cart line items and cart arithmetic.
//!
//! A cart is an ordered list of configured boosts. Each item's unit price is
//! resolved from the price table once, when the wizard adds it, and frozen
//! thereafter - later price-table changes never reprice a cart.

use serde::{Deserialize, Serialize};

use crate::catalog::{BoostType, Platform};
use crate::types::{CartItemId, Price, WhatsappNumber};

/// One configured boost inside a cart (or, snapshotted, inside an order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Random unique token for this line item.
    pub id: CartItemId,
    /// Target platform.
    pub platform: Platform,
    /// Boost type; always a member of the platform's allowed set.
    pub boost_type: BoostType,
    /// String key into the price table (e.g. `"1k"`), not a numeric quantity.
    pub quantity_label: String,
    /// Target URL the boost applies to.
    pub link: String,
    /// 11-digit contact number for this item.
    pub whatsapp: WhatsappNumber,
    /// Optional free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Unit price, frozen at add-time.
    pub price: Price,
    /// Number of units, always >= 1.
    pub count: u32,
}

impl CartItem {
    /// Line total: unit price times count.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.count)
    }
}

/// An ordered list of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an item to the end of the cart.
    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Remove the item with the given ID.
    ///
    /// Returns `true` if an item was removed. This is the only way an item
    /// leaves the cart short of [`Self::clear`] - count decrements never
    /// remove.
    pub fn remove(&mut self, id: CartItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Apply a count delta to the item with the given ID, clamping the
    /// result to a minimum of 1.
    ///
    /// Returns `true` if the item exists.
    pub fn set_count(&mut self, id: CartItemId, delta: i32) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                let next = i64::from(item.count) + i64::from(delta);
                item.count = u32::try_from(next.max(1)).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * count` across all items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of counts across all items (the badge number).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.count).sum()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Deep copy of the line items, for order snapshots.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }
}
