//! Query types and filter helpers shared by the list and export handlers.

use serde::{Deserialize, Serialize};

use boostline_core::order::StoredOrder;
use boostline_core::types::OrderStatus;

use crate::error::AppError;

/// Fixed page size for the order list.
pub const PAGE_SIZE: usize = 10;

/// Query parameters for listing/exporting orders.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Status filter: a status name or "All" (default).
    pub status: Option<String>,
    /// Free-text search term.
    pub q: Option<String>,
    /// 1-based page number. Out-of-range values clamp into the valid range,
    /// so a stale page from before a filter change can never show an empty
    /// page.
    pub page: Option<usize>,
}

impl OrdersQuery {
    /// Parse the status filter. `None` means no filtering.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown status name.
    pub fn status_filter(&self) -> Result<Option<OrderStatus>, AppError> {
        match self.status.as_deref() {
            None | Some("All" | "") => Ok(None),
            Some(s) => s
                .parse::<OrderStatus>()
                .map(Some)
                .map_err(AppError::BadRequest),
        }
    }
}

/// Whether an order matches the free-text search: case-insensitive
/// substring over order ID, customer ID, contact number, payment sender
/// phone, and reference number.
fn matches_search(order: &StoredOrder, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    let fields = [
        order.order_id.as_str().to_lowercase(),
        order.customer_id.as_str().to_lowercase(),
        order.customer_contact.as_str().to_owned(),
        order.payment.sender_phone.as_str().to_owned(),
        order
            .payment
            .reference_number
            .clone()
            .unwrap_or_default(),
    ];
    fields.iter().any(|field| field.contains(&needle))
}

/// Apply status filter and search to the full order list, preserving the
/// stored (newest-first) ordering.
#[must_use]
pub fn apply_filters(
    orders: Vec<StoredOrder>,
    status: Option<OrderStatus>,
    search: Option<&str>,
) -> Vec<StoredOrder> {
    orders
        .into_iter()
        .filter(|o| status.is_none_or(|wanted| o.status == wanted))
        .filter(|o| match search {
            Some(needle) if !needle.trim().is_empty() => matches_search(o, needle.trim()),
            _ => true,
        })
        .collect()
}

/// One page of the filtered order list.
#[derive(Debug, Serialize)]
pub struct OrdersPage {
    /// Orders on this page, newest first.
    pub orders: Vec<StoredOrder>,
    /// 1-based page number actually served (after clamping).
    pub page: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Total matching orders before pagination.
    pub total_count: usize,
    /// Fixed page size.
    pub page_size: usize,
}

/// Slice the filtered list into the requested page, clamping the page
/// number into the valid range.
#[must_use]
pub fn paginate(filtered: Vec<StoredOrder>, requested_page: Option<usize>) -> OrdersPage {
    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(PAGE_SIZE).max(1);
    let page = requested_page.unwrap_or(1).clamp(1, total_pages);

    let orders = filtered
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    OrdersPage {
        orders,
        page,
        total_pages,
        total_count,
        page_size: PAGE_SIZE,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use boostline_core::cart::{Cart, CartItem};
    use boostline_core::catalog::{BoostType, Platform};
    use boostline_core::order::PaymentDetails;
    use boostline_core::types::{CartItemId, CustomerId, Price, WhatsappNumber};

    fn order(reference: &str) -> StoredOrder {
        let mut cart = Cart::new();
        cart.add(CartItem {
            id: CartItemId::new(),
            platform: Platform::Tiktok,
            boost_type: BoostType::Likes,
            quantity_label: "1k".to_owned(),
            link: "https://example.com".to_owned(),
            whatsapp: WhatsappNumber::parse("94712345678").unwrap(),
            note: None,
            price: Price::from_major(150),
            count: 1,
        });
        let payment = PaymentDetails::new("0771234567", Some(reference), None).unwrap();
        StoredOrder::submit(Some(CustomerId::generate()), &cart, payment).unwrap()
    }

    #[test]
    fn test_status_filter_parses() {
        let all = OrdersQuery {
            status: Some("All".to_owned()),
            ..OrdersQuery::default()
        };
        assert!(all.status_filter().unwrap().is_none());

        let pending = OrdersQuery {
            status: Some("Pending".to_owned()),
            ..OrdersQuery::default()
        };
        assert_eq!(pending.status_filter().unwrap(), Some(OrderStatus::Pending));

        let bogus = OrdersQuery {
            status: Some("Shipped".to_owned()),
            ..OrdersQuery::default()
        };
        assert!(bogus.status_filter().is_err());
    }

    #[test]
    fn test_status_filter_excludes_and_includes() {
        let mut completed = order("11111111111111");
        completed.status = OrderStatus::Completed;
        let pending = order("22222222222222");
        let orders = vec![completed.clone(), pending.clone()];

        let only_pending = apply_filters(orders.clone(), Some(OrderStatus::Pending), None);
        assert_eq!(only_pending.len(), 1);
        assert_eq!(only_pending[0].order_id, pending.order_id);

        let only_completed = apply_filters(orders, Some(OrderStatus::Completed), None);
        assert_eq!(only_completed.len(), 1);
        assert_eq!(only_completed[0].order_id, completed.order_id);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let target = order("12345678901234");
        let other = order("99999999999999");
        let orders = vec![target.clone(), other];

        // By order id, lowercased.
        let needle = target.order_id.as_str().to_lowercase();
        let hits = apply_filters(orders.clone(), None, Some(&needle));
        assert_eq!(hits.len(), 1);

        // By reference number substring.
        let hits = apply_filters(orders.clone(), None, Some("4567890123"));
        assert_eq!(hits.len(), 1);

        // By contact number (shared by both).
        let hits = apply_filters(orders.clone(), None, Some("94712345678"));
        assert_eq!(hits.len(), 2);

        // Blank search matches everything.
        let hits = apply_filters(orders, None, Some("   "));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_pagination_clamps() {
        let orders: Vec<StoredOrder> = (0..23).map(|_| order("12345678901234")).collect();

        let page1 = paginate(orders.clone(), None);
        assert_eq!(page1.page, 1);
        assert_eq!(page1.orders.len(), PAGE_SIZE);
        assert_eq!(page1.total_pages, 3);
        assert_eq!(page1.total_count, 23);

        let page3 = paginate(orders.clone(), Some(3));
        assert_eq!(page3.orders.len(), 3);

        // Stale page numbers clamp instead of going blank.
        let beyond = paginate(orders.clone(), Some(99));
        assert_eq!(beyond.page, 3);
        let zero = paginate(orders, Some(0));
        assert_eq!(zero.page, 1);

        let empty = paginate(Vec::new(), Some(5));
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.orders.is_empty());
    }
}
