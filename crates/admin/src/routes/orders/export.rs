//! CSV export.
//!
//! One row per cart line item, order-level fields duplicated across an
//! order's rows. The export honors the active status filter and search but
//! never pagination - it is the whole filtered set.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use tracing::instrument;

use boostline_core::order::StoredOrder;

use crate::error::Result;
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

use super::types::{OrdersQuery, apply_filters};

/// Column header, fixed.
const HEADER: &str = "Order ID,Date,Customer ID,Contact,Platform,Service,Quantity,Link,Note,Unit Price,Total,Status,PayMethod,SenderPhone,RefNo";

/// Download the filtered orders as CSV.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn csv(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<impl IntoResponse> {
    let status = query.status_filter()?;
    let orders = state.store().orders().all().await?;
    let filtered = apply_filters(orders, status, query.q.as_deref());

    let body = render(&filtered);
    let filename = format!(
        "boostline_orders_{}.csv",
        chrono::Local::now().format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

/// Render the filtered orders, one row per line item.
fn render(orders: &[StoredOrder]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for order in orders {
        for item in &order.items {
            let row = [
                order.order_id.to_string(),
                order.order_date.clone(),
                order.customer_id.to_string(),
                order.customer_contact.to_string(),
                item.platform.id().to_string(),
                item.boost_type.label().to_string(),
                item.quantity_label.clone(),
                item.link.clone(),
                item.note.clone().unwrap_or_default(),
                item.price.to_string(),
                order.total_amount.to_string(),
                order.status.to_string(),
                order.payment.method.to_string(),
                order.payment.sender_phone.to_string(),
                order
                    .payment
                    .reference_number
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
            ];
            let line: Vec<String> = row.iter().map(|field| escape(field)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
    }

    out
}

/// Quote a field when it contains a separator, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
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

    fn two_item_order() -> StoredOrder {
        let mut cart = Cart::new();
        cart.add(CartItem {
            id: CartItemId::new(),
            platform: Platform::Tiktok,
            boost_type: BoostType::Likes,
            quantity_label: "1k".to_owned(),
            link: "https://example.com/a".to_owned(),
            whatsapp: WhatsappNumber::parse("94712345678").unwrap(),
            note: Some("fast, please".to_owned()),
            price: Price::from_major(150),
            count: 1,
        });
        cart.add(CartItem {
            id: CartItemId::new(),
            platform: Platform::Youtube,
            boost_type: BoostType::Views,
            quantity_label: "2k".to_owned(),
            link: "https://example.com/b".to_owned(),
            whatsapp: WhatsappNumber::parse("94712345678").unwrap(),
            note: None,
            price: Price::from_major(1200),
            count: 2,
        });
        let payment = PaymentDetails::new("0771234567", None, Some("aGk=".to_owned())).unwrap();
        StoredOrder::submit(Some(CustomerId::generate()), &cart, payment).unwrap()
    }

    #[test]
    fn test_one_row_per_line_item() {
        let order = two_item_order();
        let csv = render(std::slice::from_ref(&order));
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.len(), 3, "header plus one row per item");

        // Order-level fields are duplicated on both rows.
        assert!(lines[1].starts_with(order.order_id.as_str()));
        assert!(lines[2].starts_with(order.order_id.as_str()));
        assert!(lines[1].contains("tiktok,Likes,1k"));
        assert!(lines[2].contains("youtube,Views,2k"));
        // Both rows carry the order total with two decimals.
        assert!(lines[1].contains("2550.00"));
        assert!(lines[2].contains("2550.00"));
        // Missing reference number exports as N/A.
        assert!(lines[1].ends_with("N/A"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let order = two_item_order();
        let csv = render(&[order]);
        assert!(csv.contains("\"fast, please\""));
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
