//! End-to-end storefront flow: wizard, cart arithmetic, checkout guards,
//! and order snapshotting.

use axum::http::StatusCode;
use serde_json::json;

use boostline_integration_tests::{Client, TestStack, add_boost_to_cart};

async fn register(client: &mut Client) {
    let (status, _) = client
        .post(
            "/auth/register",
            json!({
                "email": "customer@example.com",
                "phone": "94712345678",
                "password": "password123",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_wizard_prices_and_cart_totals() {
    let stack = TestStack::new().await;
    let mut client = stack.storefront_client();
    register(&mut client).await;

    // tiktok / Likes / 1k at 150, count 1.
    let body = add_boost_to_cart(&mut client, "tiktok", "Likes", "1k", "94712345678").await;
    assert_eq!(body["cart"]["items"][0]["price"], "150");

    // youtube / Views / 2k at 1200, bumped to count 2.
    let body = add_boost_to_cart(&mut client, "youtube", "Views", "2k", "94712345678").await;
    let second_id = body["cart"]["items"][1]["id"].as_str().unwrap().to_owned();
    let (status, cart) = client
        .post(&format!("/cart/items/{second_id}/count"), json!({ "delta": 1 }))
        .await;
    assert_eq!(status, StatusCode::OK);

    // 150*1 + 1200*2 = 2550; badge count 1 + 2 = 3.
    assert_eq!(cart["total"], "2550");
    assert_eq!(cart["count"], 3);
}

#[tokio::test]
async fn test_wizard_rejects_invalid_combinations() {
    let stack = TestStack::new().await;
    let mut client = stack.storefront_client();

    client.post_empty("/wizard").await;
    client
        .post("/wizard/platform", json!({ "platform": "youtube" }))
        .await;

    // YouTube does not offer Followers; the state machine refuses even
    // though a UI should never have offered it.
    let (status, body) = client
        .post("/wizard/boost-type", json!({ "boost_type": "Followers" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("does not offer"));

    // A quantity label from another pair is refused too.
    client
        .post("/wizard/boost-type", json!({ "boost_type": "Views" }))
        .await;
    let (status, _) = client
        .post("/wizard/quantity", json!({ "quantity_label": "100k" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Details guard: 10-digit contact is not a valid WhatsApp number.
    client
        .post("/wizard/quantity", json!({ "quantity_label": "2k" }))
        .await;
    let (status, _) = client
        .post(
            "/wizard/details",
            json!({ "link": "https://youtube.com/watch", "whatsapp": "0771234567" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_requires_login() {
    let stack = TestStack::new().await;
    let mut client = stack.storefront_client();
    add_boost_to_cart(&mut client, "tiktok", "Likes", "1k", "94712345678").await;

    let (status, body) = client
        .post("/checkout", json!({ "sender_phone": "0771234567" }))
        .await;
    // Turned back toward login, not a failed order.
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["redirect"], "/auth/login");
}

#[tokio::test]
async fn test_checkout_payment_guard() {
    let stack = TestStack::new().await;
    let mut client = stack.storefront_client();
    register(&mut client).await;
    add_boost_to_cart(&mut client, "tiktok", "Likes", "1k", "94712345678").await;

    // 10-digit sender phone, no reference, no receipt: blocked.
    let (status, _) = client
        .post("/checkout", json!({ "sender_phone": "0771234567" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The block happened before any mutation.
    let (_, cart) = client.get("/cart").await;
    assert_eq!(cart["count"], 1);

    // An 11-digit sender phone is the wrong format here.
    let (status, _) = client
        .post(
            "/checkout",
            json!({ "sender_phone": "94712345678", "reference_number": "12345678901234" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Adding a 14-digit reference allows the submission.
    let (status, body) = client
        .post(
            "/checkout",
            json!({ "sender_phone": "0771234567", "reference_number": "12345678901234" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "checkout failed: {body}");
    assert_eq!(body["order_id"].as_str().unwrap().len(), 15);
    assert_eq!(body["total_amount"], "150");

    // Success cleared the cart.
    let (_, cart) = client.get("/cart").await;
    assert_eq!(cart["count"], 0);
}

#[tokio::test]
async fn test_submitted_orders_are_immutable_snapshots() {
    let stack = TestStack::new().await;
    let mut client = stack.storefront_client();
    register(&mut client).await;

    add_boost_to_cart(&mut client, "tiktok", "Likes", "1k", "94712345678").await;
    add_boost_to_cart(&mut client, "youtube", "Views", "2k", "94712345678").await;

    let (status, submitted) = client
        .post(
            "/checkout",
            json!({ "sender_phone": "0771234567", "reference_number": "12345678901234" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(submitted["total_amount"], "1350");

    // Mutate the (new) cart heavily after submission.
    let body = add_boost_to_cart(&mut client, "instagram", "Likes", "5k", "94712345678").await;
    let item_id = body["cart"]["items"][0]["id"].as_str().unwrap().to_owned();
    client
        .post(&format!("/cart/items/{item_id}/count"), json!({ "delta": 7 }))
        .await;

    // The stored order still has exactly the two snapshotted items.
    let (status, orders) = client.get("/orders").await;
    assert_eq!(status, StatusCode::OK);
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["items"].as_array().unwrap().len(), 2);
    assert_eq!(orders[0]["total_amount"], "1350");
    assert_eq!(orders[0]["status"], "Pending");
    // Contact was denormalized from the first item.
    assert_eq!(orders[0]["customer_contact"], "94712345678");
}

#[tokio::test]
async fn test_active_order_badge_counts_pending_and_processing() {
    let stack = TestStack::new().await;
    let mut client = stack.storefront_client();
    register(&mut client).await;

    let (_, active) = client.get("/orders/active").await;
    assert_eq!(active["active_count"], 0);

    add_boost_to_cart(&mut client, "tiktok", "Likes", "1k", "94712345678").await;
    client
        .post(
            "/checkout",
            json!({ "sender_phone": "0771234567", "reference_number": "12345678901234" }),
        )
        .await;

    let (_, active) = client.get("/orders/active").await;
    assert_eq!(active["active_count"], 1);
}

#[tokio::test]
async fn test_tips_degrade_to_fallback_without_api_key() {
    let stack = TestStack::new().await;
    let mut client = stack.storefront_client();

    let (status, body) = client
        .post("/tips", json!({ "platform": "tiktok", "goal": "more likes" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["tips"],
        "AI features are currently unavailable. Please contact support."
    );
}

#[tokio::test]
async fn test_cart_item_removal_and_clamp() {
    let stack = TestStack::new().await;
    let mut client = stack.storefront_client();

    let body = add_boost_to_cart(&mut client, "facebook", "Likes", "1k", "94712345678").await;
    let item_id = body["cart"]["items"][0]["id"].as_str().unwrap().to_owned();

    // Decrement below 1 clamps, never removes.
    let (_, cart) = client
        .post(&format!("/cart/items/{item_id}/count"), json!({ "delta": -10 }))
        .await;
    assert_eq!(cart["count"], 1);

    // Explicit removal is the only way out.
    let (status, cart) = client.delete(&format!("/cart/items/{item_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["count"], 0);

    // Unknown items 404.
    let (status, _) = client.delete(&format!("/cart/items/{item_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
