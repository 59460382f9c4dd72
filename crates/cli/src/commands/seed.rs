//! Seed the store with demo data for local development.
//!
//! Creates one demo customer and a couple of orders in different statuses
//! so both surfaces have something to show. Running twice is safe: the
//! duplicate registration is reported and seeding stops without touching
//! existing data.

use tracing::info;

use boostline_core::cart::{Cart, CartItem};
use boostline_core::catalog::{BoostType, Platform};
use boostline_core::order::{PaymentDetails, StoredOrder};
use boostline_core::pricing;
use boostline_core::types::{CartItemId, OrderStatus, WhatsappNumber};
use boostline_core::types::credential::hash_password;
use boostline_core::user::{User, UserRole};
use boostline_store::JsonStore;

use crate::commands::open_store;

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PHONE: &str = "94712345678";
const DEMO_PASSWORD: &str = "demo-password";

/// Seed demo data.
///
/// # Errors
///
/// Returns an error on storage failure or if the demo customer already
/// exists.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store().await?;

    let customer = store
        .users()
        .register(
            DEMO_EMAIL.parse()?,
            DEMO_PHONE.parse()?,
            hash_password(DEMO_PASSWORD)?,
            UserRole::Customer,
            Some("Demo Customer".to_owned()),
        )
        .await?;
    info!(customer_id = %customer.id, "demo customer created ({DEMO_EMAIL} / {DEMO_PASSWORD})");

    let pending = seed_order(
        &store,
        &customer,
        &[(Platform::Tiktok, BoostType::Likes, "1k", 1)],
    )
    .await?;
    info!(order_id = %pending.order_id, "seeded pending order");

    let processing = seed_order(
        &store,
        &customer,
        &[
            (Platform::Youtube, BoostType::Views, "2k", 2),
            (Platform::Instagram, BoostType::Followers, "1k", 1),
        ],
    )
    .await?;
    store
        .orders()
        .set_status(&processing.order_id, OrderStatus::Processing, 0)
        .await?;
    info!(order_id = %processing.order_id, "seeded processing order");

    info!("Seeding complete");
    Ok(())
}

async fn seed_order(
    store: &JsonStore,
    customer: &User,
    lines: &[(Platform, BoostType, &str, u32)],
) -> Result<StoredOrder, Box<dyn std::error::Error>> {
    let mut cart = Cart::new();
    for &(platform, boost, label, count) in lines {
        cart.add(CartItem {
            id: CartItemId::new(),
            platform,
            boost_type: boost,
            quantity_label: label.to_owned(),
            link: format!("https://{}.example.com/demo", platform.id()),
            whatsapp: WhatsappNumber::parse(DEMO_PHONE)?,
            note: None,
            price: pricing::price(platform, boost, label),
            count,
        });
    }

    let payment = PaymentDetails::new("0771234567", Some("12345678901234"), None)?;
    let order = StoredOrder::submit(Some(customer.id.clone()), &cart, payment)?;
    Ok(store.orders().insert(order).await?)
}
