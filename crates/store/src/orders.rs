//! Order records.
//!
//! Orders are created whole at checkout and immutable afterwards except for
//! `status` and `admin_note`, which only admin actions touch. Both
//! mutations carry the version the caller read; a mismatch means another
//! editor got there first and the write is refused.
//!
//! New orders are prepended, so the document reads newest-first without
//! relying on the human-readable `order_date` being sortable.

use boostline_core::order::StoredOrder;
use boostline_core::types::{CustomerId, OrderId, OrderStatus};

use crate::engine::{Document, JsonStore};
use crate::error::StoreError;

/// Repository for order records.
pub struct OrderRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub(crate) const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Persist a new order, prepending it to the collection.
    ///
    /// The order's generated ID is rechecked against existing orders and
    /// silently regenerated on collision, the same strategy registration
    /// uses for customer IDs.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure; the collection is
    /// untouched in that case.
    pub async fn insert(&self, mut order: StoredOrder) -> Result<StoredOrder, StoreError> {
        self.store
            .update(Document::Orders, move |orders: &mut Vec<StoredOrder>| {
                while orders.iter().any(|o| o.order_id == order.order_id) {
                    order.order_id = OrderId::generate();
                }
                orders.insert(0, order.clone());
                tracing::info!(
                    order_id = %order.order_id,
                    customer_id = %order.customer_id,
                    total = %order.total_amount,
                    "order persisted"
                );
                Ok(order)
            })
            .await
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn all(&self) -> Result<Vec<StoredOrder>, StoreError> {
        self.store.read(Document::Orders).await
    }

    /// Orders belonging to one customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn by_customer(&self, customer: &CustomerId) -> Result<Vec<StoredOrder>, StoreError> {
        let orders: Vec<StoredOrder> = self.store.read(Document::Orders).await?;
        Ok(orders
            .into_iter()
            .filter(|o| &o.customer_id == customer)
            .collect())
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn get(&self, id: &OrderId) -> Result<Option<StoredOrder>, StoreError> {
        let orders: Vec<StoredOrder> = self.store.read(Document::Orders).await?;
        Ok(orders.into_iter().find(|o| &o.order_id == id))
    }

    /// Set an order's status. Any status is reachable from any other.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown order and
    /// [`StoreError::VersionMismatch`] if the order changed since
    /// `expected_version` was read.
    pub async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        expected_version: u64,
    ) -> Result<StoredOrder, StoreError> {
        self.mutate(id, expected_version, move |order| {
            order.status = status;
        })
        .await
    }

    /// Overwrite an order's admin note (customer-visible).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown order and
    /// [`StoreError::VersionMismatch`] on a stale version.
    pub async fn set_admin_note(
        &self,
        id: &OrderId,
        note: String,
        expected_version: u64,
    ) -> Result<StoredOrder, StoreError> {
        self.mutate(id, expected_version, move |order| {
            order.admin_note = (!note.is_empty()).then_some(note);
        })
        .await
    }

    /// Delete an order. Irreversible; there is no soft-delete.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown order.
    pub async fn delete(&self, id: &OrderId) -> Result<(), StoreError> {
        let id = id.clone();
        self.store
            .update(Document::Orders, move |orders: &mut Vec<StoredOrder>| {
                let before = orders.len();
                orders.retain(|o| o.order_id != id);
                if orders.len() == before {
                    return Err(StoreError::NotFound(format!("order {id}")));
                }
                tracing::info!(order_id = %id, "order deleted");
                Ok(())
            })
            .await
    }

    /// Version-checked mutation of `status`/`admin_note`. `items` and
    /// `total_amount` are deliberately unreachable from here.
    async fn mutate(
        &self,
        id: &OrderId,
        expected_version: u64,
        apply: impl FnOnce(&mut StoredOrder) + Send,
    ) -> Result<StoredOrder, StoreError> {
        let id = id.clone();
        self.store
            .update(Document::Orders, move |orders: &mut Vec<StoredOrder>| {
                let order = orders
                    .iter_mut()
                    .find(|o| o.order_id == id)
                    .ok_or_else(|| StoreError::NotFound(format!("order {id}")))?;
                if order.version != expected_version {
                    return Err(StoreError::VersionMismatch {
                        expected: expected_version,
                        actual: order.version,
                    });
                }
                apply(order);
                order.version += 1;
                Ok(order.clone())
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use boostline_core::cart::{Cart, CartItem};
    use boostline_core::catalog::{BoostType, Platform};
    use boostline_core::order::PaymentDetails;
    use boostline_core::types::{CartItemId, Price, WhatsappNumber};

    async fn store() -> JsonStore {
        let dir = std::env::temp_dir().join(format!("boostline-orders-{}", uuid::Uuid::new_v4()));
        JsonStore::open(dir).await.unwrap()
    }

    fn order_for(customer: &CustomerId) -> StoredOrder {
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
        let payment = PaymentDetails::new("0771234567", Some("12345678901234"), None).unwrap();
        StoredOrder::submit(Some(customer.clone()), &cart, payment).unwrap()
    }

    #[tokio::test]
    async fn test_insert_prepends_newest_first() {
        let store = store().await;
        let customer = CustomerId::generate();
        let first = store.orders().insert(order_for(&customer)).await.unwrap();
        let second = store.orders().insert(order_for(&customer)).await.unwrap();

        let all = store.orders().all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].order_id, second.order_id);
        assert_eq!(all[1].order_id, first.order_id);
    }

    #[tokio::test]
    async fn test_by_customer_scopes() {
        let store = store().await;
        let alice = CustomerId::generate();
        let bob = CustomerId::generate();
        store.orders().insert(order_for(&alice)).await.unwrap();
        store.orders().insert(order_for(&bob)).await.unwrap();

        let mine = store.orders().by_customer(&alice).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].customer_id, alice);
    }

    #[tokio::test]
    async fn test_status_mutation_bumps_version() {
        let store = store().await;
        let customer = CustomerId::generate();
        let order = store.orders().insert(order_for(&customer)).await.unwrap();
        assert_eq!(order.version, 0);

        let updated = store
            .orders()
            .set_status(&order.order_id, OrderStatus::Completed, 0)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Completed);
        assert_eq!(updated.version, 1);

        // Completed can go right back to Pending - no transition restriction.
        let back = store
            .orders()
            .set_status(&order.order_id, OrderStatus::Pending, 1)
            .await
            .unwrap();
        assert_eq!(back.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_stale_version_is_refused() {
        let store = store().await;
        let customer = CustomerId::generate();
        let order = store.orders().insert(order_for(&customer)).await.unwrap();

        store
            .orders()
            .set_status(&order.order_id, OrderStatus::Processing, 0)
            .await
            .unwrap();

        // A second editor still holding version 0 loses.
        let result = store
            .orders()
            .set_admin_note(&order.order_id, "on it".to_owned(), 0)
            .await;
        assert!(matches!(
            result,
            Err(StoreError::VersionMismatch {
                expected: 0,
                actual: 1
            })
        ));
    }

    #[tokio::test]
    async fn test_note_overwrites_and_empty_clears() {
        let store = store().await;
        let customer = CustomerId::generate();
        let order = store.orders().insert(order_for(&customer)).await.unwrap();

        let with_note = store
            .orders()
            .set_admin_note(&order.order_id, "started".to_owned(), 0)
            .await
            .unwrap();
        assert_eq!(with_note.admin_note.as_deref(), Some("started"));

        let cleared = store
            .orders()
            .set_admin_note(&order.order_id, String::new(), 1)
            .await
            .unwrap();
        assert_eq!(cleared.admin_note, None);
    }

    #[tokio::test]
    async fn test_delete_removes_everywhere() {
        let store = store().await;
        let customer = CustomerId::generate();
        let order = store.orders().insert(order_for(&customer)).await.unwrap();

        store.orders().delete(&order.order_id).await.unwrap();
        assert!(store.orders().all().await.unwrap().is_empty());
        assert!(
            store
                .orders()
                .by_customer(&customer)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(matches!(
            store.orders().delete(&order.order_id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_order_not_found() {
        let store = store().await;
        let result = store
            .orders()
            .set_status(&OrderId::generate(), OrderStatus::Completed, 0)
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
