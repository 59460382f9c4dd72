//! Per-device cart mirrors.
//!
//! Carts are keyed by device, not by user: the same browser keeps its cart
//! across reloads and across account switches. An explicit clear (or a
//! successful checkout) is the only reset.

use serde::{Deserialize, Serialize};

use boostline_core::cart::Cart;
use boostline_core::types::DeviceId;

use crate::engine::{Document, JsonStore};
use crate::error::StoreError;

/// One device's cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeviceCart {
    device: DeviceId,
    cart: Cart,
}

/// Repository for cart mirrors.
pub struct CartRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub(crate) const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// The device's cart; empty if the device has none yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn get(&self, device: DeviceId) -> Result<Cart, StoreError> {
        let carts: Vec<DeviceCart> = self.store.read(Document::Carts).await?;
        Ok(carts
            .into_iter()
            .find(|c| c.device == device)
            .map(|c| c.cart)
            .unwrap_or_default())
    }

    /// Read-modify-write the device's cart under the carts-document lock.
    ///
    /// Returns whatever the mutation returns, alongside the resulting cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure; the document is untouched
    /// in that case.
    pub async fn mutate<R: Send>(
        &self,
        device: DeviceId,
        apply: impl FnOnce(&mut Cart) -> R + Send,
    ) -> Result<(Cart, R), StoreError> {
        self.store
            .update(Document::Carts, move |carts: &mut Vec<DeviceCart>| {
                let index = carts.iter().position(|c| c.device == device);
                let entry = match index {
                    Some(index) => carts.get_mut(index).expect("index from position"),
                    None => {
                        carts.push(DeviceCart {
                            device,
                            cart: Cart::new(),
                        });
                        carts.last_mut().expect("just pushed")
                    }
                };
                let result = apply(&mut entry.cart);
                Ok((entry.cart.clone(), result))
            })
            .await
    }

    /// Drop the device's cart entirely.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on storage failure.
    pub async fn clear(&self, device: DeviceId) -> Result<(), StoreError> {
        self.store
            .update(Document::Carts, move |carts: &mut Vec<DeviceCart>| {
                carts.retain(|c| c.device != device);
                Ok::<_, StoreError>(())
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use boostline_core::cart::CartItem;
    use boostline_core::catalog::{BoostType, Platform};
    use boostline_core::types::{CartItemId, Price, WhatsappNumber};

    async fn store() -> JsonStore {
        let dir = std::env::temp_dir().join(format!("boostline-carts-{}", uuid::Uuid::new_v4()));
        JsonStore::open(dir).await.unwrap()
    }

    fn item() -> CartItem {
        CartItem {
            id: CartItemId::new(),
            platform: Platform::Instagram,
            boost_type: BoostType::Likes,
            quantity_label: "1k".to_owned(),
            link: "https://example.com".to_owned(),
            whatsapp: WhatsappNumber::parse("94712345678").unwrap(),
            note: None,
            price: Price::from_major(70),
            count: 1,
        }
    }

    #[tokio::test]
    async fn test_cart_persists_per_device() {
        let store = store().await;
        let device = DeviceId::new();
        let other = DeviceId::new();

        store
            .carts()
            .mutate(device, |cart| cart.add(item()))
            .await
            .unwrap();

        let mine = store.carts().get(device).await.unwrap();
        assert_eq!(mine.len(), 1);

        // Another device sees its own (empty) cart.
        assert!(store.carts().get(other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_resets_device() {
        let store = store().await;
        let device = DeviceId::new();
        store
            .carts()
            .mutate(device, |cart| cart.add(item()))
            .await
            .unwrap();

        store.carts().clear(device).await.unwrap();
        assert!(store.carts().get(device).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutate_returns_result_and_cart() {
        let store = store().await;
        let device = DeviceId::new();
        let line = item();
        let id = line.id;
        store
            .carts()
            .mutate(device, move |cart| cart.add(line))
            .await
            .unwrap();

        let (cart, found) = store
            .carts()
            .mutate(device, move |cart| cart.set_count(id, 2))
            .await
            .unwrap();
        assert!(found);
        assert_eq!(cart.count(), 3);
    }
}
