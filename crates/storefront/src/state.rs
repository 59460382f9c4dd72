//! Application state shared across handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use boostline_core::types::DeviceId;
use boostline_core::wizard::WizardState;
use boostline_store::JsonStore;

use crate::config::StorefrontConfig;
use crate::services::order_feed::OrderFeed;
use crate::services::tips::TipsService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the document store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: JsonStore,
    feed: OrderFeed,
    tips: TipsService,
    /// In-progress wizard configurations, keyed by device. Wizard state is
    /// never persisted - abandoning the device abandons the configuration.
    wizards: Mutex<HashMap<DeviceId, WizardState>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: JsonStore) -> Self {
        let feed = OrderFeed::new(store.clone(), config.poll_interval);
        let tips = TipsService::new(&config.tips);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                feed,
                tips,
                wizards: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &JsonStore {
        &self.inner.store
    }

    /// Get a reference to the active-order feed.
    #[must_use]
    pub fn feed(&self) -> &OrderFeed {
        &self.inner.feed
    }

    /// Get a reference to the tips assistant.
    #[must_use]
    pub fn tips(&self) -> &TipsService {
        &self.inner.tips
    }

    /// Run `apply` against the device's wizard, creating a fresh one on
    /// first touch.
    ///
    /// # Panics
    ///
    /// Panics if the wizard table mutex is poisoned, which only happens
    /// after a panic inside another `apply`.
    pub fn with_wizard<R>(&self, device: DeviceId, apply: impl FnOnce(&mut WizardState) -> R) -> R {
        let mut wizards = self.inner.wizards.lock().expect("wizard table poisoned");
        apply(wizards.entry(device).or_default())
    }

    /// Replace the device's wizard with `fresh` (after an add-to-cart or an
    /// explicit restart).
    ///
    /// # Panics
    ///
    /// Panics if the wizard table mutex is poisoned.
    pub fn reset_wizard(&self, device: DeviceId, fresh: WizardState) {
        let mut wizards = self.inner.wizards.lock().expect("wizard table poisoned");
        wizards.insert(device, fresh);
    }
}
