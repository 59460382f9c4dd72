//! The active-order feed.
//!
//! Polling is the system's sole update mechanism: a subscription spawns a
//! background task that re-reads the order document on a fixed cadence,
//! filtered to one customer, and publishes changes into a watch channel.
//! Consumers only see the subscription interface, so the poll loop could be
//! swapped for a push channel without touching them.
//!
//! Dropping a [`Subscription`] aborts its task - a torn-down view leaks no
//! timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use boostline_core::types::{CustomerId, OrderId, OrderStatus};
use boostline_store::JsonStore;

/// Status of one of the customer's orders, as carried by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStatusView {
    /// Order ID.
    pub order_id: OrderId,
    /// Current status.
    pub status: OrderStatus,
    /// Customer-visible admin note, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
}

/// One poll's view of a customer's orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct OrdersSnapshot {
    /// Number of active (Pending or Processing) orders - the badge number.
    pub active_count: usize,
    /// Status of every order the customer owns, newest first.
    pub orders: Vec<OrderStatusView>,
}

/// Spawns and owns polling subscriptions over the order document.
#[derive(Clone)]
pub struct OrderFeed {
    store: JsonStore,
    interval: Duration,
    polls: Arc<AtomicU64>,
}

impl OrderFeed {
    /// Create a feed polling at `interval`.
    #[must_use]
    pub fn new(store: JsonStore, interval: Duration) -> Self {
        Self {
            store,
            interval,
            polls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribe to one customer's orders.
    ///
    /// The first poll fires immediately; afterwards the configured cadence
    /// applies. The subscription's channel only wakes on actual change.
    #[must_use]
    pub fn subscribe(&self, customer: CustomerId) -> Subscription {
        let (tx, rx) = watch::channel(OrdersSnapshot::default());
        let store = self.store.clone();
        let interval = self.interval;
        let polls = Arc::clone(&self.polls);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                polls.fetch_add(1, Ordering::Relaxed);

                match poll_once(&store, &customer).await {
                    Ok(snapshot) => {
                        tx.send_if_modified(|current| {
                            if *current == snapshot {
                                false
                            } else {
                                *current = snapshot;
                                true
                            }
                        });
                    }
                    // A failed poll keeps the last good snapshot; the next
                    // tick retries.
                    Err(e) => tracing::warn!(customer_id = %customer, error = %e, "order poll failed"),
                }

                if tx.is_closed() {
                    break;
                }
            }
        });

        Subscription { rx, handle }
    }

    /// Total polls performed across all subscriptions (observability and
    /// tests).
    #[must_use]
    pub fn poll_count(&self) -> u64 {
        self.polls.load(Ordering::Relaxed)
    }
}

async fn poll_once(
    store: &JsonStore,
    customer: &CustomerId,
) -> Result<OrdersSnapshot, boostline_store::StoreError> {
    let orders = store.orders().by_customer(customer).await?;
    let active_count = orders.iter().filter(|o| o.status.is_active()).count();
    let orders = orders
        .into_iter()
        .map(|o| OrderStatusView {
            order_id: o.order_id,
            status: o.status,
            admin_note: o.admin_note,
        })
        .collect();
    Ok(OrdersSnapshot {
        active_count,
        orders,
    })
}

/// A live subscription. Dropping it stops the polling task.
pub struct Subscription {
    rx: watch::Receiver<OrdersSnapshot>,
    handle: JoinHandle<()>,
}

impl Subscription {
    /// The most recent snapshot.
    #[must_use]
    pub fn latest(&self) -> OrdersSnapshot {
        self.rx.borrow().clone()
    }

    /// Wait until the snapshot changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed task has stopped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
