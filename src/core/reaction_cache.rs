//! Reaction-removal cache - Which wishlist item each rendered message stands for.
//!
//! When a wishlist is listed, every item goes out as its own message. The cache maps
//! that message's id to the item so a reaction on it can delete the right row. It is
//! bounded two ways: entries older than the TTL are ignored and purged, and once the
//! capacity is reached the oldest entry is dropped to make room.

use crate::core::wishlist::WishlistKey;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

#[derive(Debug)]
struct Entry {
    key: WishlistKey,
    inserted_at: Instant,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<u64, Entry>,
    // Insertion order; may hold ids that were already removed from `entries`.
    order: VecDeque<u64>,
}

impl Inner {
    fn purge_expired(&mut self, ttl: Duration, now: Instant) {
        while let Some(&oldest) = self.order.front() {
            match self.entries.get(&oldest) {
                Some(entry) if now.duration_since(entry.inserted_at) < ttl => break,
                Some(_) => {
                    self.entries.remove(&oldest);
                    self.order.pop_front();
                }
                None => {
                    self.order.pop_front();
                }
            }
        }
    }

    fn evict_oldest(&mut self) {
        while let Some(oldest) = self.order.pop_front() {
            if self.entries.remove(&oldest).is_some() {
                trace!("Evicted message {} from reaction cache", oldest);
                return;
            }
        }
    }
}

/// Bounded, expiring map from message id to [`WishlistKey`].
#[derive(Debug)]
pub struct ReactionCache {
    capacity: usize,
    ttl: Duration,
    inner: Mutex<Inner>,
}

impl ReactionCache {
    /// Creates an empty cache. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Remembers that `message_id` renders `key`.
    pub async fn insert(&self, message_id: u64, key: WishlistKey) {
        let now = Instant::now();
        let mut inner = self.inner.lock().await;
        inner.purge_expired(self.ttl, now);

        if inner.entries.remove(&message_id).is_some() {
            inner.order.retain(|id| *id != message_id);
        }
        while inner.entries.len() >= self.capacity {
            inner.evict_oldest();
        }

        inner.entries.insert(
            message_id,
            Entry {
                key,
                inserted_at: now,
            },
        );
        inner.order.push_back(message_id);
    }

    /// The item rendered by `message_id`, unless unknown or expired.
    pub async fn get(&self, message_id: u64) -> Option<WishlistKey> {
        let inner = self.inner.lock().await;
        inner
            .entries
            .get(&message_id)
            .filter(|entry| entry.inserted_at.elapsed() < self.ttl)
            .map(|entry| entry.key.clone())
    }

    /// Forgets `message_id`. Returns the item it rendered, if it was tracked.
    pub async fn remove(&self, message_id: u64) -> Option<WishlistKey> {
        let mut inner = self.inner.lock().await;
        let entry = inner.entries.remove(&message_id)?;
        inner.order.retain(|id| *id != message_id);
        Some(entry.key)
    }

    /// Number of tracked messages, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    /// Whether nothing is tracked.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
