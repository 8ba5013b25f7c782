// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskboard Contributors

//! Change notifications for per-owner task lists.
//!
//! The dashboard UI keeps its list view live by re-reading
//! [`TaskDatabase::list_by_owner`] whenever that owner's result set may have
//! changed. This module is the seam between mutations and those re-reads:
//! handlers call [`TaskFeed::notify`] after every successful create, update,
//! delete, or restore, and a subscriber awaits [`TaskSubscription::changed`]
//! before fetching the next snapshot.
//!
//! Subscriptions are lazy and restartable: dropping one and subscribing again
//! simply resumes from the current state, and a subscriber that falls behind
//! is woken anyway (it re-reads the full list, so missed intermediate
//! notifications are harmless). Delivery to browsers is a transport concern
//! outside this crate.
//!
//! [`TaskDatabase::list_by_owner`]: super::TaskDatabase::list_by_owner

use tokio::sync::broadcast;

/// Buffered notifications per feed. Lagging subscribers are woken, not
/// dropped, so a small buffer suffices.
const FEED_CAPACITY: usize = 64;

/// Broadcast hub for task-list change notifications.
#[derive(Clone)]
pub struct TaskFeed {
    tx: broadcast::Sender<String>,
}

impl TaskFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Signal that `owner_id`'s result set may have changed.
    ///
    /// Never fails: with no subscribers the notification is simply dropped.
    pub fn notify(&self, owner_id: &str) {
        let _ = self.tx.send(owner_id.to_string());
    }

    /// Subscribe to changes of one owner's task list.
    pub fn subscribe(&self, owner_id: impl Into<String>) -> TaskSubscription {
        TaskSubscription {
            rx: self.tx.subscribe(),
            owner_id: owner_id.into(),
        }
    }
}

impl Default for TaskFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// A live subscription filtered to a single owner.
pub struct TaskSubscription {
    rx: broadcast::Receiver<String>,
    owner_id: String,
}

impl TaskSubscription {
    /// Wait until the subscribed owner's result set may have changed.
    ///
    /// Returns `false` when the feed has shut down (all senders dropped).
    /// A lagged receiver counts as changed: the subscriber re-reads the
    /// list either way, so overflow only costs a redundant read.
    pub async fn changed(&mut self) -> bool {
        loop {
            match self.rx.recv().await {
                Ok(owner) if owner == self.owner_id => return true,
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => return true,
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_wakes_on_matching_owner() {
        let feed = TaskFeed::new();
        let mut sub = feed.subscribe("u1");

        feed.notify("u1");
        assert!(sub.changed().await);
    }

    #[tokio::test]
    async fn subscriber_skips_other_owners() {
        let feed = TaskFeed::new();
        let mut sub = feed.subscribe("u1");

        feed.notify("u2");
        feed.notify("u1");
        assert!(sub.changed().await);

        // The u2 notification was filtered out, not queued.
        feed.notify("u2");
        feed.notify("u1");
        assert!(sub.changed().await);
    }

    #[tokio::test]
    async fn changed_returns_false_when_feed_closes() {
        let feed = TaskFeed::new();
        let mut sub = feed.subscribe("u1");

        drop(feed);
        assert!(!sub.changed().await);
    }

    #[tokio::test]
    async fn notify_without_subscribers_is_harmless() {
        let feed = TaskFeed::new();
        feed.notify("u1");
    }

    #[tokio::test]
    async fn resubscribing_restarts_the_stream() {
        let feed = TaskFeed::new();

        let sub = feed.subscribe("u1");
        drop(sub);

        let mut sub = feed.subscribe("u1");
        feed.notify("u1");
        assert!(sub.changed().await);
    }

    #[tokio::test]
    async fn lagged_subscriber_is_woken() {
        let feed = TaskFeed::new();
        let mut sub = feed.subscribe("u1");

        // Overflow the channel buffer.
        for _ in 0..(FEED_CAPACITY * 2) {
            feed.notify("u1");
        }
        assert!(sub.changed().await);
    }
}
