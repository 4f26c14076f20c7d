//! Snapshots of gateway state the bot needs after Discord stops sending it.
//!
//! Delete events carry only ids and presence updates carry only the new status,
//! so the bot remembers recent message content and the last seen status itself.

use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;

use crate::model::{event::PresenceStatus, message::MessageSnapshot};

pub struct SnapshotCache {
    messages: RwLock<MessageStore>,
    presences: RwLock<HashMap<u64, PresenceStatus>>,
}

/// Most recent messages, evicted oldest first once `capacity` is reached.
struct MessageStore {
    capacity: usize,
    order: VecDeque<u64>,
    entries: HashMap<u64, MessageSnapshot>,
}

impl SnapshotCache {
    pub fn new(message_capacity: usize) -> Self {
        Self {
            messages: RwLock::new(MessageStore {
                capacity: message_capacity,
                order: VecDeque::new(),
                entries: HashMap::new(),
            }),
            presences: RwLock::new(HashMap::new()),
        }
    }

    /// Stores or replaces a message snapshot.
    ///
    /// # Returns
    /// - The snapshot previously stored under the same id, if any
    pub async fn insert_message(&self, message: MessageSnapshot) -> Option<MessageSnapshot> {
        let mut store = self.messages.write().await;

        if store.capacity == 0 {
            return None;
        }

        let id = message.id;
        let previous = store.entries.insert(id, message);
        if previous.is_some() {
            return previous;
        }

        store.order.push_back(id);
        while store.order.len() > store.capacity {
            if let Some(evicted) = store.order.pop_front() {
                store.entries.remove(&evicted);
            }
        }

        None
    }

    pub async fn message(&self, message_id: u64) -> Option<MessageSnapshot> {
        self.messages.read().await.entries.get(&message_id).cloned()
    }

    /// Removes and returns a message snapshot.
    pub async fn take_message(&self, message_id: u64) -> Option<MessageSnapshot> {
        let mut store = self.messages.write().await;
        let message = store.entries.remove(&message_id)?;
        store.order.retain(|id| *id != message_id);
        Some(message)
    }

    /// Records a member's status and returns the one seen before.
    pub async fn swap_presence(
        &self,
        user_id: u64,
        status: PresenceStatus,
    ) -> Option<PresenceStatus> {
        self.presences.write().await.insert(user_id, status)
    }

    /// Seeds statuses from a guild payload without reporting changes.
    pub async fn seed_presences(&self, statuses: impl IntoIterator<Item = (u64, PresenceStatus)>) {
        self.presences.write().await.extend(statuses);
    }
}
