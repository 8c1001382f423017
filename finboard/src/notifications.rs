use std::collections::VecDeque;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(4000);
pub const DEFAULT_CAPACITY: usize = 50;

/// A transient toast message
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Toast queue for the mounted page.
///
/// Entries keep insertion order and are removed once their deadline passes
/// (driven by the app tick via [`NotificationQueue::expire`]). When the queue is
/// at capacity the oldest entry is dropped to make room.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
    timeout: Duration,
    capacity: usize,
}

impl NotificationQueue {
    pub fn new(timeout: Duration, capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            timeout,
            capacity: capacity.max(1),
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) -> Uuid {
        self.notify_at(message, Instant::now())
    }

    pub fn notify_at(&mut self, message: impl Into<String>, now: Instant) -> Uuid {
        let message = message.into();
        tracing::debug!("Notification: {}", message);

        if self.entries.len() >= self.capacity {
            if let Some(dropped) = self.entries.pop_front() {
                tracing::trace!("Notification queue full, dropping {}", dropped.id);
            }
        }

        let id = Uuid::new_v4();
        self.entries.push_back(Notification {
            id,
            message,
            expires_at: now + self.timeout,
        });
        id
    }

    /// Drop every entry whose deadline has passed; returns how many were removed
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|n| !n.is_expired(now));
        before - self.entries.len()
    }

    /// Remove a single entry. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(queue: &NotificationQueue) -> Vec<&str> {
        queue.iter().map(|n| n.message.as_str()).collect()
    }

    #[test]
    fn test_notify_adds_entry_immediately() {
        let mut queue = NotificationQueue::default();
        queue.notify("x");
        assert_eq!(queue.len(), 1);
        assert_eq!(messages(&queue), vec!["x"]);
    }

    #[test]
    fn test_entry_expires_after_timeout() {
        let mut queue = NotificationQueue::default();
        let start = Instant::now();
        let id = queue.notify_at("x", start);

        assert_eq!(queue.expire(start + Duration::from_millis(3999)), 0);
        assert!(queue.iter().any(|n| n.id == id));

        assert_eq!(queue.expire(start + DEFAULT_TIMEOUT), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut queue = NotificationQueue::default();
        let start = Instant::now();
        queue.notify_at("first", start);
        queue.notify_at("second", start);
        queue.notify_at("third", start + Duration::from_millis(10));

        assert_eq!(messages(&queue), vec!["first", "second", "third"]);

        // Only the first two share the earlier deadline
        queue.expire(start + DEFAULT_TIMEOUT);
        assert_eq!(messages(&queue), vec!["third"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut queue = NotificationQueue::default();
        let id = queue.notify("x");
        queue.notify("y");

        assert!(queue.remove(id));
        assert!(!queue.remove(id));
        assert_eq!(messages(&queue), vec!["y"]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut queue = NotificationQueue::new(DEFAULT_TIMEOUT, 2);
        queue.notify("a");
        queue.notify("b");
        queue.notify("c");
        assert_eq!(messages(&queue), vec!["b", "c"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut queue = NotificationQueue::default();
        queue.notify("same");
        queue.notify("same");
        assert_eq!(queue.len(), 2);
    }
}
