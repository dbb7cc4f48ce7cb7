//! Messages for the user, queued until the chrome next renders.

use std::collections::VecDeque;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    /// How long the toolbar keeps a message of this level on screen.
    pub fn display_ms(self) -> u64 {
        match self {
            NotificationLevel::Info => 5_000,
            NotificationLevel::Warning => 8_000,
            NotificationLevel::Error => 10_000,
        }
    }
}

/// A message shown in the toolbar toast. Serializes to the shape the
/// toolbar script expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub body: String,
    pub display_ms: u64,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
            display_ms: level.display_ms(),
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, body)
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, body)
    }
}

/// Pending notifications, oldest first.
///
/// Holds at most `capacity` entries; the oldest is dropped to make room.
/// Pushing the same message twice in a row keeps one copy, so repeated
/// clicks on a disabled control do not stack toasts.
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, notification: Notification) {
        if self.items.back() == Some(&notification) {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.items.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(16)
    }
}
