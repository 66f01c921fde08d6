//! Short-lived user notices (toasts) with TTL and dedupe.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Identical notices within this window refresh the existing entry
pub const DEDUPE_WINDOW: Duration = Duration::from_millis(500);

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A queued notice
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    pub created: Instant,
}

/// Bounded notice queue
#[derive(Debug)]
pub struct NoticeQueue {
    queue: VecDeque<Notice>,
    max: usize,
    next_id: u64,
}

impl NoticeQueue {
    /// Create a queue holding at most `max` notices
    pub fn new(max: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            max: max.max(1),
            next_id: 1,
        }
    }

    /// Push a notice, refreshing an identical one pushed within the dedupe window
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) -> u64 {
        let message = message.into();

        if let Some(existing) = self.queue.iter_mut().find(|n| {
            n.kind == kind
                && n.message == message
                && now.saturating_duration_since(n.created) <= DEDUPE_WINDOW
        }) {
            existing.created = now;
            return existing.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        if self.queue.len() == self.max {
            self.queue.pop_front();
        }
        self.queue.push_back(Notice {
            id,
            kind,
            message,
            created: now,
        });
        id
    }

    /// Drop expired notices
    pub fn retain_visible(&mut self, now: Instant) {
        self.queue
            .retain(|n| now.saturating_duration_since(n.created) < NOTICE_TTL);
    }

    /// Notices still within their TTL, oldest first
    pub fn visible(&self, now: Instant) -> Vec<&Notice> {
        self.queue
            .iter()
            .filter(|n| now.saturating_duration_since(n.created) < NOTICE_TTL)
            .collect()
    }

    /// Most recent notice, expired or not
    pub fn latest(&self) -> Option<&Notice> {
        self.queue.back()
    }
}

impl Default for NoticeQueue {
    fn default() -> Self {
        Self::new(8)
    }
}
