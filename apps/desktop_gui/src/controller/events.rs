//! Notifications raised by the session, queued for the status strip.

use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::Rc,
    time::{Duration, Instant},
};

use draft_core::Notifier;
use shared::error::{Notice, Severity};

const NOTICE_TTL: Duration = Duration::from_secs(4);
const MAX_NOTICES: usize = 6;

#[derive(Debug, Clone)]
pub struct TimedNotice {
    pub notice: Notice,
    pub raised_at: Instant,
}

/// Shared handle: one clone goes into the session as its notifier, the
/// app keeps another to draw the feed.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    entries: Rc<RefCell<VecDeque<TimedNotice>>>,
}

impl NoticeLog {
    pub fn push(&self, notice: Notice) {
        let mut entries = self.entries.borrow_mut();
        if entries.len() == MAX_NOTICES {
            entries.pop_front();
        }
        entries.push_back(TimedNotice {
            notice,
            raised_at: Instant::now(),
        });
    }

    /// Drops expired notices and returns what is still visible, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<TimedNotice> {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|entry| now.saturating_duration_since(entry.raised_at) < NOTICE_TTL);
        entries.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::warn!(%message, "notice"),
            Severity::Info | Severity::Success => tracing::debug!(%message, "notice"),
        }
        self.push(Notice::new(severity, message));
    }
}
