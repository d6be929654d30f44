//! Transient user notifications ("toasts").
//!
//! The controller reports the outcome of create and delete through a
//! `Notifier`. How a notice is shown is up to the view.

use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => log::info!("{}", notice.message),
            NoticeLevel::Error => log::warn!("{}", notice.message),
        }
    }
}

/// Collects notices so a view can drain and display them.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything collected so far.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_log_drains_in_order() {
        let log = NoticeLog::new();
        let handle = log.clone();
        handle.notify(Notice::success("one"));
        handle.notify(Notice::error("two"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.drain(), vec![Notice::success("one"), Notice::error("two")]);
        assert!(log.is_empty());
    }
}
