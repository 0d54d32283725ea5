use std::sync::Arc;

use parking_lot::Mutex;

use crate::util::time;

/// How long info/success/error messages stay up, in seconds
pub const NOTICE_DURATION: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Loading,
    Info,
    Success,
    Error,
}

/// A user-visible status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn loading(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Loading, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }
}

/// Somewhere to show notices. Each notice replaces the previous one.
pub trait NoticeSink {
    fn show(&self, notice: Notice);
}

#[derive(Debug, Clone)]
struct ShownNotice {
    notice: Notice,
    shown_at: f64,
}

/// Holds the single notice currently on screen.
///
/// Cheap to clone; clones share the same slot so an in-flight insert can
/// update what the UI shows.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Arc<Mutex<Option<ShownNotice>>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notice to display now, if it hasn't expired
    pub fn current(&self) -> Option<Notice> {
        self.current_at(time::current_time_secs())
    }

    /// Loading notices stay until replaced; the rest expire after
    /// [`NOTICE_DURATION`].
    pub fn current_at(&self, now: f64) -> Option<Notice> {
        let mut slot = self.current.lock();
        let expired = match slot.as_ref() {
            Some(shown) => {
                shown.notice.level != NoticeLevel::Loading
                    && now - shown.shown_at > NOTICE_DURATION
            }
            None => false,
        };
        if expired {
            *slot = None;
        }
        slot.as_ref().map(|shown| shown.notice.clone())
    }

    /// Close the current notice, including a loading one
    pub fn dismiss(&self) {
        *self.current.lock() = None;
    }
}

impl NoticeSink for NoticeBoard {
    fn show(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => log::error!("{}", notice.text),
            NoticeLevel::Loading => log::debug!("{}", notice.text),
            _ => log::info!("{}", notice.text),
        }
        *self.current.lock() = Some(ShownNotice {
            notice,
            shown_at: time::current_time_secs(),
        });
    }
}
