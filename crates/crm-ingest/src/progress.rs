//! Import progress notices and their throttling.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Default quiet period between repeated notices.
pub const DEFAULT_NOTICE_COOLDOWN: Duration = Duration::from_secs(5);

/// Reported once per import, after header detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportProgress {
    Detected { detected: usize, total: usize },
    NoneDetected,
}

impl ImportProgress {
    pub fn from_counts(detected: usize, total: usize) -> Self {
        if detected == 0 {
            ImportProgress::NoneDetected
        } else {
            ImportProgress::Detected { detected, total }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ImportProgress::Detected { .. })
    }
}

impl fmt::Display for ImportProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportProgress::Detected { detected, total } => {
                write!(f, "detected {detected}/{total} columns automatically")
            }
            ImportProgress::NoneDetected => {
                write!(f, "could not automatically detect column positions")
            }
        }
    }
}

/// Suppresses repeats of the same notice within a cooldown.
///
/// Owned by the caller; one throttle per kind of notice.
#[derive(Debug, Clone)]
pub struct NoticeThrottle {
    last_shown_at: Option<Instant>,
    cooldown: Duration,
}

impl NoticeThrottle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            last_shown_at: None,
            cooldown,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether a notice may be shown at `now`. Does not record anything.
    pub fn should_show(&self, now: Instant) -> bool {
        self.last_shown_at
            .is_none_or(|last| now.saturating_duration_since(last) >= self.cooldown)
    }

    /// Records a showing at `now` if allowed; returns whether it was.
    pub fn try_show_at(&mut self, now: Instant) -> bool {
        if self.should_show(now) {
            self.last_shown_at = Some(now);
            true
        } else {
            false
        }
    }

    pub fn try_show(&mut self) -> bool {
        self.try_show_at(Instant::now())
    }

    pub fn reset(&mut self) {
        self.last_shown_at = None;
    }
}

impl Default for NoticeThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_COOLDOWN)
    }
}
