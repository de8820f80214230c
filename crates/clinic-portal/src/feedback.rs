use std::time::Duration;

use tokio::time::{Instant, sleep_until};

use crate::surface::ElementRef;

pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Shows transient status messages.
///
/// Each `report` schedules its own hide, `timeout` after that call. Calls
/// are not queued and earlier hides are not cancelled, so a hide scheduled
/// by an older report can blank a newer message before its own timeout.
/// Known limitation; messages are infrequent.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackReporter {
    timeout: Duration,
}

impl FeedbackReporter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Must be called from within a tokio runtime.
    pub fn report(&self, target: &ElementRef, message: &str, kind: MessageKind) {
        target.set_text(message);
        target.set_class(&format!("message {}", kind.as_str()));
        target.set_visible(true);

        let deadline = Instant::now() + self.timeout;
        let target = target.clone();
        tokio::spawn(async move {
            sleep_until(deadline).await;
            target.set_visible(false);
        });
    }
}

impl Default for FeedbackReporter {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_TIMEOUT)
    }
}
