//! Outcome notifications raised by task intents.
//!
//! Every mutation produces at most one notification. The footer renders it
//! for a configurable duration; the system backend mirrors it to the desktop
//! notifier when enabled.

use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Where notifications are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationBackend {
    /// No notifications
    None,
    /// In-app footer toast only
    #[default]
    Footer,
    /// Desktop notifications only (via notify-rust)
    System,
    /// Both footer and desktop
    Both,
}

impl NotificationBackend {
    pub fn from_settings_value(s: &str) -> Option<Self> {
        Self::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Footer => "footer",
            Self::System => "system",
            Self::Both => "both",
        }
    }

    pub fn shows_footer(&self) -> bool {
        matches!(self, Self::Footer | Self::Both)
    }

    pub fn shows_system(&self) -> bool {
        matches!(self, Self::System | Self::Both)
    }
}

impl FromStr for NotificationBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "footer" => Ok(Self::Footer),
            "system" => Ok(Self::System),
            "both" => Ok(Self::Both),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    raised_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn is_expired(&self, display_duration: Duration) -> bool {
        self.raised_at.elapsed() >= display_duration
    }
}

/// Mirror a notification to the desktop notifier if the backend asks for it.
/// Failures are logged and swallowed; notifications are fire-and-forget.
pub fn dispatch_system(
    notification: &Notification,
    backend: NotificationBackend,
    display_duration_ms: u64,
) {
    if !backend.shows_system() {
        return;
    }

    #[cfg(any(target_os = "linux", target_os = "macos"))]
    {
        let timeout_ms = display_duration_ms.min(u32::MAX as u64) as u32;
        debug!(
            severity = notification.severity.as_str(),
            message = %notification.message,
            timeout_ms,
            "sending system notification"
        );

        let result = notify_rust::Notification::new()
            .summary("taskpad")
            .body(&notification.message)
            .icon("dialog-information")
            .timeout(notify_rust::Timeout::Milliseconds(timeout_ms))
            .show();

        if let Err(err) = result {
            warn!(error = %err, "failed to send system notification");
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        let _ = display_duration_ms;
        debug!(
            severity = notification.severity.as_str(),
            "system notifications not supported on this OS"
        );
    }
}
