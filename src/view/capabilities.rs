use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Success,
    Info,
    Error,
}

/// Presentation hints passed along with a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyOptions {
    pub level: NotifyLevel,
    /// Message contains line breaks / markup worth rendering
    pub rich_text: bool,
    /// How long the notification stays visible; `None` uses the presenter default
    pub timeout: Option<Duration>,
}

impl NotifyOptions {
    pub fn success() -> Self {
        Self {
            level: NotifyLevel::Success,
            rich_text: false,
            timeout: None,
        }
    }

    pub fn info() -> Self {
        Self {
            level: NotifyLevel::Info,
            ..Self::success()
        }
    }

    pub fn error() -> Self {
        Self {
            level: NotifyLevel::Error,
            ..Self::success()
        }
    }

    /// Error carrying backend detail: rich text, shown for ten seconds
    pub fn detailed_error() -> Self {
        Self {
            level: NotifyLevel::Error,
            rich_text: true,
            timeout: Some(Duration::from_secs(10)),
        }
    }
}

/// Side channel for user-visible messages. Nothing is returned to the
/// caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, title: &str, options: NotifyOptions);
}

/// Side channel for moving to another screen.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str, query: &[(String, String)]);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, message: &str, title: &str, options: NotifyOptions) {
        (**self).notify(message, title, options)
    }
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn navigate_to(&self, path: &str, query: &[(String, String)]) {
        (**self).navigate_to(path, query)
    }
}
