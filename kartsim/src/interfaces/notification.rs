use flume::Sender;
use log::{error, info, warn};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self {
            Severity::Success => "SUCCESS",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        write!(f, "{}", tag)
    }
}

/// Notification is a fire-and-forget message that is emitted on race events, e.g. a lap
/// transition or a position change.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// NotificationSink is the capability the race uses to report events. Implementations decide how
/// the notifications are presented (console, log, channel to a presentation thread, list).
pub trait NotificationSink {
    fn notify(&mut self, severity: Severity, message: String);
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn notify(&mut self, severity: Severity, message: String) {
        (**self).notify(severity, message)
    }
}

/// Collecting sink, mainly used to check emitted notifications in tests.
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, severity: Severity, message: String) {
        self.push(Notification { severity, message })
    }
}

/// Notifications are forwarded through the channel. A disconnected receiver (presentation thread
/// already gone) does not affect the race, the notification is dropped in that case.
impl NotificationSink for Sender<Notification> {
    fn notify(&mut self, severity: Severity, message: String) {
        let _ = self.send(Notification { severity, message });
    }
}

/// LogSink forwards notifications to the log facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Success | Severity::Info => info!("{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}
