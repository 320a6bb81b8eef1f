//! Notification sink that writes mail to the log instead of sending it.

use tracing::info;

use crate::domain::ports::NotificationSink;

/// Sender and recipient addresses for outgoing notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub from: String,
    pub to: String,
}

/// Development mail service.
///
/// Each notification becomes one structured `info` event carrying the
/// configured addresses, the subject and the body.
///
/// # Examples
/// ```
/// use cityinfo::domain::ports::NotificationSink;
/// use cityinfo::outbound::notification::{LocalMailService, MailSettings};
///
/// let mail = LocalMailService::new(MailSettings {
///     from: "noreply@mycompany.com".to_owned(),
///     to: "admin@mycompany.com".to_owned(),
/// });
/// mail.send("City was deleted", "City: Brunflo with id 1 was deleted");
/// ```
#[derive(Debug, Clone)]
pub struct LocalMailService {
    settings: MailSettings,
}

impl LocalMailService {
    /// Create a mail service with explicit addresses.
    #[must_use]
    pub fn new(settings: MailSettings) -> Self {
        Self { settings }
    }
}

impl NotificationSink for LocalMailService {
    fn send(&self, subject: &str, body: &str) {
        info!(
            from = %self.settings.from,
            to = %self.settings.to,
            subject,
            body,
            "mail sent with LocalMailService"
        );
    }
}
