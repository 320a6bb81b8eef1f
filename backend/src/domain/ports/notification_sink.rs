//! Port for fire-and-forget administrator notifications.
//!
//! Deletions notify an operator. Delivery is best effort: the port has no
//! error channel, and adapters must never let a delivery problem surface to
//! the request that triggered it.

/// Port for sending a notification with a subject and a body.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification. Must not block on slow transports.
    fn send(&self, subject: &str, body: &str);
}

/// Sink that discards every notification.
///
/// Use it in tests and wiring where notifications are not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationSink;

impl NotificationSink for FixtureNotificationSink {
    fn send(&self, _subject: &str, _body: &str) {}
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn fixture_sink_accepts_notifications() {
        FixtureNotificationSink.send("subject", "body");
    }

    #[test]
    fn mock_sink_records_subject_and_body() {
        let mut sink = MockNotificationSink::new();
        sink.expect_send()
            .withf(|subject, body| subject == "City was deleted" && body == "City: Brunflo")
            .times(1)
            .return_const(());

        sink.send("City was deleted", "City: Brunflo");
    }
}
