//! Notification adapters implementing the notification sink port.

mod local_mail_service;

pub use local_mail_service::{LocalMailService, MailSettings};
