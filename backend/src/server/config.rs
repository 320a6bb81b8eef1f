//! HTTP server configuration object.

use std::net::SocketAddr;

use cityinfo::bootstrap::CityInfoSettings;
use cityinfo::outbound::notification::MailSettings;

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) mail: MailSettings,
    pub(crate) settings: CityInfoSettings,
}

impl ServerConfig {
    /// Resolve listener and adapter settings from loaded configuration.
    #[must_use]
    pub fn new(settings: CityInfoSettings) -> Self {
        Self {
            bind_addr: settings.bind_addr(),
            mail: settings.mail_settings(),
            settings,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
