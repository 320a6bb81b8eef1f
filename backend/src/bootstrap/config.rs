//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `CITYINFO_*` environment variables, an optional
//! configuration file and command-line flags, in OrthoConfig's usual
//! precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::notification::MailSettings;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAIL_TO: &str = "admin@mycompany.com";
const DEFAULT_MAIL_FROM: &str = "noreply@mycompany.com";

/// Configuration for the city info service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CITYINFO")]
pub struct CityInfoSettings {
    /// Address the HTTP listener binds to.
    pub host: Option<IpAddr>,
    /// Port the HTTP listener binds to.
    pub port: Option<u16>,
    /// Recipient of deletion notifications.
    pub mail_to: Option<String>,
    /// Sender of deletion notifications.
    pub mail_from: Option<String>,
    /// Seed an empty store on startup; enabled unless set to `false`.
    pub seed_data: Option<bool>,
    /// JSON file with seed cities; the built-in set is used when absent.
    pub seed_path: Option<PathBuf>,
}

impl CityInfoSettings {
    /// Socket address for the HTTP listener.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Whether startup seeding runs.
    pub fn seed_data(&self) -> bool {
        self.seed_data.unwrap_or(true)
    }

    /// Mail addresses used by the notification adapter.
    pub fn mail_settings(&self) -> MailSettings {
        MailSettings {
            to: self
                .mail_to
                .clone()
                .unwrap_or_else(|| DEFAULT_MAIL_TO.to_owned()),
            from: self
                .mail_from
                .clone()
                .unwrap_or_else(|| DEFAULT_MAIL_FROM.to_owned()),
        }
    }
}
