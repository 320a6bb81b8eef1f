//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod city_store;
mod notification_sink;

#[cfg(test)]
pub use city_store::MockCityStore;
pub use city_store::{CityStore, CityStoreError};
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{FixtureNotificationSink, NotificationSink};
