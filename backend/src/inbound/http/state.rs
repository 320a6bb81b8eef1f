//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data`. The services
//! hold the shared store; each call opens its own unit of work.

use std::sync::Arc;

use crate::domain::ports::{CityStore, NotificationSink};
use crate::domain::{CitiesService, PointsOfInterestService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cities: CitiesService,
    pub points_of_interest: PointsOfInterestService,
    pub store: Arc<dyn CityStore>,
}

impl HttpState {
    /// Build the services over one shared store and notification sink.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use cityinfo::domain::ports::FixtureNotificationSink;
    /// use cityinfo::inbound::http::state::HttpState;
    /// use cityinfo::outbound::persistence::InMemoryCityStore;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(InMemoryCityStore::new()),
    ///     Arc::new(FixtureNotificationSink),
    /// );
    /// let _cities = state.cities.clone();
    /// ```
    pub fn new(store: Arc<dyn CityStore>, notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            cities: CitiesService::new(Arc::clone(&store), Arc::clone(&notifications)),
            points_of_interest: PointsOfInterestService::new(Arc::clone(&store), notifications),
            store,
        }
    }
}
