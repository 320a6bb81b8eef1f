//! In-process persistence adapter for the city store port.
//!
//! The store is an arena keyed by city id. Each city record owns a map of its
//! points of interest plus the counter used to number them, so deleting a
//! city drops its children with it and no point ever refers to a missing
//! parent.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use cityinfo::domain::ports::CityStore;
//! use cityinfo::outbound::persistence::InMemoryCityStore;
//!
//! let store: Arc<dyn CityStore> = Arc::new(InMemoryCityStore::default());
//! # let _ = store;
//! ```

mod in_memory_city_store;

pub use in_memory_city_store::InMemoryCityStore;
