//! Process configuration and startup tasks.

mod config;
mod seeding;

pub use config::CityInfoSettings;
pub use seeding::{StartupSeedingError, seed_cities_on_startup};
