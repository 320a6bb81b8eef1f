//! Seed data for an empty store.
//!
//! Seeding is idempotent: cities are only added when the store holds none,
//! and every seed city is committed in a single unit of work.

use std::sync::Arc;

use thiserror::Error;

use super::city::{NewCity, NewPointOfInterest};
use super::ports::CityStore;
use super::unit_of_work::{CityInfoRepository, RepositoryError};

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The seed cities were committed.
    Applied { cities: usize },
    /// The store already held cities; nothing was written.
    AlreadySeeded,
}

/// Errors raised while seeding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// A seed definition could not be parsed.
    #[error("seed definitions are invalid: {message}")]
    InvalidDefinitions { message: String },
    /// The store rejected the seed commit.
    #[error("seeding failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cities seeded when no seed file is configured.
#[must_use]
pub fn builtin_seed_cities() -> Vec<NewCity> {
    let point = |name: &str, description: &str| NewPointOfInterest {
        name: name.to_owned(),
        description: Some(description.to_owned()),
    };
    vec![
        NewCity {
            name: "A-köping".to_owned(),
            description: Some("Many A-type persons".to_owned()),
            points_of_interest: vec![
                point("A-person 1", "A very A-person"),
                point("A-person 2", "A slighter less A-person"),
            ],
        },
        NewCity {
            name: "B-köping".to_owned(),
            description: Some("Many B-type persons".to_owned()),
            points_of_interest: vec![
                point("B-person 1", "A very B-person"),
                point("B-person 2", "A slighter less B-person"),
            ],
        },
    ]
}

/// Parse seed definitions from a JSON array of cities.
///
/// # Examples
/// ```
/// use cityinfo::domain::parse_seed_cities;
///
/// let cities = parse_seed_cities(r#"[{"name": "Brunflo"}]"#).expect("valid seed");
/// assert_eq!(cities[0].name, "Brunflo");
/// ```
pub fn parse_seed_cities(json: &str) -> Result<Vec<NewCity>, SeedError> {
    serde_json::from_str(json).map_err(|err| SeedError::InvalidDefinitions {
        message: err.to_string(),
    })
}

/// Populates an empty store with seed cities.
#[derive(Clone)]
pub struct CitySeeder {
    store: Arc<dyn CityStore>,
}

impl CitySeeder {
    /// Create a seeder over the shared store.
    pub fn new(store: Arc<dyn CityStore>) -> Self {
        Self { store }
    }

    /// Add `cities` when the store is empty.
    pub async fn seed(&self, cities: Vec<NewCity>) -> Result<SeedOutcome, SeedError> {
        let mut repository = CityInfoRepository::new(Arc::clone(&self.store));
        if !repository.list_cities().await?.is_empty() {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let count = cities.len();
        for city in cities {
            repository.add_city(city);
        }
        repository.commit().await?;
        Ok(SeedOutcome::Applied { cities: count })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockCityStore;
    use crate::domain::{City, CityId, CommitReceipt};
    use rstest::rstest;

    #[rstest]
    fn builtin_seed_has_two_cities_with_two_points_each() {
        let cities = builtin_seed_cities();
        let names: Vec<_> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A-köping", "B-köping"]);
        assert!(cities.iter().all(|c| c.points_of_interest.len() == 2));
    }

    #[rstest]
    fn parse_rejects_malformed_definitions() {
        let result = parse_seed_cities(r#"[{"description": "no name"}]"#);
        assert!(matches!(result, Err(SeedError::InvalidDefinitions { .. })));
    }

    #[tokio::test]
    async fn seeding_an_empty_store_commits_once() {
        let mut store = MockCityStore::new();
        store.expect_list_cities().returning(|| Ok(Vec::new()));
        store
            .expect_apply()
            .withf(|changes| changes.len() == 2)
            .times(1)
            .returning(|_| Ok(CommitReceipt::default()));
        let seeder = CitySeeder::new(Arc::new(store));

        let outcome = seeder.seed(builtin_seed_cities()).await.expect("seeded");

        assert_eq!(outcome, SeedOutcome::Applied { cities: 2 });
    }

    #[tokio::test]
    async fn seeding_a_populated_store_is_skipped() {
        let mut store = MockCityStore::new();
        store.expect_list_cities().returning(|| {
            Ok(vec![City {
                id: CityId::new(1),
                name: "Brunflo".to_owned(),
                description: None,
                points_of_interest: Vec::new(),
            }])
        });
        store.expect_apply().never();
        let seeder = CitySeeder::new(Arc::new(store));

        let outcome = seeder.seed(builtin_seed_cities()).await.expect("skipped");

        assert_eq!(outcome, SeedOutcome::AlreadySeeded);
    }
}
