//! Startup seeding orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use super::config::CityInfoSettings;
use crate::domain::ports::CityStore;
use crate::domain::{
    CitySeeder, NewCity, SeedError, SeedOutcome, builtin_seed_cities, parse_seed_cities,
};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Seed file could not be read.
    #[error("failed to read seed file at {path}: {source}")]
    SeedFileRead {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Seed parsing or persistence failed.
    #[error("city seeding error: {0}")]
    Seeding(#[from] SeedError),
}

/// Seed an empty store on startup when enabled.
///
/// Returns `None` when seeding is disabled in `settings`.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use cityinfo::bootstrap::{CityInfoSettings, seed_cities_on_startup};
/// use cityinfo::outbound::persistence::InMemoryCityStore;
///
/// # async fn run(settings: CityInfoSettings) -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(InMemoryCityStore::new());
/// let outcome = seed_cities_on_startup(&settings, store).await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
pub async fn seed_cities_on_startup(
    settings: &CityInfoSettings,
    store: Arc<dyn CityStore>,
) -> Result<Option<SeedOutcome>, StartupSeedingError> {
    if !settings.seed_data() {
        info!(reason = "disabled", "city seeding skipped");
        return Ok(None);
    }

    let cities = match settings.seed_path.as_deref() {
        Some(path) => load_seed_file(path)?,
        None => builtin_seed_cities(),
    };

    let outcome = CitySeeder::new(store).seed(cities).await?;
    match outcome {
        SeedOutcome::Applied { cities } => info!(cities, "city seeding applied"),
        SeedOutcome::AlreadySeeded => info!("store already holds cities; seeding skipped"),
    }
    Ok(Some(outcome))
}

fn load_seed_file(path: &Path) -> Result<Vec<NewCity>, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::SeedFileRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(parse_seed_cities(&contents)?)
}

#[cfg(test)]
mod tests {
    //! Unit tests for startup seeding.

    use super::*;
    use std::io::Write;

    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    use crate::outbound::persistence::InMemoryCityStore;

    #[fixture]
    fn settings() -> CityInfoSettings {
        CityInfoSettings {
            host: None,
            port: None,
            mail_to: None,
            mail_from: None,
            seed_data: None,
            seed_path: None,
        }
    }

    #[fixture]
    fn store() -> Arc<InMemoryCityStore> {
        Arc::new(InMemoryCityStore::new())
    }

    #[rstest]
    #[tokio::test]
    async fn disabled_seeding_leaves_store_empty(
        mut settings: CityInfoSettings,
        store: Arc<InMemoryCityStore>,
    ) {
        settings.seed_data = Some(false);

        let outcome = seed_cities_on_startup(&settings, store.clone())
            .await
            .expect("seeding succeeds");

        assert!(outcome.is_none());
        assert!(store.list_cities().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn builtin_cities_are_seeded_once(
        settings: CityInfoSettings,
        store: Arc<InMemoryCityStore>,
    ) {
        let first = seed_cities_on_startup(&settings, store.clone())
            .await
            .expect("first seeding");
        let second = seed_cities_on_startup(&settings, store.clone())
            .await
            .expect("second seeding");

        assert_eq!(first, Some(SeedOutcome::Applied { cities: 2 }));
        assert_eq!(second, Some(SeedOutcome::AlreadySeeded));
        assert_eq!(store.list_cities().await.expect("list").len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn seed_file_replaces_builtin_cities(
        mut settings: CityInfoSettings,
        store: Arc<InMemoryCityStore>,
    ) {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"name": "Östersund", "pointsOfInterest": [{{"name": "Storsjön"}}]}}]"#
        )
        .expect("write seed file");
        settings.seed_path = Some(file.path().to_path_buf());

        seed_cities_on_startup(&settings, store.clone())
            .await
            .expect("seeding succeeds");

        let cities = store.list_cities().await.expect("list");
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Östersund");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_seed_file_is_reported(
        mut settings: CityInfoSettings,
        store: Arc<InMemoryCityStore>,
    ) {
        let dir = tempfile::tempdir().expect("temp dir");
        settings.seed_path = Some(dir.path().join("absent.json"));

        let result = seed_cities_on_startup(&settings, store).await;

        assert!(matches!(
            result,
            Err(StartupSeedingError::SeedFileRead { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_seed_file_is_reported(
        mut settings: CityInfoSettings,
        store: Arc<InMemoryCityStore>,
    ) {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write seed file");
        settings.seed_path = Some(file.path().to_path_buf());

        let result = seed_cities_on_startup(&settings, store).await;

        assert!(matches!(
            result,
            Err(StartupSeedingError::Seeding(SeedError::InvalidDefinitions { .. }))
        ));
    }
}
