//! Where hours come from.

use std::future::Future;
use std::path::Path;

use crate::error::HoursResult;
use crate::hours::{HoursGrid, LocationHours};

/// Fetches the raw hours payload for a location.
///
/// Implementations own transport and any caching; `ignore_cache` asks them
/// to bypass whatever caching they do.
pub trait HoursSource {
    fn fetch_hours(
        &self,
        location: &str,
        ignore_cache: bool,
    ) -> impl Future<Output = HoursResult<LocationHours>> + Send;

    /// Names of every location the source knows about.
    fn location_names(&self, ignore_cache: bool) -> impl Future<Output = HoursResult<Vec<String>>> + Send;
}

/// An hours grid held in memory, e.g. loaded from a saved API response.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    grid: HoursGrid,
}

impl StaticSource {
    pub fn new(grid: HoursGrid) -> Self {
        StaticSource { grid }
    }

    pub fn from_file(path: &Path) -> HoursResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(StaticSource::new(HoursGrid::from_json(&content)?))
    }
}

impl HoursSource for StaticSource {
    async fn fetch_hours(&self, location: &str, _ignore_cache: bool) -> HoursResult<LocationHours> {
        self.grid.clone().into_location(location)
    }

    async fn location_names(&self, _ignore_cache: bool) -> HoursResult<Vec<String>> {
        Ok(self.grid.location_names().into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HoursError;

    fn grid() -> HoursGrid {
        HoursGrid {
            locations: vec![LocationHours::new("Main Library", vec![])],
        }
    }

    #[tokio::test]
    async fn test_static_source_finds_location() {
        let source = StaticSource::new(grid());
        let hours = source.fetch_hours("Main Library", false).await.unwrap();
        assert_eq!(hours.name, "Main Library");
        assert_eq!(source.location_names(false).await.unwrap(), vec!["Main Library"]);
    }

    #[tokio::test]
    async fn test_static_source_unknown_location() {
        let source = StaticSource::new(grid());
        let err = source.fetch_hours("Annex", true).await.unwrap_err();
        assert!(matches!(err, HoursError::LocationNotFound(_)));
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn test_static_source_missing_file() {
        let err = StaticSource::from_file(Path::new("/nonexistent/hours.json")).unwrap_err();
        assert!(matches!(err, HoursError::Io(_)));
    }
}
