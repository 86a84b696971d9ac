//! Hours source chosen on the command line.

use libcal_hours_core::{HoursResult, HoursSource, LocationHours, StaticSource};
use libcal_hours_provider::LibCalClient;

pub enum CliSource {
    /// Live LibCal API
    Api(LibCalClient),
    /// Saved API response on disk
    File(StaticSource),
}

impl HoursSource for CliSource {
    async fn fetch_hours(&self, location: &str, ignore_cache: bool) -> HoursResult<LocationHours> {
        match self {
            CliSource::Api(client) => client.fetch_hours(location, ignore_cache).await,
            CliSource::File(source) => source.fetch_hours(location, ignore_cache).await,
        }
    }

    async fn location_names(&self, ignore_cache: bool) -> HoursResult<Vec<String>> {
        match self {
            CliSource::Api(client) => client.location_names(ignore_cache).await,
            CliSource::File(source) => source.location_names(ignore_cache).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libcal_hours_core::HoursGrid;

    #[tokio::test]
    async fn test_file_source_delegates() {
        let grid = HoursGrid::from_json(r#"{"locations": [{"name": "Main Library", "weeks": [[]]}]}"#).unwrap();
        let source = CliSource::File(StaticSource::new(grid));

        assert_eq!(source.location_names(false).await.unwrap(), vec!["Main Library"]);
        let hours = source.fetch_hours("Main Library", false).await.unwrap();
        assert_eq!(hours.weeks.len(), 1);
    }
}
