use std::time::Duration;

use libcal_hours_core::config::HoursConfig;
use libcal_hours_core::{HoursError, HoursGrid, HoursResult, HoursSource, LocationHours};
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for `api_hours_grid.php`.
///
/// No response caching happens here; `ignore_cache` only asks intermediaries
/// and the API itself for a fresh copy.
#[derive(Clone)]
pub struct LibCalClient {
    http: reqwest::Client,
    api_url: Url,
    institution_id: String,
    weeks: u32,
}

impl LibCalClient {
    pub fn new(api_url: &str, institution_id: impl Into<String>, weeks: u32) -> HoursResult<Self> {
        Self::build(api_url, institution_id.into(), weeks, None)
    }

    pub fn from_config(config: &HoursConfig) -> HoursResult<Self> {
        Self::build(
            &config.api_url,
            config.require_institution_id()?.to_string(),
            config.fetch_weeks,
            Some(config.fetch_timeout()),
        )
    }

    fn build(
        api_url: &str,
        institution_id: String,
        weeks: u32,
        timeout: Option<Duration>,
    ) -> HoursResult<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| HoursError::Config(format!("Invalid api_url '{api_url}': {e}")))?;

        let mut builder = reqwest::Client::builder().connect_timeout(CONNECT_TIMEOUT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| HoursError::Fetch(format!("Failed to build HTTP client: {e}")))?;

        Ok(LibCalClient {
            http,
            api_url,
            institution_id,
            weeks,
        })
    }

    /// Full request URL, e.g. `...?iid=1234&format=json&weeks=4&systemTime=0`.
    pub fn request_url(&self) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("iid", &self.institution_id)
            .append_pair("format", "json")
            .append_pair("weeks", &self.weeks.to_string())
            .append_pair("systemTime", "0");
        url
    }

    pub async fn fetch_grid(&self, ignore_cache: bool) -> HoursResult<HoursGrid> {
        let url = self.request_url();
        tracing::debug!(%url, ignore_cache, "fetching hours grid");

        let response = self
            .http
            .get(url)
            .headers(cache_headers(ignore_cache))
            .send()
            .await
            .map_err(|e| HoursError::Fetch(format!("Failed to send hours request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HoursError::Fetch(format!(
                "Hours API returned {status}: {}",
                body.trim()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| HoursError::Fetch(format!("Failed to read hours response: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| HoursError::Fetch(format!("Failed to parse hours response: {e}")))
    }
}

impl HoursSource for LibCalClient {
    async fn fetch_hours(&self, location: &str, ignore_cache: bool) -> HoursResult<LocationHours> {
        self.fetch_grid(ignore_cache).await?.into_location(location)
    }

    async fn location_names(&self, ignore_cache: bool) -> HoursResult<Vec<String>> {
        let grid = self.fetch_grid(ignore_cache).await?;
        Ok(grid.location_names().into_iter().map(String::from).collect())
    }
}

fn cache_headers(ignore_cache: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if ignore_cache {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::Router;
    use axum::extract::Query;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::get;

    const GRID: &str = r#"{"locations": [
        {"lid": 1, "name": "Main Library", "category": "library", "weeks": [
            {
                "Monday": {"date": "2026-10-19", "times": {"status": "open", "hours": [{"from": "8am", "to": "10pm"}]}},
                "Tuesday": {"date": "2026-10-20", "times": {"status": "closed"}}
            }
        ]},
        {"lid": 2, "name": "Branch", "weeks": []}
    ]}"#;

    async fn grid_handler(
        Query(params): Query<HashMap<String, String>>,
        headers: AxumHeaders,
    ) -> (StatusCode, String) {
        if params.get("iid").map(String::as_str) != Some("1234") {
            return (StatusCode::FORBIDDEN, "unknown institution".to_string());
        }
        if params.get("nocache").is_some() && headers.get("cache-control").is_none() {
            return (StatusCode::BAD_REQUEST, "expected cache-control".to_string());
        }
        (StatusCode::OK, GRID.to_string())
    }

    /// Serve `GRID` on an ephemeral port and return its URL.
    async fn spawn_api() -> String {
        let app = Router::new()
            .route("/api_hours_grid.php", get(grid_handler))
            .route("/broken", get(|| async { "not json" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    #[test]
    fn test_request_url() {
        let client = LibCalClient::new("https://api3.libcal.com/api_hours_grid.php", "1234", 4).unwrap();
        assert_eq!(
            client.request_url().as_str(),
            "https://api3.libcal.com/api_hours_grid.php?iid=1234&format=json&weeks=4&systemTime=0"
        );
    }

    #[test]
    fn test_invalid_api_url() {
        let err = LibCalClient::new("not a url", "1234", 4).err().unwrap();
        assert!(matches!(err, HoursError::Config(_)));
    }

    #[test]
    fn test_from_config_requires_institution() {
        let err = LibCalClient::from_config(&HoursConfig::default()).err().unwrap();
        assert!(matches!(err, HoursError::Config(_)));
    }

    #[test]
    fn test_cache_headers() {
        assert!(cache_headers(false).is_empty());
        let headers = cache_headers(true);
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "no-cache");
        assert_eq!(headers.get(PRAGMA).unwrap(), "no-cache");
    }

    #[tokio::test]
    async fn test_fetch_hours_for_location() {
        let base = spawn_api().await;
        let client = LibCalClient::new(&format!("{base}/api_hours_grid.php"), "1234", 4).unwrap();

        let hours = client.fetch_hours("Main Library", false).await.unwrap();
        assert_eq!(hours.name, "Main Library");
        assert_eq!(hours.weeks.len(), 1);
        assert_eq!(hours.weeks[0].days().count(), 2);

        let names = client.location_names(false).await.unwrap();
        assert_eq!(names, vec!["Main Library", "Branch"]);
    }

    #[tokio::test]
    async fn test_ignore_cache_sends_headers() {
        let base = spawn_api().await;
        let client =
            LibCalClient::new(&format!("{base}/api_hours_grid.php?nocache=1"), "1234", 4).unwrap();

        assert!(client.fetch_hours("Main Library", true).await.is_ok());
        let err = client.fetch_hours("Main Library", false).await.unwrap_err();
        assert!(matches!(err, HoursError::Fetch(msg) if msg.contains("400")));
    }

    #[tokio::test]
    async fn test_fetch_errors() {
        let base = spawn_api().await;

        let client = LibCalClient::new(&format!("{base}/api_hours_grid.php"), "9999", 4).unwrap();
        let err = client.fetch_hours("Main Library", false).await.unwrap_err();
        assert!(matches!(err, HoursError::Fetch(msg) if msg.contains("403")));

        let client = LibCalClient::new(&format!("{base}/broken"), "1234", 4).unwrap();
        let err = client.fetch_hours("Main Library", false).await.unwrap_err();
        assert!(matches!(err, HoursError::Fetch(msg) if msg.contains("parse")));

        let client = LibCalClient::new(&format!("{base}/api_hours_grid.php"), "1234", 4).unwrap();
        let err = client.fetch_hours("Annex", false).await.unwrap_err();
        assert!(matches!(err, HoursError::LocationNotFound(_)));
    }
}
