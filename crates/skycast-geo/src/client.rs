//! Open-Meteo geocoding client.

use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use crate::types::Location;
use skycast_core::GeoError;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: Option<i64>,
    #[serde(default)]
    name: String,
    country: Option<String>,
    admin1: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl SearchResult {
    fn into_location(self) -> Location {
        // Provider ids are optional; synthesize one from the coordinates
        // so every candidate is addressable.
        let id = match self.id {
            Some(id) => id.to_string(),
            None => format!("{},{}", self.latitude, self.longitude),
        };
        Location {
            id,
            name: self.name,
            country: self.country.unwrap_or_default(),
            admin1: self.admin1.unwrap_or_default(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Client for the Open-Meteo geocoding API.
#[derive(Debug, Clone)]
pub struct GeoClient {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl GeoClient {
    pub fn new(base_url: &str, language: &str, timeout: Duration) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    /// Search for locations matching a free-text city name.
    ///
    /// Provider ordering is preserved. Zero matches is a normal outcome and
    /// yields an empty vec; only transport or provider failures are errors.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, query: &str, limit: u8) -> Result<Vec<Location>, GeoError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeoError::EmptyQuery);
        }

        let url = format!("{}/v1/search", self.base_url);
        let count = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeoError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| GeoError::InvalidResponse(e.to_string()))?;

        let candidates: Vec<Location> = body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(SearchResult::into_location)
            .collect();

        tracing::debug!(count = candidates.len(), "geocoding search complete");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> GeoClient {
        GeoClient::new(base_url, "ru", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_maps_candidates_in_provider_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Berlin"))
            .and(query_param("count", "5"))
            .and(query_param("language", "ru"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"id": 2950159, "name": "Berlin", "country": "Germany",
                     "admin1": "Berlin", "latitude": 52.52437, "longitude": 13.41053},
                    {"id": 5083330, "name": "Berlin", "country": "United States",
                     "admin1": "New Hampshire", "latitude": 44.46867, "longitude": -71.18508}
                ]
            })))
            .mount(&mock_server)
            .await;

        let candidates = client(&mock_server.uri()).search("Berlin", 5).await.unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "2950159");
        assert_eq!(candidates[0].label(), "Berlin, Berlin, Germany");
        assert_eq!(candidates[1].admin1, "New Hampshire");
    }

    #[tokio::test]
    async fn test_search_synthesizes_missing_id_from_coordinates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"name": "Nowhere", "latitude": 1.5, "longitude": -2.25}
                ]
            })))
            .mount(&mock_server)
            .await;

        let candidates = client(&mock_server.uri()).search("Nowhere", 5).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "1.5,-2.25");
        assert!(candidates[0].country.is_empty());
    }

    #[tokio::test]
    async fn test_search_no_results_is_empty_not_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let candidates = client(&mock_server.uri()).search("zzzzzz", 5).await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query_never_hits_network() {
        // No mock server mounted: an outgoing request would fail loudly.
        let result = client("http://127.0.0.1:9").search("   ", 5).await;
        assert!(matches!(result, Err(GeoError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_search_server_error_is_upstream() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri()).search("Berlin", 5).await;
        assert!(matches!(result, Err(GeoError::Upstream { status: 503, .. })));
    }
}
