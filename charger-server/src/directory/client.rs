//! OpenChargeMap HTTP client.
//!
//! Queries the public `/poi` endpoint for fast DC chargers around a point.

use std::time::Duration;

use crate::domain::Coordinate;

use super::ChargerDirectory;
use super::error::DirectoryError;
use super::types::PoiRecord;

/// Default base URL for the OpenChargeMap API.
const DEFAULT_BASE_URL: &str = "https://api.openchargemap.io/v3";

/// Configuration for the OpenChargeMap client.
#[derive(Debug, Clone)]
pub struct OpenChargeMapConfig {
    /// API key, sent as the `key` query parameter. Empty means anonymous.
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum POIs per search
    pub max_results: u32,
    /// Only return sites with at least this much power
    pub min_power_kw: u32,
    /// Charging level filter (3 = DC fast)
    pub level_id: u32,
}

impl OpenChargeMapConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            max_results: 50,
            min_power_kw: 50,
            level_id: 3,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n;
        self
    }
}

/// OpenChargeMap API client.
#[derive(Debug, Clone)]
pub struct OpenChargeMapClient {
    http: reqwest::Client,
    config: OpenChargeMapConfig,
}

impl OpenChargeMapClient {
    pub fn new(config: OpenChargeMapConfig) -> Result<Self, DirectoryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    fn query(&self, center: Coordinate, radius_km: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("output", "json".to_string()),
            ("latitude", center.latitude.to_string()),
            ("longitude", center.longitude.to_string()),
            ("distance", radius_km.to_string()),
            ("distanceunit", "KM".to_string()),
            ("maxresults", self.config.max_results.to_string()),
            ("levelid", self.config.level_id.to_string()),
            ("minpowerkw", self.config.min_power_kw.to_string()),
        ];
        if !self.config.api_key.is_empty() {
            query.push(("key", self.config.api_key.clone()));
        }
        query
    }

    /// Search for POIs within `radius_km` of `center`.
    pub async fn search_pois(
        &self,
        center: Coordinate,
        radius_km: u32,
    ) -> Result<Vec<PoiRecord>, DirectoryError> {
        let url = format!("{}/poi", self.config.base_url.trim_end_matches('/'));

        tracing::debug!(%center, radius_km, "Querying OpenChargeMap");

        let response = self
            .http
            .get(&url)
            .query(&self.query(center, radius_km))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DirectoryError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectoryError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let records: Vec<PoiRecord> = serde_json::from_str(&body).map_err(|e| DirectoryError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        tracing::debug!(count = records.len(), "OpenChargeMap returned POIs");
        Ok(records)
    }
}

impl ChargerDirectory for OpenChargeMapClient {
    async fn search(
        &self,
        center: Coordinate,
        radius_km: u32,
    ) -> Result<Vec<PoiRecord>, DirectoryError> {
        self.search_pois(center, radius_km).await
    }
}
