//! Caching layer for charger directory responses.
//!
//! Searches are keyed by the center rounded to 0.01° (about 1 km) and the
//! radius, so a driver refreshing from roughly the same spot reuses the
//! previous answer instead of spending an API call. Only successful
//! responses are cached. A hit is answered through
//! [`ChargerDirectory::cached`] so callers can use it during the cooldown.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::directory::{ChargerDirectory, DirectoryError, PoiRecord};
use crate::domain::Coordinate;

/// Cache key: (latitude × 100, longitude × 100, radius km).
type SearchKey = (i32, i32, u32);

/// Cached search response.
type SearchEntry = Arc<Vec<PoiRecord>>;

/// Size and freshness of the search cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a search answer stays usable.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, n: u64) -> Self {
        self.max_capacity = n;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 256,
        }
    }
}

/// Round a search to its cache key.
fn search_key(center: &Coordinate, radius_km: u32) -> SearchKey {
    let bucket = |deg: f64| (deg * 100.0).round() as i32;
    (bucket(center.latitude), bucket(center.longitude), radius_km)
}

/// Directory wrapper that caches search responses.
pub struct CachedDirectory<D> {
    inner: D,
    searches: MokaCache<SearchKey, SearchEntry>,
}

impl<D: ChargerDirectory> CachedDirectory<D> {
    pub fn new(inner: D, config: &CacheConfig) -> Self {
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, searches }
    }

    /// Search, using the cache if a nearby search is fresh.
    pub async fn search_cached(
        &self,
        center: Coordinate,
        radius_km: u32,
    ) -> Result<SearchEntry, DirectoryError> {
        let key = search_key(&center, radius_km);

        if let Some(cached) = self.searches.get(&key).await {
            tracing::debug!(%center, radius_km, "Directory cache hit");
            return Ok(cached);
        }

        let records = self.inner.search(center, radius_km).await?;
        let entry = Arc::new(records);

        self.searches.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying directory for operations that bypass cache.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.searches.entry_count()
    }

    /// Forget every stored search.
    pub fn invalidate_cache(&self) {
        self.searches.invalidate_all();
    }
}

impl<D: ChargerDirectory> ChargerDirectory for CachedDirectory<D> {
    async fn search(
        &self,
        center: Coordinate,
        radius_km: u32,
    ) -> Result<Vec<PoiRecord>, DirectoryError> {
        let entry = self.search_cached(center, radius_km).await?;
        Ok(entry.as_ref().clone())
    }

    async fn cached(&self, center: Coordinate, radius_km: u32) -> Option<Vec<PoiRecord>> {
        let entry = self.searches.get(&search_key(&center, radius_km)).await?;
        tracing::debug!(%center, radius_km, "Directory cache hit");
        Some(entry.as_ref().clone())
    }
}
