//! Offline directory serving POIs from a JSON file.
//!
//! Useful for development and demos without an OpenChargeMap key. The file
//! holds the same array the live `/poi` endpoint returns.

use std::path::Path;
use std::sync::Arc;

use crate::domain::Coordinate;
use crate::geo::distance_km;

use super::ChargerDirectory;
use super::error::DirectoryError;
use super::types::PoiRecord;

/// Directory backed by a fixed set of POI records.
///
/// Searches return every record within the radius, plus records without a
/// coordinate (the live API occasionally sends those too, and the adapter
/// is expected to drop them).
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    records: Arc<Vec<PoiRecord>>,
}

impl StaticDirectory {
    /// Load records from a JSON array file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DirectoryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let directory = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            count = directory.len(),
            "Loaded static charger directory"
        );
        Ok(directory)
    }

    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let records: Vec<PoiRecord> = serde_json::from_str(json).map_err(|e| DirectoryError::Json {
            message: e.to_string(),
            body: None,
        })?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<PoiRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn record_coordinate(record: &PoiRecord) -> Option<Coordinate> {
    let address = record.address_info.as_ref()?;
    Some(Coordinate::new(address.latitude?, address.longitude?))
}

impl ChargerDirectory for StaticDirectory {
    async fn search(
        &self,
        center: Coordinate,
        radius_km: u32,
    ) -> Result<Vec<PoiRecord>, DirectoryError> {
        let radius = f64::from(radius_km);
        Ok(self
            .records
            .iter()
            .filter(|r| record_coordinate(r).is_none_or(|c| distance_km(&center, &c) <= radius))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"[
        {"ID": 1, "AddressInfo": {"Title": "Near", "Latitude": 45.05, "Longitude": 4.8}},
        {"ID": 2, "AddressInfo": {"Title": "Far", "Latitude": 47.0, "Longitude": 4.8}},
        {"ID": 3}
    ]"#;

    #[tokio::test]
    async fn search_filters_by_radius() {
        let directory = StaticDirectory::from_json(SAMPLE).unwrap();
        assert_eq!(directory.len(), 3);

        let found = directory.search(Coordinate::new(45.0, 4.8), 20).await.unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(3)]);
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let directory = StaticDirectory::from_file(file.path()).unwrap();
        let found = directory.search(Coordinate::new(47.0, 4.8), 5).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = StaticDirectory::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DirectoryError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_json_error() {
        let err = StaticDirectory::from_json("{").unwrap_err();
        assert!(matches!(err, DirectoryError::Json { .. }));
    }
}
