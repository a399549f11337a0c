//! Chargers the driver never wants to see again.
//!
//! The ranker receives a snapshot of the id set and excludes those chargers
//! before scoring. Two stores: an in-memory set for tests and ephemeral
//! servers, and a JSON file that survives restarts.

use std::collections::BTreeSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::ChargerId;

/// Errors from a persistent blacklist store.
#[derive(Debug, thiserror::Error)]
pub enum BlacklistError {
    #[error("failed to access blacklist file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("blacklist file {path:?} is not a JSON list of ids: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A set of charger ids excluded from every ranking.
pub trait Blacklist: Send + Sync {
    fn contains(&self, id: &ChargerId) -> impl Future<Output = bool> + Send;

    /// Returns `true` if the id was not already present.
    fn add(&self, id: ChargerId) -> impl Future<Output = Result<bool, BlacklistError>> + Send;

    /// Returns `true` if the id was present.
    fn remove(&self, id: &ChargerId) -> impl Future<Output = Result<bool, BlacklistError>> + Send;

    fn clear(&self) -> impl Future<Output = Result<(), BlacklistError>> + Send;

    /// Snapshot of every blacklisted id, in id order.
    fn ids(&self) -> impl Future<Output = BTreeSet<ChargerId>> + Send;
}

/// Blacklist held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlacklist {
    inner: Arc<RwLock<BTreeSet<ChargerId>>>,
}

impl MemoryBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: impl IntoIterator<Item = ChargerId>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ids.into_iter().collect())),
        }
    }
}

impl Blacklist for MemoryBlacklist {
    async fn contains(&self, id: &ChargerId) -> bool {
        self.inner.read().await.contains(id)
    }

    async fn add(&self, id: ChargerId) -> Result<bool, BlacklistError> {
        Ok(self.inner.write().await.insert(id))
    }

    async fn remove(&self, id: &ChargerId) -> Result<bool, BlacklistError> {
        Ok(self.inner.write().await.remove(id))
    }

    async fn clear(&self) -> Result<(), BlacklistError> {
        self.inner.write().await.clear();
        Ok(())
    }

    async fn ids(&self) -> BTreeSet<ChargerId> {
        self.inner.read().await.clone()
    }
}

/// Blacklist persisted as a JSON array of id strings.
///
/// Every mutation rewrites the file while holding the write lock. The file is
/// written to a sibling temp path and renamed into place, so a crash never
/// leaves a half-written list behind.
#[derive(Debug, Clone)]
pub struct FileBlacklist {
    path: PathBuf,
    inner: Arc<RwLock<BTreeSet<ChargerId>>>,
}

impl FileBlacklist {
    /// Open the blacklist at `path`. A missing file is an empty list.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BlacklistError> {
        let path = path.as_ref().to_path_buf();
        let ids = load(&path)?;
        tracing::debug!(path = ?path, count = ids.len(), "Opened blacklist");
        Ok(Self {
            path,
            inner: Arc::new(RwLock::new(ids)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Blacklist for FileBlacklist {
    async fn contains(&self, id: &ChargerId) -> bool {
        self.inner.read().await.contains(id)
    }

    async fn add(&self, id: ChargerId) -> Result<bool, BlacklistError> {
        let mut ids = self.inner.write().await;
        if ids.contains(&id) {
            return Ok(false);
        }
        let mut next = ids.clone();
        next.insert(id);
        save(&self.path, &next)?;
        *ids = next;
        Ok(true)
    }

    async fn remove(&self, id: &ChargerId) -> Result<bool, BlacklistError> {
        let mut ids = self.inner.write().await;
        if !ids.contains(id) {
            return Ok(false);
        }
        let mut next = ids.clone();
        next.remove(id);
        save(&self.path, &next)?;
        *ids = next;
        Ok(true)
    }

    async fn clear(&self) -> Result<(), BlacklistError> {
        let mut ids = self.inner.write().await;
        save(&self.path, &BTreeSet::new())?;
        ids.clear();
        Ok(())
    }

    async fn ids(&self) -> BTreeSet<ChargerId> {
        self.inner.read().await.clone()
    }
}

fn load(path: &Path) -> Result<BTreeSet<ChargerId>, BlacklistError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(source) => {
            return Err(BlacklistError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let raw: Vec<String> = serde_json::from_str(&json).map_err(|source| BlacklistError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    // Blank entries can only come from hand edits; skip them.
    Ok(raw.iter().filter_map(|s| ChargerId::parse(s).ok()).collect())
}

fn save(path: &Path, ids: &BTreeSet<ChargerId>) -> Result<(), BlacklistError> {
    let raw: Vec<&str> = ids.iter().map(ChargerId::as_str).collect();
    let io_err = |source| BlacklistError::Io {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(&raw).map_err(|source| BlacklistError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ChargerId {
        ChargerId::parse(s).unwrap()
    }

    #[tokio::test]
    async fn memory_add_remove_clear() {
        let list = MemoryBlacklist::new();

        assert!(list.add(id("a")).await.unwrap());
        assert!(!list.add(id("a")).await.unwrap());
        assert!(list.add(id("b")).await.unwrap());
        assert!(list.contains(&id("a")).await);

        assert!(list.remove(&id("a")).await.unwrap());
        assert!(!list.remove(&id("a")).await.unwrap());
        assert!(!list.contains(&id("a")).await);

        list.clear().await.unwrap();
        assert!(list.ids().await.is_empty());
    }

    #[tokio::test]
    async fn memory_clones_share_state() {
        let list = MemoryBlacklist::with_ids([id("x")]);
        let other = list.clone();
        other.add(id("y")).await.unwrap();

        let ids: Vec<_> = list.ids().await.into_iter().collect();
        assert_eq!(ids, vec![id("x"), id("y")]);
    }

    #[tokio::test]
    async fn file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let list = FileBlacklist::open(dir.path().join("blacklist.json")).unwrap();
        assert!(list.ids().await.is_empty());
    }

    #[tokio::test]
    async fn file_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.json");

        let list = FileBlacklist::open(&path).unwrap();
        list.add(id("ocm-1")).await.unwrap();
        list.add(id("ocm-2")).await.unwrap();
        list.remove(&id("ocm-1")).await.unwrap();
        drop(list);

        let reopened = FileBlacklist::open(&path).unwrap();
        assert!(reopened.contains(&id("ocm-2")).await);
        assert!(!reopened.contains(&id("ocm-1")).await);

        reopened.clear().await.unwrap();
        let again = FileBlacklist::open(&path).unwrap();
        assert!(again.ids().await.is_empty());
    }

    #[tokio::test]
    async fn file_skips_blank_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.json");
        std::fs::write(&path, r#"["a", "  ", "b"]"#).unwrap();

        let list = FileBlacklist::open(&path).unwrap();
        assert_eq!(list.ids().await.len(), 2);
    }

    #[test]
    fn file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileBlacklist::open(&path).unwrap_err();
        assert!(matches!(err, BlacklistError::Corrupt { .. }));
    }
}
