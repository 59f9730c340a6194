//! Short-lived storage for sorted artifacts awaiting download.
//!
//! Each stored artifact gets its own [`ArtifactId`], is handed out at most
//! once, and is dropped after [`StoreConfig::ttl`]. Concurrent sorts never
//! overwrite each other's results.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{SortError, SortResult};

/// Default lifetime of a stored artifact.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Default cap on artifacts held at once.
pub const DEFAULT_MAX_ARTIFACTS: usize = 256;

/// Limits applied by an [`ArtifactStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Age after which an artifact can no longer be retrieved.
    pub ttl: Duration,
    /// Once reached, storing a new artifact evicts the oldest one.
    pub max_artifacts: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_artifacts: DEFAULT_MAX_ARTIFACTS,
        }
    }
}

impl StoreConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the capacity. Values below 1 are raised to 1.
    pub fn with_max_artifacts(mut self, max_artifacts: usize) -> Self {
        self.max_artifacts = max_artifacts.max(1);
        self
    }
}

/// Opaque handle to a stored artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId(Uuid);

impl ArtifactId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ArtifactId {
    type Err = SortError;

    /// Any string that is not a UUID cannot name a stored artifact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| SortError::ArtifactNotFound)
    }
}

/// A sorted file ready for download.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    created: Instant,
}

impl Artifact {
    pub fn new(filename: impl Into<String>, content_type: &'static str, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
            created: Instant::now(),
        }
    }

    /// Time elapsed since the artifact was created.
    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }
}

/// Thread-safe, take-once artifact storage.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    config: StoreConfig,
    artifacts: Mutex<HashMap<ArtifactId, Artifact>>,
}

impl ArtifactStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            artifacts: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Stores `artifact` under a fresh id.
    ///
    /// Expired artifacts are evicted first. If the store is still full, the
    /// oldest artifact makes room.
    pub fn put(&self, artifact: Artifact) -> ArtifactId {
        let id = ArtifactId::new();
        let mut artifacts = self.artifacts.lock();

        let ttl = self.config.ttl;
        artifacts.retain(|_, a| !a.is_expired(ttl));

        while artifacts.len() >= self.config.max_artifacts {
            let oldest = artifacts
                .iter()
                .min_by_key(|(_, a)| a.created)
                .map(|(id, _)| *id);
            match oldest {
                Some(oldest) => {
                    debug!(%oldest, "store full, evicting oldest artifact");
                    artifacts.remove(&oldest);
                }
                None => break,
            }
        }

        debug!(%id, filename = %artifact.filename, bytes = artifact.bytes.len(), "artifact stored");
        artifacts.insert(id, artifact);
        id
    }

    /// Removes and returns the artifact. A second call with the same id fails.
    pub fn take(&self, id: ArtifactId) -> SortResult<Artifact> {
        let artifact = self
            .artifacts
            .lock()
            .remove(&id)
            .ok_or(SortError::ArtifactNotFound)?;

        if artifact.is_expired(self.config.ttl) {
            debug!(%id, "artifact expired before download");
            return Err(SortError::ArtifactNotFound);
        }
        Ok(artifact)
    }

    /// Drops every artifact older than the TTL, returning how many were removed.
    pub fn evict_expired(&self) -> usize {
        let ttl = self.config.ttl;
        let mut artifacts = self.artifacts.lock();
        let before = artifacts.len();
        artifacts.retain(|_, a| !a.is_expired(ttl));
        let evicted = before - artifacts.len();
        if evicted > 0 {
            info!(evicted, "evicted expired artifacts");
        }
        evicted
    }

    /// Number of artifacts currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.artifacts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(name: &str) -> Artifact {
        Artifact::new(name, "text/csv", b"a\n1\n".to_vec())
    }

    #[test]
    fn take_is_one_shot() {
        let store = ArtifactStore::default();
        let id = store.put(artifact("sorted_a.csv"));
        assert_eq!(store.len(), 1);

        let got = store.take(id).unwrap();
        assert_eq!(got.filename, "sorted_a.csv");
        assert!(matches!(store.take(id), Err(SortError::ArtifactNotFound)));
        assert!(store.is_empty());
    }

    #[test]
    fn ids_do_not_collide() {
        let store = ArtifactStore::default();
        let a = store.put(artifact("a.csv"));
        let b = store.put(artifact("b.csv"));
        assert_ne!(a, b);
        assert_eq!(store.take(b).unwrap().filename, "b.csv");
        assert_eq!(store.take(a).unwrap().filename, "a.csv");
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let store = ArtifactStore::new(StoreConfig::default().with_ttl(Duration::ZERO));
        let id = store.put(artifact("a.csv"));
        assert!(matches!(store.take(id), Err(SortError::ArtifactNotFound)));
    }

    #[test]
    fn evict_expired_counts() {
        let store = ArtifactStore::new(StoreConfig::default().with_ttl(Duration::ZERO));
        // each put evicts the previous, already expired, artifact
        store.put(artifact("a.csv"));
        store.put(artifact("b.csv"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.evict_expired(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let store = ArtifactStore::new(StoreConfig::default().with_max_artifacts(2));
        let first = store.put(artifact("1.csv"));
        std::thread::sleep(Duration::from_millis(2));
        let second = store.put(artifact("2.csv"));
        std::thread::sleep(Duration::from_millis(2));
        let third = store.put(artifact("3.csv"));

        assert_eq!(store.len(), 2);
        assert!(store.take(first).is_err());
        assert!(store.take(second).is_ok());
        assert!(store.take(third).is_ok());
    }

    #[test]
    fn id_parsing() {
        let store = ArtifactStore::default();
        let id = store.put(artifact("a.csv"));
        let parsed: ArtifactId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<ArtifactId>().is_err());
    }
}
