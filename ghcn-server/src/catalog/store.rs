//! Catalog persistence.
//!
//! The catalog is stored as a single JSON blob. [`CatalogStore`] decodes it
//! once and serves an in-memory snapshot; [`CatalogStore::set`] writes the new
//! blob first and only then swaps the snapshot, so readers see either the old
//! or the new catalog and never a partial one.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex, RwLock};
use tracing::warn;

use super::error::StoreError;
use super::types::Catalog;

/// Default catalog file name.
pub const DEFAULT_CATALOG_PATH: &str = "stations.json";

/// Raw byte storage for the catalog blob.
///
/// `load` returns `None` when nothing has been stored yet or the store cannot
/// be read; callers treat that as "no catalog". `save` must replace the blob
/// atomically.
pub trait BlobStore: Send + Sync + 'static {
    fn load(&self) -> Option<Vec<u8>>;
    fn save(&self, bytes: &[u8]) -> Result<(), StoreError>;
}

/// Blob store backed by a single file.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    path: PathBuf,
}

impl FileBlobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileBlobStore {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_PATH)
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self) -> Option<Vec<u8>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read catalog file");
                None
            }
        }
    }

    /// Write to a temporary file next to the target, then rename it over.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(bytes).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        Ok(())
    }
}

/// In-memory blob store, for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    bytes: StdMutex<Option<Vec<u8>>>,
    saves: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `bytes`.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: StdMutex::new(Some(bytes.into())),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self) -> Option<Vec<u8>> {
        self.bytes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StoreError> {
        *self
            .bytes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(bytes.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl<B: BlobStore + ?Sized> BlobStore for Arc<B> {
    fn load(&self) -> Option<Vec<u8>> {
        (**self).load()
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).save(bytes)
    }
}

/// Thread-safe owner of the current station catalog.
pub struct CatalogStore {
    blob: Arc<dyn BlobStore>,
    current: RwLock<Arc<Catalog>>,
    writer: Mutex<()>,
}

impl CatalogStore {
    /// Load the catalog from `blob`.
    ///
    /// A missing or undecodable blob yields an empty catalog; it is not an
    /// error, just "no catalog yet". Reading and decoding run off the async
    /// runtime.
    pub async fn open(blob: impl BlobStore) -> Result<Self, StoreError> {
        let blob: Arc<dyn BlobStore> = Arc::new(blob);
        let reader = blob.clone();
        let catalog = tokio::task::spawn_blocking(move || decode(reader.load())).await?;

        Ok(Self {
            blob,
            current: RwLock::new(Arc::new(catalog)),
            writer: Mutex::new(()),
        })
    }

    /// Current catalog snapshot.
    pub async fn get(&self) -> Arc<Catalog> {
        self.current.read().await.clone()
    }

    /// Persist `catalog` and make it the current snapshot.
    ///
    /// On failure the previous catalog stays in effect.
    pub async fn set(&self, catalog: Catalog) -> Result<Arc<Catalog>, StoreError> {
        let _writer = self.writer.lock().await;

        let catalog = Arc::new(catalog);
        let blob = self.blob.clone();
        let encoded = catalog.clone();
        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let bytes = serde_json::to_vec(&*encoded)?;
            blob.save(&bytes)
        })
        .await??;

        *self.current.write().await = catalog.clone();
        Ok(catalog)
    }
}

fn decode(bytes: Option<Vec<u8>>) -> Catalog {
    let Some(bytes) = bytes else {
        return Catalog::default();
    };

    match serde_json::from_slice(&bytes) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(error = %e, "stored catalog is corrupt, starting empty");
            Catalog::default()
        }
    }
}
