//! Where journey snapshots live between runs.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use greenfield_utils::{
    AtomicWriteOptions, atomic_write_with_options, read_recovering, remove_with_backup,
};

use crate::RepositoryError;

/// Storage for one serialized snapshot.
///
/// `save` replaces the whole snapshot at once; there are no partial writes.
/// `remove` deletes it so the next `load` reports "nothing stored".
pub trait JourneyRepository {
    fn load(&self) -> Result<Option<String>, RepositoryError>;
    fn save(&self, snapshot: &str) -> Result<(), RepositoryError>;
    fn remove(&self) -> Result<(), RepositoryError>;
}

/// One JSON file per snapshot key: `<data_dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
    options: AtomicWriteOptions,
}

impl FileRepository {
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{key}.json")),
            options: AtomicWriteOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: AtomicWriteOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JourneyRepository for FileRepository {
    fn load(&self) -> Result<Option<String>, RepositoryError> {
        read_recovering(&self.path).map_err(|source| RepositoryError::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, snapshot: &str) -> Result<(), RepositoryError> {
        atomic_write_with_options(&self.path, snapshot.as_bytes(), self.options).map_err(|source| {
            RepositoryError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn remove(&self) -> Result<(), RepositoryError> {
        remove_with_backup(&self.path)
            .map(|existed| {
                if existed {
                    tracing::debug!(path = %self.path.display(), "Removed journey snapshot");
                }
            })
            .map_err(|source| RepositoryError::Remove {
                path: self.path.clone(),
                source,
            })
    }
}

#[derive(Debug, Default)]
struct MemorySlot {
    snapshot: Option<String>,
    fail_writes: bool,
    saves: usize,
}

/// Process-local repository. Clones share the same slot, so a test can keep
/// a handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    slot: Arc<Mutex<MemorySlot>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        let repo = Self::new();
        repo.slot().snapshot = Some(snapshot.into());
        repo
    }

    /// Make `save` and `remove` fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.slot().fail_writes = fail;
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.slot().snapshot.clone()
    }

    /// Successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.slot().saves
    }

    fn slot(&self) -> MutexGuard<'_, MemorySlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl JourneyRepository for InMemoryRepository {
    fn load(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self.snapshot())
    }

    fn save(&self, snapshot: &str) -> Result<(), RepositoryError> {
        let mut slot = self.slot();
        if slot.fail_writes {
            return Err(RepositoryError::Unavailable("writes disabled".to_owned()));
        }
        slot.snapshot = Some(snapshot.to_owned());
        slot.saves += 1;
        Ok(())
    }

    fn remove(&self) -> Result<(), RepositoryError> {
        let mut slot = self.slot();
        if slot.fail_writes {
            return Err(RepositoryError::Unavailable("writes disabled".to_owned()));
        }
        slot.snapshot = None;
        Ok(())
    }
}
