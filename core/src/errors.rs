//! Persistence errors.
//!
//! The store never surfaces these to its callers; they are logged and the
//! in-memory state stays authoritative.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The backing store refused the operation (quota, read-only, test fault).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::Remove { path, .. } => {
                Some(path)
            }
            Self::Unavailable(_) => None,
        }
    }
}
