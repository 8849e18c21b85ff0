//! Durable client-side storage.
//!
//! The storefront persists two blobs between launches: the cart line list and
//! the admin session. Each lives in a single JSON file, written whole on every
//! change; there is exactly one writer, so the last write wins.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use tokri::cart::CartLine;

use crate::auth::AdminSession;

/// Errors from the durable storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage read/write failed")]
    Io(#[from] io::Error),

    /// A stored blob exists but no longer parses. Callers treat this as "no
    /// prior data" rather than a fatal condition.
    #[error("stored data is corrupt")]
    Corrupt(#[source] serde_json::Error),

    #[error("storage serialization failed")]
    Serialize(#[source] serde_json::Error),
}

/// Durable home of the cart line list.
#[automock]
pub trait CartStorage: Send + Sync {
    /// Read the persisted lines; `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<CartLine>>, StorageError>;

    /// Replace the persisted lines.
    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError>;

    /// Drop the persisted blob entirely.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Durable home of the admin session.
#[automock]
pub trait SessionStorage: Send + Sync {
    /// Read the persisted session; `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<AdminSession>, StorageError>;

    /// Replace the persisted session.
    fn save(&self, session: &AdminSession) -> Result<(), StorageError>;

    /// Drop the persisted session.
    fn clear(&self) -> Result<(), StorageError>;
}

/// A JSON blob at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T: DeserializeOwned>(&self) -> Result<Option<T>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(StorageError::Io(error)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(StorageError::Corrupt)
    }

    fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(value).map_err(StorageError::Serialize)?;

        fs::write(&self.path, bytes)?;

        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::Io(error)),
        }
    }
}

impl CartStorage for JsonFile {
    fn load(&self) -> Result<Option<Vec<CartLine>>, StorageError> {
        self.read()
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        self.write(lines)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.remove()
    }
}

impl SessionStorage for JsonFile {
    fn load(&self) -> Result<Option<AdminSession>, StorageError> {
        self.read()
    }

    fn save(&self, session: &AdminSession) -> Result<(), StorageError> {
        self.write(session)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.remove()
    }
}
