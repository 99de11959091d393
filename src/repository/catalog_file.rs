//! JSON file store for the catalog.
//!
//! The store knows nothing about books: it moves whole documents between the
//! inventory and the file system. Every write replaces the file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::error::AppResult;

/// Persistence seam used by the inventory
#[cfg_attr(test, mockall::automock)]
pub trait CatalogStore {
    /// Where the catalog lives, for log context
    fn location(&self) -> PathBuf;

    /// Make sure the catalog can be created (parent directory exists)
    fn prepare(&self) -> AppResult<()>;

    /// Read the whole document. `Ok(None)` when there is no catalog yet.
    fn read(&self) -> AppResult<Option<String>>;

    /// Replace the whole document
    fn write(&self, contents: &[u8]) -> AppResult<()>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonFileStore {
    fn location(&self) -> PathBuf {
        self.path.clone()
    }

    fn prepare(&self) -> AppResult<()> {
        match self.path.parent() {
            // A bare file name resolves against the working directory
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn read(&self) -> AppResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &[u8]) -> AppResult<()> {
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
