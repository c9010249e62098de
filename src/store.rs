//! Read-only access to the content store.
//!
//! The loader never touches the filesystem directly. It goes through
//! [`ContentStore`], which answers two questions: "what is the body of the
//! document at this path?" and "which files are directly inside this
//! directory?". Paths are always `/`-separated and relative to the content
//! root (`works/index.json`, `pages/home.json`).
//!
//! [`FsStore`] serves a content directory on disk. [`MemoryStore`] holds
//! documents in memory so loader and rendering logic can be exercised
//! without a filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub trait ContentStore: Send + Sync {
    /// Body of the document at `path`.
    fn read(&self, path: &str) -> Result<String, StoreError>;

    /// Names of the files directly inside `dir`.
    ///
    /// Returns `Ok(None)` when `dir` does not exist.
    fn list(&self, dir: &str) -> Result<Option<Vec<String>>, StoreError>;
}

/// Content store backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl ContentStore for FsStore {
    fn read(&self, path: &str) -> Result<String, StoreError> {
        fs::read_to_string(self.resolve(path)).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(path.to_string()),
            _ => StoreError::Io {
                path: path.to_string(),
                source,
            },
        })
    }

    fn list(&self, dir: &str) -> Result<Option<Vec<String>>, StoreError> {
        let entries = match fs::read_dir(self.resolve(dir)) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: dir.to_string(),
                    source,
                });
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(Some(names))
    }
}

/// In-memory content store.
///
/// ```ignore
/// let store = MemoryStore::new()
///     .with_document("works/index.json", r#"["well"]"#)
///     .with_document("works/well.json", r#"{"titleFr": "Puits", "date": "2024-01-10"}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document. Its parent directory becomes listable.
    #[must_use]
    pub fn with_document(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        let path = path.into();
        if let Some((dir, _)) = path.rsplit_once('/') {
            self.dirs.insert(dir.to_string());
        }
        self.documents.insert(path, body.into());
        self
    }

    /// Add an empty directory.
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.dirs.insert(dir.into());
        self
    }
}

impl ContentStore for MemoryStore {
    fn read(&self, path: &str) -> Result<String, StoreError> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    fn list(&self, dir: &str) -> Result<Option<Vec<String>>, StoreError> {
        if !self.dirs.contains(dir) {
            return Ok(None);
        }
        let prefix = format!("{dir}/");
        let names = self
            .documents
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_string)
            .collect();
        Ok(Some(names))
    }
}
