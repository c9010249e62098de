//! Collection manifests: discovery of the item ids in a collection.
//!
//! A published site has no directory listing, so each listed collection
//! carries a generated `index.json` holding a JSON array of item ids:
//!
//! ```text
//! content/works/
//! ├── index.json          ["well-tidjikja", "ramadan-baskets"]
//! ├── well-tidjikja.json
//! └── ramadan-baskets.json
//! ```
//!
//! [`write_manifests`] produces those files at build time. [`list_ids`] reads
//! them back, falling back to a directory listing when the manifest is not
//! there (e.g. when rendering straight from an authoring checkout).
//!
//! The manifest order means nothing; the loader re-sorts by date.

use crate::collection::{Collection, MANIFEST_FILE};
use crate::store::ContentStore;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ids currently published in `collection`.
///
/// Never fails. A missing collection yields an empty list and a warning in
/// the log; that log line is the only way to tell "missing" from "empty".
pub fn list_ids<S: ContentStore + ?Sized>(store: &S, collection: Collection) -> Vec<String> {
    let manifest_path = collection.manifest_path();
    match store.read(&manifest_path) {
        Ok(body) => match serde_json::from_str::<Vec<String>>(&body) {
            Ok(ids) => return dedup_ids(collection, ids),
            Err(e) => warn!(
                %collection,
                error = %e,
                "malformed manifest, falling back to directory listing"
            ),
        },
        Err(e) if e.is_not_found() => {
            debug!(%collection, "no manifest, falling back to directory listing");
        }
        Err(e) => warn!(%collection, error = %e, "failed to read manifest"),
    }

    match store.list(collection.name()) {
        Ok(Some(names)) => ids_from_listing(names),
        Ok(None) => {
            warn!(%collection, "collection directory is missing, treating it as empty");
            Vec::new()
        }
        Err(e) => {
            warn!(%collection, error = %e, "failed to list collection directory");
            Vec::new()
        }
    }
}

/// Drop repeated ids, keeping the first occurrence.
fn dedup_ids(collection: Collection, ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| {
            let first = seen.insert(id.clone());
            if !first {
                warn!(%collection, id = %id, "duplicate id in manifest, ignoring repeat");
            }
            first
        })
        .collect()
}

/// Turn a directory listing into item ids: JSON documents only, manifest
/// excluded, extension stripped, sorted.
pub fn ids_from_listing<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ids: Vec<String> = names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            if name == MANIFEST_FILE {
                return None;
            }
            name.strip_suffix(".json").map(str::to_string)
        })
        .filter(|id| !id.is_empty())
        .collect();
    ids.sort();
    ids
}

/// Result of writing one collection manifest.
#[derive(Debug, Clone)]
pub struct IndexSummary {
    pub collection: Collection,
    pub ids: Vec<String>,
}

/// Write `index.json` for every listed collection under `root`.
///
/// A missing collection directory is created with an empty manifest so the
/// published layout is always complete.
pub fn write_manifests(root: &Path) -> Result<Vec<IndexSummary>, IndexError> {
    Collection::LISTED
        .into_iter()
        .map(|collection| write_manifest(root, collection))
        .collect()
}

fn write_manifest(root: &Path, collection: Collection) -> Result<IndexSummary, IndexError> {
    let dir = root.join(collection.name());
    fs::create_dir_all(&dir)?;

    let mut names = Vec::new();
    for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    let ids = ids_from_listing(names);

    let json = serde_json::to_string_pretty(&ids)?;
    fs::write(dir.join(MANIFEST_FILE), json)?;
    debug!(%collection, count = ids.len(), "wrote manifest");

    Ok(IndexSummary { collection, ids })
}
