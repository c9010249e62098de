//! Shared test utilities for the sadaqa-site test suite.
//!
//! Provides fixture setup, record builders, and lookup helpers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let loader = ContentLoader::new(FsStore::new(tmp.path()));
//! let works = loader.works();
//! assert_eq!(ids(&works), vec!["well-tidjikja", "ramadan-baskets"]);
//! ```

use chrono::NaiveDate;
use std::path::Path;
use tempfile::TempDir;

use crate::records::{Advertisement, Item, Work};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Record builders
// =========================================================================

pub fn date(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .unwrap_or_else(|e| panic!("bad test date '{iso}': {e}"))
}

/// A non-featured work with titles `عنوان <id>` / `Titre <id>`.
pub fn test_work(id: &str, iso_date: &str, images: &[&str]) -> Item<Work> {
    Item::new(
        id,
        Work {
            title_ar: format!("عنوان {id}"),
            title_fr: format!("Titre {id}"),
            description_ar: format!("وصف {id}"),
            description_fr: format!("Description {id}"),
            images: images.iter().map(|s| s.to_string()).collect(),
            date: date(iso_date),
            featured: false,
        },
    )
}

/// An advertisement with one image and titles `إعلان <id>` / `Annonce <id>`.
pub fn test_ad(id: &str, iso_date: &str, active: bool) -> Item<Advertisement> {
    Item::new(
        id,
        Advertisement {
            title_ar: format!("إعلان {id}"),
            title_fr: format!("Annonce {id}"),
            images: vec![format!("https://img.example/{id}.jpg")],
            image: None,
            date: date(iso_date),
            active,
        },
    )
}

// =========================================================================
// Lookups
// =========================================================================

/// Ids of a list of items, in order.
pub fn ids<T>(items: &[Item<T>]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

/// Find an item by id. Panics if not found.
pub fn find_item<'a, T>(items: &'a [Item<T>], id: &str) -> &'a Item<T> {
    items.iter().find(|i| i.id == id).unwrap_or_else(|| {
        let available = ids(items);
        panic!("item '{id}' not found. Available: {available:?}")
    })
}
