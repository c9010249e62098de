//! Content loading: from collection ids to typed, filtered, sorted records.
//!
//! [`ContentLoader`] is the only thing renderers talk to. It joins the ids
//! from the collection manifest with the fetched documents, validates each
//! record, and applies the visibility and ordering rules so every caller sees
//! the same list:
//!
//! | Collection | Kept | Order |
//! |------------|------|-------|
//! | works | all | newest first |
//! | advertisements | `active == true` | newest first |
//! | announcements | `published == true` | newest first |
//!
//! Ties on date are broken by id so the output never depends on manifest or
//! listing order.
//!
//! ## Failure Policy
//!
//! Content problems never reach the caller. A document that is missing,
//! unreadable, not valid JSON, or fails validation is logged and dropped; the
//! rest of the collection still loads. Single-document loads return `None`.

use crate::collection::{Collection, PageName};
use crate::index;
use crate::records::{
    AboutPage, Advertisement, Announcement, HomePage, Item, LegalPage, Listed, PageContent,
    PageRecord, Record, Work,
};
use crate::store::{ContentStore, StoreError};
use std::cmp::Reverse;
use thiserror::Error;
use tracing::warn;

/// How many featured works the home page shows.
pub const FEATURED_LIMIT: usize = 3;

/// Why a single document could not be turned into a record.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("missing document: {0}")]
    Missing(#[from] StoreError),
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid content: {0}")]
    Invalid(String),
}

pub struct ContentLoader<S> {
    store: S,
}

impl<S: ContentStore> ContentLoader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch, parse and validate one document.
    fn fetch<T: Record>(&self, collection: Collection, id: &str) -> Result<T, LoadError> {
        let body = self.store.read(&collection.item_path(id))?;
        let record: T = serde_json::from_str(&body)?;
        record.validate().map_err(LoadError::Invalid)?;
        Ok(record)
    }

    /// Every indexed record of `T`'s collection that loads, in index order.
    ///
    /// Failures are logged and dropped.
    fn load_all<T: Record>(&self) -> (Vec<Item<T>>, Vec<Dropped>) {
        let collection = T::COLLECTION;
        let mut items = Vec::new();
        let mut dropped = Vec::new();
        for id in index::list_ids(&self.store, collection) {
            match self.fetch::<T>(collection, &id) {
                Ok(record) => items.push(Item::new(id, record)),
                Err(e) => {
                    warn!(%collection, id = %id, error = %e, "dropping content item");
                    dropped.push(Dropped {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        (items, dropped)
    }

    /// All visible records of a listed collection, newest first.
    pub fn load_collection<T: Listed>(&self) -> Vec<Item<T>> {
        let (items, _) = self.load_all::<T>();
        surface(items)
    }

    /// One record by id, or `None` (logged) if it cannot be loaded.
    ///
    /// No visibility filter is applied.
    pub fn load_single<T: Record>(&self, id: &str) -> Option<Item<T>> {
        let collection = T::COLLECTION;
        match self.fetch::<T>(collection, id) {
            Ok(record) => Some(Item::new(id, record)),
            Err(e) => {
                warn!(%collection, id = %id, error = %e, "failed to load content item");
                None
            }
        }
    }

    /// A singleton page, or `None` (logged) if it cannot be loaded.
    pub fn load_page<P: PageRecord>(&self) -> Option<P> {
        self.load_single::<P>(P::PAGE.id()).map(|item| item.record)
    }

    /// A page selected by name at runtime.
    pub fn load_page_named(&self, name: PageName) -> Option<PageContent> {
        match name {
            PageName::Home => self.load_page::<HomePage>().map(PageContent::Home),
            PageName::About => self.load_page::<AboutPage>().map(PageContent::About),
            PageName::Legal => self.load_page::<LegalPage>().map(PageContent::Legal),
        }
    }

    pub fn works(&self) -> Vec<Item<Work>> {
        self.load_collection()
    }

    pub fn advertisements(&self) -> Vec<Item<Advertisement>> {
        self.load_collection()
    }

    pub fn announcements(&self) -> Vec<Item<Announcement>> {
        self.load_collection()
    }

    /// At most `limit` featured works, newest first.
    pub fn featured_works(&self, limit: usize) -> Vec<Item<Work>> {
        select_featured(self.works(), limit)
    }

    /// Per-collection load report for every collection and page.
    pub fn inventory(&self) -> Inventory {
        Inventory {
            collections: vec![
                self.collection_report::<Work>(),
                self.collection_report::<Advertisement>(),
                self.collection_report::<Announcement>(),
            ],
            pages: PageName::ALL
                .into_iter()
                .map(|name| PageReport {
                    name: name.id(),
                    loaded: self.load_page_named(name).is_some(),
                })
                .collect(),
        }
    }

    fn collection_report<T: Listed>(&self) -> CollectionReport {
        let indexed = index::list_ids(&self.store, T::COLLECTION);
        let (items, dropped) = self.load_all::<T>();
        let loaded = items.len();
        let visible = surface(items).into_iter().map(|item| item.id).collect();
        CollectionReport {
            collection: T::COLLECTION,
            indexed,
            loaded,
            dropped,
            visible,
        }
    }
}

/// Apply the visibility filter, then order newest first (ties by id).
pub fn surface<T: Listed>(items: Vec<Item<T>>) -> Vec<Item<T>> {
    let mut visible: Vec<Item<T>> = items.into_iter().filter(|i| i.is_visible()).collect();
    visible.sort_by(|a, b| {
        Reverse(a.date())
            .cmp(&Reverse(b.date()))
            .then_with(|| a.id.cmp(&b.id))
    });
    visible
}

/// Featured works from an already ordered list, capped at `limit`.
pub fn select_featured(works: Vec<Item<Work>>, limit: usize) -> Vec<Item<Work>> {
    works.into_iter().filter(|w| w.featured).take(limit).collect()
}

/// An indexed id that did not load, with the logged reason.
#[derive(Debug, Clone)]
pub struct Dropped {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct CollectionReport {
    pub collection: Collection,
    /// Ids listed by the index.
    pub indexed: Vec<String>,
    /// Count of records that loaded and validated.
    pub loaded: usize,
    pub dropped: Vec<Dropped>,
    /// Ids that pass the visibility filter, in display order.
    pub visible: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PageReport {
    pub name: &'static str,
    pub loaded: bool,
}

#[derive(Debug, Clone)]
pub struct Inventory {
    pub collections: Vec<CollectionReport>,
    pub pages: Vec<PageReport>,
}

impl Inventory {
    pub fn dropped_count(&self) -> usize {
        self.collections.iter().map(|c| c.dropped.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Locale, pick};
    use crate::store::{FsStore, MemoryStore};
    use crate::test_helpers::*;
    use std::fs;

    fn work_json(date: &str, featured: bool) -> String {
        format!(
            r#"{{"titleAr": "عمل {date}", "titleFr": "Activité {date}", "images": ["https://img.example/{date}.jpg"], "date": "{date}", "featured": {featured}}}"#
        )
    }

    fn ad_json(date: &str, active: bool) -> String {
        format!(r#"{{"titleFr": "Annonce {date}", "images": ["a.jpg"], "date": "{date}", "active": {active}}}"#)
    }

    #[test]
    fn works_in_descending_date_order() {
        let store = MemoryStore::new()
            .with_document("works/index.json", r#"["work-2024-01", "work-2023-11"]"#)
            .with_document("works/work-2024-01.json", work_json("2024-01-10", false))
            .with_document("works/work-2023-11.json", work_json("2023-11-05", false));
        let loader = ContentLoader::new(store);

        let works = loader.works();
        assert_eq!(ids(&works), vec!["work-2024-01", "work-2023-11"]);
    }

    #[test]
    fn works_resorted_when_index_is_ascending() {
        let store = MemoryStore::new()
            .with_document("works/index.json", r#"["old", "new", "mid"]"#)
            .with_document("works/old.json", work_json("2022-05-01", false))
            .with_document("works/new.json", work_json("2024-05-01", false))
            .with_document("works/mid.json", work_json("2023-05-01", false));
        let works = ContentLoader::new(store).works();
        assert_eq!(ids(&works), vec!["new", "mid", "old"]);
        for pair in works.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn equal_dates_ordered_by_id() {
        let store = MemoryStore::new()
            .with_document("works/index.json", r#"["b", "a"]"#)
            .with_document("works/a.json", work_json("2024-01-01", false))
            .with_document("works/b.json", work_json("2024-01-01", false));
        let works = ContentLoader::new(store).works();
        assert_eq!(ids(&works), vec!["a", "b"]);
    }

    #[test]
    fn inactive_advertisement_is_never_returned() {
        let store = MemoryStore::new()
            .with_document("advertisements/index.json", r#"["ad-off"]"#)
            .with_document("advertisements/ad-off.json", ad_json("2024-02-01", false));
        assert!(ContentLoader::new(store).advertisements().is_empty());
    }

    #[test]
    fn advertisements_filtered_and_sorted() {
        let store = MemoryStore::new()
            .with_document("advertisements/index.json", r#"["a1", "a2", "a3"]"#)
            .with_document("advertisements/a1.json", ad_json("2023-01-01", true))
            .with_document("advertisements/a2.json", ad_json("2024-01-01", false))
            .with_document("advertisements/a3.json", ad_json("2024-06-01", true));
        let ads = ContentLoader::new(store).advertisements();
        assert_eq!(ids(&ads), vec!["a3", "a1"]);
        assert!(ads.iter().all(|a| a.active));
    }

    #[test]
    fn unpublished_announcements_are_hidden() {
        let store = MemoryStore::new()
            .with_document("announcements/index.json", r#"["draft", "live"]"#)
            .with_document(
                "announcements/draft.json",
                r#"{"titleFr": "Brouillon", "date": "2024-05-01", "published": false}"#,
            )
            .with_document(
                "announcements/live.json",
                r#"{"titleFr": "Publié", "date": "2024-04-01", "published": true}"#,
            );
        let anns = ContentLoader::new(store).announcements();
        assert_eq!(ids(&anns), vec!["live"]);
    }

    #[test]
    fn missing_and_malformed_items_are_dropped() {
        let store = MemoryStore::new()
            .with_document("works/index.json", r#"["ok", "gone", "broken", "invalid"]"#)
            .with_document("works/ok.json", work_json("2024-01-01", false))
            .with_document("works/broken.json", "{ this is not json")
            .with_document("works/invalid.json", r#"{"date": "2024-01-01"}"#);
        let loader = ContentLoader::new(store);

        let works = loader.works();
        assert_eq!(ids(&works), vec!["ok"]);

        let inventory = loader.inventory();
        let report = &inventory.collections[0];
        assert_eq!(report.indexed.len(), 4);
        assert_eq!(report.loaded, 1);
        let dropped: Vec<&str> = report.dropped.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(dropped, vec!["gone", "broken", "invalid"]);
        assert_eq!(inventory.dropped_count(), 3);
    }

    #[test]
    fn loaded_ids_are_a_subset_of_the_index() {
        let store = MemoryStore::new()
            .with_document("works/index.json", r#"["a", "b", "c"]"#)
            .with_document("works/a.json", work_json("2024-01-01", false))
            .with_document("works/c.json", work_json("2023-01-01", false))
            .with_document("works/stray.json", work_json("2025-01-01", false));
        let loader = ContentLoader::new(store);
        let indexed = index::list_ids(loader.store(), Collection::Works);
        let works = loader.works();
        assert!(works.len() <= indexed.len());
        assert!(works.iter().all(|w| indexed.contains(&w.id)));
    }

    #[test]
    fn loading_twice_is_identical() {
        let store = MemoryStore::new()
            .with_document("works/index.json", r#"["a", "b"]"#)
            .with_document("works/a.json", work_json("2024-01-01", true))
            .with_document("works/b.json", work_json("2023-01-01", false));
        let loader = ContentLoader::new(store);
        assert_eq!(loader.works(), loader.works());
    }

    #[test]
    fn featured_capped_at_limit_and_all_featured() {
        let mut store = MemoryStore::new().with_document(
            "works/index.json",
            r#"["w1", "w2", "w3", "w4", "w5", "w6"]"#,
        );
        for (i, featured) in [true, false, true, true, true, false].iter().enumerate() {
            store = store.with_document(
                format!("works/w{}.json", i + 1),
                work_json(&format!("2024-0{}-01", i + 1), *featured),
            );
        }
        let featured = ContentLoader::new(store).featured_works(FEATURED_LIMIT);
        assert_eq!(featured.len(), 3);
        assert!(featured.iter().all(|w| w.featured));
        // Newest featured first: w5 (May), w4 (April), w3 (March)
        assert_eq!(ids(&featured), vec!["w5", "w4", "w3"]);
    }

    #[test]
    fn featured_with_fewer_candidates() {
        let store = MemoryStore::new()
            .with_document("works/index.json", r#"["only"]"#)
            .with_document("works/only.json", work_json("2024-01-01", true));
        assert_eq!(ContentLoader::new(store).featured_works(3).len(), 1);
    }

    #[test]
    fn missing_collection_loads_empty() {
        let loader = ContentLoader::new(MemoryStore::new());
        assert!(loader.works().is_empty());
        assert!(loader.announcements().is_empty());
    }

    #[test]
    fn repeated_manifest_id_loads_once() {
        let store = MemoryStore::new()
            .with_document("works/index.json", r#"["a", "a", "b"]"#)
            .with_document("works/a.json", work_json("2024-01-10", true))
            .with_document("works/b.json", work_json("2023-01-10", true));
        let loader = ContentLoader::new(store);
        assert_eq!(ids(&loader.works()), vec!["a", "b"]);
        assert_eq!(ids(&loader.featured_works(FEATURED_LIMIT)), vec!["a", "b"]);
    }

    #[test]
    fn load_single_returns_none_on_failure() {
        let store = MemoryStore::new().with_document("works/bad.json", "[]");
        let loader = ContentLoader::new(store);
        assert!(loader.load_single::<Work>("bad").is_none());
        assert!(loader.load_single::<Work>("absent").is_none());
    }

    #[test]
    fn load_single_does_not_filter() {
        let store = MemoryStore::new().with_document("advertisements/off.json", ad_json("2024-01-01", false));
        let ad = ContentLoader::new(store)
            .load_single::<Advertisement>("off")
            .unwrap();
        assert_eq!(ad.id, "off");
        assert!(!ad.active);
    }

    #[test]
    fn missing_legal_page_is_absent() {
        let store = MemoryStore::new().with_document(
            "pages/home.json",
            r#"{"heroTitleAr": "مرحبا", "heroTitleFr": "Bienvenue"}"#,
        );
        let loader = ContentLoader::new(store);
        assert!(loader.load_page::<LegalPage>().is_none());
        assert!(loader.load_page_named(PageName::Legal).is_none());

        let home = loader.load_page_named(PageName::Home).unwrap();
        assert_eq!(pick(&home, "heroTitle", Locale::Ar), "مرحبا");
    }

    #[test]
    fn inventory_reports_pages() {
        let store = MemoryStore::new().with_document("pages/about.json", "{}");
        let inventory = ContentLoader::new(store).inventory();
        let loaded: Vec<(&str, bool)> = inventory.pages.iter().map(|p| (p.name, p.loaded)).collect();
        assert_eq!(loaded, vec![("home", false), ("about", true), ("legal", false)]);
    }

    // =========================================================================
    // Fixture content
    // =========================================================================

    #[test]
    fn fixture_works_newest_first() {
        let tmp = setup_fixtures();
        let works = ContentLoader::new(FsStore::new(tmp.path())).works();
        assert_eq!(
            ids(&works),
            vec![
                "well-tidjikja",
                "ramadan-baskets",
                "school-kits",
                "iftar-2023",
                "water-tank"
            ]
        );
        let well = find_item(&works, "well-tidjikja");
        assert_eq!(well.images.len(), 3);
        assert_eq!(well.date, date("2024-01-10"));
    }

    #[test]
    fn fixture_featured_skips_unfeatured_and_caps() {
        let tmp = setup_fixtures();
        let featured = ContentLoader::new(FsStore::new(tmp.path())).featured_works(FEATURED_LIMIT);
        assert_eq!(
            ids(&featured),
            vec!["well-tidjikja", "ramadan-baskets", "iftar-2023"]
        );
    }

    #[test]
    fn fixture_advertisements_only_active() {
        let tmp = setup_fixtures();
        let ads = ContentLoader::new(FsStore::new(tmp.path())).advertisements();
        assert_eq!(ids(&ads), vec!["winter-campaign", "orphan-sponsorship"]);
        let orphans = find_item(&ads, "orphan-sponsorship");
        assert_eq!(orphans.all_images(), vec!["https://img.example/ads/orphans.jpg"]);
    }

    #[test]
    fn fixture_announcements_only_published() {
        let tmp = setup_fixtures();
        let anns = ContentLoader::new(FsStore::new(tmp.path())).announcements();
        assert_eq!(ids(&anns), vec!["general-assembly"]);
    }

    #[test]
    fn fixture_deleted_document_is_dropped_not_fatal() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("works/school-kits.json")).unwrap();
        fs::write(tmp.path().join("works/water-tank.json"), "{\"titleFr\": ").unwrap();

        let works = ContentLoader::new(FsStore::new(tmp.path())).works();
        assert_eq!(
            ids(&works),
            vec!["well-tidjikja", "ramadan-baskets", "iftar-2023"]
        );
    }

    #[test]
    fn fixture_missing_collection_directory_is_empty() {
        let tmp = setup_fixtures();
        fs::remove_dir_all(tmp.path().join("announcements")).unwrap();
        let loader = ContentLoader::new(FsStore::new(tmp.path()));
        assert!(loader.announcements().is_empty());
        assert_eq!(loader.works().len(), 5);
    }

    #[test]
    fn fixture_missing_legal_page() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("pages/legal.json")).unwrap();
        let loader = ContentLoader::new(FsStore::new(tmp.path()));
        assert!(loader.load_page_named(PageName::Legal).is_none());
        assert!(loader.load_page_named(PageName::About).is_some());
    }
}
