//! Typed content records.
//!
//! Each collection has a closed record shape deserialized from its JSON
//! documents. Field names in JSON are camelCase with a per-locale suffix for
//! bilingual fields (`titleAr`, `titleFr`).
//!
//! Records are validated once at load time ([`Record::validate`]); renderers
//! can then rely on the shape without re-checking it. An `id` field inside a
//! document body is ignored: the id always comes from the file name and is
//! carried by [`Item`].

use crate::collection::{Collection, PageName};
use crate::locale::Localized;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::Deref;

/// A content record that can be loaded from a collection.
pub trait Record: DeserializeOwned + Localized + Send {
    const COLLECTION: Collection;

    /// Shape checks that JSON deserialization alone does not enforce.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// A record from a dated, list-style collection.
pub trait Listed: Record {
    fn date(&self) -> NaiveDate;

    /// Whether the record may be shown to visitors at all.
    fn is_visible(&self) -> bool {
        true
    }
}

/// A singleton record from the `pages` collection.
pub trait PageRecord: Record {
    const PAGE: PageName;
}

/// A record together with its storage-derived id.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<T> {
    pub id: String,
    pub record: T,
}

impl<T> Item<T> {
    pub fn new(id: impl Into<String>, record: T) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }
}

impl<T> Deref for Item<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

impl<T: Localized> Localized for Item<T> {
    fn text(&self, key: &str) -> Option<&str> {
        self.record.text(key)
    }
}

fn require_title(title_ar: &str, title_fr: &str) -> Result<(), String> {
    if title_ar.trim().is_empty() && title_fr.trim().is_empty() {
        return Err("title is empty in both locales".into());
    }
    Ok(())
}

fn require_image_urls<'a>(images: impl IntoIterator<Item = &'a String>) -> Result<(), String> {
    if images.into_iter().any(|url| url.trim().is_empty()) {
        return Err("image URL must not be empty".into());
    }
    Ok(())
}

fn extra_text<'a>(extra: &'a BTreeMap<String, serde_json::Value>, key: &str) -> Option<&'a str> {
    extra.get(key).and_then(serde_json::Value::as_str)
}

// ============================================================================
// Collections
// ============================================================================

/// A completed charitable activity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    #[serde(default)]
    pub title_ar: String,
    #[serde(default)]
    pub title_fr: String,
    #[serde(default)]
    pub description_ar: String,
    #[serde(default)]
    pub description_fr: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub featured: bool,
}

impl Localized for Work {
    fn text(&self, key: &str) -> Option<&str> {
        match key {
            "titleAr" => Some(&self.title_ar),
            "titleFr" => Some(&self.title_fr),
            "descriptionAr" => Some(&self.description_ar),
            "descriptionFr" => Some(&self.description_fr),
            _ => None,
        }
    }
}

impl Record for Work {
    const COLLECTION: Collection = Collection::Works;

    fn validate(&self) -> Result<(), String> {
        require_title(&self.title_ar, &self.title_fr)?;
        require_image_urls(&self.images)
    }
}

impl Listed for Work {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A campaign or call for help. Only `active` advertisements are shown.
///
/// Documents may carry a list under `images`, a single URL under `image`, or
/// both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    #[serde(default)]
    pub title_ar: String,
    #[serde(default)]
    pub title_fr: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub active: bool,
}

impl Advertisement {
    /// `images` in order, then `image` unless it is already listed.
    pub fn all_images(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self.images.iter().map(String::as_str).collect();
        if let Some(single) = &self.image
            && !all.contains(&single.as_str())
        {
            all.push(single);
        }
        all
    }
}

impl Localized for Advertisement {
    fn text(&self, key: &str) -> Option<&str> {
        match key {
            "titleAr" => Some(&self.title_ar),
            "titleFr" => Some(&self.title_fr),
            _ => None,
        }
    }
}

impl Record for Advertisement {
    const COLLECTION: Collection = Collection::Advertisements;

    fn validate(&self) -> Result<(), String> {
        require_title(&self.title_ar, &self.title_fr)?;
        require_image_urls(self.images.iter().chain(self.image.iter()))
    }
}

impl Listed for Advertisement {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn is_visible(&self) -> bool {
        self.active
    }
}

/// A short news item. Only `published` announcements are shown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(default)]
    pub title_ar: String,
    #[serde(default)]
    pub title_fr: String,
    #[serde(default)]
    pub content_ar: String,
    #[serde(default)]
    pub content_fr: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub published: bool,
}

impl Localized for Announcement {
    fn text(&self, key: &str) -> Option<&str> {
        match key {
            "titleAr" => Some(&self.title_ar),
            "titleFr" => Some(&self.title_fr),
            "contentAr" => Some(&self.content_ar),
            "contentFr" => Some(&self.content_fr),
            _ => None,
        }
    }
}

impl Record for Announcement {
    const COLLECTION: Collection = Collection::Announcements;

    fn validate(&self) -> Result<(), String> {
        require_title(&self.title_ar, &self.title_fr)
    }
}

impl Listed for Announcement {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn is_visible(&self) -> bool {
        self.published
    }
}

// ============================================================================
// Pages
// ============================================================================

/// `pages/home.json`. Fields beyond the hero text are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    #[serde(default)]
    pub hero_title_ar: String,
    #[serde(default)]
    pub hero_title_fr: String,
    #[serde(default)]
    pub hero_slogan_ar: String,
    #[serde(default)]
    pub hero_slogan_fr: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Localized for HomePage {
    fn text(&self, key: &str) -> Option<&str> {
        match key {
            "heroTitleAr" => Some(&self.hero_title_ar),
            "heroTitleFr" => Some(&self.hero_title_fr),
            "heroSloganAr" => Some(&self.hero_slogan_ar),
            "heroSloganFr" => Some(&self.hero_slogan_fr),
            _ => extra_text(&self.extra, key),
        }
    }
}

impl Record for HomePage {
    const COLLECTION: Collection = Collection::Pages;
}

impl PageRecord for HomePage {
    const PAGE: PageName = PageName::Home;
}

/// `pages/about.json`. `content*` fields are Markdown.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    #[serde(default)]
    pub title_ar: String,
    #[serde(default)]
    pub title_fr: String,
    #[serde(default)]
    pub content_ar: String,
    #[serde(default)]
    pub content_fr: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Localized for AboutPage {
    fn text(&self, key: &str) -> Option<&str> {
        match key {
            "titleAr" => Some(&self.title_ar),
            "titleFr" => Some(&self.title_fr),
            "contentAr" => Some(&self.content_ar),
            "contentFr" => Some(&self.content_fr),
            _ => extra_text(&self.extra, key),
        }
    }
}

impl Record for AboutPage {
    const COLLECTION: Collection = Collection::Pages;
}

impl PageRecord for AboutPage {
    const PAGE: PageName = PageName::About;
}

/// `pages/legal.json`, the association's internal regulations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalPage {
    #[serde(default)]
    pub title_ar: String,
    #[serde(default)]
    pub title_fr: String,
    #[serde(default)]
    pub content_ar: String,
    #[serde(default)]
    pub content_fr: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Localized for LegalPage {
    fn text(&self, key: &str) -> Option<&str> {
        match key {
            "titleAr" => Some(&self.title_ar),
            "titleFr" => Some(&self.title_fr),
            "contentAr" => Some(&self.content_ar),
            "contentFr" => Some(&self.content_fr),
            _ => extra_text(&self.extra, key),
        }
    }
}

impl Record for LegalPage {
    const COLLECTION: Collection = Collection::Pages;
}

impl PageRecord for LegalPage {
    const PAGE: PageName = PageName::Legal;
}

/// Any page, for callers that select the page by name at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    Home(HomePage),
    About(AboutPage),
    Legal(LegalPage),
}

impl Localized for PageContent {
    fn text(&self, key: &str) -> Option<&str> {
        match self {
            PageContent::Home(p) => p.text(key),
            PageContent::About(p) => p.text(key),
            PageContent::Legal(p) => p.text(key),
        }
    }
}
