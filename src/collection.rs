//! Collection and page names, and the storage paths derived from them.
//!
//! Every document lives at `<collection>/<id>.json` under the content root,
//! and every listed collection has a generated manifest at
//! `<collection>/index.json`.

use std::fmt;
use std::str::FromStr;

/// File name of the generated per-collection manifest.
pub const MANIFEST_FILE: &str = "index.json";

/// A named grouping of content documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Works,
    Advertisements,
    Announcements,
    Pages,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Works,
        Collection::Advertisements,
        Collection::Announcements,
        Collection::Pages,
    ];

    /// Collections enumerated through a manifest. `pages` is keyed by page
    /// name instead.
    pub const LISTED: [Collection; 3] = [
        Collection::Works,
        Collection::Advertisements,
        Collection::Announcements,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Works => "works",
            Collection::Advertisements => "advertisements",
            Collection::Announcements => "announcements",
            Collection::Pages => "pages",
        }
    }

    pub fn manifest_path(self) -> String {
        format!("{}/{}", self.name(), MANIFEST_FILE)
    }

    pub fn item_path(self, id: &str) -> String {
        format!("{}/{}.json", self.name(), id)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown collection: {s}"))
    }
}

/// A singleton page in the `pages` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageName {
    Home,
    About,
    Legal,
}

impl PageName {
    pub const ALL: [PageName; 3] = [PageName::Home, PageName::About, PageName::Legal];

    pub fn id(self) -> &'static str {
        match self {
            PageName::Home => "home",
            PageName::About => "about",
            PageName::Legal => "legal",
        }
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
