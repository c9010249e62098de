//! # Sadaqa Site
//!
//! A static site generator for a bilingual (Arabic/French) charitable
//! association. Content is a directory of JSON collections; the output is one
//! HTML tree per locale, each written in its own reading direction.
//!
//! # Architecture
//!
//! ```text
//! 1. Index     content/<collection>/*.json  →  <collection>/index.json
//! 2. Load      index + documents            →  typed, filtered, sorted records
//! 3. Generate  records + config.toml        →  dist/<locale>/*.html
//! ```
//!
//! Content authors only ever drop JSON documents into a collection directory.
//! The index stage refreshes the manifests; loading never trusts the manifest
//! order and re-sorts everything by date.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`collection`] | Collection and page names, and their paths in the content tree |
//! | [`store`] | Read-only document access: filesystem and in-memory stores |
//! | [`index`] | Collection manifests: reading ids with listing fallback, writing `index.json` |
//! | [`records`] | Typed content records and their validation rules |
//! | [`loader`] | Visibility filters, newest-first ordering, featured selection |
//! | [`locale`] | Locales, reading direction, localized field lookup, date formatting |
//! | [`translations`] | Fixed interface strings in each locale |
//! | [`config`] | `config.toml` loading, validation, and color CSS |
//! | [`generate`] | Renders every page in every locale using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Tree Per Locale
//!
//! The published site has no runtime. Switching language is a link to the
//! same page in the other locale's tree, so each tree carries its own `lang`
//! and `dir` attributes and the browser never has to re-lay out a page.
//!
//! ## Bad Content Never Breaks The Build
//!
//! A malformed or missing document is logged and skipped. A missing page
//! renders with an empty body. The only hard errors are I/O failures on the
//! output side and an invalid `config.toml`.

pub mod collection;
pub mod config;
pub mod generate;
pub mod index;
pub mod loader;
pub mod locale;
pub mod output;
pub mod records;
pub mod store;
pub mod translations;

#[cfg(test)]
pub(crate) mod test_helpers;
