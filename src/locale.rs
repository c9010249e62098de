//! Locale selection, reading direction, and bilingual field resolution.
//!
//! The site is published in two languages. Every bilingual field in the
//! content follows the same naming convention: a language-neutral name with a
//! per-locale suffix.
//!
//! ```text
//! titleAr / titleFr
//! descriptionAr / descriptionFr
//! heroTitleAr / heroTitleFr
//! ```
//!
//! [`pick`] resolves one of those pairs for a [`Locale`]. There is no
//! fallback: a field missing for the requested locale resolves to the empty
//! string, even if the other locale has a value.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A language the site is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ar, Locale::Fr];

    /// Short code used for output directories and the `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::Fr => "fr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "ar" => Some(Locale::Ar),
            "fr" => Some(Locale::Fr),
            _ => None,
        }
    }

    /// The other locale.
    pub fn toggled(self) -> Self {
        match self {
            Locale::Ar => Locale::Fr,
            Locale::Fr => Locale::Ar,
        }
    }

    /// Suffix appended to a bilingual field name (`title` → `titleAr`).
    pub fn field_suffix(self) -> &'static str {
        match self {
            Locale::Ar => "Ar",
            Locale::Fr => "Fr",
        }
    }

    /// Name of the locale in its own language, for the language toggle.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::Ar => "العربية",
            Locale::Fr => "Français",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Reading direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rtl,
    Ltr,
}

impl Direction {
    /// Value for the HTML `dir` attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            Direction::Rtl => "rtl",
            Direction::Ltr => "ltr",
        }
    }
}

pub fn direction_of(locale: Locale) -> Direction {
    match locale {
        Locale::Ar => Direction::Rtl,
        Locale::Fr => Direction::Ltr,
    }
}

/// Read access to the string fields of a content record by their JSON name.
///
/// Implemented by every record type so [`pick`] works uniformly over works,
/// advertisements, announcements and pages.
pub trait Localized {
    /// Value of the field with the exact JSON name `key` (e.g. `"titleAr"`).
    fn text(&self, key: &str) -> Option<&str>;
}

/// Resolve bilingual `field` of `record` for `locale`.
///
/// `pick(work, "title", Locale::Ar)` returns `work.titleAr`. Missing fields
/// resolve to `""`.
pub fn pick<'a, R: Localized + ?Sized>(record: &'a R, field: &str, locale: Locale) -> &'a str {
    let key = format!("{field}{}", locale.field_suffix());
    record.text(&key).unwrap_or("")
}

/// The active locale for a rendering session.
///
/// Starts at the configured default and only changes through [`toggle`].
///
/// [`toggle`]: LocaleState::toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocaleState {
    current: Locale,
}

impl LocaleState {
    pub fn new(initial: Locale) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Locale {
        self.current
    }

    pub fn direction(&self) -> Direction {
        direction_of(self.current)
    }

    /// Switch to the other locale and return the new one.
    pub fn toggle(&mut self) -> Locale {
        self.current = self.current.toggled();
        self.current
    }
}

const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

fn to_arabic_indic(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => ARABIC_INDIC_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Format a content date for display.
///
/// - `fr`: `10/01/2024`
/// - `ar`: `١٠/١/٢٠٢٤` (day/month/year in Arabic-Indic digits)
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Fr => date.format("%d/%m/%Y").to_string(),
        Locale::Ar => to_arabic_indic(&format!(
            "{}/{}/{}",
            date.day(),
            date.month(),
            date.year()
        )),
    }
}
