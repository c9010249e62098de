//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the content root. Stock
//! defaults are overridden by whatever keys the file sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! default_locale = "ar"     # Locale the root index.html redirects to
//!
//! [site]
//! name_ar = "جمعية مانقص مال من صدقة"
//! name_fr = "Association Manqass Mal Min Sadaqa"
//! description_ar = "جمعية خيرية إنسانية تعمل في جميع مناطق موريتانيا"
//! description_fr = "Association caritative opérant dans toutes les régions de Mauritanie"
//!
//! [donate]
//! url = "https://wa.me/22244444455"
//!
//! [contact]
//! phone = "+222 44 44 45 55"   # Footer and donate page
//!
//! [finance]                    # Empty values are not shown
//! licence = "FA 010000211309202203328"
//! iban = "MR1300018000082100067620171"
//! bankily = "+222 36606886"
//! masrvi = "+222 44444555"
//! sedad = "03650"
//! bank_details_image = ""      # Image shown on the donate page
//!
//! [[stats]]                    # Home page figures; a list replaces the defaults
//! number_ar = "١٠٠+"
//! number_fr = "100+"
//! label_ar = "مشروع خيري"
//! label_fr = "Projets caritatifs"
//!
//! [colors]
//! primary = "#1b4f63"       # Header, headings, links
//! accent = "#c05321"        # Call-to-action buttons
//! background = "#f9fafb"
//! text = "#111827"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::locale::{Locale, Localized};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Locale visitors land on from the site root.
    pub default_locale: Locale,
    /// Association identity shown in the header and footer.
    pub site: SiteInfo,
    /// Donation call-to-action target.
    pub donate: DonateConfig,
    pub contact: ContactConfig,
    /// Bank and payment identifiers shown in the footer and on the donate page.
    pub finance: FinanceConfig,
    /// Key figures on the home page, in display order.
    pub stats: Vec<StatConfig>,
    /// Brand colors emitted as CSS custom properties.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::Ar,
            site: SiteInfo::default(),
            donate: DonateConfig::default(),
            contact: ContactConfig::default(),
            finance: FinanceConfig::default(),
            stats: default_stats(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name_ar.trim().is_empty() || self.site.name_fr.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.name_ar and site.name_fr must not be empty".into(),
            ));
        }
        if !is_http_url(&self.donate.url) {
            return Err(ConfigError::Validation(
                "donate.url must be an http(s) URL".into(),
            ));
        }
        if !self.contact.phone.is_empty() && !is_phone(&self.contact.phone) {
            return Err(ConfigError::Validation(format!(
                "contact.phone must contain only digits, spaces and a leading +, got {:?}",
                self.contact.phone
            )));
        }
        self.finance.validate()?;
        for (i, stat) in self.stats.iter().enumerate() {
            if [&stat.number_ar, &stat.number_fr, &stat.label_ar, &stat.label_fr]
                .iter()
                .any(|v| v.trim().is_empty())
            {
                return Err(ConfigError::Validation(format!(
                    "stats[{i}] needs number_ar, number_fr, label_ar and label_fr"
                )));
            }
        }
        for (key, value) in self.colors.entries() {
            if !is_hex_color(value) {
                return Err(ConfigError::Validation(format!(
                    "colors.{key} must be a hex color like #1b4f63, got {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Association name in `locale`.
    pub fn site_name(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => &self.site.name_ar,
            Locale::Fr => &self.site.name_fr,
        }
    }

    /// One-line association description in `locale`; may be empty.
    pub fn site_description(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => &self.site.description_ar,
            Locale::Fr => &self.site.description_fr,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name_ar: String,
    pub name_fr: String,
    pub description_ar: String,
    pub description_fr: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name_ar: "جمعية مانقص مال من صدقة".to_string(),
            name_fr: "Association Manqass Mal Min Sadaqa".to_string(),
            description_ar: "جمعية خيرية إنسانية تعمل في جميع مناطق موريتانيا".to_string(),
            description_fr: "Association caritative opérant dans toutes les régions de Mauritanie"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Displayed as-is; empty hides it.
    pub phone: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: "+222 44 44 45 55".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinanceConfig {
    /// Association registration licence.
    pub licence: String,
    pub iban: String,
    /// Bankily mobile wallet number.
    pub bankily: String,
    /// Masrvi mobile wallet number.
    pub masrvi: String,
    /// Sedad merchant code.
    pub sedad: String,
    /// Image with the bank details, shown on the donate page.
    pub bank_details_image: String,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            licence: "FA 010000211309202203328".to_string(),
            iban: "MR1300018000082100067620171".to_string(),
            bankily: "+222 36606886".to_string(),
            masrvi: "+222 44444555".to_string(),
            sedad: "03650".to_string(),
            bank_details_image: String::new(),
        }
    }
}

/// Which finance field an entry is, for label lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinanceField {
    Licence,
    Iban,
    Bankily,
    Masrvi,
    Sedad,
}

impl FinanceConfig {
    /// Non-empty identifiers in display order.
    pub fn entries(&self) -> Vec<(FinanceField, &str)> {
        [
            (FinanceField::Licence, self.licence.as_str()),
            (FinanceField::Iban, self.iban.as_str()),
            (FinanceField::Bankily, self.bankily.as_str()),
            (FinanceField::Masrvi, self.masrvi.as_str()),
            (FinanceField::Sedad, self.sedad.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.iban.is_empty() && !is_iban(&self.iban) {
            return Err(ConfigError::Validation(format!(
                "finance.iban must be 15-34 letters and digits starting with a country code, got {:?}",
                self.iban
            )));
        }
        for (key, value) in [("bankily", &self.bankily), ("masrvi", &self.masrvi)] {
            if !value.is_empty() && !is_phone(value) {
                return Err(ConfigError::Validation(format!(
                    "finance.{key} must be a phone number, got {value:?}"
                )));
            }
        }
        if !self.bank_details_image.is_empty() && !is_http_url(&self.bank_details_image) {
            return Err(ConfigError::Validation(
                "finance.bank_details_image must be an http(s) URL".into(),
            ));
        }
        Ok(())
    }
}

/// One home page figure, e.g. "38 wells dug".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatConfig {
    pub number_ar: String,
    pub number_fr: String,
    pub label_ar: String,
    pub label_fr: String,
}

impl Localized for StatConfig {
    fn text(&self, key: &str) -> Option<&str> {
        match key {
            "numberAr" => Some(&self.number_ar),
            "numberFr" => Some(&self.number_fr),
            "labelAr" => Some(&self.label_ar),
            "labelFr" => Some(&self.label_fr),
            _ => None,
        }
    }
}

fn stat(number_ar: &str, number_fr: &str, label_ar: &str, label_fr: &str) -> StatConfig {
    StatConfig {
        number_ar: number_ar.to_string(),
        number_fr: number_fr.to_string(),
        label_ar: label_ar.to_string(),
        label_fr: label_fr.to_string(),
    }
}

fn default_stats() -> Vec<StatConfig> {
    vec![
        stat("١٠٠+", "100+", "مشروع خيري", "Projets caritatifs"),
        stat("٥٠٠٠+", "5000+", "أسرة مستفيدة", "Familles bénéficiaires"),
        stat("٣٨", "38", "بئر محفور", "Puits creusés"),
        stat("٢٠٠+", "200+", "متطوع", "Bénévoles"),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DonateConfig {
    /// Where the "donate" buttons point.
    pub url: String,
}

impl Default for DonateConfig {
    fn default() -> Self {
        Self {
            url: "https://wa.me/22244444455".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Header, headings and links.
    pub primary: String,
    /// Call-to-action buttons.
    pub accent: String,
    pub background: String,
    pub text: String,
}

impl ColorConfig {
    fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("primary", self.primary.as_str()),
            ("accent", self.accent.as_str()),
            ("background", self.background.as_str()),
            ("text", self.text.as_str()),
        ]
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#1b4f63".to_string(),
            accent: "#c05321".to_string(),
            background: "#f9fafb".to_string(),
            text: "#111827".to_string(),
        }
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

/// Digits and spaces, optionally led by `+`.
fn is_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == ' ')
}

fn is_iban(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| *c != ' ').collect();
    (15..=34).contains(&compact.len())
        && compact.chars().take(2).all(|c| c.is_ascii_uppercase())
        && compact.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sadaqa-site configuration
# =========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Locale the site root redirects to: "ar" or "fr".
default_locale = "ar"

# ---------------------------------------------------------------------------
# Association identity (header, footer, page titles)
# ---------------------------------------------------------------------------
[site]
name_ar = "جمعية مانقص مال من صدقة"
name_fr = "Association Manqass Mal Min Sadaqa"

description_ar = "جمعية خيرية إنسانية تعمل في جميع مناطق موريتانيا"
description_fr = "Association caritative opérant dans toutes les régions de Mauritanie"

# ---------------------------------------------------------------------------
# Donation call-to-action
# ---------------------------------------------------------------------------
[donate]
url = "https://wa.me/22244444455"

# ---------------------------------------------------------------------------
# Contact (footer, donate page). Empty hides it.
# ---------------------------------------------------------------------------
[contact]
phone = "+222 44 44 45 55"

# ---------------------------------------------------------------------------
# Financial information (footer, donate page). Empty values are not shown.
# ---------------------------------------------------------------------------
[finance]
licence = "FA 010000211309202203328"
iban = "MR1300018000082100067620171"
bankily = "+222 36606886"            # Mobile wallet
masrvi = "+222 44444555"             # Mobile wallet
sedad = "03650"                      # Merchant code
bank_details_image = ""              # http(s) URL of a bank details image

# ---------------------------------------------------------------------------
# Colors (CSS hex values)
# ---------------------------------------------------------------------------
[colors]
primary = "#1b4f63"       # Header, headings, links
accent = "#c05321"        # Call-to-action buttons
background = "#f9fafb"
text = "#111827"

# ---------------------------------------------------------------------------
# Home page figures, in display order. Setting any [[stats]] replaces the
# whole default list.
# ---------------------------------------------------------------------------
[[stats]]
number_ar = "١٠٠+"
number_fr = "100+"
label_ar = "مشروع خيري"
label_fr = "Projets caritatifs"

[[stats]]
number_ar = "٥٠٠٠+"
number_fr = "5000+"
label_ar = "أسرة مستفيدة"
label_fr = "Familles bénéficiaires"

[[stats]]
number_ar = "٣٨"
number_fr = "38"
label_ar = "بئر محفور"
label_fr = "Puits creusés"

[[stats]]
number_ar = "٢٠٠+"
number_fr = "200+"
label_ar = "متطوع"
label_fr = "Bénévoles"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-accent: {accent};
    --color-bg: {background};
    --color-text: {text};
}}"#,
        primary = colors.primary,
        accent = colors.accent,
        background = colors.background,
        text = colors.text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.default_locale, Locale::Ar);
        assert_eq!(config.colors.primary, "#1b4f63");
        assert!(config.donate.url.starts_with("https://"));
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn site_name_per_locale() {
        let config = SiteConfig::default();
        assert_eq!(config.site_name(Locale::Fr), "Association Manqass Mal Min Sadaqa");
        assert_eq!(config.site_name(Locale::Ar), "جمعية مانقص مال من صدقة");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.default_locale, Locale::Ar);
    }

    #[test]
    fn load_config_merges_partial_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
default_locale = "fr"

[colors]
accent = "#ff8800"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.default_locale, Locale::Fr);
        assert_eq!(config.colors.accent, "#ff8800");
        // Unspecified values keep defaults
        assert_eq!(config.colors.primary, "#1b4f63");
        assert_eq!(config.site.name_fr, "Association Manqass Mal Min Sadaqa");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[donate]\nphone = \"123\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_locale_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "default_locale = \"en\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn validate_rejects_non_http_donate_url() {
        let mut config = SiteConfig::default();
        config.donate.url = "wa.me/222".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_bad_color() {
        let mut config = SiteConfig::default();
        config.colors.text = "black".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_site_name() {
        let mut config = SiteConfig::default();
        config.site.name_ar = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn stats_list_replaces_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[[stats]]
number_ar = "١٢"
number_fr = "12"
label_ar = "مدرسة"
label_fr = "Écoles"
"#,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.stats.len(), 1);
        assert_eq!(config.stats[0].label_fr, "Écoles");
    }

    #[test]
    fn default_stats_come_from_stock_values() {
        let config = SiteConfig::default();
        assert_eq!(config.stats.len(), 4);
        assert_eq!(config.stats[2].number_fr, "38");
        assert_eq!(config.stats[2].number_ar, "٣٨");
    }

    #[test]
    fn validate_rejects_incomplete_stat() {
        let mut config = SiteConfig::default();
        config.stats[1].label_ar = String::new();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("stats[1]"), "{err}");
    }

    #[test]
    fn finance_and_contact_keys_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[contact]\nphone = \"+222 11 22 33 44\"\n\n[finance]\nsedad = \"\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.contact.phone, "+222 11 22 33 44");
        let fields: Vec<FinanceField> = config.finance.entries().iter().map(|(f, _)| *f).collect();
        assert!(!fields.contains(&FinanceField::Sedad));
        assert!(fields.contains(&FinanceField::Iban));
    }

    #[test]
    fn validate_rejects_bad_finance_values() {
        let mut config = SiteConfig::default();
        config.finance.iban = "not an iban".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = SiteConfig::default();
        config.finance.bankily = "call us".into();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.finance.bank_details_image = "bank.png".into();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.contact.phone = "phone".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_finance_and_phone_are_allowed() {
        let mut config = SiteConfig::default();
        config.contact.phone = String::new();
        config.finance = FinanceConfig {
            licence: String::new(),
            iban: String::new(),
            bankily: String::new(),
            masrvi: String::new(),
            sedad: String::new(),
            bank_details_image: String::new(),
        };
        assert!(config.validate().is_ok());
        assert!(config.finance.entries().is_empty());
    }

    #[test]
    fn phone_and_iban_shapes() {
        assert!(is_phone("+222 36606886"));
        assert!(is_phone("03650"));
        assert!(!is_phone("+"));
        assert!(!is_phone("22-33"));
        assert!(is_iban("MR1300018000082100067620171"));
        assert!(is_iban("MR13 0001 8000 0821 0006 7620 171"));
        assert!(!is_iban("1300018000082100067620171"));
        assert!(!is_iban("MR13"));
    }

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#1B4F63"));
        assert!(!is_hex_color("1b4f63"));
        assert!(!is_hex_color("#12345"));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[colors]\nprimary = \"#000\"\ntext = \"#111\"").unwrap();
        let overlay: toml::Value = toml::from_str("[colors]\ntext = \"#222\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["colors"]["primary"].as_str(), Some("#000"));
        assert_eq!(merged["colors"]["text"].as_str(), Some("#222"));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.default_locale, defaults.default_locale);
        assert_eq!(config.site.name_ar, defaults.site.name_ar);
        assert_eq!(config.donate.url, defaults.donate.url);
        assert_eq!(config.colors.accent, defaults.colors.accent);
        assert_eq!(config.contact.phone, defaults.contact.phone);
        assert_eq!(config.finance.iban, defaults.finance.iban);
        assert_eq!(config.site.description_fr, defaults.site.description_fr);
        assert_eq!(config.stats.len(), defaults.stats.len());
        assert_eq!(config.stats[3].label_ar, defaults.stats[3].label_ar);
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.primary = "#123456".into();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-primary: #123456"));
        assert!(css.contains("--color-accent: #c05321"));
    }
}
