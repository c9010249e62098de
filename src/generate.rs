//! HTML site generation.
//!
//! Loads all content once through the [`ContentLoader`], then renders every
//! page in each locale. The active locale is held by a [`LocaleState`] that
//! starts at the configured default and is toggled once per locale; each page
//! receives it explicitly through a [`RenderContext`].
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Redirect to the default locale
//! ├── ar/                        # dir="rtl"
//! │   ├── index.html             # Home
//! │   ├── about.html
//! │   ├── works.html             # List + per-work detail overlays
//! │   ├── advertisements.html    # List + per-advertisement detail overlays
//! │   ├── legal.html
//! │   └── donate.html
//! └── fr/                        # dir="ltr"
//!     └── ...
//! ```
//!
//! ## Detail Overlays
//!
//! List cards link to `#work-<id>` / `#ad-<id>`. The matching overlay is shown
//! with the CSS `:target` selector and lists every image of the item. Closing
//! links back to `#`, so the list is never reloaded.
//!
//! ## Home Page Sections
//!
//! The home page is composed from independent loads (page text, featured
//! works, advertisements, announcements). Each section is rendered only when
//! its data is present; a missing `home.json` removes the hero but leaves the
//! other sections intact.

use crate::config::{self, ConfigError, SiteConfig};
use crate::loader::{ContentLoader, FEATURED_LIMIT, select_featured};
use crate::locale::{Direction, Locale, LocaleState, direction_of, format_date, pick};
use crate::records::{
    AboutPage, Advertisement, Announcement, HomePage, Item, LegalPage, Work,
};
use crate::store::{ContentStore, FsStore};
use crate::translations::{self, Strings};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event, Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Top-level pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitePage {
    Home,
    About,
    Works,
    Advertisements,
    Legal,
    Donate,
}

impl SitePage {
    pub const ALL: [SitePage; 6] = [
        SitePage::Home,
        SitePage::About,
        SitePage::Works,
        SitePage::Advertisements,
        SitePage::Legal,
        SitePage::Donate,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SitePage::Home => "index.html",
            SitePage::About => "about.html",
            SitePage::Works => "works.html",
            SitePage::Advertisements => "advertisements.html",
            SitePage::Legal => "legal.html",
            SitePage::Donate => "donate.html",
        }
    }

    fn label(self, t: &Strings) -> &'static str {
        match self {
            SitePage::Home => t.nav.home,
            SitePage::About => t.nav.about,
            SitePage::Works => t.nav.works,
            SitePage::Advertisements => t.nav.advertisements,
            SitePage::Legal => t.nav.legal,
            SitePage::Donate => t.nav.donate,
        }
    }
}

/// Everything a renderer needs besides the content itself.
pub struct RenderContext<'a> {
    pub locale: Locale,
    pub config: &'a SiteConfig,
    pub css: &'a str,
    t: &'static Strings,
}

impl<'a> RenderContext<'a> {
    pub fn new(locale: Locale, config: &'a SiteConfig, css: &'a str) -> Self {
        Self {
            locale,
            config,
            css,
            t: translations::strings(locale),
        }
    }

    pub fn direction(&self) -> Direction {
        direction_of(self.locale)
    }

    fn site_name(&self) -> &str {
        self.config.site_name(self.locale)
    }
}

/// Home page data. `None` means the section's load has not produced data.
#[derive(Debug, Default)]
pub struct HomeView {
    pub page: Option<HomePage>,
    pub featured: Option<Vec<Item<Work>>>,
    pub advertisements: Option<Vec<Item<Advertisement>>>,
    pub announcements: Option<Vec<Item<Announcement>>>,
}

/// All content the site renders, loaded once for both locales.
#[derive(Debug, Default)]
pub struct SiteContent {
    pub home: HomeView,
    pub about: Option<AboutPage>,
    pub legal: Option<LegalPage>,
    pub works: Vec<Item<Work>>,
    pub advertisements: Vec<Item<Advertisement>>,
}

impl SiteContent {
    /// Run every load concurrently, each collection exactly once.
    ///
    /// The home view is derived from the full lists: featured works are
    /// selected from the sorted works, advertisements are shared with the
    /// advertisements page.
    pub fn load<S: ContentStore>(loader: &ContentLoader<S>) -> Self {
        let ((home_page, (about, legal)), (works, (advertisements, announcements))) = rayon::join(
            || {
                rayon::join(
                    || loader.load_page::<HomePage>(),
                    || {
                        rayon::join(
                            || loader.load_page::<AboutPage>(),
                            || loader.load_page::<LegalPage>(),
                        )
                    },
                )
            },
            || {
                rayon::join(
                    || loader.works(),
                    || rayon::join(|| loader.advertisements(), || loader.announcements()),
                )
            },
        );
        let home = HomeView {
            page: home_page,
            featured: Some(select_featured(works.clone(), FEATURED_LIMIT)),
            advertisements: Some(advertisements.clone()),
            announcements: Some(announcements),
        };
        Self {
            home,
            about,
            legal,
            works,
            advertisements,
        }
    }
}

/// A rendered page and its path relative to the output directory.
#[derive(Debug)]
pub struct RenderedPage {
    pub path: String,
    pub html: String,
}

/// Summary of a generate run, for CLI output.
#[derive(Debug)]
pub struct GenerateReport {
    pub pages: Vec<String>,
    pub works: usize,
    pub featured: usize,
    pub advertisements: usize,
    pub announcements: usize,
    pub missing_pages: Vec<&'static str>,
}

pub fn generate(source: &Path, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let config = config::load_config(source)?;
    let loader = ContentLoader::new(FsStore::new(source));
    let content = SiteContent::load(&loader);

    let pages = render_site(&content, &config);
    for page in &pages {
        let path = output_dir.join(&page.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &page.html)?;
        info!(path = %page.path, "wrote page");
    }

    let mut missing_pages = Vec::new();
    if content.home.page.is_none() {
        missing_pages.push("home");
    }
    if content.about.is_none() {
        missing_pages.push("about");
    }
    if content.legal.is_none() {
        missing_pages.push("legal");
    }

    Ok(GenerateReport {
        pages: pages.into_iter().map(|p| p.path).collect(),
        works: content.works.len(),
        featured: content.home.featured.as_ref().map_or(0, Vec::len),
        advertisements: content.advertisements.len(),
        announcements: content.home.announcements.as_ref().map_or(0, Vec::len),
        missing_pages,
    })
}

/// Render every page in every locale, plus the root redirect.
///
/// Pure: no filesystem access.
pub fn render_site(content: &SiteContent, config: &SiteConfig) -> Vec<RenderedPage> {
    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    let mut pages = vec![RenderedPage {
        path: "index.html".to_string(),
        html: render_root_redirect(config.default_locale).into_string(),
    }];

    let mut state = LocaleState::new(config.default_locale);
    for _ in Locale::ALL {
        let ctx = RenderContext::new(state.current(), config, &css);
        for page in SitePage::ALL {
            pages.push(RenderedPage {
                path: format!("{}/{}", ctx.locale.code(), page.file_name()),
                html: render_page(page, content, &ctx).into_string(),
            });
        }
        state.toggle();
    }
    pages
}

fn render_page(page: SitePage, content: &SiteContent, ctx: &RenderContext) -> Markup {
    match page {
        SitePage::Home => render_home(&content.home, ctx),
        SitePage::About => render_text_page(content.about.as_ref(), SitePage::About, ctx),
        SitePage::Works => render_works(&content.works, ctx),
        SitePage::Advertisements => render_advertisements(&content.advertisements, ctx),
        SitePage::Legal => render_text_page(content.legal.as_ref(), SitePage::Legal, ctx),
        SitePage::Donate => render_donate(ctx),
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document with header and footer.
fn base_document(ctx: &RenderContext, current: SitePage, content: Markup) -> Markup {
    let dir = ctx.direction().as_attr();
    html! {
        (DOCTYPE)
        html lang=(ctx.locale.code()) dir=(dir) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (current.label(ctx.t)) " | " (ctx.site_name()) }
                link rel="alternate" hreflang=(ctx.locale.toggled().code())
                    href={ "../" (ctx.locale.toggled().code()) "/" (current.file_name()) };
                style { (PreEscaped(ctx.css)) }
            }
            body class={ "dir-" (dir) } {
                (site_header(ctx, current))
                main { (content) }
                (site_footer(ctx))
            }
        }
    }
}

/// Header with brand, navigation, and the language toggle.
///
/// The toggle points at the same page in the other locale.
fn site_header(ctx: &RenderContext, current: SitePage) -> Markup {
    let other = ctx.locale.toggled();
    html! {
        header.site-header {
            a.site-brand href="index.html" { (ctx.site_name()) }
            nav.site-nav {
                ul {
                    @for page in SitePage::ALL {
                        li class=[(page == current).then_some("current")] {
                            a href=(page.file_name()) { (page.label(ctx.t)) }
                        }
                    }
                }
            }
            a.lang-toggle href={ "../" (other.code()) "/" (current.file_name()) }
                lang=(other.code()) hreflang=(other.code()) {
                (other.native_name())
            }
        }
    }
}

fn site_footer(ctx: &RenderContext) -> Markup {
    let t = ctx.t;
    html! {
        footer.site-footer {
            div.footer-about {
                p { strong { (ctx.site_name()) } }
                @let description = ctx.config.site_description(ctx.locale);
                @if !description.is_empty() {
                    p.footer-description { (description) }
                }
            }
            nav {
                h3 { (t.footer.quick_links) }
                ul {
                    @for page in SitePage::ALL {
                        li { a href=(page.file_name()) { (page.label(t)) } }
                    }
                }
            }
            div.footer-contact {
                h3 { (t.footer.contact) }
                (phone_line(ctx))
                a.button href=(ctx.config.donate.url) target="_blank" rel="noopener" {
                    (t.donate.button)
                }
            }
            @if !ctx.config.finance.entries().is_empty() {
                section.footer-finance {
                    h3 { (t.finance.title) }
                    (finance_list(ctx))
                }
            }
            p.rights { "© " (ctx.site_name()) " · " (t.footer.rights) }
        }
    }
}

/// Contact phone, kept left-to-right inside RTL text. Empty when unset.
fn phone_line(ctx: &RenderContext) -> Markup {
    let phone = &ctx.config.contact.phone;
    html! {
        @if !phone.is_empty() {
            p.phone {
                a href=(ctx.config.donate.url) target="_blank" rel="noopener" {
                    bdi dir="ltr" { (phone) }
                }
            }
        }
    }
}

/// Labelled financial identifiers; empty values are skipped.
fn finance_list(ctx: &RenderContext) -> Markup {
    let entries = ctx.config.finance.entries();
    html! {
        @if !entries.is_empty() {
            dl.finance {
                @for (field, value) in &entries {
                    dt { (ctx.t.finance.label(*field)) }
                    dd { bdi dir="ltr" { (value) } }
                }
            }
        }
    }
}

/// Markdown to HTML. Raw HTML in the source is emitted as escaped text.
fn render_markdown(source: &str) -> Markup {
    let parser = Parser::new(source).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

fn date_tag(date: chrono::NaiveDate, locale: Locale) -> Markup {
    html! {
        time datetime=(date.to_string()) { (format_date(date, locale)) }
    }
}

/// Card shared by the works and advertisements lists.
fn card(href: &str, title: &str, image: Option<&str>, meta: Markup, body: Option<&str>) -> Markup {
    html! {
        a.card href=(href) {
            @if let Some(src) = image {
                img src=(src) alt=(title) loading="lazy";
            }
            div.card-body {
                div.card-meta { (meta) }
                h3 { (title) }
                @if let Some(text) = body.filter(|b| !b.is_empty()) {
                    p { (text) }
                }
            }
        }
    }
}

/// Detail overlay listing every image of an item.
fn detail_overlay(
    anchor: &str,
    title: &str,
    images: &[&str],
    meta: Markup,
    body: Option<&str>,
    ctx: &RenderContext,
) -> Markup {
    html! {
        section.overlay id=(anchor) {
            div.overlay-panel {
                a.overlay-close href="#" { (ctx.t.close) }
                h2 { (title) }
                div.card-meta { (meta) }
                @if let Some(text) = body.filter(|b| !b.is_empty()) {
                    p { (text) }
                }
                div.overlay-images {
                    @for src in images {
                        img src=(src) alt=(title) loading="lazy";
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_root_redirect(default_locale: Locale) -> Markup {
    let target = format!("{}/index.html", default_locale.code());
    html! {
        (DOCTYPE)
        html lang=(default_locale.code()) dir=(direction_of(default_locale).as_attr()) {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                title { "…" }
            }
            body {
                ul {
                    @for locale in Locale::ALL {
                        li {
                            a href={ (locale.code()) "/index.html" } lang=(locale.code()) {
                                (locale.native_name())
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_home(home: &HomeView, ctx: &RenderContext) -> Markup {
    let locale = ctx.locale;
    let t = ctx.t;
    let content = html! {
        @if let Some(page) = &home.page {
            section.hero {
                h1 { (pick(page, "heroTitle", locale)) }
                p { (pick(page, "heroSlogan", locale)) }
                a.button href=(ctx.config.donate.url) target="_blank" rel="noopener" {
                    (t.home.donate)
                }
            }
        }
        @if let Some(works) = home.featured.as_ref().filter(|w| !w.is_empty()) {
            section.section.featured-works {
                div.section-header {
                    h2 { (t.home.latest_works) }
                    a href=(SitePage::Works.file_name()) { (t.home.view_all) }
                }
                div.card-grid {
                    @for work in works {
                        (card(
                            &format!("{}#work-{}", SitePage::Works.file_name(), work.id),
                            pick(work, "title", locale),
                            work.images.first().map(String::as_str),
                            date_tag(work.date, locale),
                            Some(pick(work, "description", locale)),
                        ))
                    }
                }
            }
        }
        @if let Some(ads) = home.advertisements.as_ref().filter(|a| !a.is_empty()) {
            section.section.home-advertisements {
                div.section-header {
                    h2 { (t.home.advertisements) }
                    a href=(SitePage::Advertisements.file_name()) { (t.home.view_all) }
                }
                div.card-grid {
                    @for ad in ads {
                        (card(
                            &format!("{}#ad-{}", SitePage::Advertisements.file_name(), ad.id),
                            pick(ad, "title", locale),
                            ad.all_images().first().copied(),
                            date_tag(ad.date, locale),
                            None,
                        ))
                    }
                }
            }
        }
        @if let Some(announcements) = home.announcements.as_ref().filter(|a| !a.is_empty()) {
            section.section.home-announcements {
                h2 { (t.home.latest_announcements) }
                ul.announcements {
                    @for ann in announcements {
                        li id={ "announcement-" (ann.id) } {
                            div.card-meta { (date_tag(ann.date, locale)) }
                            h3 { (pick(ann, "title", locale)) }
                            (render_markdown(pick(ann, "content", locale)))
                        }
                    }
                }
            }
        }
        @if !ctx.config.stats.is_empty() {
            section.section.home-stats {
                ul.stats {
                    @for stat in &ctx.config.stats {
                        li {
                            strong.stat-number { (pick(stat, "number", locale)) }
                            span.stat-label { (pick(stat, "label", locale)) }
                        }
                    }
                }
            }
        }
    };
    base_document(ctx, SitePage::Home, content)
}

fn render_works(works: &[Item<Work>], ctx: &RenderContext) -> Markup {
    let locale = ctx.locale;
    let t = ctx.t;
    let content = html! {
        header.page-intro {
            h1 { (t.works.title) }
            p { (t.works.subtitle) }
        }
        div.card-grid {
            @for work in works {
                (card(
                    &format!("#work-{}", work.id),
                    pick(work, "title", locale),
                    work.images.first().map(String::as_str),
                    html! {
                        (date_tag(work.date, locale))
                        span { (work.images.len()) " " (t.photos) }
                    },
                    Some(pick(work, "description", locale)),
                ))
            }
        }
        @for work in works {
            @let images: Vec<&str> = work.images.iter().map(String::as_str).collect();
            (detail_overlay(
                &format!("work-{}", work.id),
                pick(work, "title", locale),
                &images,
                date_tag(work.date, locale),
                Some(pick(work, "description", locale)),
                ctx,
            ))
        }
    };
    base_document(ctx, SitePage::Works, content)
}

fn render_advertisements(ads: &[Item<Advertisement>], ctx: &RenderContext) -> Markup {
    let locale = ctx.locale;
    let t = ctx.t;
    let content = html! {
        header.page-intro {
            h1 { (t.advertisements.title) }
            p { (t.advertisements.subtitle) }
        }
        div.card-grid {
            @for ad in ads {
                (card(
                    &format!("#ad-{}", ad.id),
                    pick(ad, "title", locale),
                    ad.all_images().first().copied(),
                    date_tag(ad.date, locale),
                    None,
                ))
            }
        }
        @for ad in ads {
            (detail_overlay(
                &format!("ad-{}", ad.id),
                pick(ad, "title", locale),
                &ad.all_images(),
                date_tag(ad.date, locale),
                None,
                ctx,
            ))
        }
    };
    base_document(ctx, SitePage::Advertisements, content)
}

/// About and legal pages: title plus Markdown body. A missing document
/// renders an empty main region.
fn render_text_page<P: crate::locale::Localized>(
    page: Option<&P>,
    current: SitePage,
    ctx: &RenderContext,
) -> Markup {
    let content = html! {
        @if let Some(page) = page {
            article.text-page {
                h1 { (pick(page, "title", ctx.locale)) }
                (render_markdown(pick(page, "content", ctx.locale)))
            }
        }
    };
    base_document(ctx, current, content)
}

fn render_donate(ctx: &RenderContext) -> Markup {
    let t = ctx.t;
    let content = html! {
        section.hero.donate {
            h1 { (t.donate.title) }
            p { (t.donate.description) }
            h2 { (t.donate.call) }
            p { (t.donate.promise) }
            a.button href=(ctx.config.donate.url) target="_blank" rel="noopener" {
                (t.donate.button)
            }
            (phone_line(ctx))
        }
        @let image = &ctx.config.finance.bank_details_image;
        @if !ctx.config.finance.entries().is_empty() || !image.is_empty() {
            section.section.bank-details {
                h2 { (t.donate.bank_details) }
                (finance_list(ctx))
                @if !image.is_empty() {
                    img src=(image) alt=(t.donate.bank_details) loading="lazy";
                }
            }
        }
    };
    base_document(ctx, SitePage::Donate, content)
}

// ============================================================================
// Tests
// ============================================================================
