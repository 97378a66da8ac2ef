//! Built-in portfolio templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping is off: every string
//! handed to a template is either escaped while building the data below or
//! is rendered HTML.

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{NavItem, SiteConfig};
use crate::content::{ContentItem, TimelineEntry};
use crate::helpers::{self, escape_html, url_for, BuildStamp};

/// Template renderer with the embedded portfolio theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Text is escaped up front, URLs must not be
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("portfolio/layout.html")),
            ("macros.html", include_str!("portfolio/macros.html")),
            ("home.html", include_str!("portfolio/home.html")),
            ("resume.html", include_str!("portfolio/resume.html")),
            ("list.html", include_str!("portfolio/list.html")),
            ("item.html", include_str!("portfolio/item.html")),
            ("photography.html", include_str!("portfolio/photography.html")),
            ("404.html", include_str!("portfolio/404.html")),
            // Partials
            ("partials/head.html", include_str!("portfolio/partials/head.html")),
            (
                "partials/header.html",
                include_str!("portfolio/partials/header.html"),
            ),
            ("partials/nav.html", include_str!("portfolio/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("portfolio/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Default stylesheet written to `css/style.css`
pub const STYLESHEET: &str = include_str!("portfolio/style.css");

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "…".to_string(),
    };
    Ok(tera::Value::String(helpers::truncate(&s, length, &omission)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub name: String,
    pub title: String,
    pub description: String,
    pub tagline: String,
    pub email: String,
    pub github: String,
    pub linkedin: String,
    pub root: String,
    pub stylesheet: String,
    /// Keys from `_config.yml` that have no dedicated field
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            name: escape_html(&config.name),
            title: escape_html(&config.title),
            description: escape_html(&config.description),
            tagline: escape_html(&config.tagline),
            email: escape_html(&config.email),
            github: escape_html(&config.social.github),
            linkedin: escape_html(&config.social.linkedin),
            root: url_for(config, "/"),
            stylesheet: url_for(config, "/css/style.css"),
            extra: config
                .extra
                .iter()
                .map(|(key, value)| (key.clone(), escape_value(value)))
                .collect(),
        }
    }
}

/// Escape every string inside a config value
fn escape_value(value: &serde_yaml::Value) -> serde_yaml::Value {
    use serde_yaml::Value;
    match value {
        Value::String(s) => Value::String(escape_html(s)),
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(escape_value).collect()),
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), escape_value(v)))
                .collect(),
        ),
        Value::Tagged(tagged) => escape_value(&tagged.value),
        other => other.clone(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavData {
    pub label: String,
    pub href: String,
    pub is_anchor: bool,
    pub active: bool,
}

impl NavData {
    /// Navigation entries in declared order, marking the one for `current_path`
    pub fn for_page(config: &SiteConfig, current_path: &str) -> Vec<Self> {
        config
            .nav_items
            .iter()
            .map(|item: &NavItem| NavData {
                label: escape_html(&item.label),
                href: escape_html(&url_for(config, &item.href)),
                is_anchor: item.is_anchor,
                active: !item.is_anchor && helpers::is_current(&item.href, current_path),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterData {
    pub year: String,
    pub updated: String,
}

impl From<&BuildStamp> for FooterData {
    fn from(stamp: &BuildStamp) -> Self {
        Self {
            year: stamp.year.clone(),
            updated: stamp.formatted.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemData {
    pub slug: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub featured: bool,
    /// Display form of the date range, e.g. `Jan 2022 – Present`
    pub dates: Option<String>,
    /// Machine-readable start, for `<time datetime>`
    pub start: Option<String>,
    pub ongoing: bool,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub repo: Option<String>,
    pub image: Option<String>,
    pub content: String,
    /// Detail page URL, for categories that have one
    pub url: Option<String>,
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl ItemData {
    pub fn new(config: &SiteConfig, item: &ContentItem, url: Option<String>) -> Self {
        let fm = &item.frontmatter;
        let dates = item.dates();
        let text = |v: &Option<String>| v.as_deref().map(escape_html);
        let href = |v: &Option<String>| v.as_deref().map(|u| escape_html(&url_for(config, u)));

        Self {
            slug: item.slug.clone(),
            category: item.category.dir_name().to_string(),
            title: escape_html(item.title()),
            description: escape_html(item.description()),
            tags: fm.tags.iter().map(|t| escape_html(t)).collect(),
            featured: fm.featured,
            dates: dates.as_ref().map(|d| d.display()),
            start: dates.as_ref().map(|d| d.start.to_string()),
            ongoing: dates.as_ref().map(|d| d.is_ongoing()).unwrap_or(false),
            organization: text(&fm.organization),
            role: text(&fm.role),
            location: text(&fm.location),
            link: href(&fm.link),
            repo: href(&fm.repo),
            image: fm
                .image
                .as_deref()
                .map(|u| escape_html(&url_for(config, &helpers::encode_path(u)))),
            content: item.html.clone(),
            url,
            extra: fm.extra.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineData {
    pub kind: String,
    pub label: String,
    pub item: ItemData,
}

impl TimelineData {
    pub fn new(config: &SiteConfig, entry: &TimelineEntry, url: Option<String>) -> Self {
        Self {
            kind: entry.category.dir_name().to_string(),
            label: entry.category.label().to_string(),
            item: ItemData::new(config, &entry.item, url),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    pub id: String,
    pub heading: String,
    pub items: Vec<ItemData>,
}
