//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Identity
    pub name: String,
    pub title: String,
    pub description: String,
    pub tagline: String,
    pub email: String,
    #[serde(default)]
    pub social: SocialLinks,

    // Navigation, rendered in declared order
    #[serde(default)]
    pub nav_items: Vec<NavItem>,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Home page
    pub timeline_limit: usize,

    // Footer timestamp, an IANA zone name; empty means local time
    pub timezone: String,

    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Jane Doe".to_string(),
            title: "Jane Doe".to_string(),
            description: String::new(),
            tagline: String::new(),
            email: String::new(),
            social: SocialLinks::default(),

            nav_items: default_nav_items(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            timeline_limit: 8,

            timezone: String::new(),

            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Parse the configured timezone, if any
    pub fn tz(&self) -> Option<chrono_tz::Tz> {
        if self.timezone.is_empty() {
            return None;
        }
        match self.timezone.parse::<chrono_tz::Tz>() {
            Ok(tz) => Some(tz),
            Err(e) => {
                tracing::warn!("Ignoring unknown timezone {:?}: {}", self.timezone, e);
                None
            }
        }
    }
}

/// Social profile links shown in the footer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
}

/// A header navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    /// In-page anchor (e.g. `/#projects`) rather than a separate route
    #[serde(default, alias = "isAnchor")]
    pub is_anchor: bool,
}

impl NavItem {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            is_anchor: false,
        }
    }

    pub fn anchor(label: &str, href: &str) -> Self {
        Self {
            is_anchor: true,
            ..Self::new(label, href)
        }
    }
}

fn default_nav_items() -> Vec<NavItem> {
    vec![
        NavItem::new("Home", "/"),
        NavItem::new("Resume", "/resume"),
        NavItem::new("Projects", "/projects"),
        NavItem::new("Experience", "/experience"),
        NavItem::new("Extracurricular", "/extracurricular"),
        NavItem::new("Volunteer", "/volunteer"),
        NavItem::new("Photography", "/photography"),
    ]
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
