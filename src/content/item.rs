//! Content item models

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::frontmatter::{DateRange, FrontMatter, PartialDate};

/// A content category; each one is a directory under the content dir
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Projects,
    Jobs,
    Volunteer,
    Extracurricular,
    Photography,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Projects,
        Category::Jobs,
        Category::Volunteer,
        Category::Extracurricular,
        Category::Photography,
    ];

    /// Directory name under the content dir
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Projects => "projects",
            Category::Jobs => "jobs",
            Category::Volunteer => "volunteer",
            Category::Extracurricular => "extracurricular",
            Category::Photography => "photography",
        }
    }

    /// Heading used when listing items of this category
    pub fn label(self) -> &'static str {
        match self {
            Category::Projects => "Projects",
            Category::Jobs => "Experience",
            Category::Volunteer => "Volunteer",
            Category::Extracurricular => "Extracurricular",
            Category::Photography => "Photography",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.dir_name())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "project" | "projects" => Ok(Category::Projects),
            "job" | "jobs" | "experience" => Ok(Category::Jobs),
            "volunteer" | "volunteering" => Ok(Category::Volunteer),
            "extracurricular" | "extracurriculars" => Ok(Category::Extracurricular),
            "photo" | "photos" | "photography" => Ok(Category::Photography),
            _ => anyhow::bail!(
                "Unknown category: {}. Available: projects, jobs, volunteer, extracurricular, photography",
                s
            ),
        }
    }
}

/// A single piece of authored content
#[derive(Debug, Clone)]
pub struct ContentItem {
    /// URL-safe identifier, unique within the category
    pub slug: String,

    pub category: Category,

    /// Parsed front-matter; `title` and `description` are guaranteed present
    pub frontmatter: FrontMatter,

    /// Raw markdown body
    pub body: String,

    /// Rendered HTML body
    pub html: String,

    /// Source file path relative to the content dir
    pub source: PathBuf,
}

impl ContentItem {
    pub fn title(&self) -> &str {
        self.frontmatter.title.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.frontmatter.description.as_deref().unwrap_or_default()
    }

    pub fn is_featured(&self) -> bool {
        self.frontmatter.featured
    }

    pub fn start(&self) -> Option<PartialDate> {
        self.frontmatter.start()
    }

    pub fn dates(&self) -> Option<DateRange> {
        self.frontmatter.date_range()
    }
}

/// A content item placed on the home page timeline
#[derive(Debug, Clone)]
pub struct TimelineEntry {
    pub category: Category,
    pub item: ContentItem,
}
