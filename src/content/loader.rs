//! Content loader - loads content items from the content directory

use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{ContentError, Result};
use super::frontmatter::newest_first;
use super::{Category, ContentItem, FrontMatter, MarkdownRenderer, TimelineEntry};
use crate::Portfolio;

lazy_static! {
    static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Categories merged into the home page timeline, in tie-break order
const TIMELINE_CATEGORIES: [Category; 3] = [
    Category::Jobs,
    Category::Volunteer,
    Category::Extracurricular,
];

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    site: &'a Portfolio,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Portfolio) -> Self {
        let highlight = &site.config.highlight;
        let renderer = MarkdownRenderer::with_options(&highlight.theme, highlight.line_number);
        Self { site, renderer }
    }

    /// Load every item of a category, in display order
    pub fn load_category(&self, category: Category) -> Result<Vec<ContentItem>> {
        let dir = self.site.content_dir.join(category.dir_name());
        if !dir.exists() {
            tracing::debug!("No {} directory at {:?}", category, dir);
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        let walker = WalkDir::new(&dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()));

        for entry in walker {
            let entry = entry.map_err(|source| ContentError::Walk {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            let item = self.load_item(category, path)?;
            if let Some(first) = seen.get(&item.slug) {
                return Err(ContentError::DuplicateSlug {
                    category,
                    slug: item.slug,
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            seen.insert(item.slug.clone(), path.to_path_buf());
            items.push(item);
        }

        sort_items(&mut items);
        tracing::debug!("Loaded {} {} items", items.len(), category);

        Ok(items)
    }

    /// Load a single item from a file
    fn load_item(&self, category: Category, path: &Path) -> Result<ContentItem> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (fm, body) =
            FrontMatter::parse(&content).map_err(|source| ContentError::FrontMatter {
                path: path.to_path_buf(),
                source,
            })?;

        require(path, "title", fm.title.as_deref())?;
        require(path, "description", fm.description.as_deref())?;

        let slug = item_slug(path, fm.slug.as_deref())?;

        let source = path
            .strip_prefix(&self.site.content_dir)
            .unwrap_or(path)
            .to_path_buf();

        Ok(ContentItem {
            slug,
            category,
            html: self.renderer.render(body),
            body: body.to_string(),
            frontmatter: fm,
            source,
        })
    }

    pub fn get_projects(&self) -> Result<Vec<ContentItem>> {
        self.load_category(Category::Projects)
    }

    pub fn get_jobs(&self) -> Result<Vec<ContentItem>> {
        self.load_category(Category::Jobs)
    }

    pub fn get_volunteer(&self) -> Result<Vec<ContentItem>> {
        self.load_category(Category::Volunteer)
    }

    pub fn get_extracurricular(&self) -> Result<Vec<ContentItem>> {
        self.load_category(Category::Extracurricular)
    }

    pub fn get_photos(&self) -> Result<Vec<ContentItem>> {
        self.load_category(Category::Photography)
    }

    /// Look up a single extracurricular activity; `None` when no item has that slug
    pub fn get_extracurricular_by_slug(&self, slug: &str) -> Result<Option<ContentItem>> {
        Ok(self
            .get_extracurricular()?
            .into_iter()
            .find(|item| item.slug == slug))
    }

    /// Slugs of every extracurricular activity, in display order
    pub fn get_all_extracurricular_slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .get_extracurricular()?
            .into_iter()
            .map(|item| item.slug)
            .collect())
    }

    /// Jobs, volunteer work and extracurriculars merged newest first
    pub fn get_timeline(&self) -> Result<Vec<TimelineEntry>> {
        let jobs = self.get_jobs()?;
        let volunteer = self.get_volunteer()?;
        let extracurricular = self.get_extracurricular()?;
        Ok(build_timeline(&jobs, &volunteer, &extracurricular))
    }
}

/// Merge already-loaded items into the timeline.
///
/// Stable: equal start dates keep jobs before volunteer before
/// extracurricular, and loader order within a category.
pub fn build_timeline(
    jobs: &[ContentItem],
    volunteer: &[ContentItem],
    extracurricular: &[ContentItem],
) -> Vec<TimelineEntry> {
    let groups = TIMELINE_CATEGORIES
        .into_iter()
        .zip([jobs, volunteer, extracurricular]);

    let mut entries: Vec<TimelineEntry> = groups
        .flat_map(|(category, items)| {
            items.iter().map(move |item| TimelineEntry {
                category,
                item: item.clone(),
            })
        })
        .collect();

    entries.sort_by(|a, b| newest_first(a.item.start(), b.item.start()));
    entries
}

/// Stable sort: explicit `order` first, then newest start date
fn sort_items(items: &mut [ContentItem]) {
    items.sort_by(|a, b| {
        explicit_order(a.frontmatter.order, b.frontmatter.order)
            .then_with(|| newest_first(a.start(), b.start()))
    });
}

fn explicit_order(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn require(path: &Path, field: &'static str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ContentError::MissingField {
            path: path.to_path_buf(),
            field,
        }),
    }
}

/// Slug from the front-matter override, else from the file name
/// (or the parent directory for `index.md`)
fn item_slug(path: &Path, explicit: Option<&str>) -> Result<String> {
    let slug = match explicit {
        Some(slug) => slug.to_string(),
        None => {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let name = if stem == "index" {
                path.parent()
                    .and_then(|p| p.file_name())
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
            } else {
                stem
            };
            slug::slugify(name)
        }
    };

    if is_valid_slug(&slug) {
        Ok(slug)
    } else {
        Err(ContentError::InvalidSlug {
            path: path.to_path_buf(),
            slug,
        })
    }
}

/// Lowercase ASCII words joined by single hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Drafts (`_name`) and dotfiles are never loaded
fn is_hidden(name: Option<&str>) -> bool {
    name.map(|n| n.starts_with('_') || n.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(is_valid_slug("chess-club"));
        assert!(is_valid_slug("2023"));
        assert!(!is_valid_slug("Chess-Club"));
        assert!(!is_valid_slug("chess--club"));
        assert!(!is_valid_slug("-chess"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_item_slug_from_file_name() {
        let slug = item_slug(Path::new("content/projects/My Cool_Project.md"), None).unwrap();
        assert_eq!(slug, "my-cool-project");

        let slug = item_slug(Path::new("content/extracurricular/robotics/index.md"), None).unwrap();
        assert_eq!(slug, "robotics");
    }

    #[test]
    fn test_explicit_slug_must_be_valid() {
        let path = Path::new("content/projects/a.md");
        assert_eq!(item_slug(path, Some("custom")).unwrap(), "custom");
        assert!(matches!(
            item_slug(path, Some("Not Valid")),
            Err(ContentError::InvalidSlug { .. })
        ));
    }

    #[test]
    fn test_explicit_order() {
        assert_eq!(explicit_order(Some(1), Some(2)), Ordering::Less);
        assert_eq!(explicit_order(Some(5), None), Ordering::Less);
        assert_eq!(explicit_order(None, None), Ordering::Equal);
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Some("_draft.md")));
        assert!(is_hidden(Some(".DS_Store")));
        assert!(!is_hidden(Some("project.md")));
    }
}
