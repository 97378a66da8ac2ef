//! Generator module - renders every route to static HTML with the built-in templates

mod select;

pub use select::{featured_only, first_n};

use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{build_timeline, Category, ContentItem, ContentLoader, TimelineEntry};
use crate::helpers::{self, build_stamp, escape_html, full_url_for, output_path_for, BuildStamp};
use crate::templates::{
    FooterData, ItemData, NavData, SectionData, SiteData, TemplateRenderer, TimelineData,
    STYLESHEET,
};
use crate::Portfolio;

pub const HOME: &str = "/";
pub const RESUME: &str = "/resume";
pub const PROJECTS: &str = "/projects";
pub const EXPERIENCE: &str = "/experience";
pub const EXTRACURRICULAR: &str = "/extracurricular";
pub const VOLUNTEER: &str = "/volunteer";
pub const PHOTOGRAPHY: &str = "/photography";
pub const NOT_FOUND: &str = "/404.html";

/// Route of an extracurricular detail page
pub fn extracurricular_path(slug: &str) -> String {
    format!("{}/{}", EXTRACURRICULAR, slug)
}

/// Everything the pages draw from, loaded once per build
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub projects: Vec<ContentItem>,
    pub jobs: Vec<ContentItem>,
    pub volunteer: Vec<ContentItem>,
    pub extracurricular: Vec<ContentItem>,
    pub photos: Vec<ContentItem>,
    pub timeline: Vec<TimelineEntry>,
}

impl SiteContent {
    pub fn load(loader: &ContentLoader) -> Result<Self> {
        let projects = loader.get_projects()?;
        let jobs = loader.get_jobs()?;
        let volunteer = loader.get_volunteer()?;
        let extracurricular = loader.get_extracurricular()?;
        let photos = loader.get_photos()?;
        let timeline = build_timeline(&jobs, &volunteer, &extracurricular);

        Ok(Self {
            projects,
            jobs,
            volunteer,
            extracurricular,
            photos,
            timeline,
        })
    }

    pub fn item_count(&self) -> usize {
        self.projects.len()
            + self.jobs.len()
            + self.volunteer.len()
            + self.extracurricular.len()
            + self.photos.len()
    }

    /// Every route the site serves, the not-found page last
    pub fn routes(&self) -> Vec<String> {
        let mut routes: Vec<String> = [
            HOME,
            RESUME,
            PROJECTS,
            EXPERIENCE,
            EXTRACURRICULAR,
            VOLUNTEER,
            PHOTOGRAPHY,
        ]
        .iter()
        .map(|r| r.to_string())
        .collect();
        routes.extend(
            self.extracurricular
                .iter()
                .map(|item| extracurricular_path(&item.slug)),
        );
        routes.push(NOT_FOUND.to_string());
        routes
    }
}

/// Static site generator using Tera templates
pub struct Generator {
    site: Portfolio,
    renderer: TemplateRenderer,
    stamp: BuildStamp,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Portfolio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let stamp = build_stamp(chrono::Utc::now(), site.config.tz());

        Ok(Self {
            site: site.clone(),
            renderer,
            stamp,
        })
    }

    /// Generate the entire site, returning the routes written
    pub fn generate(&self, content: &SiteContent) -> Result<Vec<String>> {
        fs::create_dir_all(&self.site.public_dir)
            .with_context(|| format!("creating {}", self.site.public_dir.display()))?;

        self.write_file(Path::new("css/style.css"), STYLESHEET)?;
        // Static assets last so they can override the default stylesheet
        self.copy_static_assets()?;

        self.write_page(HOME, &self.render_home(content)?)?;
        self.write_page(RESUME, &self.render_resume(content)?)?;
        self.write_page(PROJECTS, &self.render_projects(content)?)?;
        self.write_page(EXPERIENCE, &self.render_experience(content)?)?;
        self.write_page(EXTRACURRICULAR, &self.render_extracurricular_index(content)?)?;
        self.write_page(VOLUNTEER, &self.render_volunteer(content)?)?;
        self.write_page(PHOTOGRAPHY, &self.render_photography(content)?)?;

        for item in &content.extracurricular {
            let html = self.render_extracurricular(item)?;
            self.write_page(&extracurricular_path(&item.slug), &html)?;
        }

        self.write_page(NOT_FOUND, &self.render_not_found()?)?;

        Ok(content.routes())
    }

    /// Home: hero, featured projects and the start of the timeline
    pub fn render_home(&self, content: &SiteContent) -> Result<String> {
        let config = &self.site.config;
        let featured: Vec<ItemData> = featured_only(&content.projects)
            .into_iter()
            .map(|item| self.item_data(item))
            .collect();
        let timeline: Vec<TimelineData> = first_n(&content.timeline, config.timeline_limit)
            .iter()
            .map(|entry| TimelineData::new(config, entry, self.detail_url(&entry.item)))
            .collect();

        let mut context = self.base_context(HOME, "home", "", "");
        context.insert("featured_projects", &featured);
        context.insert("timeline", &timeline);
        context.insert("projects_url", &helpers::url_for(config, PROJECTS));
        context.insert("resume_url", &helpers::url_for(config, RESUME));
        self.renderer.render("home.html", &context)
    }

    /// Resume: every section on one page
    pub fn render_resume(&self, content: &SiteContent) -> Result<String> {
        let sections = vec![
            self.section("experience", Category::Jobs, &content.jobs),
            self.section("volunteer", Category::Volunteer, &content.volunteer),
            self.section(
                "extracurricular",
                Category::Extracurricular,
                &content.extracurricular,
            ),
            self.section("projects", Category::Projects, &content.projects),
        ];

        let mut context = self.base_context(RESUME, "resume", "Resume", "");
        context.insert("sections", &sections);
        self.renderer.render("resume.html", &context)
    }

    pub fn render_projects(&self, content: &SiteContent) -> Result<String> {
        self.render_list(PROJECTS, Category::Projects, &content.projects)
    }

    pub fn render_experience(&self, content: &SiteContent) -> Result<String> {
        self.render_list(EXPERIENCE, Category::Jobs, &content.jobs)
    }

    pub fn render_extracurricular_index(&self, content: &SiteContent) -> Result<String> {
        self.render_list(
            EXTRACURRICULAR,
            Category::Extracurricular,
            &content.extracurricular,
        )
    }

    pub fn render_volunteer(&self, content: &SiteContent) -> Result<String> {
        self.render_list(VOLUNTEER, Category::Volunteer, &content.volunteer)
    }

    pub fn render_photography(&self, content: &SiteContent) -> Result<String> {
        let photos: Vec<ItemData> = content
            .photos
            .iter()
            .map(|item| self.item_data(item))
            .collect();

        let mut context = self.base_context(
            PHOTOGRAPHY,
            "photography",
            Category::Photography.label(),
            "",
        );
        context.insert("photos", &photos);
        self.renderer.render("photography.html", &context)
    }

    /// Detail page for one extracurricular activity
    pub fn render_extracurricular(&self, item: &ContentItem) -> Result<String> {
        let path = extracurricular_path(&item.slug);
        let data = self.item_data(item);

        let mut context = self.base_context(&path, "detail", item.title(), item.description());
        context.insert("item", &data);
        context.insert(
            "back_url",
            &helpers::url_for(&self.site.config, EXTRACURRICULAR),
        );
        context.insert("back_label", Category::Extracurricular.label());
        self.renderer.render("item.html", &context)
    }

    /// Look the slug up through the loader; `None` means the route is a 404
    pub fn render_extracurricular_by_slug(
        &self,
        loader: &ContentLoader,
        slug: &str,
    ) -> Result<Option<String>> {
        match loader.get_extracurricular_by_slug(slug)? {
            Some(item) => Ok(Some(self.render_extracurricular(&item)?)),
            None => Ok(None),
        }
    }

    pub fn render_not_found(&self) -> Result<String> {
        let context = self.base_context(NOT_FOUND, "not-found", "Not Found", "");
        self.renderer.render("404.html", &context)
    }

    fn render_list(&self, path: &str, category: Category, items: &[ContentItem]) -> Result<String> {
        let items: Vec<ItemData> = items.iter().map(|item| self.item_data(item)).collect();

        let mut context = self.base_context(path, category.dir_name(), category.label(), "");
        context.insert("items", &items);
        self.renderer.render("list.html", &context)
    }

    fn section(&self, id: &str, category: Category, items: &[ContentItem]) -> SectionData {
        SectionData {
            id: id.to_string(),
            heading: category.label().to_string(),
            items: items.iter().map(|item| self.item_data(item)).collect(),
        }
    }

    fn item_data(&self, item: &ContentItem) -> ItemData {
        ItemData::new(&self.site.config, item, self.detail_url(item))
    }

    /// Only extracurricular activities have their own pages
    fn detail_url(&self, item: &ContentItem) -> Option<String> {
        match item.category {
            Category::Extracurricular => Some(helpers::url_for(
                &self.site.config,
                &extracurricular_path(&item.slug),
            )),
            _ => None,
        }
    }

    /// Create a base context with the layout's variables
    fn base_context(&self, path: &str, kind: &str, title: &str, description: &str) -> Context {
        let config = &self.site.config;
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(config));
        context.insert("nav_items", &NavData::for_page(config, path));
        context.insert("footer", &FooterData::from(&self.stamp));
        context.insert("current_path", path);
        context.insert("canonical_url", &escape_html(&full_url_for(config, path)));
        context.insert("page_kind", kind);
        context.insert("page_title", &escape_html(title));
        context.insert("page_description", &escape_html(description));
        context
    }

    fn write_page(&self, route: &str, html: &str) -> Result<()> {
        self.write_file(&output_path_for(route), html)
    }

    fn write_file(&self, relative: &Path, contents: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, contents)
            .with_context(|| format!("writing {}", output_path.display()))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy everything under the static directory verbatim
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            tracing::warn!("No static directory at {:?}", static_dir);
            return Ok(());
        }

        let mut copied = 0usize;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest).with_context(|| format!("copying {}", path.display()))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(())
    }
}
