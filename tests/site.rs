use std::fs;
use std::path::Path;

use folio::config::{NavItem, SiteConfig};
use folio::content::{Category, ContentError, ContentLoader};
use folio::generator::{self, Generator, SiteContent};
use folio::Portfolio;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn item(title: &str, extra: &str) -> String {
    format!(
        "---\ntitle: {}\ndescription: About {}\n{}---\n\nBody of {}.\n",
        title, title, extra, title
    )
}

/// A small site with every category populated
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "_config.yml",
        r#"
name: Ada Lovelace
title: Ada Lovelace
tagline: Poetical science
email: ada@example.com
social:
  github: https://github.com/ada
nav_items:
  - label: Home
    href: /
  - label: Projects
    href: /#projects
    is_anchor: true
  - label: Resume
    href: /resume
  - label: Photography
    href: /photography
timeline_limit: 3
timezone: Europe/London
footer_note: Set in ink & pixels
"#,
    );

    write(root, "content/projects/a-engine.md", &item("Engine", "featured: true\n"));
    write(root, "content/projects/b-notes.md", &item("Notes", ""));
    write(root, "content/projects/c-loom.md", &item("Loom", "featured: true\n"));
    write(root, "content/projects/_draft.md", &item("Draft", "featured: true\n"));

    write(
        root,
        "content/jobs/analyst.md",
        &item("Analyst", "dates:\n  start: 2020-01\n  end: 2021-06\n"),
    );
    write(
        root,
        "content/jobs/engineer.md",
        &item("Engineer", "dates:\n  start: 2021-07\n"),
    );

    write(
        root,
        "content/volunteer/tutor.md",
        &item("Tutor", "dates:\n  start: 2019-09\n  end: 2020-06\n"),
    );

    write(
        root,
        "content/extracurricular/chess-club.md",
        &item("Chess Club", "dates:\n  start: 2018\n  end: 2019\n"),
    );
    write(
        root,
        "content/extracurricular/robotics/index.md",
        &item("Robotics & Co", "dates:\n  start: 2021-09\n"),
    );

    write(
        root,
        "content/photography/harbour.md",
        &item("Harbour", "image: /photography/harbour.jpg\n"),
    );
    write(root, "static/photography/harbour.jpg", "not really a jpeg");

    dir
}

fn slugs(items: &[folio::content::ContentItem]) -> Vec<&str> {
    items.iter().map(|i| i.slug.as_str()).collect()
}

#[test]
fn test_every_slug_resolves_to_exactly_one_item() {
    let dir = fixture();
    let site = Portfolio::new(dir.path()).unwrap();
    let loader = ContentLoader::new(&site);

    let all = loader.get_all_extracurricular_slugs().unwrap();
    assert_eq!(all.len(), 2);
    for slug in &all {
        let found = loader.get_extracurricular_by_slug(slug).unwrap().unwrap();
        assert_eq!(&found.slug, slug);
    }

    let robotics = loader.get_extracurricular_by_slug("robotics").unwrap().unwrap();
    assert_eq!(robotics.title(), "Robotics & Co");
    assert!(robotics.html.contains("<p>Body of Robotics &amp; Co.</p>"));
}

#[test]
fn test_unknown_slug_is_absent() {
    let dir = fixture();
    let site = Portfolio::new(dir.path()).unwrap();
    let loader = ContentLoader::new(&site);

    assert!(loader
        .get_extracurricular_by_slug("knitting")
        .unwrap()
        .is_none());

    let generator = Generator::new(&site).unwrap();
    assert!(generator
        .render_extracurricular_by_slug(&loader, "knitting")
        .unwrap()
        .is_none());
    let page = generator
        .render_extracurricular_by_slug(&loader, "chess-club")
        .unwrap()
        .unwrap();
    assert!(page.contains("<h1>Chess Club</h1>"));
}

#[test]
fn test_ordering() {
    let dir = fixture();
    let site = Portfolio::new(dir.path()).unwrap();
    let loader = ContentLoader::new(&site);

    // Undated items keep file-name order, drafts are skipped
    assert_eq!(
        slugs(&loader.get_projects().unwrap()),
        vec!["a-engine", "b-notes", "c-loom"]
    );
    // Newest first
    assert_eq!(
        slugs(&loader.get_jobs().unwrap()),
        vec!["engineer", "analyst"]
    );

    let timeline: Vec<_> = loader
        .get_timeline()
        .unwrap()
        .into_iter()
        .map(|e| (e.category, e.item.slug))
        .collect();
    assert_eq!(
        timeline,
        vec![
            (Category::Extracurricular, "robotics".to_string()),
            (Category::Jobs, "engineer".to_string()),
            (Category::Jobs, "analyst".to_string()),
            (Category::Volunteer, "tutor".to_string()),
            (Category::Extracurricular, "chess-club".to_string()),
        ]
    );
}

#[test]
fn test_timeline_ties_keep_category_order() {
    let dir = TempDir::new().unwrap();
    let started = "dates:\n  start: 2022-03\n";
    write(dir.path(), "content/extracurricular/band.md", &item("Band", started));
    write(dir.path(), "content/volunteer/shelter.md", &item("Shelter", started));
    write(dir.path(), "content/jobs/intern.md", &item("Intern", started));
    write(
        dir.path(),
        "content/volunteer/library.md",
        &item("Library", "dates:\n  start: 2023\n"),
    );

    let site = Portfolio::new(dir.path()).unwrap();
    let timeline: Vec<_> = ContentLoader::new(&site)
        .get_timeline()
        .unwrap()
        .into_iter()
        .map(|e| (e.category, e.item.slug))
        .collect();

    assert_eq!(
        timeline,
        vec![
            (Category::Volunteer, "library".to_string()),
            (Category::Jobs, "intern".to_string()),
            (Category::Volunteer, "shelter".to_string()),
            (Category::Extracurricular, "band".to_string()),
        ]
    );
}

#[test]
fn test_file_name_without_slug_characters_fails_the_load() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "content/projects/---.md", &item("Dashes", ""));
    let site = Portfolio::new(dir.path()).unwrap();

    match ContentLoader::new(&site).get_projects() {
        Err(ContentError::InvalidSlug { slug, path }) => {
            assert_eq!(slug, "");
            assert!(path.ends_with("---.md"));
        }
        other => panic!("expected InvalidSlug, got {:?}", other),
    }
}

#[test]
fn test_extra_config_keys_reach_templates() {
    let dir = fixture();
    let site = Portfolio::new(dir.path()).unwrap();
    let html = Generator::new(&site).unwrap().render_not_found().unwrap();

    assert!(html.contains(r#"<p class="note">Set in ink &amp; pixels</p>"#));
}

#[test]
fn test_missing_static_dir_still_generates() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "content/projects/loom.md", &item("Loom", ""));
    let site = Portfolio::new(dir.path()).unwrap();

    site.generate().unwrap();
    assert!(dir.path().join("public/css/style.css").is_file());
    assert!(dir.path().join("public/projects/index.html").is_file());
}

#[test]
fn test_explicit_order_wins() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "content/projects/a.md", &item("A", ""));
    write(dir.path(), "content/projects/b.md", &item("B", "order: 2\n"));
    write(dir.path(), "content/projects/c.md", &item("C", "order: 1\n"));

    let site = Portfolio::new(dir.path()).unwrap();
    let projects = ContentLoader::new(&site).get_projects().unwrap();
    assert_eq!(slugs(&projects), vec!["c", "b", "a"]);
}

#[test]
fn test_missing_category_is_empty() {
    let dir = TempDir::new().unwrap();
    let site = Portfolio::new(dir.path()).unwrap();
    let loader = ContentLoader::new(&site);
    assert!(loader.get_volunteer().unwrap().is_empty());
    assert!(loader.get_timeline().unwrap().is_empty());
}

#[test]
fn test_missing_required_field_fails_the_load() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "content/jobs/x.md",
        "---\ntitle: No description\n---\nBody",
    );
    let site = Portfolio::new(dir.path()).unwrap();

    match ContentLoader::new(&site).get_jobs() {
        Err(ContentError::MissingField { field, path }) => {
            assert_eq!(field, "description");
            assert!(path.ends_with("x.md"));
        }
        other => panic!("expected MissingField, got {:?}", other),
    }
}

#[test]
fn test_file_without_frontmatter_fails_the_load() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "content/projects/plain.md", "# Just a heading\n");
    let site = Portfolio::new(dir.path()).unwrap();

    assert!(matches!(
        ContentLoader::new(&site).get_projects(),
        Err(ContentError::MissingField { field: "title", .. })
    ));
}

#[test]
fn test_malformed_frontmatter_fails_the_load() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "content/projects/broken.md",
        "---\ntitle: [oops\ndescription: d\n---\n",
    );
    let site = Portfolio::new(dir.path()).unwrap();

    let err = ContentLoader::new(&site).get_projects().unwrap_err();
    assert!(matches!(err, ContentError::FrontMatter { .. }));
    assert!(err.to_string().contains("broken.md"));
}

#[test]
fn test_duplicate_slug_fails_the_load() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "content/extracurricular/chess.md", &item("Chess", ""));
    write(
        dir.path(),
        "content/extracurricular/other.md",
        &item("Chess again", "slug: chess\n"),
    );
    let site = Portfolio::new(dir.path()).unwrap();

    match ContentLoader::new(&site).get_extracurricular() {
        Err(ContentError::DuplicateSlug { slug, category, .. }) => {
            assert_eq!(slug, "chess");
            assert_eq!(category, Category::Extracurricular);
        }
        other => panic!("expected DuplicateSlug, got {:?}", other),
    }
}

#[test]
fn test_home_shows_featured_projects_and_truncated_timeline() {
    let dir = fixture();
    let site = Portfolio::new(dir.path()).unwrap();
    let content = SiteContent::load(&site.loader()).unwrap();
    let html = Generator::new(&site).unwrap().render_home(&content).unwrap();

    assert!(html.contains("id=\"projects-a-engine\""));
    assert!(html.contains("id=\"projects-c-loom\""));
    assert!(!html.contains("id=\"projects-b-notes\""));
    assert!(!html.contains("Draft"));

    // timeline_limit is 3 of the 5 entries
    assert_eq!(html.matches("class=\"timeline-entry").count(), 3);
    assert!(html.contains("Robotics &amp; Co"));
    assert!(!html.contains("Chess Club"));
}

#[test]
fn test_nav_items_render_once_in_order_on_every_page() {
    let dir = fixture();
    let site = Portfolio::new(dir.path()).unwrap();
    let content = SiteContent::load(&site.loader()).unwrap();
    let generator = Generator::new(&site).unwrap();

    let chess = &content.extracurricular[1];
    assert_eq!(chess.slug, "chess-club");

    let pages = vec![
        generator.render_home(&content).unwrap(),
        generator.render_resume(&content).unwrap(),
        generator.render_projects(&content).unwrap(),
        generator.render_experience(&content).unwrap(),
        generator.render_extracurricular_index(&content).unwrap(),
        generator.render_volunteer(&content).unwrap(),
        generator.render_photography(&content).unwrap(),
        generator.render_extracurricular(chess).unwrap(),
        generator.render_not_found().unwrap(),
    ];

    let nav = &site.config.nav_items;
    for html in &pages {
        assert_eq!(html.matches("class=\"nav-link").count(), nav.len());

        let mut last = 0;
        for NavItem { label, href, .. } in nav {
            let link = format!("href=\"{}\"", href);
            let needle = format!("{}>{}</a>", link, label);
            let found = html.matches(&needle).count()
                + html.matches(&format!("{} aria-current=\"page\">{}</a>", link, label)).count();
            assert_eq!(found, 1, "{} should appear once", label);

            let pos = html
                .find(&needle)
                .or_else(|| html.find(&format!("{} aria-current", link)))
                .unwrap();
            assert!(pos > last, "{} is out of order", label);
            last = pos;
        }
    }

    // Anchor entries are marked, never active
    assert!(pages[0].contains("class=\"nav-link anchor\" href=\"/#projects\""));
    assert!(pages[1].contains("class=\"nav-link active\" href=\"/resume\""));
}

#[test]
fn test_generate_writes_every_route() {
    let dir = fixture();
    let site = Portfolio::new(dir.path()).unwrap();
    site.generate().unwrap();

    let public = dir.path().join("public");
    for file in [
        "index.html",
        "resume/index.html",
        "projects/index.html",
        "experience/index.html",
        "extracurricular/index.html",
        "extracurricular/chess-club/index.html",
        "extracurricular/robotics/index.html",
        "volunteer/index.html",
        "photography/index.html",
        "404.html",
        "css/style.css",
        "photography/harbour.jpg",
    ] {
        assert!(public.join(file).is_file(), "missing {}", file);
    }

    let photos = fs::read_to_string(public.join("photography/index.html")).unwrap();
    assert!(photos.contains("src=\"/photography/harbour.jpg\""));

    let footer = fs::read_to_string(public.join("index.html")).unwrap();
    assert!(footer.contains("mailto:ada@example.com"));
    assert!(footer.contains("https://github.com/ada"));
    assert!(!footer.contains("LinkedIn"));
}

#[test]
fn test_routes_cover_detail_pages() {
    let dir = fixture();
    let site = Portfolio::new(dir.path()).unwrap();
    let content = SiteContent::load(&site.loader()).unwrap();
    let routes = content.routes();

    assert_eq!(routes.first().map(String::as_str), Some(generator::HOME));
    assert_eq!(routes.last().map(String::as_str), Some(generator::NOT_FOUND));
    assert!(routes.contains(&"/extracurricular/robotics".to_string()));
    assert!(routes.contains(&"/extracurricular/chess-club".to_string()));
}

#[test]
fn test_root_prefix_applies_to_links() {
    let dir = fixture();
    let config = SiteConfig {
        root: "/ada/".to_string(),
        ..SiteConfig::load(dir.path().join("_config.yml")).unwrap()
    };
    let site = Portfolio::with_config(dir.path(), config);
    let content = SiteContent::load(&site.loader()).unwrap();
    let html = Generator::new(&site)
        .unwrap()
        .render_extracurricular_index(&content)
        .unwrap();

    assert!(html.contains("href=\"/ada/resume\""));
    assert!(html.contains("href=\"/ada/extracurricular/chess-club\""));
    assert!(html.contains("href=\"/ada/css/style.css\""));
}
