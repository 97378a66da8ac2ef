//! Create a new content item

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::loader::is_valid_slug;
use crate::content::Category;
use crate::Portfolio;

/// Create a new content file in `category`, returning its path
pub fn create_item(
    site: &Portfolio,
    category: Category,
    title: &str,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if !is_valid_slug(&slug) {
        bail!(
            "Cannot derive a valid slug from {:?}; pass one with --slug",
            slug
        );
    }

    let target_dir = site.content_dir.join(category.dir_name());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, scaffold(category, title))?;
    Ok(file_path)
}

/// Front-matter skeleton for a category
fn scaffold(category: Category, title: &str) -> String {
    let today = chrono::Local::now().format("%Y-%m").to_string();
    let title = serde_yaml::to_string(title).unwrap_or_else(|_| format!("{:?}\n", title));

    let specific = match category {
        Category::Projects => "featured: false\nlink:\nrepo:\n".to_string(),
        Category::Jobs | Category::Volunteer => format!(
            "organization:\nrole:\nlocation:\ndates:\n  start: {}\n  end: present\n",
            today
        ),
        Category::Extracurricular => {
            format!("role:\ndates:\n  start: {}\n  end: present\n", today)
        }
        Category::Photography => format!("image:\nlocation:\ndate: {}\n", today),
    };

    format!(
        "---\ntitle: {}description: One-sentence summary\ntags: []\n{}---\n",
        title, specific
    )
}
