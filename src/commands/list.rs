//! List site content

use anyhow::Result;

use crate::content::{Category, ContentItem};
use crate::Portfolio;

/// List site content by type
pub fn run(site: &Portfolio, content_type: &str) -> Result<()> {
    let loader = site.loader();

    match content_type {
        "timeline" => {
            let timeline = loader.get_timeline()?;
            println!("Timeline ({}):", timeline.len());
            for entry in timeline {
                println!(
                    "  {:<18} {:<16} {}",
                    date_column(&entry.item),
                    entry.category,
                    entry.item.title()
                );
            }
        }
        "slug" | "slugs" => {
            let slugs = loader.get_all_extracurricular_slugs()?;
            println!("Extracurricular slugs ({}):", slugs.len());
            for slug in slugs {
                println!("  {}", slug);
            }
        }
        other => {
            let category: Category = other.parse()?;
            let items = loader.load_category(category)?;
            println!("{} ({}):", category.label(), items.len());
            for item in items {
                println!(
                    "  {:<18} {}{} [{}]",
                    date_column(&item),
                    item.title(),
                    if item.is_featured() { " *" } else { "" },
                    item.source.display()
                );
            }
        }
    }

    Ok(())
}

fn date_column(item: &ContentItem) -> String {
    item.dates().map(|d| d.display()).unwrap_or_default()
}
