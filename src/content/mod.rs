//! Content module - loads, parses and renders authored content

mod error;
mod frontmatter;
mod item;
pub mod loader;
mod markdown;

pub use error::ContentError;
pub use frontmatter::{DateRange, FrontMatter, FrontMatterError, PartialDate};
pub use item::{Category, ContentItem, TimelineEntry};
pub use loader::{build_timeline, ContentLoader};
pub use markdown::MarkdownRenderer;
