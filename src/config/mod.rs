//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::NavItem;
pub use site::SiteConfig;
pub use site::SocialLinks;
