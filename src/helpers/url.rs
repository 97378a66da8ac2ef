//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::PathBuf;

use crate::config::SiteConfig;

/// Characters escaped in a local asset path; `/` is kept as the separator
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/me/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if is_absolute_url(path) || path.starts_with("mailto:") || path.starts_with('#') {
        return path.to_string();
    }

    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/resume") // -> "https://example.com/me/resume"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Percent-encode a local asset path such as `/photography/Harbour at dawn.jpg`
pub fn encode_path(path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    utf8_percent_encode(path, PATH_SEGMENT).to_string()
}

/// Map a route to the file it is written to, relative to the output dir.
///
/// Routes use pretty URLs: `/resume` becomes `resume/index.html`.
pub fn output_path_for(route: &str) -> PathBuf {
    let route = route.trim_matches('/');
    if route.is_empty() {
        PathBuf::from("index.html")
    } else if route.ends_with(".html") {
        PathBuf::from(route)
    } else {
        PathBuf::from(route).join("index.html")
    }
}

/// Whether `href` points at `current_path`, ignoring trailing slashes and anchors
pub fn is_current(href: &str, current_path: &str) -> bool {
    let href = href.split('#').next().unwrap_or(href);
    href.trim_end_matches('/') == current_path.trim_end_matches('/')
}

fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}
