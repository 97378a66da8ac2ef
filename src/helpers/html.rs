//! HTML helper functions

/// Escape text for use in HTML content and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags, keeping text content
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate to `length` characters, appending `omission` when cut
pub fn truncate(s: &str, length: usize, omission: &str) -> String {
    if s.chars().count() <= length {
        return s.to_string();
    }
    let truncated: String = s.chars().take(length).collect();
    format!("{}{}", truncated.trim_end(), omission)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <em>there</em></p>"), "Hello there");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10, "..."), "short");
        assert_eq!(truncate("hello world", 6, "..."), "hello...");
        assert_eq!(truncate("日本語のテキスト", 3, "…"), "日本語…");
    }
}
