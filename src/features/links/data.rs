use regex::Regex;
use std::sync::OnceLock;

/// `[display](target)`
fn markdown_link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("markdown link pattern is valid")
    })
}

/// Display text and target of a markdown link
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkInfo {
    pub url: String,
    pub text: String,
}

impl LinkInfo {
    /// Clipboard payload: `<text> <url>`
    pub fn clipboard_text(&self) -> String {
        format!("{} {}", self.text, self.url)
    }
}

/// Find the first markdown link whose span contains `cursor_offset`.
///
/// Offsets count characters. Both ends of the span are inclusive, so a cursor
/// sitting just after the closing parenthesis still selects the link.
pub fn get_markdown_link(line: &str, cursor_offset: usize) -> Option<&str> {
    markdown_link().find_iter(line).find_map(|m| {
        let start = line[..m.start()].chars().count();
        let end = start + m.as_str().chars().count();
        (start..=end)
            .contains(&cursor_offset)
            .then_some(m.as_str())
    })
}

/// Split a single markdown link into its text and URL; empty fields if it does not parse
pub fn get_markdown_url_info(link: &str) -> LinkInfo {
    match markdown_link().captures(link) {
        Some(caps) => LinkInfo {
            text: caps[1].to_string(),
            url: caps[2].to_string(),
        },
        None => LinkInfo::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_under_cursor() {
        let line = "see [docs](http://x) here";
        assert_eq!(get_markdown_link(line, 6), Some("[docs](http://x)"));
    }

    #[test]
    fn test_span_is_inclusive_on_both_ends() {
        let line = "see [docs](http://x) here";
        // '[' sits at 4 and ')' ends before 20
        assert_eq!(get_markdown_link(line, 4), Some("[docs](http://x)"));
        assert_eq!(get_markdown_link(line, 20), Some("[docs](http://x)"));
        assert_eq!(get_markdown_link(line, 3), None);
        assert_eq!(get_markdown_link(line, 21), None);
    }

    #[test]
    fn test_no_link_at_position() {
        assert_eq!(get_markdown_link("see [docs](http://x) here", 0), None);
        assert_eq!(get_markdown_link("no links at all", 3), None);
    }

    #[test]
    fn test_first_containing_link_wins() {
        let line = "[a](1)[b](2)";
        // offset 6 is the end of the first link and the start of the second
        assert_eq!(get_markdown_link(line, 6), Some("[a](1)"));
        assert_eq!(get_markdown_link(line, 8), Some("[b](2)"));
    }

    #[test]
    fn test_offsets_count_characters() {
        let line = "笔记 [文档](http://x)";
        assert_eq!(get_markdown_link(line, 4), Some("[文档](http://x)"));
        assert_eq!(get_markdown_link(line, 1), None);
    }

    #[test]
    fn test_url_info() {
        let info = get_markdown_url_info("[docs](http://x)");
        assert_eq!(info.text, "docs");
        assert_eq!(info.url, "http://x");
        assert_eq!(info.clipboard_text(), "docs http://x");
    }

    #[test]
    fn test_url_info_without_match_is_empty() {
        assert_eq!(get_markdown_url_info("plain text"), LinkInfo::default());
    }
}
