/// Turns the model's loosely markdown-flavoured reply into sanitized HTML.
///
/// This is a heuristic, not a markdown parser: bold spans, bullet lines and
/// blank-line breaks are each rewritten by an independent substitution, and the
/// sanitizer repairs whatever nesting that produces. Mixed lists and
/// paragraphs, nested lists and unbalanced `**` come out imperfect on purpose.
use std::collections::HashSet;
use std::fmt;

use regex::Regex;

/// Tags that survive sanitization. No attributes are kept on any of them.
const ALLOWED_TAGS: &[&str] = &[
    "p", "ul", "ol", "li", "strong", "em", "b", "i", "br", "h1", "h2", "h3", "code", "pre",
    "blockquote",
];

/// Sanitized markup derived from a summary. Only [`render_notes`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotes(String);

impl RenderedNotes {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedNotes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn render_notes(summary: &str) -> RenderedNotes {
    let bold_re = Regex::new(r"\*\*(.*?)\*\*").expect("valid regex");
    let bullet_re = Regex::new(r"(?m)^\s*[*-]\s*(.*)").expect("valid regex");

    let html = bold_re.replace_all(summary, "<strong>$1</strong>");
    let html = bullet_re.replace_all(&html, "<li>$1</li>");
    let html = html.replace("\n\n", "</p><p>");

    let html = if html.contains("<li>") {
        format!("<ul>{html}</ul>")
    } else {
        format!("<p>{html}</p>")
    };

    RenderedNotes(sanitize(&html))
}

/// Strip everything outside [`ALLOWED_TAGS`]. `script` and `style` lose their content too.
pub fn sanitize(html: &str) -> String {
    ammonia::Builder::empty()
        .add_tags(ALLOWED_TAGS.iter().copied())
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_wrapped_in_one_paragraph() {
        let input = "Cells are the basic unit of life.";
        assert_eq!(render_notes(input).as_str(), format!("<p>{input}</p>"));
    }

    #[test]
    fn sanitized_markup_without_tokens_passes_through() {
        let input = "<strong>Mitosis</strong> splits one cell into two.";
        assert_eq!(render_notes(input).as_str(), format!("<p>{input}</p>"));
    }

    #[test]
    fn bold_and_bullets_become_list() {
        let notes = render_notes(
            "**Key**: value\n\n* point one\n* point two\n<script>alert('x')</script>",
        );
        let html = notes.as_str();
        assert!(html.starts_with("<ul>"), "{html}");
        assert!(html.contains("<strong>Key</strong>"), "{html}");
        assert!(html.contains("<li>point one</li>"), "{html}");
        assert!(html.contains("<li>point two</li>"), "{html}");
        assert!(!html.contains("<script"), "{html}");
        assert!(!html.contains("alert"), "{html}");
    }

    #[test]
    fn dash_bullets_are_list_items() {
        let html = render_notes("- alpha\n  - beta").into_string();
        assert!(html.contains("<li>alpha</li>"), "{html}");
        assert!(html.contains("<li>beta</li>"), "{html}");
    }

    #[test]
    fn bold_inside_bullet() {
        let html = render_notes("* **ATP**: energy currency").into_string();
        assert_eq!(html, "<ul><li><strong>ATP</strong>: energy currency</li></ul>");
    }

    #[test]
    fn blank_lines_split_paragraphs() {
        assert_eq!(render_notes("one\n\ntwo").as_str(), "<p>one</p><p>two</p>");
    }

    #[test]
    fn bold_with_arrow_stays_in_single_paragraph() {
        assert_eq!(
            render_notes("**Photosynthesis**: light → energy").as_str(),
            "<p><strong>Photosynthesis</strong>: light → energy</p>"
        );
    }

    #[test]
    fn active_content_is_stripped() {
        let html = render_notes(
            "<img src=x onerror=\"steal()\">Look <b onclick=\"steal()\">here</b> <marquee>now</marquee>",
        )
        .into_string();
        assert!(!html.contains("<img"), "{html}");
        assert!(!html.contains("onerror"), "{html}");
        assert!(!html.contains("onclick"), "{html}");
        assert!(!html.contains("marquee"), "{html}");
        assert!(html.contains("<b>here</b>"), "{html}");
        assert!(html.contains("now"), "{html}");
    }

    #[test]
    fn unpaired_bold_marker_is_left_alone() {
        let html = render_notes("a **dangling marker").into_string();
        assert!(!html.contains("<strong>"), "{html}");
        assert!(html.contains("**dangling marker"), "{html}");
    }
}
