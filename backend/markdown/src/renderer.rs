//! Plain-text rendering of normalized markdown.
//!
//! Walks the pulldown-cmark event stream and drops all formatting, keeping
//! text content, list markers, and line structure. Used for piped output.

use pulldown_cmark::{Event, Parser, Tag};

/// Render markdown to plain text.
pub fn to_plain_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::End(Tag::Paragraph) | Event::End(Tag::Heading(..)) | Event::End(Tag::Item) => {
                out.push('\n')
            }
            Event::Rule => out.push_str("---\n"),
            _ => {}
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_emphasis() {
        assert_eq!(to_plain_text("**Forecast:** sunny"), "Forecast: sunny");
    }

    #[test]
    fn test_keeps_list_markers() {
        let out = to_plain_text("- one\n- two");
        assert_eq!(out, "- one\n- two");
    }

    #[test]
    fn test_inline_code_kept() {
        assert_eq!(to_plain_text("run `skycast ask`"), "run skycast ask");
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_plain_text(""), "");
    }
}
