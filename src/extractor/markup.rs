// Plain-text view of an article body
use crate::utils::{collapse_lines, truncate_chars};
use scraper::{ElementRef, Html};
use std::ops::Range;

const SNIPPET_TAIL_CHARS: usize = 140;
const SNIPPET_MAX_CHARS: usize = 260;
const SNIPPET_SEPARATOR: &str = "…";

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section",
    "table", "td", "th", "tr", "ul",
];
const SKIPPED_TAGS: &[&str] = &["script", "style", "template"];

/// Article text with its line structure intact. Block elements and `<br>`
/// start new lines; inline markup (links, emphasis) does not.
pub struct ArticleText {
    text: String,
}

impl ArticleText {
    pub fn from_markup(markup: &str) -> Self {
        let fragment = Html::parse_fragment(markup);
        let mut text = String::new();
        flatten(fragment.root_element(), &mut text);
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Last non-blank text at or above the line where `offset` sits.
    pub fn name_before(&self, offset: usize) -> String {
        self.text[..offset]
            .lines()
            .rev()
            .map(|line| {
                line.trim()
                    .trim_end_matches([',', ';', ':', '-', '–', '—', '|'])
                    .trim_end()
            })
            .find(|line| !line.is_empty())
            .unwrap_or("Unnamed")
            .to_string()
    }

    /// The matched span plus the text right after it, on a single line.
    pub fn snippet_at(&self, span: Range<usize>) -> String {
        let tail = &self.text[span.end..];
        let end = tail
            .char_indices()
            .nth(SNIPPET_TAIL_CHARS)
            .map(|(idx, _)| span.end + idx)
            .unwrap_or(self.text.len());
        let flat = collapse_lines(&self.text[span.start..end], SNIPPET_SEPARATOR);
        truncate_chars(&flat, SNIPPET_MAX_CHARS).to_string()
    }
}

fn flatten(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if SKIPPED_TAGS.contains(&name) {
                continue;
            }
            if name == "br" {
                out.push('\n');
                continue;
            }
            let block = BLOCK_TAGS.contains(&name);
            if block {
                break_line(out);
            }
            flatten(child, out);
            if block {
                break_line(out);
            }
        }
    }
}

fn break_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
