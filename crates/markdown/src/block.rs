//! Builds the report node tree from lexer block events.

use crate::inline::{parse_inline, parse_list_item};
use crate::node::{ListItem, Node};
use crate::Spanned;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
use std::ops::Range;

/// Parses `markdown` into a sequence of top-level nodes.
///
/// Every block the lexer produces maps to exactly one node; blocks without a
/// dedicated variant become `Node::Raw` carrying their source text.
pub fn parse(markdown: &str) -> Vec<Node> {
    let events: Vec<Spanned<'_>> = Parser::new_ext(markdown, crate::lexer_options())
        .into_offset_iter()
        .collect();
    let parser = BlockParser { source: markdown };
    let nodes = parser.parse_blocks(&events, true);
    log::debug!(
        "Parsed {} top-level nodes from {} bytes of markdown",
        nodes.len(),
        markdown.len()
    );
    nodes
}

struct BlockParser<'s> {
    source: &'s str,
}

impl<'s> BlockParser<'s> {
    fn parse_blocks(&self, events: &[Spanned<'_>], top_level: bool) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut previous_end: Option<usize> = None;
        let mut i = 0;

        while i < events.len() {
            let (event, range) = &events[i];

            if top_level && let Some(end) = previous_end {
                for _ in 0..self.extra_blank_lines(end, range.start) {
                    nodes.push(Node::Spacer);
                }
            }

            let next = match event {
                Event::Start(tag) => {
                    let close = find_close(events, i);
                    let inner = &events[(i + 1).min(close)..close];
                    if let Some(node) = self.parse_container(tag, inner, range) {
                        nodes.push(node);
                    }
                    close + 1
                }
                Event::Rule => {
                    nodes.push(Node::ThematicBreak);
                    i + 1
                }
                Event::End(_) => {
                    log::warn!("Unbalanced end event at byte {}", range.start);
                    i + 1
                }
                other => {
                    log::debug!("Coercing stray block event into raw text: {:?}", other);
                    if let Some(node) = self.raw(range) {
                        nodes.push(node);
                    }
                    i + 1
                }
            };

            previous_end = Some(range.end);
            i = next;
        }
        nodes
    }

    fn parse_container(&self, tag: &Tag<'_>, inner: &[Spanned<'_>], range: &Range<usize>) -> Option<Node> {
        match tag {
            Tag::Paragraph => {
                let spans = parse_inline(inner);
                if spans.is_empty() {
                    self.raw(range)
                } else {
                    Some(Node::Paragraph { spans })
                }
            }
            Tag::Heading { level, .. } => Some(Node::Heading {
                depth: heading_depth(*level),
                spans: parse_inline(inner),
            }),
            Tag::BlockQuote(_) => Some(Node::Blockquote {
                children: self.parse_blocks(inner, false),
            }),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                let text: String = inner
                    .iter()
                    .filter_map(|(event, _)| match event {
                        Event::Text(text) => Some(&**text),
                        _ => None,
                    })
                    .collect();
                Some(Node::CodeBlock {
                    lang,
                    text: text.trim_end_matches('\n').to_string(),
                })
            }
            Tag::List(start) => Some(Node::List {
                ordered: start.is_some(),
                start: start.unwrap_or(1),
                items: self.parse_items(inner),
            }),
            Tag::Table(_) => Some(flatten_table(inner)),
            Tag::HtmlBlock => {
                let html: String = inner
                    .iter()
                    .filter_map(|(event, _)| match event {
                        Event::Html(html) | Event::Text(html) => Some(&**html),
                        _ => None,
                    })
                    .collect();
                let html = html.trim();
                (!html.is_empty()).then(|| Node::Raw {
                    text: html.to_string(),
                })
            }
            other => {
                log::warn!("Coercing unsupported block {:?} into raw text", other);
                self.raw(range)
            }
        }
    }

    /// Items are re-parsed from their own source text, not from the
    /// surrounding event stream.
    fn parse_items(&self, inner: &[Spanned<'_>]) -> Vec<ListItem> {
        let mut items = Vec::new();
        let mut j = 0;
        while j < inner.len() {
            let (event, range) = &inner[j];
            if matches!(event, Event::Start(Tag::Item)) {
                let raw = strip_list_marker(&self.source[range.clone()]);
                items.push(ListItem {
                    spans: parse_list_item(&raw),
                });
                j = find_close(inner, j) + 1;
            } else {
                j += 1;
            }
        }
        items
    }

    fn raw(&self, range: &Range<usize>) -> Option<Node> {
        let text = self.source.get(range.clone())?.trim();
        (!text.is_empty()).then(|| Node::Raw {
            text: text.to_string(),
        })
    }

    /// Number of blank lines between two top-level blocks beyond the single
    /// separator line markdown requires.
    fn extra_blank_lines(&self, previous_end: usize, next_start: usize) -> usize {
        let src = self.source;
        if previous_end >= next_start || next_start > src.len() {
            return 0;
        }
        let gap_start = if previous_end == 0 || src[..previous_end].ends_with('\n') {
            previous_end
        } else {
            src[previous_end..next_start]
                .find('\n')
                .map_or(next_start, |p| previous_end + p + 1)
        };
        let gap_end = src[..next_start].rfind('\n').map_or(0, |p| p + 1);
        if gap_end <= gap_start {
            return 0;
        }
        let blank = src[gap_start..gap_end]
            .split_inclusive('\n')
            .filter(|line| line.trim().is_empty())
            .count();
        blank.saturating_sub(1)
    }
}

/// Index of the `End` event closing the container opened at `open`.
fn find_close(events: &[Spanned<'_>], open: usize) -> usize {
    let mut depth = 0usize;
    for (j, (event, _)) in events.iter().enumerate().skip(open) {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return j;
                }
            }
            _ => {}
        }
    }
    events.len()
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Flattens table cells to plain strings. Only the text of inline events is
/// kept, so emphasis inside a cell is lost.
fn flatten_table(inner: &[Spanned<'_>]) -> Node {
    let mut header = Vec::new();
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell: Option<String> = None;

    for (event, _) in inner {
        match event {
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => row.clear(),
            Event::End(TagEnd::TableHead) => header = std::mem::take(&mut row),
            Event::End(TagEnd::TableRow) => rows.push(std::mem::take(&mut row)),
            Event::Start(Tag::TableCell) => cell = Some(String::new()),
            Event::End(TagEnd::TableCell) => {
                if let Some(text) = cell.take() {
                    row.push(text.trim().to_string());
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(current) = cell.as_mut() {
                    current.push_str(text);
                }
            }
            _ => {}
        }
    }
    Node::Table { header, rows }
}

/// Removes the bullet or number marker from a list item's source and
/// dedents its continuation lines by the marker width.
fn strip_list_marker(raw: &str) -> String {
    let mut lines = raw.trim_end().lines();
    let Some(first) = lines.next() else {
        return String::new();
    };
    let trimmed = first.trim_start();
    let indent = first.len() - trimmed.len();
    let after_marker = &trimmed[marker_len(trimmed)..];
    let content = after_marker.trim_start();
    let padding = (after_marker.len() - content.len()).max(1);
    let width = indent + marker_len(trimmed) + padding;

    let mut out = content.to_string();
    for line in lines {
        out.push('\n');
        let strip = line.bytes().take(width).take_while(|b| *b == b' ').count();
        out.push_str(&line[strip..]);
    }
    out
}

fn marker_len(line: &str) -> usize {
    if line.starts_with(['-', '*', '+']) {
        return 1;
    }
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    match line.as_bytes().get(digits) {
        Some(b'.') | Some(b')') if digits > 0 => digits + 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::InlineSpan;

    #[test]
    fn test_heading_and_paragraph() {
        let nodes = parse("# Title\n\nHello");
        assert_eq!(
            nodes,
            vec![
                Node::Heading {
                    depth: 1,
                    spans: vec![InlineSpan::text("Title")]
                },
                Node::Paragraph {
                    spans: vec![InlineSpan::text("Hello")]
                },
            ]
        );
    }

    #[test]
    fn test_all_heading_depths() {
        let nodes = parse("# a\n## b\n### c\n#### d\n##### e\n###### f\n");
        let depths: Vec<u8> = nodes.iter().filter_map(Node::heading_depth).collect();
        assert_eq!(depths, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_table_cells_are_flattened() {
        let nodes = parse("| Area | Note |\n|---|---|\n| **bold** | *it* `x` |\n");
        assert_eq!(
            nodes,
            vec![Node::Table {
                header: vec!["Area".to_string(), "Note".to_string()],
                rows: vec![vec!["bold".to_string(), "it x".to_string()]],
            }]
        );
    }

    #[test]
    fn test_unordered_list() {
        let nodes = parse("- plain item, no markdown\n- **Strong** point\n");
        assert_eq!(
            nodes,
            vec![Node::List {
                ordered: false,
                start: 1,
                items: vec![
                    ListItem {
                        spans: vec![InlineSpan::text("plain item, no markdown")]
                    },
                    ListItem {
                        spans: vec![InlineSpan::bold("Strong"), InlineSpan::text(" point")]
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_ordered_list_keeps_start() {
        let nodes = parse("3. third\n4. fourth\n");
        match &nodes[0] {
            Node::List {
                ordered,
                start,
                items,
            } => {
                assert!(*ordered);
                assert_eq!(*start, 3);
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].spans, vec![InlineSpan::text("fourth")]);
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_code_block_language_and_text() {
        let nodes = parse("```rust\nfn main() {}\n```\n");
        assert_eq!(
            nodes,
            vec![Node::CodeBlock {
                lang: Some("rust".to_string()),
                text: "fn main() {}".to_string(),
            }]
        );
    }

    #[test]
    fn test_indented_code_block_has_no_language() {
        let nodes = parse("    let x = 1;\n");
        assert_eq!(
            nodes,
            vec![Node::CodeBlock {
                lang: None,
                text: "let x = 1;".to_string(),
            }]
        );
    }

    #[test]
    fn test_blockquote_children_are_parsed() {
        let nodes = parse("> ## Note\n> Keep going\n");
        assert_eq!(
            nodes,
            vec![Node::Blockquote {
                children: vec![
                    Node::Heading {
                        depth: 2,
                        spans: vec![InlineSpan::text("Note")]
                    },
                    Node::Paragraph {
                        spans: vec![InlineSpan::text("Keep going")]
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_thematic_break() {
        let nodes = parse("above\n\n---\n\nbelow\n");
        assert_eq!(nodes[1], Node::ThematicBreak);
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_html_block_is_kept_as_raw() {
        let nodes = parse("<div>custom</div>\n");
        assert_eq!(
            nodes,
            vec![Node::Raw {
                text: "<div>custom</div>".to_string()
            }]
        );
    }

    #[test]
    fn test_extra_blank_lines_become_spacers() {
        let nodes = parse("a\n\n\n\nb\n");
        let kinds: Vec<&str> = nodes.iter().map(Node::kind).collect();
        assert_eq!(kinds, vec!["paragraph", "spacer", "spacer", "paragraph"]);
    }

    #[test]
    fn test_single_blank_line_adds_no_spacer() {
        let nodes = parse("a\n\nb\n");
        assert!(nodes.iter().all(|n| *n != Node::Spacer));
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("- item\n"), "item");
        assert_eq!(strip_list_marker("12. twelve"), "twelve");
        assert_eq!(strip_list_marker("* first\n  second line"), "first\nsecond line");
    }
}
