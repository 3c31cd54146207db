//! Converts lexer inline events into flat `InlineSpan`s.

use crate::node::InlineSpan;
use crate::Spanned;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Style contributed by one open inline container.
#[derive(Debug, Clone)]
enum Wrapper {
    /// A container with no span variant of its own (strikethrough, image alt).
    Transparent,
    Bold,
    Italic,
    Link(String),
}

struct SpanBuilder {
    spans: Vec<InlineSpan>,
    stack: Vec<Wrapper>,
}

impl SpanBuilder {
    fn new() -> Self {
        Self {
            spans: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// The outermost styled wrapper decides the span kind of its whole subtree.
    fn current(&self) -> &Wrapper {
        self.stack
            .iter()
            .find(|w| !matches!(w, Wrapper::Transparent))
            .unwrap_or(&Wrapper::Transparent)
    }

    fn push_styled(&mut self, text: &str) {
        let span = match self.current() {
            Wrapper::Transparent => InlineSpan::text(text),
            Wrapper::Bold => InlineSpan::bold(text),
            Wrapper::Italic => InlineSpan::italic(text),
            Wrapper::Link(href) => InlineSpan::link(text, href.clone()),
        };
        self.push(span);
    }

    fn push(&mut self, span: InlineSpan) {
        if span.as_str().is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.same_style(&span) => last.text_mut().push_str(span.as_str()),
            _ => self.spans.push(span),
        }
    }

    fn finish(self) -> Vec<InlineSpan> {
        self.spans
    }
}

/// Maps a run of inline events to spans.
///
/// Wrapper tokens are flattened: their children become spans styled by the
/// outermost wrapper. Tokens without a span variant are coerced to text when
/// they carry any; otherwise they are dropped.
pub fn parse_inline(events: &[Spanned<'_>]) -> Vec<InlineSpan> {
    let mut builder = SpanBuilder::new();
    for (event, _) in events {
        match event {
            Event::Start(Tag::Strong) => builder.stack.push(Wrapper::Bold),
            Event::Start(Tag::Emphasis) => builder.stack.push(Wrapper::Italic),
            Event::Start(Tag::Link { dest_url, .. }) => {
                builder.stack.push(Wrapper::Link(dest_url.to_string()))
            }
            Event::Start(_) => builder.stack.push(Wrapper::Transparent),
            Event::End(_) => {
                builder.stack.pop();
            }
            Event::Text(text) => builder.push_styled(text),
            Event::Code(code) => builder.push(InlineSpan::code(code.to_string())),
            Event::SoftBreak | Event::HardBreak => builder.push_styled(" "),
            Event::Html(html) | Event::InlineHtml(html) => {
                log::debug!("Coercing inline HTML into text: {:?}", html);
                builder.push_styled(html);
            }
            Event::FootnoteReference(label) => builder.push_styled(&format!("[{}]", label)),
            Event::TaskListMarker(checked) => {
                builder.push(InlineSpan::text(if *checked { "[x] " } else { "[ ] " }))
            }
            other => log::debug!("Dropping inline event without text: {:?}", other),
        }
    }
    builder.finish()
}

fn is_inline_start(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn is_inline_end(tag: &TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}

/// Parses the source text of one list item on its own.
///
/// The text is re-lexed independently of the surrounding document and every
/// inline event it yields is kept; separate blocks inside the item are joined
/// with a space. If nothing inline comes out, the verbatim string becomes a
/// single `Text` span.
pub fn parse_list_item(raw: &str) -> Vec<InlineSpan> {
    let mut inline: Vec<Spanned<'_>> = Vec::new();
    for (event, range) in Parser::new_ext(raw, crate::lexer_options()).into_offset_iter() {
        match &event {
            Event::Start(tag) if !is_inline_start(tag) => {
                let needs_separator = inline
                    .last()
                    .is_some_and(|(last, _)| !matches!(last, Event::SoftBreak));
                if needs_separator {
                    inline.push((Event::SoftBreak, range));
                }
            }
            Event::End(tag) if !is_inline_end(tag) => {}
            Event::Rule => {}
            _ => inline.push((event, range)),
        }
    }

    let spans = parse_inline(&inline);
    if spans.is_empty() {
        vec![InlineSpan::text(raw)]
    } else {
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_spans(markdown: &str) -> Vec<InlineSpan> {
        let events: Vec<Spanned<'_>> = Parser::new_ext(markdown, crate::lexer_options())
            .into_offset_iter()
            .filter(|(e, _)| {
                !matches!(e, Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph))
            })
            .collect();
        parse_inline(&events)
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(paragraph_spans("Hello world"), vec![InlineSpan::text("Hello world")]);
    }

    #[test]
    fn test_bold_italic_code_link() {
        let spans = paragraph_spans("A **bold** and *soft* `code` [docs](https://example.com)");
        assert_eq!(
            spans,
            vec![
                InlineSpan::text("A "),
                InlineSpan::bold("bold"),
                InlineSpan::text(" and "),
                InlineSpan::italic("soft"),
                InlineSpan::text(" "),
                InlineSpan::code("code"),
                InlineSpan::text(" "),
                InlineSpan::link("docs", "https://example.com"),
            ]
        );
    }

    #[test]
    fn test_nested_emphasis_is_flattened() {
        let spans = paragraph_spans("**bold *and italic***");
        assert_eq!(spans, vec![InlineSpan::bold("bold and italic")]);
    }

    #[test]
    fn test_strikethrough_is_transparent() {
        let spans = paragraph_spans("keep ~~this~~ text");
        assert_eq!(spans, vec![InlineSpan::text("keep this text")]);
    }

    #[test]
    fn test_soft_break_becomes_space() {
        let spans = paragraph_spans("line one\nline two");
        assert_eq!(spans, vec![InlineSpan::text("line one line two")]);
    }

    #[test]
    fn test_inline_html_is_coerced_to_text() {
        let spans = paragraph_spans("a <kbd>b</kbd> c");
        assert_eq!(spans, vec![InlineSpan::text("a <kbd>b</kbd> c")]);
    }

    #[test]
    fn test_image_without_alt_is_dropped() {
        let spans = paragraph_spans("![](pic.png)");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_list_item_plain_text_is_verbatim() {
        let spans = parse_list_item("plain item, no markdown");
        assert_eq!(spans, vec![InlineSpan::text("plain item, no markdown")]);
    }

    #[test]
    fn test_list_item_with_markup() {
        let spans = parse_list_item("**Strength:** clear writing");
        assert_eq!(
            spans,
            vec![InlineSpan::bold("Strength:"), InlineSpan::text(" clear writing")]
        );
    }

    #[test]
    fn test_list_item_without_inline_content_falls_back() {
        let spans = parse_list_item("---");
        assert_eq!(spans, vec![InlineSpan::text("---")]);
    }

    #[test]
    fn test_list_item_nested_blocks_are_joined() {
        let spans = parse_list_item("Parent\n- child");
        assert_eq!(spans, vec![InlineSpan::text("Parent child")]);
    }
}
