//! Markdown front end for feedback reports.
//!
//! - `sanitize`: strips glyphs the report fonts cannot draw
//! - `inline`: lexer inline events → flat styled spans
//! - `block`: lexer block events → the `Node` tree
//!
//! The lexer is `pulldown-cmark` with tables, strikethrough, task lists and
//! footnotes enabled.

pub mod block;
pub mod inline;
pub mod node;
pub mod sanitize;

use pulldown_cmark::{Event, Options};
use std::ops::Range;

pub use block::parse;
pub use inline::{parse_inline, parse_list_item};
pub use node::{InlineSpan, ListItem, Node, plain_text};
pub use sanitize::sanitize;

/// A lexer event together with its byte range in the source.
pub(crate) type Spanned<'a> = (Event<'a>, Range<usize>);

pub(crate) fn lexer_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Sanitizes and parses a report body in one step.
pub fn parse_report(markdown: &str) -> Vec<Node> {
    parse(&sanitize(markdown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_strips_emoji_before_parsing() {
        let nodes = parse_report("# \u{1F4DD}Summary\n\nWell \u{1F44F}done");
        assert_eq!(
            nodes,
            vec![
                Node::Heading {
                    depth: 1,
                    spans: vec![InlineSpan::text("Summary")]
                },
                Node::Paragraph {
                    spans: vec![InlineSpan::text("Well done")]
                },
            ]
        );
    }

    #[test]
    fn test_nodes_serialize_with_type_tags() {
        let nodes = parse("## Scores");
        let json = serde_json::to_value(&nodes).unwrap();
        assert_eq!(json[0]["type"], "heading");
        assert_eq!(json[0]["depth"], 2);
        assert_eq!(json[0]["spans"][0]["type"], "text");
        assert_eq!(json[0]["spans"][0]["text"], "Scores");
    }
}
