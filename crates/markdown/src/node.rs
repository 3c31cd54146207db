use serde::Serialize;

/// A leaf run of styled text inside a block.
///
/// Spans never nest: nested markup is flattened while parsing, with the
/// outermost style winning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineSpan {
    Text { text: String },
    Bold { text: String },
    Italic { text: String },
    CodeSpan { text: String },
    Link { text: String, href: String },
}

impl InlineSpan {
    pub fn text(text: impl Into<String>) -> Self {
        InlineSpan::Text { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        InlineSpan::Bold { text: text.into() }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        InlineSpan::Italic { text: text.into() }
    }

    pub fn code(text: impl Into<String>) -> Self {
        InlineSpan::CodeSpan { text: text.into() }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        InlineSpan::Link {
            text: text.into(),
            href: href.into(),
        }
    }

    /// The visible text of the span.
    pub fn as_str(&self) -> &str {
        match self {
            InlineSpan::Text { text }
            | InlineSpan::Bold { text }
            | InlineSpan::Italic { text }
            | InlineSpan::CodeSpan { text }
            | InlineSpan::Link { text, .. } => text,
        }
    }

    pub(crate) fn text_mut(&mut self) -> &mut String {
        match self {
            InlineSpan::Text { text }
            | InlineSpan::Bold { text }
            | InlineSpan::Italic { text }
            | InlineSpan::CodeSpan { text }
            | InlineSpan::Link { text, .. } => text,
        }
    }

    /// Whether `other` carries the same styling, so the two may be merged.
    pub(crate) fn same_style(&self, other: &InlineSpan) -> bool {
        match (self, other) {
            (InlineSpan::Link { href: a, .. }, InlineSpan::Link { href: b, .. }) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

/// Concatenates the visible text of a span list.
pub fn plain_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::as_str).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub spans: Vec<InlineSpan>,
}

/// A parsed block-level structure of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Heading {
        depth: u8,
        spans: Vec<InlineSpan>,
    },
    Paragraph {
        spans: Vec<InlineSpan>,
    },
    List {
        ordered: bool,
        /// Number of the first item of an ordered list.
        start: u64,
        items: Vec<ListItem>,
    },
    CodeBlock {
        lang: Option<String>,
        text: String,
    },
    Blockquote {
        children: Vec<Node>,
    },
    ThematicBreak,
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Spacer,
    /// Source the parser has no dedicated variant for, kept verbatim and
    /// rendered like a paragraph.
    Raw {
        text: String,
    },
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Heading { .. } => "heading",
            Node::Paragraph { .. } => "paragraph",
            Node::List { .. } => "list",
            Node::CodeBlock { .. } => "code_block",
            Node::Blockquote { .. } => "blockquote",
            Node::ThematicBreak => "thematic_break",
            Node::Table { .. } => "table",
            Node::Spacer => "spacer",
            Node::Raw { .. } => "raw",
        }
    }

    /// Depth of the node if it is a heading.
    pub fn heading_depth(&self) -> Option<u8> {
        match self {
            Node::Heading { depth, .. } => Some(*depth),
            _ => None,
        }
    }
}
