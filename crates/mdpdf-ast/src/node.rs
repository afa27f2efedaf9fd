//! Typed document tree reconstructed from a token stream.

/// Source offsets of a node inside the token stream (half-open byte range).
///
/// Spans are diagnostic only and take no part in node equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A decoded node: layout category, kind-specific fields and source span.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    /// Whether the node is block-level (`true`) or inline (`false`).
    pub block: bool,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: NodeKind,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub span: Span,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.block == other.block && self.kind == other.kind
    }
}

impl Node {
    /// Create a node using the default layout category of its kind.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            block: kind.is_block(),
            kind,
            span: Span::default(),
        }
    }

    /// Create a `#text` node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text { text: text.into() })
    }

    /// Attach a source span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Tag name of this node, e.g. `paragraph` or `#text`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Whether this is a `#text` node.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. })
    }

    /// Concatenated literal text of this node and all descendants.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text { text } => out.push_str(text),
            NodeKind::Code { code, .. } => out.push_str(&code.to_text()),
            NodeKind::Link { text, .. } | NodeKind::Image { text, .. } => {
                collect_all(text, out);
            }
            NodeKind::Heading { text, .. }
            | NodeKind::Paragraph { text }
            | NodeKind::ListItem { text }
            | NodeKind::Strong { text }
            | NodeKind::Em { text }
            | NodeKind::Del { text } => collect_all(text, out),
            NodeKind::Root { children } => collect_all(children, out),
            NodeKind::List { items, .. } => collect_all(items, out),
            NodeKind::Table { header, body } => {
                collect_all(header, out);
                collect_all(body, out);
            }
            NodeKind::TableRow { content } | NodeKind::TableCell { content, .. } => {
                collect_all(content, out);
            }
            NodeKind::Blockquote { quote } => collect_all(quote, out),
            NodeKind::Html { html } => collect_all(html, out),
            NodeKind::Codespan { code } => collect_all(code, out),
            NodeKind::Other { args, .. } => {
                for arg in args {
                    collect_all(arg, out);
                }
            }
            NodeKind::Br | NodeKind::Hr => {}
        }
    }
}

fn collect_all(nodes: &[Node], out: &mut String) {
    for node in nodes {
        node.collect_text(out);
    }
}

/// Concatenated literal text of a node sequence.
#[must_use]
pub fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    collect_all(nodes, &mut out);
    out
}

/// A positional argument after reduction.
///
/// A sequence made up only of `#text` nodes collapses into its concatenated
/// literal; any other sequence is kept as nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Reduced {
    Text(String),
    Nodes(Vec<Node>),
}

impl Reduced {
    /// Reduce a decoded argument.
    #[must_use]
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        if nodes.iter().all(Node::is_text) {
            let text = nodes
                .into_iter()
                .filter_map(|node| match node.kind {
                    NodeKind::Text { text } => Some(text),
                    _ => None,
                })
                .collect();
            Self::Text(text)
        } else {
            Self::Nodes(nodes)
        }
    }

    /// The literal, if the argument reduced to one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Nodes(_) => None,
        }
    }

    /// Literal text, flattening unreduced nodes to their plain text.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Nodes(nodes) => plain_text(nodes),
        }
    }
}

impl Default for Reduced {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for Reduced {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// Horizontal alignment of a table column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Wire name used in token streams.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Node kind together with its normalized fields.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum NodeKind {
    /// Synthetic document root, only ever built by the decoder.
    #[cfg_attr(feature = "serde", serde(rename = "#root"))]
    Root { children: Vec<Node> },
    #[cfg_attr(feature = "serde", serde(rename = "#text"))]
    Text { text: String },
    Paragraph { text: Vec<Node> },
    Heading { text: Vec<Node>, level: u8, raw: Reduced },
    List { items: Vec<Node>, ordered: bool, start: u64 },
    ListItem { text: Vec<Node> },
    Table { header: Vec<Node>, body: Vec<Node> },
    TableRow { content: Vec<Node> },
    TableCell {
        content: Vec<Node>,
        header: bool,
        align: Option<Alignment>,
    },
    Blockquote { quote: Vec<Node> },
    Html { html: Vec<Node> },
    Code {
        code: Reduced,
        language: Reduced,
        escaped: Reduced,
    },
    Codespan { code: Vec<Node> },
    Strong { text: Vec<Node> },
    Em { text: Vec<Node> },
    Del { text: Vec<Node> },
    Link {
        href: Reduced,
        title: Reduced,
        text: Vec<Node>,
    },
    Image {
        href: Reduced,
        title: Reduced,
        text: Vec<Node>,
    },
    Br,
    Hr,
    /// A kind outside the known vocabulary, kept with its raw arguments.
    Other { name: String, args: Vec<Vec<Node>> },
}

impl NodeKind {
    /// Tag name as it appears in a token stream.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Root { .. } => "#root",
            Self::Text { .. } => "#text",
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::List { .. } => "list",
            Self::ListItem { .. } => "listitem",
            Self::Table { .. } => "table",
            Self::TableRow { .. } => "tablerow",
            Self::TableCell { .. } => "tablecell",
            Self::Blockquote { .. } => "blockquote",
            Self::Html { .. } => "html",
            Self::Code { .. } => "code",
            Self::Codespan { .. } => "codespan",
            Self::Strong { .. } => "strong",
            Self::Em { .. } => "em",
            Self::Del { .. } => "del",
            Self::Link { .. } => "link",
            Self::Image { .. } => "image",
            Self::Br => "br",
            Self::Hr => "hr",
            Self::Other { name, .. } => name,
        }
    }

    /// Layout category the encoder assigns to this kind.
    #[must_use]
    pub fn is_block(&self) -> bool {
        !matches!(
            self,
            Self::Text { .. }
                | Self::Codespan { .. }
                | Self::Strong { .. }
                | Self::Em { .. }
                | Self::Del { .. }
                | Self::Link { .. }
                | Self::Image { .. }
                | Self::Br
        )
    }
}
