//! Renderer callbacks and the encoder serializing them into a token stream.
//!
//! A markdown lexer drives a [`Renderer`] bottom-up: every callback receives
//! the already rendered fragments of its children and returns one string.
//! [`AstRenderer`] answers each callback with a node encoding
//!
//! ```text
//! OPEN <block flag> SEP <kind> (SEP <argument>)* CLOSE
//! ```
//!
//! wrapping child fragments unmodified as positional arguments, so the
//! structure survives string concatenation and can be recovered by
//! [`decode`](crate::decode).

use crate::node::{Alignment, Node, NodeKind, Reduced};
use crate::sentinel::{CLOSE, OPEN, SEP};

/// Header flag and alignment of a table cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellFlags {
    pub header: bool,
    pub align: Option<Alignment>,
}

/// Callback set a markdown lexer renders through.
///
/// Arguments named `text`, `body`, `quote`, `content` and `html` are rendered
/// child fragments; implementations must not re-parse them.
pub trait Renderer {
    fn code(&self, code: &str, language: &str, escaped: bool) -> String;
    fn blockquote(&self, quote: &str) -> String;
    fn html(&self, html: &str) -> String;
    fn heading(&self, text: &str, level: u8, raw: &str) -> String;
    fn hr(&self) -> String;
    fn list(&self, body: &str, ordered: bool, start: u64) -> String;
    fn listitem(&self, text: &str) -> String;
    fn paragraph(&self, text: &str) -> String;
    fn table(&self, header: &str, body: &str) -> String;
    fn tablerow(&self, content: &str) -> String;
    fn tablecell(&self, content: &str, flags: CellFlags) -> String;
    fn strong(&self, text: &str) -> String;
    fn em(&self, text: &str) -> String;
    fn codespan(&self, code: &str) -> String;
    fn br(&self) -> String;
    fn del(&self, text: &str) -> String;
    fn link(&self, href: &str, title: &str, text: &str) -> String;
    fn image(&self, href: &str, title: &str, text: &str) -> String;
    fn text(&self, text: &str) -> String;
}

/// Encoder producing sentinel-delimited token streams.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstRenderer;

/// Encode one node with its positional arguments.
fn encode_node(block: bool, name: &str, args: &[&str]) -> String {
    let capacity = name.len() + args.iter().map(|arg| arg.len() + 3).sum::<usize>() + 12;
    let mut out = String::with_capacity(capacity);
    out.push(OPEN);
    out.push(if block { '1' } else { '0' });
    out.push(SEP);
    out.push_str(name);
    for arg in args {
        out.push(SEP);
        out.push_str(arg);
    }
    out.push(CLOSE);
    out
}

impl Renderer for AstRenderer {
    fn code(&self, code: &str, language: &str, escaped: bool) -> String {
        encode_node(true, "code", &[code, language, bool_literal(escaped)])
    }

    fn blockquote(&self, quote: &str) -> String {
        encode_node(true, "blockquote", &[quote])
    }

    fn html(&self, html: &str) -> String {
        encode_node(true, "html", &[html])
    }

    fn heading(&self, text: &str, level: u8, raw: &str) -> String {
        let level = level.to_string();
        encode_node(true, "heading", &[text, &level, raw])
    }

    fn hr(&self) -> String {
        encode_node(true, "hr", &[])
    }

    fn list(&self, body: &str, ordered: bool, start: u64) -> String {
        let start = start.to_string();
        encode_node(true, "list", &[body, bool_literal(ordered), &start])
    }

    fn listitem(&self, text: &str) -> String {
        encode_node(true, "listitem", &[text])
    }

    fn paragraph(&self, text: &str) -> String {
        encode_node(true, "paragraph", &[text])
    }

    fn table(&self, header: &str, body: &str) -> String {
        encode_node(true, "table", &[header, body])
    }

    fn tablerow(&self, content: &str) -> String {
        encode_node(true, "tablerow", &[content])
    }

    fn tablecell(&self, content: &str, flags: CellFlags) -> String {
        let align = flags.align.map_or("null", Alignment::as_str);
        encode_node(
            true,
            "tablecell",
            &[content, bool_literal(flags.header), align],
        )
    }

    fn strong(&self, text: &str) -> String {
        encode_node(false, "strong", &[text])
    }

    fn em(&self, text: &str) -> String {
        encode_node(false, "em", &[text])
    }

    fn codespan(&self, code: &str) -> String {
        encode_node(false, "codespan", &[code])
    }

    fn br(&self) -> String {
        encode_node(false, "br", &[])
    }

    fn del(&self, text: &str) -> String {
        encode_node(false, "del", &[text])
    }

    fn link(&self, href: &str, title: &str, text: &str) -> String {
        encode_node(false, "link", &[href, title, text])
    }

    fn image(&self, href: &str, title: &str, text: &str) -> String {
        encode_node(false, "image", &[href, title, text])
    }

    fn text(&self, text: &str) -> String {
        text.to_owned()
    }
}

fn bool_literal(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Serialize a tree back into a token stream with [`AstRenderer`].
///
/// Children are encoded before their parent, in the order a lexer would
/// invoke the callbacks.
#[must_use]
pub fn encode(node: &Node) -> String {
    encode_with(&AstRenderer, node)
}

/// Serialize a tree through an arbitrary [`Renderer`].
pub fn encode_with<R: Renderer + ?Sized>(renderer: &R, node: &Node) -> String {
    let seq = |nodes: &[Node]| encode_all(renderer, nodes);
    let reduced = |value: &Reduced| match value {
        Reduced::Text(text) => renderer.text(text),
        Reduced::Nodes(nodes) => encode_all(renderer, nodes),
    };

    match &node.kind {
        NodeKind::Root { children } => seq(children),
        NodeKind::Text { text } => renderer.text(text),
        NodeKind::Paragraph { text } => renderer.paragraph(&seq(text)),
        NodeKind::Heading { text, level, raw } => {
            renderer.heading(&seq(text), *level, &reduced(raw))
        }
        NodeKind::List {
            items,
            ordered,
            start,
        } => renderer.list(&seq(items), *ordered, *start),
        NodeKind::ListItem { text } => renderer.listitem(&seq(text)),
        NodeKind::Table { header, body } => renderer.table(&seq(header), &seq(body)),
        NodeKind::TableRow { content } => renderer.tablerow(&seq(content)),
        NodeKind::TableCell {
            content,
            header,
            align,
        } => renderer.tablecell(
            &seq(content),
            CellFlags {
                header: *header,
                align: *align,
            },
        ),
        NodeKind::Blockquote { quote } => renderer.blockquote(&seq(quote)),
        NodeKind::Html { html } => renderer.html(&seq(html)),
        NodeKind::Code {
            code,
            language,
            escaped,
        } => renderer.code(
            &reduced(code),
            &reduced(language),
            escaped.to_text() == "true",
        ),
        NodeKind::Codespan { code } => renderer.codespan(&seq(code)),
        NodeKind::Strong { text } => renderer.strong(&seq(text)),
        NodeKind::Em { text } => renderer.em(&seq(text)),
        NodeKind::Del { text } => renderer.del(&seq(text)),
        NodeKind::Link { href, title, text } => {
            renderer.link(&reduced(href), &reduced(title), &seq(text))
        }
        NodeKind::Image { href, title, text } => {
            renderer.image(&reduced(href), &reduced(title), &seq(text))
        }
        NodeKind::Br => renderer.br(),
        NodeKind::Hr => renderer.hr(),
        NodeKind::Other { name, args } => {
            let args: Vec<String> = args.iter().map(|arg| seq(arg.as_slice())).collect();
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            encode_node(node.block, name, &args)
        }
    }
}

fn encode_all<R: Renderer + ?Sized>(renderer: &R, nodes: &[Node]) -> String {
    nodes.iter().fold(String::new(), |mut out, node| {
        out.push_str(&encode_with(renderer, node));
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dump_tokens;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_passes_through_unwrapped() {
        assert_eq!(AstRenderer.text("plain *text*"), "plain *text*");
    }

    #[test]
    fn test_paragraph_wraps_children_unmodified() {
        let r = AstRenderer;
        let inner = format!("Hi {}", r.strong("there"));
        assert_eq!(
            dump_tokens(&r.paragraph(&inner)),
            "{{1::paragraph::Hi {{0::strong::there}}}}"
        );
    }

    #[test]
    fn test_leaf_nodes_close_after_name() {
        assert_eq!(dump_tokens(&AstRenderer.hr()), "{{1::hr}}");
        assert_eq!(dump_tokens(&AstRenderer.br()), "{{0::br}}");
    }

    #[test]
    fn test_list_carries_flags() {
        let r = AstRenderer;
        let body = r.listitem("a");
        assert_eq!(
            dump_tokens(&r.list(&body, true, 5)),
            "{{1::list::{{1::listitem::a}}::true::5}}"
        );
    }

    #[test]
    fn test_tablecell_encodes_missing_alignment_as_null() {
        let r = AstRenderer;
        let cell = r.tablecell(
            "x",
            CellFlags {
                header: true,
                align: None,
            },
        );
        assert_eq!(dump_tokens(&cell), "{{1::tablecell::x::true::null}}");
    }

    #[test]
    fn test_code_and_link_arguments() {
        let r = AstRenderer;
        assert_eq!(
            dump_tokens(&r.code("fn main() {}", "rust", false)),
            "{{1::code::fn main() {}::rust::false}}"
        );
        assert_eq!(
            dump_tokens(&r.link("https://example.com", "", "site")),
            "{{0::link::https://example.com::::site}}"
        );
    }

    #[test]
    fn test_encode_tree_matches_callbacks() {
        let r = AstRenderer;
        let tree = Node::new(NodeKind::Paragraph {
            text: vec![
                Node::text("Hi "),
                Node::new(NodeKind::Strong {
                    text: vec![Node::text("there")],
                }),
            ],
        });
        assert_eq!(
            encode(&tree),
            r.paragraph(&format!("Hi {}", r.strong("there")))
        );
    }
}
