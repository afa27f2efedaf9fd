//! Deterministic text renderings for debugging and golden fixtures.

use std::fmt::Write;

use crate::node::{Node, NodeKind, Reduced};
use crate::sentinel::Marker;

/// Render a token stream with markers replaced by `{{`, `}}` and `::`.
#[must_use]
pub fn dump_tokens(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    for c in code.chars() {
        match Marker::from_char(c) {
            Some(marker) => out.push_str(marker.digraph()),
            None => out.push(c),
        }
    }
    out
}

/// Render a tree as indented `key = value` lines.
///
/// Spans are omitted so that dumps depend on structure only.
#[must_use]
pub fn dump_tree(node: &Node) -> String {
    let mut dumper = TreeDumper::default();
    dumper.node(node, 0);
    dumper.out
}

#[derive(Default)]
struct TreeDumper {
    out: String,
}

impl TreeDumper {
    fn line(&mut self, depth: usize, args: std::fmt::Arguments<'_>) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        let _ = self.out.write_fmt(args);
        self.out.push('\n');
    }

    fn node(&mut self, node: &Node, depth: usize) {
        let category = if node.block { "block" } else { "inline" };
        self.line(depth, format_args!("name = {:?} -> {category}", node.name()));

        match &node.kind {
            NodeKind::Root { children } => self.nodes("children", children, depth),
            NodeKind::Text { text } => self.string("text", text, depth),
            NodeKind::Paragraph { text }
            | NodeKind::ListItem { text }
            | NodeKind::Strong { text }
            | NodeKind::Em { text }
            | NodeKind::Del { text } => self.nodes("text", text, depth),
            NodeKind::Heading { text, level, raw } => {
                self.nodes("text", text, depth);
                self.line(depth, format_args!("level = {level}"));
                self.reduced("raw", raw, depth);
            }
            NodeKind::List {
                items,
                ordered,
                start,
            } => {
                self.nodes("items", items, depth);
                self.line(depth, format_args!("ordered = {ordered}"));
                self.line(depth, format_args!("start = {start}"));
            }
            NodeKind::Table { header, body } => {
                self.nodes("header", header, depth);
                self.nodes("body", body, depth);
            }
            NodeKind::TableRow { content } => self.nodes("content", content, depth),
            NodeKind::TableCell {
                content,
                header,
                align,
            } => {
                self.nodes("content", content, depth);
                self.line(depth, format_args!("header = {header}"));
                match align {
                    Some(align) => self.string("align", align.as_str(), depth),
                    None => self.line(depth, format_args!("align = null")),
                }
            }
            NodeKind::Blockquote { quote } => self.nodes("quote", quote, depth),
            NodeKind::Html { html } => self.nodes("html", html, depth),
            NodeKind::Code {
                code,
                language,
                escaped,
            } => {
                self.reduced("code", code, depth);
                self.reduced("language", language, depth);
                self.reduced("escaped", escaped, depth);
            }
            NodeKind::Codespan { code } => self.nodes("code", code, depth),
            NodeKind::Link { href, title, text } | NodeKind::Image { href, title, text } => {
                self.reduced("href", href, depth);
                self.reduced("title", title, depth);
                self.nodes("text", text, depth);
            }
            NodeKind::Br | NodeKind::Hr => {}
            NodeKind::Other { args, .. } => {
                for (i, arg) in args.iter().enumerate() {
                    self.nodes(&format!("arg{i}"), arg, depth);
                }
            }
        }
    }

    fn string(&mut self, key: &str, value: &str, depth: usize) {
        self.line(depth, format_args!("{key} = {value:?}"));
    }

    fn reduced(&mut self, key: &str, value: &Reduced, depth: usize) {
        match value {
            Reduced::Text(text) => self.string(key, text, depth),
            Reduced::Nodes(nodes) => self.nodes(key, nodes, depth),
        }
    }

    fn nodes(&mut self, key: &str, nodes: &[Node], depth: usize) {
        if nodes.is_empty() {
            self.line(depth, format_args!("{key} = []"));
            return;
        }
        self.line(depth, format_args!("{key} = ["));
        for node in nodes {
            self.line(depth + 1, format_args!("{{"));
            self.node(node, depth + 2);
            self.line(depth + 1, format_args!("}},"));
        }
        self.line(depth, format_args!("]"));
    }
}
