//! Token stream encoding and typed document tree for mdpdf.
//!
//! A markdown lexer can only hand back one string per renderer callback. This
//! crate carries document structure through that string channel:
//!
//! - [`AstRenderer`] implements the [`Renderer`] callbacks, wrapping every
//!   construct in a sentinel-delimited node encoding.
//! - [`decode`] rebuilds a tree of typed [`Node`]s from the resulting token
//!   stream with a single-pass state machine.
//! - [`dump_tokens`] and [`dump_tree`] give deterministic renderings for
//!   debugging.
//!
//! # Example
//!
//! ```
//! use mdpdf_ast::{AstRenderer, NodeKind, Renderer, decode};
//!
//! let r = AstRenderer;
//! let code = r.paragraph(&format!("Hi {}", r.strong("there")));
//! let root = decode(&code).unwrap();
//!
//! let NodeKind::Root { children } = root.kind else { unreachable!() };
//! assert_eq!(children[0].name(), "paragraph");
//! ```

mod decoder;
mod dump;
mod error;
mod node;
mod normalize;
mod renderer;
pub mod sentinel;

pub use decoder::{AstContext, MAX_DEPTH, SentinelMatch, decode};
pub use dump::{dump_tokens, dump_tree};
pub use error::{AstError, ParserState};
pub use node::{Alignment, Node, NodeKind, Reduced, Span, plain_text};
pub use normalize::normalize;
pub use renderer::{AstRenderer, CellFlags, Renderer, encode, encode_with};
