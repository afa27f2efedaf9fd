//! Markdown conversion for mdpdf: lexer adapter, tree generator and themes.
//!
//! # Architecture
//!
//! - [`MarkdownLexer`] drives the [`Renderer`](mdpdf_ast::Renderer) callbacks
//!   from `pulldown-cmark` events, producing a token stream.
//! - The token stream is decoded by [`mdpdf_ast::decode`] into a typed tree.
//! - [`Generator`] walks the tree and dispatches node by node to a [`Theme`].
//!
//! [`MarkdownConverter`] wires the three stages together. Two themes ship
//! with the crate: [`RecordingTheme`] records every hook call and
//! [`TextTheme`] lays the document out as paginated plain text.
//!
//! # Example
//!
//! ```
//! use mdpdf_renderer::{MarkdownConverter, RecordingTheme, ThemeCall};
//!
//! let mut theme = RecordingTheme::new();
//! MarkdownConverter::new().convert("Hello", &mut theme).unwrap();
//! assert_eq!(theme.calls().last(), Some(&ThemeCall::Finish));
//! ```

mod convert;
mod error;
mod generator;
mod lexer;
mod recording;
mod text;
mod theme;

pub use convert::MarkdownConverter;
pub use error::ConvertError;
pub use generator::Generator;
pub use lexer::MarkdownLexer;
pub use recording::{RecordingTheme, ThemeCall};
pub use text::{TextLayout, TextTheme};
pub use theme::{InlineStyle, ListInfo, ListItemInfo, Position, StyleSet, TableShape, Theme};
