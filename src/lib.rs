//! A block-structured Markdown parser and formatter.
//!
//! `blockdown` converts markdown text into an owned tree of typed blocks
//! whose inline text is a flat sequence of styled spans, and converts the
//! tree back into canonical markdown.  Parsing is total: malformed input
//! degrades to plain paragraph text instead of failing.
//!
//! ```
//! use blockdown::{blocks_to_markdown, markdown_to_blocks};
//!
//! let blocks = markdown_to_blocks("# Title\n\nSome **bold** text.\n");
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(
//!     blocks_to_markdown(&blocks),
//!     "# Title\n\nSome **bold** text.\n"
//! );
//! ```
//!
//! The tree itself is plain data: blocks carry a stable opaque `id`, a
//! typed value, inline [`TextSpan`]s and child blocks, and the whole
//! structure serializes to JSON via serde.

pub mod adapters;
pub mod cm;
mod document;
pub mod factory;
pub mod html;
pub mod nodes;
pub mod parser;
mod scanners;
mod strings;
#[cfg(test)]
mod tests;

pub use adapters::RenderPlugin;
pub use document::{Document, DocumentMeta, DOCUMENT_VERSION};
pub use factory::{Factory, IdGenerator, SequentialIds, UuidIds};
pub use nodes::{
    merge_spans, Block, BlockValue, NodeCallout, NodeCodeBlock, NodeHeading, NodeImage, NodeLink,
    NodeTable, Styles, TextSpan,
};
pub use parser::alert::CalloutType;
pub use parser::{
    parse_document, parse_document_with_ids, parse_inline_content, tokenize, Token,
};

/// Parse markdown text into blocks.  Alias of [`parse_document`].
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    parser::parse_document(markdown)
}

/// Parse markdown text and wrap the blocks in a fresh [`Document`].
pub fn markdown_to_document(markdown: &str) -> Document {
    Document::new(parser::parse_document(markdown))
}

/// Serialize blocks as canonical markdown.  Alias of
/// [`cm::blocks_to_markdown`].
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    cm::blocks_to_markdown(blocks)
}

/// Serialize a document's blocks as canonical markdown.
pub fn document_to_markdown(document: &Document) -> String {
    cm::blocks_to_markdown(&document.blocks)
}

/// Render blocks as an HTML fragment.  Alias of [`html::blocks_to_html`].
pub fn blocks_to_html(blocks: &[Block]) -> String {
    html::blocks_to_html(blocks)
}
