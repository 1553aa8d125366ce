//! Adapter traits for plugins.
//!
//! Each plugin implements [`RenderPlugin`] and is handed to
//! [`crate::html::format_blocks_with_plugins`].

use std::io;

use crate::nodes::Block;

/// Implement this adapter to customize HTML rendering.
///
/// Hooks run in a fixed order: `init` once per render pass,
/// `transform_block` then `render_block` for every block in document
/// order, `get_css` when the caller collects stylesheets, and
/// `post_process` over the fully assembled output.
pub trait RenderPlugin {
    /// One-time setup before a render pass.  A plugin whose `init` fails
    /// is skipped for the whole pass and rendering falls back to the
    /// defaults.
    fn init(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Optionally replace a block before it is rendered.  Transforms
    /// chain across plugins in hand-over order.
    fn transform_block(&self, _block: &Block) -> Option<Block> {
        None
    }

    /// Optionally render a block, returning raw HTML for it.  The first
    /// plugin returning `Some` wins; `None` falls through to the default
    /// renderer.
    fn render_block(&self, _block: &Block) -> Option<String> {
        None
    }

    /// Extra CSS the plugin's markup relies on.
    ///
    /// Collected by [`crate::html::collect_css`]; not injected into the
    /// rendered fragment.
    fn get_css(&self) -> Option<String> {
        None
    }

    /// Rewrite the fully assembled HTML output.
    fn post_process(&self, html: String) -> String {
        html
    }
}
