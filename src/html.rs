//! The HTML renderer.
//!
//! Renders a block tree as an HTML fragment.  All text content is
//! escaped; hrefs pass through a conservative byte filter.  Rendering can
//! be customized through [`RenderPlugin`] adapters.

use std::io::{self, Write};

use crate::adapters::RenderPlugin;
use crate::nodes::{merge_spans, Block, BlockValue, NodeTable, TextSpan};

/// Render a block tree as an HTML fragment.
pub fn format_blocks(blocks: &[Block], output: &mut dyn Write) -> io::Result<()> {
    format_blocks_with_plugins(blocks, output, &mut [])
}

/// Render a block tree as an HTML string.
pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = vec![];
    format_blocks(blocks, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Render a block tree with plugins.  Hook order per plugin: `init` once,
/// then `transform_block` and `render_block` per block, then
/// `post_process` over the whole fragment.  A plugin whose `init` fails
/// is skipped.
pub fn format_blocks_with_plugins(
    blocks: &[Block],
    output: &mut dyn Write,
    plugins: &mut [Box<dyn RenderPlugin>],
) -> io::Result<()> {
    let mut active = vec![];
    for (i, plugin) in plugins.iter_mut().enumerate() {
        if plugin.init().is_ok() {
            active.push(i);
        }
    }

    let mut f = HtmlFormatter::new();
    for block in blocks {
        let mut current = None;
        for &i in &active {
            if let Some(replacement) = plugins[i].transform_block(current.as_ref().unwrap_or(block))
            {
                current = Some(replacement);
            }
        }
        let block = current.as_ref().unwrap_or(block);

        let mut rendered = None;
        for &i in &active {
            if let Some(html) = plugins[i].render_block(block) {
                rendered = Some(html);
                break;
            }
        }

        match rendered {
            Some(html) => {
                f.cr();
                f.v.extend(html.as_bytes());
                f.cr();
            }
            None => f.format_block(block),
        }
    }

    let mut body = String::from_utf8(f.v).unwrap();
    for &i in &active {
        body = plugins[i].post_process(body);
    }

    output.write_all(body.as_bytes())?;
    Ok(())
}

/// Concatenate the CSS contributed by each plugin's `get_css` hook.
pub fn collect_css(plugins: &[Box<dyn RenderPlugin>]) -> String {
    let mut css = String::new();
    for plugin in plugins {
        if let Some(piece) = plugin.get_css() {
            css.push_str(&piece);
            if !piece.ends_with('\n') {
                css.push('\n');
            }
        }
    }
    css
}

fn href_safe(c: u8) -> bool {
    c.is_ascii_alphanumeric() || b"-_.+!*(),%#@?=;:/$".contains(&c)
}

struct HtmlFormatter {
    v: Vec<u8>,
}

impl Write for HtmlFormatter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.v.extend(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl HtmlFormatter {
    fn new() -> Self {
        HtmlFormatter { v: vec![] }
    }

    fn cr(&mut self) {
        if !self.v.is_empty() && self.v[self.v.len() - 1] != b'\n' {
            self.v.push(b'\n');
        }
    }

    fn escape(&mut self, buffer: &str) {
        for c in buffer.bytes() {
            match c {
                b'"' => self.v.extend(b"&quot;"),
                b'&' => self.v.extend(b"&amp;"),
                b'<' => self.v.extend(b"&lt;"),
                b'>' => self.v.extend(b"&gt;"),
                _ => self.v.push(c),
            }
        }
    }

    fn escape_href(&mut self, buffer: &str) {
        for c in buffer.bytes() {
            match c {
                _ if href_safe(c) => self.v.push(c),
                b'&' => self.v.extend(b"&amp;"),
                b'\'' => self.v.extend(b"&#x27;"),
                _ => {
                    write!(self.v, "&#x{:x};", c).unwrap();
                }
            }
        }
    }

    fn format_block(&mut self, block: &Block) {
        match block.value {
            BlockValue::Paragraph => {
                self.cr();
                write!(self, "<p>").unwrap();
                self.format_spans(&block.content);
                writeln!(self, "</p>").unwrap();
            }
            BlockValue::Heading(ref nch) => {
                self.cr();
                write!(self, "<h{}>", nch.level).unwrap();
                self.format_spans(&block.content);
                writeln!(self, "</h{}>", nch.level).unwrap();
            }
            BlockValue::BulletList | BlockValue::CheckList => {
                self.cr();
                writeln!(self, "<ul>").unwrap();
                for item in &block.children {
                    self.format_item(item);
                }
                writeln!(self, "</ul>").unwrap();
            }
            BlockValue::NumberedList => {
                self.cr();
                writeln!(self, "<ol>").unwrap();
                for item in &block.children {
                    self.format_item(item);
                }
                writeln!(self, "</ol>").unwrap();
            }
            BlockValue::Item | BlockValue::TaskItem { .. } => self.format_item(block),
            BlockValue::CodeBlock(ref ncb) => {
                self.cr();
                write!(self, "<pre><code").unwrap();
                if !ncb.info.is_empty() {
                    write!(self, " class=\"language-").unwrap();
                    self.escape(&ncb.info);
                    write!(self, "\"").unwrap();
                }
                write!(self, ">").unwrap();
                let literal = block.text();
                if !literal.is_empty() {
                    self.escape(&literal);
                    self.v.push(b'\n');
                }
                writeln!(self, "</code></pre>").unwrap();
            }
            BlockValue::BlockQuote => {
                self.cr();
                writeln!(self, "<blockquote>").unwrap();
                write!(self, "<p>").unwrap();
                self.format_spans(&block.content);
                writeln!(self, "</p>").unwrap();
                writeln!(self, "</blockquote>").unwrap();
            }
            BlockValue::Callout(ref nc) => {
                self.cr();
                writeln!(
                    self,
                    "<div class=\"callout {}\">",
                    nc.callout_type.css_class()
                )
                .unwrap();
                writeln!(
                    self,
                    "<p class=\"callout-title\">{}</p>",
                    nc.callout_type.default_title()
                )
                .unwrap();
                if !block.content.is_empty() {
                    write!(self, "<p>").unwrap();
                    self.format_spans(&block.content);
                    writeln!(self, "</p>").unwrap();
                }
                writeln!(self, "</div>").unwrap();
            }
            BlockValue::Divider => {
                self.cr();
                writeln!(self, "<hr />").unwrap();
            }
            BlockValue::Image(ref ni) => {
                self.cr();
                write!(self, "<img src=\"").unwrap();
                self.escape_href(&ni.url);
                write!(self, "\" alt=\"").unwrap();
                self.escape(&ni.alt);
                writeln!(self, "\" />").unwrap();
            }
            BlockValue::Table(ref nt) => self.format_table(nt),
        }
    }

    fn format_item(&mut self, item: &Block) {
        write!(self, "<li>").unwrap();
        if let BlockValue::TaskItem { checked } = item.value {
            write!(self, "<input type=\"checkbox\" disabled=\"\"").unwrap();
            if checked {
                write!(self, " checked=\"\"").unwrap();
            }
            write!(self, " /> ").unwrap();
        }
        self.format_spans(&item.content);
        for nested in &item.children {
            if nested.value.is_list() {
                self.format_block(nested);
            }
        }
        writeln!(self, "</li>").unwrap();
    }

    fn format_table(&mut self, table: &NodeTable) {
        self.cr();
        writeln!(self, "<table>").unwrap();
        writeln!(self, "<thead>").unwrap();
        writeln!(self, "<tr>").unwrap();
        for header in &table.headers {
            write!(self, "<th>").unwrap();
            self.escape(header);
            writeln!(self, "</th>").unwrap();
        }
        writeln!(self, "</tr>").unwrap();
        writeln!(self, "</thead>").unwrap();
        if !table.rows.is_empty() {
            writeln!(self, "<tbody>").unwrap();
            for row in &table.rows {
                writeln!(self, "<tr>").unwrap();
                for cell in row {
                    write!(self, "<td>").unwrap();
                    self.escape(cell);
                    writeln!(self, "</td>").unwrap();
                }
                writeln!(self, "</tr>").unwrap();
            }
            writeln!(self, "</tbody>").unwrap();
        }
        writeln!(self, "</table>").unwrap();
    }

    fn format_spans(&mut self, spans: &[TextSpan]) {
        for span in merge_spans(spans.to_vec()) {
            self.format_span(&span);
        }
    }

    /// Tag order is fixed: the link wraps everything, code sits tightest
    /// around the text.
    fn format_span(&mut self, span: &TextSpan) {
        let styles = &span.styles;

        if let Some(ref link) = styles.link {
            write!(self, "<a href=\"").unwrap();
            self.escape_href(&link.url);
            if !link.title.is_empty() {
                write!(self, "\" title=\"").unwrap();
                self.escape(&link.title);
            }
            write!(self, "\">").unwrap();
        }
        if styles.bold {
            write!(self, "<strong>").unwrap();
        }
        if styles.italic {
            write!(self, "<em>").unwrap();
        }
        if styles.underline {
            write!(self, "<u>").unwrap();
        }
        if styles.strikethrough {
            write!(self, "<del>").unwrap();
        }
        if styles.highlight {
            write!(self, "<mark>").unwrap();
        }
        if styles.code {
            write!(self, "<code>").unwrap();
        }

        self.escape(&span.text);

        if styles.code {
            write!(self, "</code>").unwrap();
        }
        if styles.highlight {
            write!(self, "</mark>").unwrap();
        }
        if styles.strikethrough {
            write!(self, "</del>").unwrap();
        }
        if styles.underline {
            write!(self, "</u>").unwrap();
        }
        if styles.italic {
            write!(self, "</em>").unwrap();
        }
        if styles.bold {
            write!(self, "</strong>").unwrap();
        }
        if styles.link.is_some() {
            write!(self, "</a>").unwrap();
        }
    }
}
