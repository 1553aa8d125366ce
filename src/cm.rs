//! The canonical markdown serializer.
//!
//! Walks a block tree and emits the canonical markdown text for it.  The
//! output is the parser's fixed point: feeding it back through
//! [`crate::parser::parse_document`] yields an equivalent tree, and a
//! second serialization is byte-identical to the first.

use std::cmp::max;
use std::io::{self, Write};

use smallvec::SmallVec;

use crate::nodes::{merge_spans, Block, BlockValue, NodeTable, TextSpan};
use crate::strings::{isdigit, ispunct, isspace, longest_char_sequence, shortest_unused_sequence};

/// Serialize a block tree as canonical markdown.
pub fn format_blocks(blocks: &[Block], output: &mut dyn Write) -> io::Result<()> {
    let mut f = MarkdownFormatter::new();
    for block in blocks {
        f.format_block(block);
    }
    if !f.v.is_empty() && f.v[f.v.len() - 1] != b'\n' {
        f.v.push(b'\n');
    }
    output.write_all(&f.v)?;
    Ok(())
}

/// Serialize a block tree to a markdown string.  An empty slice yields the
/// empty string.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    let mut out = vec![];
    format_blocks(blocks, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

struct MarkdownFormatter {
    v: Vec<u8>,
    prefix: Vec<u8>,
    need_cr: u8,
    begin_line: bool,
    begin_content: bool,
    in_table_cell: bool,
}

#[derive(PartialEq, Clone, Copy)]
enum Escaping {
    Literal,
    Normal,
    Url,
    Title,
}

impl Write for MarkdownFormatter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.output(buf, Escaping::Literal);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl MarkdownFormatter {
    fn new() -> Self {
        MarkdownFormatter {
            v: vec![],
            prefix: vec![],
            need_cr: 0,
            begin_line: true,
            begin_content: true,
            in_table_cell: false,
        }
    }

    fn output(&mut self, buf: &[u8], escaping: Escaping) {
        let mut k = self.v.len() as i32 - 1;
        while self.need_cr > 0 {
            if k < 0 || self.v[k as usize] == b'\n' {
                k -= 1;
            } else {
                self.v.push(b'\n');
                if self.need_cr > 1 {
                    self.v.extend(&self.prefix);
                }
            }
            self.begin_line = true;
            self.begin_content = true;
            self.need_cr -= 1;
        }

        for i in 0..buf.len() {
            if self.begin_line {
                self.v.extend(&self.prefix);
            }

            let nextc = buf.get(i + 1);
            if escaping == Escaping::Literal {
                if buf[i] == b'\n' {
                    self.v.push(b'\n');
                    self.begin_line = true;
                    self.begin_content = true;
                } else {
                    self.v.push(buf[i]);
                    self.begin_line = false;
                    self.begin_content = self.begin_content && isdigit(buf[i]);
                }
            } else {
                self.outc(buf[i], escaping, nextc);
                self.begin_line = false;
                self.begin_content = self.begin_content && isdigit(buf[i]);
            }
        }
    }

    fn outc(&mut self, c: u8, escaping: Escaping, nextc: Option<&u8>) {
        let follows_digit = !self.v.is_empty() && isdigit(self.v[self.v.len() - 1]);
        let nextc = nextc.map_or(0, |&c| c);

        let needs_escaping = c < 0x80
            && ((escaping == Escaping::Normal
                && (matches!(c, b'*' | b'_' | b'[' | b']' | b'#' | b'<' | b'>' | b'\\' | b'`')
                    || (c == b'!' && nextc == b'[')
                    || (c == b'~' && nextc == b'~')
                    || (c == b'=' && nextc == b'=')
                    || (c == b'|' && self.in_table_cell)
                    || (self.begin_content
                        && (c == b'-' || c == b'+')
                        && !follows_digit
                        && (nextc == 0 || isspace(nextc)))
                    || (self.begin_content
                        && c == b'.'
                        && follows_digit
                        && (nextc == 0 || isspace(nextc)))))
                || (escaping == Escaping::Url
                    && (c == b'`'
                        || c == b'<'
                        || c == b'>'
                        || isspace(c)
                        || c == b'\\'
                        || c == b')'
                        || c == b'('))
                || (escaping == Escaping::Title
                    && (c == b'`' || c == b'<' || c == b'>' || c == b'"' || c == b'\\')));

        if needs_escaping {
            if escaping == Escaping::Url && isspace(c) {
                write!(self.v, "%{:2X}", c).unwrap();
            } else if ispunct(c) {
                write!(self.v, "\\{}", c as char).unwrap();
            } else {
                write!(self.v, "&#{};", c).unwrap();
            }
        } else {
            self.v.push(c);
        }
    }

    fn cr(&mut self) {
        self.need_cr = max(self.need_cr, 1);
    }

    fn blankline(&mut self) {
        self.need_cr = max(self.need_cr, 2);
    }

    fn format_block(&mut self, block: &Block) {
        match block.value {
            BlockValue::Paragraph => {
                self.format_spans(&block.content);
                self.blankline();
            }
            BlockValue::Heading(ref nch) => {
                for _ in 0..nch.level {
                    write!(self, "#").unwrap();
                }
                write!(self, " ").unwrap();
                self.format_spans(&block.content);
                self.blankline();
            }
            BlockValue::BulletList | BlockValue::NumberedList | BlockValue::CheckList => {
                self.format_list(block);
                self.blankline();
            }
            BlockValue::Item | BlockValue::TaskItem { .. } => {
                // Items only occur inside lists; a stray item serializes
                // as its content.
                self.format_spans(&block.content);
                self.blankline();
            }
            BlockValue::CodeBlock(ref ncb) => self.format_code_block(&ncb.info, block),
            BlockValue::BlockQuote => {
                write!(self, "> ").unwrap();
                self.prefix.extend(b"> ");
                self.begin_content = true;
                self.format_spans(&block.content);
                let new_len = self.prefix.len() - 2;
                self.prefix.truncate(new_len);
                self.blankline();
            }
            BlockValue::Callout(ref nc) => {
                write!(self, "> [!{}]", nc.callout_type.tag()).unwrap();
                self.prefix.extend(b"> ");
                if !block.content.is_empty() {
                    self.cr();
                    self.format_spans(&block.content);
                }
                let new_len = self.prefix.len() - 2;
                self.prefix.truncate(new_len);
                self.blankline();
            }
            BlockValue::Divider => {
                write!(self, "---").unwrap();
                self.blankline();
            }
            BlockValue::Image(ref ni) => {
                write!(self, "![").unwrap();
                self.output(ni.alt.as_bytes(), Escaping::Title);
                write!(self, "](").unwrap();
                self.output(ni.url.as_bytes(), Escaping::Url);
                write!(self, ")").unwrap();
                self.blankline();
            }
            BlockValue::Table(ref nt) => {
                self.format_table(nt);
                self.blankline();
            }
        }
    }

    /// Items are tight: one marker line per item, nested lists indented by
    /// the parent marker's width, no blank lines in between.
    fn format_list(&mut self, list: &Block) {
        for (i, item) in list.children.iter().enumerate() {
            self.cr();

            let mut marker = vec![];
            match list.value {
                BlockValue::NumberedList => write!(marker, "{}. ", i + 1).unwrap(),
                BlockValue::CheckList => {
                    let checked = matches!(item.value, BlockValue::TaskItem { checked: true });
                    write!(marker, "- [{}] ", if checked { 'x' } else { ' ' }).unwrap();
                }
                _ => write!(marker, "- ").unwrap(),
            }
            let marker_width = marker.len();
            self.write_all(&marker).unwrap();
            self.begin_content = true;

            self.format_spans(&item.content);

            for nested in &item.children {
                if nested.value.is_list() {
                    for _ in 0..marker_width {
                        self.prefix.push(b' ');
                    }
                    self.format_list(nested);
                    let new_len = self.prefix.len() - marker_width;
                    self.prefix.truncate(new_len);
                }
            }
        }
    }

    fn format_code_block(&mut self, info: &str, block: &Block) {
        let literal = block.text();
        let fence_char = b'`';
        let numticks = max(3, longest_char_sequence(&literal, fence_char) + 1);

        self.blankline();
        for _ in 0..numticks {
            write!(self, "`").unwrap();
        }
        if !info.is_empty() {
            self.write_all(info.as_bytes()).unwrap();
        }
        self.cr();
        self.write_all(literal.as_bytes()).unwrap();
        self.cr();
        for _ in 0..numticks {
            write!(self, "`").unwrap();
        }
        self.blankline();
    }

    fn format_table(&mut self, table: &NodeTable) {
        write!(self, "|").unwrap();
        self.in_table_cell = true;
        for header in &table.headers {
            write!(self, " ").unwrap();
            self.output(header.as_bytes(), Escaping::Normal);
            write!(self, " |").unwrap();
        }
        self.in_table_cell = false;

        self.cr();
        write!(self, "|").unwrap();
        for _ in &table.headers {
            write!(self, " --- |").unwrap();
        }

        for row in &table.rows {
            self.cr();
            write!(self, "|").unwrap();
            self.in_table_cell = true;
            for cell in row {
                write!(self, " ").unwrap();
                self.output(cell.as_bytes(), Escaping::Normal);
                write!(self, " |").unwrap();
            }
            self.in_table_cell = false;
        }
    }

    /// Re-encode styled spans.  Markers nest in a fixed order — emphasis
    /// flags outermost, then the link, with code tightest around the text —
    /// so every multi-style span parses back to the same style set.
    fn format_spans(&mut self, spans: &[TextSpan]) {
        for span in merge_spans(spans.to_vec()) {
            self.format_span(&span);
        }
    }

    fn format_span(&mut self, span: &TextSpan) {
        let styles = &span.styles;

        let mut markers: SmallVec<[&str; 4]> = SmallVec::new();
        if styles.bold {
            markers.push("**");
        }
        if styles.italic {
            markers.push("*");
        }
        if styles.strikethrough {
            markers.push("~~");
        }
        if styles.highlight {
            markers.push("==");
        }

        for marker in &markers {
            self.write_all(marker.as_bytes()).unwrap();
        }
        if styles.link.is_some() {
            write!(self, "[").unwrap();
        }

        if styles.code {
            self.format_code_span(&span.text);
        } else {
            self.output(span.text.as_bytes(), Escaping::Normal);
        }

        if let Some(ref link) = styles.link {
            write!(self, "](").unwrap();
            self.output(link.url.as_bytes(), Escaping::Url);
            if !link.title.is_empty() {
                write!(self, " \"").unwrap();
                self.output(link.title.as_bytes(), Escaping::Title);
                write!(self, "\"").unwrap();
            }
            write!(self, ")").unwrap();
        }
        for marker in markers.iter().rev() {
            self.write_all(marker.as_bytes()).unwrap();
        }
    }

    fn format_code_span(&mut self, literal: &str) {
        let numticks = shortest_unused_sequence(literal, b'`');
        for _ in 0..numticks {
            write!(self, "`").unwrap();
        }

        let bytes = literal.as_bytes();
        let all_space = bytes.iter().all(|&c| c == b' ' || c == b'\r' || c == b'\n');
        let has_edge_space = !bytes.is_empty() && (bytes[0] == b' ' || bytes[bytes.len() - 1] == b' ');
        let has_edge_backtick =
            !bytes.is_empty() && (bytes[0] == b'`' || bytes[bytes.len() - 1] == b'`');

        let pad = literal.is_empty() || has_edge_backtick || (!all_space && has_edge_space);
        if pad {
            write!(self, " ").unwrap();
        }
        self.output(bytes, Escaping::Literal);
        if pad {
            write!(self, " ").unwrap();
        }
        for _ in 0..numticks {
            write!(self, "`").unwrap();
        }
    }
}
