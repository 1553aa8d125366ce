//! The inline span parser.
//!
//! Turns a raw text run into a flat sequence of styled [`TextSpan`]s.
//! Marker pairs nest and their style flags compose by union; a marker with
//! no closing partner is literal text.  The function is total and pure.

use crate::nodes::{merge_spans, NodeLink, Styles, TextSpan};
use crate::scanners;
use crate::strings::{ispunct, isspace};

/// Parse a raw text run into canonical (merged) styled spans.
///
/// Empty input yields an empty sequence, not a single empty span.
pub fn parse_inline_content(raw: &str) -> Vec<TextSpan> {
    if raw.is_empty() {
        return vec![];
    }
    let spans = Subject::new(raw, true).parse(&Styles::default());
    merge_spans(spans)
}

fn find_special_byte(haystack: &[u8]) -> Option<usize> {
    let matcher = jetscii::bytes!(b'*', b'_', b'`', b'~', b'=', b'[', b'\\');
    matcher.find(haystack)
}

/// A cursor over one raw text run.
struct Subject<'i> {
    input: &'i str,
    pos: usize,
    allow_links: bool,
}

impl<'i> Subject<'i> {
    fn new(input: &'i str, allow_links: bool) -> Self {
        Subject {
            input,
            pos: 0,
            allow_links,
        }
    }

    fn bytes(&self) -> &[u8] {
        self.input.as_bytes()
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Length of the run of `ch` starting at `at`.
    fn run_length(&self, at: usize, ch: u8) -> usize {
        self.bytes()[at..].iter().take_while(|&&c| c == ch).count()
    }

    fn parse(mut self, styles: &Styles) -> Vec<TextSpan> {
        let mut spans = vec![];
        let mut literal = String::new();

        while !self.eof() {
            let rest = &self.bytes()[self.pos..];
            let special = match find_special_byte(rest) {
                Some(n) => self.pos + n,
                None => {
                    literal.push_str(&self.input[self.pos..]);
                    self.pos = self.input.len();
                    break;
                }
            };

            literal.push_str(&self.input[self.pos..special]);
            self.pos = special;

            match self.bytes()[self.pos] {
                b'\\' => self.handle_backslash(&mut literal),
                b'`' => self.handle_backticks(&mut spans, &mut literal, styles),
                b'[' => self.handle_bracket(&mut spans, &mut literal, styles),
                c @ (b'*' | b'_') => self.handle_emphasis(c, &mut spans, &mut literal, styles),
                c @ (b'~' | b'=') => self.handle_pair(c, &mut spans, &mut literal, styles),
                _ => unreachable!(),
            }
        }

        flush(&mut spans, &mut literal, styles);
        spans
    }

    fn handle_backslash(&mut self, literal: &mut String) {
        let bytes = self.bytes();
        if self.pos + 1 < bytes.len() && ispunct(bytes[self.pos + 1]) {
            literal.push(bytes[self.pos + 1] as char);
            self.pos += 2;
        } else {
            literal.push('\\');
            self.pos += 1;
        }
    }

    /// A code span: non-nesting, closed by a backtick run of the same
    /// length.  No other marker is interpreted inside.
    fn handle_backticks(
        &mut self,
        spans: &mut Vec<TextSpan>,
        literal: &mut String,
        styles: &Styles,
    ) {
        let open = self.run_length(self.pos, b'`');
        match self.find_backtick_close(self.pos + open, open) {
            Some(close) => {
                flush(spans, literal, styles);
                let mut code_styles = styles.clone();
                code_styles.code = true;
                let text = normalize_code(&self.input[self.pos + open..close]);
                spans.push(TextSpan::new(text, code_styles));
                self.pos = close + open;
            }
            None => {
                literal.push_str(&self.input[self.pos..self.pos + open]);
                self.pos += open;
            }
        }
    }

    /// Find a backtick run of exactly `want` ticks at or after `from`;
    /// returns the run's start.
    fn find_backtick_close(&self, from: usize, want: usize) -> Option<usize> {
        let bytes = self.bytes();
        let mut j = from;
        while j < bytes.len() {
            if bytes[j] == b'`' {
                let len = self.run_length(j, b'`');
                if len == want {
                    return Some(j);
                }
                j += len;
            } else {
                j += 1;
            }
        }
        None
    }

    /// Emphasis markers: a run of 2+ opens bold, a run of exactly 1 opens
    /// italic.  Underscores additionally require a word boundary outside
    /// the marker so snake_case text stays literal.
    fn handle_emphasis(
        &mut self,
        ch: u8,
        spans: &mut Vec<TextSpan>,
        literal: &mut String,
        styles: &Styles,
    ) {
        let run = self.run_length(self.pos, ch);
        let want = if run >= 2 { 2 } else { 1 };

        if !self.can_open(ch, self.pos, run) {
            literal.push_str(&self.input[self.pos..self.pos + run]);
            self.pos += run;
            return;
        }

        match self.find_delimiter_close(self.pos + run, ch, want) {
            Some((close_start, close_len)) => {
                flush(spans, literal, styles);
                let mut inner_styles = styles.clone();
                if want == 2 {
                    inner_styles.bold = true;
                } else {
                    inner_styles.italic = true;
                }
                // Interior keeps any surplus marker characters from runs
                // longer than the marker, so `***a***` nests.
                let inner_text = &self.input[self.pos + want..close_start + close_len - want];
                let inner = Subject::new(inner_text, self.allow_links).parse(&inner_styles);
                spans.extend(inner);
                self.pos = close_start + close_len;
            }
            None => {
                literal.push_str(&self.input[self.pos..self.pos + run]);
                self.pos += run;
            }
        }
    }

    /// Two-character symmetric markers: `~~` strikethrough, `==` highlight.
    /// A lone `~` or `=` is literal.
    fn handle_pair(
        &mut self,
        ch: u8,
        spans: &mut Vec<TextSpan>,
        literal: &mut String,
        styles: &Styles,
    ) {
        let run = self.run_length(self.pos, ch);
        if run < 2 || !self.can_open(ch, self.pos, run) {
            literal.push_str(&self.input[self.pos..self.pos + run]);
            self.pos += run;
            return;
        }

        match self.find_delimiter_close(self.pos + run, ch, 2) {
            Some((close_start, close_len)) => {
                flush(spans, literal, styles);
                let mut inner_styles = styles.clone();
                if ch == b'~' {
                    inner_styles.strikethrough = true;
                } else {
                    inner_styles.highlight = true;
                }
                let inner_text = &self.input[self.pos + 2..close_start + close_len - 2];
                let inner = Subject::new(inner_text, self.allow_links).parse(&inner_styles);
                spans.extend(inner);
                self.pos = close_start + close_len;
            }
            None => {
                literal.push_str(&self.input[self.pos..self.pos + run]);
                self.pos += run;
            }
        }
    }

    /// Find the next closable delimiter run of `ch` at or after `from`.
    /// `want == 1` matches only single-character runs (so `*` skips `**`);
    /// `want == 2` matches any run of two or more.  Escaped runs and code
    /// spans are skipped.
    fn find_delimiter_close(&self, from: usize, ch: u8, want: usize) -> Option<(usize, usize)> {
        let bytes = self.bytes();
        let mut j = from;
        while j < bytes.len() {
            match bytes[j] {
                b'\\' => j += 2,
                b'`' => {
                    let len = self.run_length(j, b'`');
                    match self.find_backtick_close(j + len, len) {
                        Some(close) => j = close + len,
                        None => j += len,
                    }
                }
                c if c == ch => {
                    let len = self.run_length(j, ch);
                    let fits = if want == 1 { len == 1 } else { len >= 2 };
                    if fits && self.can_close(ch, j) {
                        return Some((j, len));
                    }
                    j += len;
                }
                _ => j += 1,
            }
        }
        None
    }

    fn can_open(&self, ch: u8, at: usize, run: usize) -> bool {
        let bytes = self.bytes();
        let next = match bytes.get(at + run) {
            Some(&c) => c,
            None => return false,
        };
        if isspace(next) {
            return false;
        }
        if ch == b'_' && at > 0 {
            let prev = bytes[at - 1];
            if !isspace(prev) && !ispunct(prev) {
                return false;
            }
        }
        true
    }

    fn can_close(&self, ch: u8, at: usize) -> bool {
        let bytes = self.bytes();
        if at == 0 || isspace(bytes[at - 1]) {
            return false;
        }
        if ch == b'_' {
            let run = self.run_length(at, ch);
            match bytes.get(at + run) {
                Some(&c) if !isspace(c) && !ispunct(c) => return false,
                _ => {}
            }
        }
        true
    }

    /// A link: `[label](url "optional title")`.  The label is itself
    /// inline-parsed, but never for nested links; malformed syntax falls
    /// back to a literal bracket.
    fn handle_bracket(
        &mut self,
        spans: &mut Vec<TextSpan>,
        literal: &mut String,
        styles: &Styles,
    ) {
        if let Some((link, label, end)) = self.scan_link() {
            flush(spans, literal, styles);
            let mut inner = Subject::new(label, false).parse(styles);
            for span in &mut inner {
                span.styles.link = Some(link.clone());
            }
            spans.extend(inner);
            self.pos = end;
        } else {
            literal.push('[');
            self.pos += 1;
        }
    }

    fn scan_link(&self) -> Option<(NodeLink, &'i str, usize)> {
        if !self.allow_links {
            return None;
        }
        let bytes = self.bytes();

        let mut j = self.pos + 1;
        let mut depth = 1;
        let label_end = loop {
            if j >= bytes.len() {
                return None;
            }
            match bytes[j] {
                b'\\' => j += 1,
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        break j;
                    }
                }
                _ => {}
            }
            j += 1;
        };

        if bytes.get(label_end + 1) != Some(&b'(') {
            return None;
        }

        let mut j = label_end + 2;
        let mut depth = 1;
        let dest_end = loop {
            if j >= bytes.len() {
                return None;
            }
            match bytes[j] {
                b'\\' => j += 1,
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        break j;
                    }
                }
                _ => {}
            }
            j += 1;
        };

        let (url, title) = scanners::split_destination(&self.input[label_end + 2..dest_end]);
        let link = NodeLink {
            url: crate::strings::unescape(url),
            title: crate::strings::unescape(title),
        };
        Some((link, &self.input[self.pos + 1..label_end], dest_end + 1))
    }
}

fn flush(spans: &mut Vec<TextSpan>, literal: &mut String, styles: &Styles) {
    if !literal.is_empty() {
        spans.push(TextSpan::new(std::mem::take(literal), styles.clone()));
    }
}

/// Strip one leading and trailing space from code-span contents when both
/// are present and the contents are not all spaces, undoing the padding
/// the serializer adds around edge backticks.
fn normalize_code(text: &str) -> String {
    let bytes = text.as_bytes();
    if bytes.len() > 2
        && bytes[0] == b' '
        && bytes[bytes.len() - 1] == b' '
        && !bytes.iter().all(|&c| c == b' ')
    {
        text[1..text.len() - 1].to_string()
    } else {
        text.to_string()
    }
}
