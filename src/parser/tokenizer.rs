//! Line classification.
//!
//! The tokenizer turns raw markdown into a flat token sequence, one token
//! per input line.  Fenced code is the exception: the whole fenced region
//! collapses into a single [`Token::CodeFence`] carrying the verbatim
//! literal.  Inline styling is untouched here; text reaches the block
//! parser as raw fragments.

use crate::scanners;
use crate::strings;

/// A line-classified intermediate unit, consumed by the block parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An ATX heading line.
    Heading { level: u8, text: String },

    /// A bullet list item line; `indent` is the marker's column.
    Bullet { indent: usize, text: String },

    /// An ordered list item line; `indent` is the marker's column.
    Ordered { indent: usize, text: String },

    /// A blockquote line, prefix stripped.
    Quote { text: String },

    /// A whole fenced code region, captured verbatim.
    CodeFence { info: String, literal: String },

    /// A thematic break line.
    Rule,

    /// An image occupying an entire line.
    Image { alt: String, url: String },

    /// A whitespace-only line; acts as a block separator.
    Blank,

    /// Any other line; a paragraph candidate.
    Text { text: String },
}

/// Split `markdown` into classified line tokens.
///
/// Classification follows a fixed priority: code fence, thematic break,
/// heading, blockquote, list item, image, blank, then plain text.  The
/// function is total; an unterminated fence runs to end of input.
pub fn tokenize(markdown: &str) -> Vec<Token> {
    let source = strings::normalize_line_endings(markdown);
    let mut lines = source.split('\n').collect::<Vec<_>>();
    // A trailing newline is an end-of-line, not an extra blank line.
    if let Some(&"") = lines.last() {
        lines.pop();
    }

    let mut tokens = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if let Some((fence_length, info)) = scanners::open_code_fence(line) {
            let mut literal_lines = vec![];
            i += 1;
            while i < lines.len() && !scanners::close_code_fence(lines[i], fence_length) {
                literal_lines.push(lines[i]);
                i += 1;
            }
            if i < lines.len() {
                i += 1;
            }
            tokens.push(Token::CodeFence {
                info: strings::first_word(info).to_string(),
                literal: literal_lines.join("\n"),
            });
            continue;
        }

        tokens.push(classify(line));
        i += 1;
    }

    tokens
}

fn classify(line: &str) -> Token {
    if scanners::thematic_break(line) {
        return Token::Rule;
    }

    if let Some((level, text)) = scanners::atx_heading_start(line) {
        let mut text = text.to_string();
        strings::chop_trailing_hashes(&mut text);
        return Token::Heading { level, text };
    }

    if let Some(text) = scanners::blockquote_prefix(line) {
        return Token::Quote {
            text: text.trim_end().to_string(),
        };
    }

    if let Some((indent, text)) = scanners::bullet_marker(line) {
        return Token::Bullet {
            indent,
            text: text.to_string(),
        };
    }

    if let Some((indent, text)) = scanners::ordered_marker(line) {
        return Token::Ordered {
            indent,
            text: text.to_string(),
        };
    }

    if let Some((alt, dest)) = scanners::image_line(line) {
        let (url, _title) = scanners::split_destination(dest);
        return Token::Image {
            alt: alt.to_string(),
            url: url.to_string(),
        };
    }

    if strings::is_blank(line) {
        return Token::Blank;
    }

    Token::Text {
        text: line.trim().to_string(),
    }
}
