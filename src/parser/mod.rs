//! The block parser.
//!
//! Consumes the tokenizer's line tokens and groups them into a block tree,
//! invoking the inline parser for every text run.  Parsing is total: no
//! input raises, and unrecognized syntax degrades to paragraph text.

pub mod alert;
pub mod inlines;
pub mod table;
pub mod tokenizer;

pub use inlines::parse_inline_content;
pub use tokenizer::{tokenize, Token};

use crate::factory::{IdGenerator, UuidIds};
use crate::nodes::{Block, BlockValue, NodeCallout, NodeCodeBlock, NodeHeading, NodeImage, TextSpan};

/// Parse markdown text into a sequence of top-level blocks.
///
/// Block ids are drawn from the default uuid generator; use
/// [`parse_document_with_ids`] to supply a deterministic one.
pub fn parse_document(markdown: &str) -> Vec<Block> {
    parse_document_with_ids(markdown, &UuidIds)
}

/// Parse markdown text, assigning block ids from `ids`.
pub fn parse_document_with_ids(markdown: &str, ids: &dyn IdGenerator) -> Vec<Block> {
    let tokens = tokenizer::tokenize(markdown);
    Parser::new(tokens, ids).run()
}

/// The grouping kind of a list item token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Numbered,
    Check,
}

struct Parser<'g> {
    tokens: Vec<Token>,
    pos: usize,
    ids: &'g dyn IdGenerator,
}

impl<'g> Parser<'g> {
    fn new(tokens: Vec<Token>, ids: &'g dyn IdGenerator) -> Self {
        Parser {
            tokens,
            pos: 0,
            ids,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn make_block(&self, value: BlockValue) -> Block {
        Block::new(self.ids.next_id(), value)
    }

    fn run(&mut self) -> Vec<Block> {
        let mut blocks = vec![];

        while let Some(token) = self.peek() {
            match token {
                Token::Blank => {
                    self.pos += 1;
                }
                Token::Heading { .. } => blocks.push(self.heading()),
                Token::Rule => {
                    self.pos += 1;
                    blocks.push(self.make_block(BlockValue::Divider));
                }
                Token::Image { .. } => blocks.push(self.image()),
                Token::CodeFence { .. } => blocks.push(self.code_block()),
                Token::Quote { .. } => blocks.push(self.quote()),
                Token::Bullet { .. } | Token::Ordered { .. } => blocks.push(self.list()),
                Token::Text { .. } => blocks.push(self.text_block()),
            }
        }

        blocks
    }

    fn heading(&mut self) -> Block {
        let (level, text) = match self.advance() {
            Token::Heading { level, text } => (level, text),
            _ => unreachable!(),
        };
        let mut block = self.make_block(BlockValue::Heading(NodeHeading { level }));
        block.content = parse_inline_content(&text);
        block
    }

    fn image(&mut self) -> Block {
        let (alt, url) = match self.advance() {
            Token::Image { alt, url } => (alt, url),
            _ => unreachable!(),
        };
        self.make_block(BlockValue::Image(NodeImage { url, alt }))
    }

    fn code_block(&mut self) -> Block {
        let (info, literal) = match self.advance() {
            Token::CodeFence { info, literal } => (info, literal),
            _ => unreachable!(),
        };
        let mut block = self.make_block(BlockValue::CodeBlock(NodeCodeBlock { info }));
        if !literal.is_empty() {
            block.content = vec![TextSpan::plain(literal)];
        }
        block
    }

    /// Consecutive quote lines form one blockquote; a `[!TYPE]` marker on
    /// the first line turns the group into a callout instead.
    fn quote(&mut self) -> Block {
        let mut lines = vec![];
        while let Some(Token::Quote { text }) = self.peek() {
            lines.push(text.clone());
            self.pos += 1;
        }

        let (value, body) = match lines.first().and_then(|first| alert::scan_marker(first)) {
            Some(callout_type) => (
                BlockValue::Callout(NodeCallout { callout_type }),
                &lines[1..],
            ),
            None => (BlockValue::BlockQuote, &lines[..]),
        };

        let joined = body
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let mut block = self.make_block(value);
        block.content = parse_inline_content(&joined);
        block
    }

    /// The kind, indent, text and checked state of a list item token.
    fn item_parts(token: &Token) -> Option<(ListKind, usize, String, bool)> {
        match token {
            Token::Bullet { indent, text } => match crate::scanners::task_marker(text) {
                Some((checked, rest)) => {
                    Some((ListKind::Check, *indent, rest.to_string(), checked))
                }
                None => Some((ListKind::Bullet, *indent, text.clone(), false)),
            },
            Token::Ordered { indent, text } => {
                Some((ListKind::Numbered, *indent, text.clone(), false))
            }
            _ => None,
        }
    }

    /// Group consecutive same-kind items at one indent level into a list,
    /// recursing for deeper-indented items, which become a nested list in
    /// the preceding item's children.
    fn list(&mut self) -> Block {
        let (kind, base_indent, _, _) =
            Self::item_parts(self.peek().expect("list called at a list token")).unwrap();

        let value = match kind {
            ListKind::Bullet => BlockValue::BulletList,
            ListKind::Numbered => BlockValue::NumberedList,
            ListKind::Check => BlockValue::CheckList,
        };
        let mut list = self.make_block(value);

        while let Some(token) = self.peek() {
            let (item_kind, indent, text, checked) = match Self::item_parts(token) {
                Some(parts) => parts,
                None => break,
            };

            if indent > base_indent && !list.children.is_empty() {
                let nested = self.list();
                list.children.last_mut().unwrap().children.push(nested);
                continue;
            }

            if item_kind != kind || indent < base_indent {
                break;
            }

            let item_value = match kind {
                ListKind::Check => BlockValue::TaskItem { checked },
                _ => BlockValue::Item,
            };
            let mut item = self.make_block(item_value);
            item.content = parse_inline_content(&text);
            list.children.push(item);
            self.pos += 1;
        }

        list
    }

    /// Whether the cursor sits at a table: a candidate header row followed
    /// by a separator row.
    fn at_table(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::Text { text }) if crate::scanners::contains_unescaped_pipe(text)
        ) && matches!(
            self.peek_next(),
            Some(Token::Text { text }) if crate::scanners::table_separator_row(text)
        )
    }

    fn text_block(&mut self) -> Block {
        if self.at_table() {
            if let Some(block) = self.table() {
                return block;
            }
        }
        self.paragraph()
    }

    fn table(&mut self) -> Option<Block> {
        let header = match self.peek() {
            Some(Token::Text { text }) => text.clone(),
            _ => return None,
        };

        let mut body = vec![];
        let mut consumed = 2;
        while let Some(Token::Text { text }) = self.tokens.get(self.pos + consumed) {
            if !crate::scanners::contains_unescaped_pipe(text) {
                break;
            }
            body.push(text.clone());
            consumed += 1;
        }

        let node = table::build(&header, &body)?;
        self.pos += consumed;
        Some(self.make_block(BlockValue::Table(node)))
    }

    /// Consecutive plain-text lines merge into one paragraph, joined with
    /// a single space.  A following table header/separator pair starts a
    /// new block instead of joining.
    fn paragraph(&mut self) -> Block {
        let mut lines = vec![];
        while let Some(Token::Text { text }) = self.peek() {
            if !lines.is_empty() && self.at_table() {
                break;
            }
            lines.push(text.clone());
            self.pos += 1;
        }

        let mut block = self.make_block(BlockValue::Paragraph);
        block.content = parse_inline_content(&lines.join(" "));
        block
    }
}
