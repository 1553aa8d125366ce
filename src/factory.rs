//! Block and span factories.
//!
//! Every constructor draws a fresh id from an [`IdGenerator`].  The free
//! functions use the process-wide default (random uuids); a [`Factory`]
//! over an injected generator gives tests deterministic ids.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::nodes::{
    merge_spans, Block, BlockValue, NodeCallout, NodeCodeBlock, NodeHeading, NodeImage, NodeLink,
    NodeTable, Styles, TextSpan,
};
use crate::parser::alert::CalloutType;

/// A source of process-unique block ids.
///
/// Implementations must be safe to share between threads; the core never
/// coordinates callers.
pub trait IdGenerator: Send + Sync {
    /// Produce the next id.  Ids are opaque and never reused.
    fn next_id(&self) -> String;
}

/// The default generator: random v4 uuids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// A monotonic generator for tests: `b1`, `b2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds(AtomicU64);

impl SequentialIds {
    pub fn new() -> Self {
        SequentialIds(AtomicU64::new(0))
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("b{}", self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

static DEFAULT_IDS: UuidIds = UuidIds;

/// Inline content accepted by the factories: a plain string becomes one
/// unstyled span, and pre-built spans pass through merged.
pub trait IntoSpans {
    fn into_spans(self) -> Vec<TextSpan>;
}

impl IntoSpans for &str {
    fn into_spans(self) -> Vec<TextSpan> {
        if self.is_empty() {
            vec![]
        } else {
            vec![TextSpan::plain(self)]
        }
    }
}

impl IntoSpans for String {
    fn into_spans(self) -> Vec<TextSpan> {
        if self.is_empty() {
            vec![]
        } else {
            vec![TextSpan::plain(self)]
        }
    }
}

impl IntoSpans for TextSpan {
    fn into_spans(self) -> Vec<TextSpan> {
        merge_spans(vec![self])
    }
}

impl IntoSpans for Vec<TextSpan> {
    fn into_spans(self) -> Vec<TextSpan> {
        merge_spans(self)
    }
}

/// A block factory bound to an id generator.
#[derive(Clone, Copy)]
pub struct Factory<'g> {
    ids: &'g dyn IdGenerator,
}

impl Default for Factory<'static> {
    fn default() -> Self {
        Factory { ids: &DEFAULT_IDS }
    }
}

impl<'g> Factory<'g> {
    pub fn new(ids: &'g dyn IdGenerator) -> Self {
        Factory { ids }
    }

    fn block(&self, value: BlockValue, content: Vec<TextSpan>) -> Block {
        let mut block = Block::new(self.ids.next_id(), value);
        block.content = content;
        block
    }

    pub fn paragraph(&self, content: impl IntoSpans) -> Block {
        self.block(BlockValue::Paragraph, content.into_spans())
    }

    /// A heading; `level` is clamped into `1..=6`.
    pub fn heading(&self, level: u8, content: impl IntoSpans) -> Block {
        let level = level.clamp(1, 6);
        self.block(
            BlockValue::Heading(NodeHeading { level }),
            content.into_spans(),
        )
    }

    pub fn h1(&self, content: impl IntoSpans) -> Block {
        self.heading(1, content)
    }

    pub fn h2(&self, content: impl IntoSpans) -> Block {
        self.heading(2, content)
    }

    pub fn h3(&self, content: impl IntoSpans) -> Block {
        self.heading(3, content)
    }

    pub fn item(&self, content: impl IntoSpans) -> Block {
        self.block(BlockValue::Item, content.into_spans())
    }

    pub fn task_item(&self, checked: bool, content: impl IntoSpans) -> Block {
        self.block(BlockValue::TaskItem { checked }, content.into_spans())
    }

    pub fn bullet_list<I, S>(&self, items: I) -> Block
    where
        I: IntoIterator<Item = S>,
        S: IntoSpans,
    {
        let mut list = self.block(BlockValue::BulletList, vec![]);
        list.children = items.into_iter().map(|item| self.item(item)).collect();
        list
    }

    pub fn numbered_list<I, S>(&self, items: I) -> Block
    where
        I: IntoIterator<Item = S>,
        S: IntoSpans,
    {
        let mut list = self.block(BlockValue::NumberedList, vec![]);
        list.children = items.into_iter().map(|item| self.item(item)).collect();
        list
    }

    pub fn check_list<I, S>(&self, items: I) -> Block
    where
        I: IntoIterator<Item = (bool, S)>,
        S: IntoSpans,
    {
        let mut list = self.block(BlockValue::CheckList, vec![]);
        list.children = items
            .into_iter()
            .map(|(checked, item)| self.task_item(checked, item))
            .collect();
        list
    }

    pub fn code_block(&self, language: &str, literal: &str) -> Block {
        let content = if literal.is_empty() {
            vec![]
        } else {
            vec![TextSpan::plain(literal)]
        };
        self.block(
            BlockValue::CodeBlock(NodeCodeBlock {
                info: language.to_string(),
            }),
            content,
        )
    }

    pub fn block_quote(&self, content: impl IntoSpans) -> Block {
        self.block(BlockValue::BlockQuote, content.into_spans())
    }

    pub fn divider(&self) -> Block {
        self.block(BlockValue::Divider, vec![])
    }

    pub fn image(&self, url: &str, alt: &str) -> Block {
        self.block(
            BlockValue::Image(NodeImage {
                url: url.to_string(),
                alt: alt.to_string(),
            }),
            vec![],
        )
    }

    pub fn callout(&self, callout_type: CalloutType, content: impl IntoSpans) -> Block {
        self.block(
            BlockValue::Callout(NodeCallout { callout_type }),
            content.into_spans(),
        )
    }

    pub fn table(&self, headers: Vec<String>, rows: Vec<Vec<String>>) -> Block {
        self.block(BlockValue::Table(NodeTable { headers, rows }), vec![])
    }
}

/// An unstyled span.
pub fn text(text: impl Into<String>) -> TextSpan {
    TextSpan::plain(text)
}

/// A bold span.
pub fn bold(text: impl Into<String>) -> TextSpan {
    TextSpan::new(
        text,
        Styles {
            bold: true,
            ..Styles::default()
        },
    )
}

/// An italic span.
pub fn italic(text: impl Into<String>) -> TextSpan {
    TextSpan::new(
        text,
        Styles {
            italic: true,
            ..Styles::default()
        },
    )
}

/// An inline code span.
pub fn code(text: impl Into<String>) -> TextSpan {
    TextSpan::new(
        text,
        Styles {
            code: true,
            ..Styles::default()
        },
    )
}

/// A link span with no title.
pub fn link(text: impl Into<String>, url: impl Into<String>) -> TextSpan {
    TextSpan::new(
        text,
        Styles {
            link: Some(NodeLink {
                url: url.into(),
                title: String::new(),
            }),
            ..Styles::default()
        },
    )
}

/// Merge a span sequence into canonical form.
pub fn spans(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    merge_spans(spans)
}

pub fn paragraph(content: impl IntoSpans) -> Block {
    Factory::default().paragraph(content)
}

pub fn heading(level: u8, content: impl IntoSpans) -> Block {
    Factory::default().heading(level, content)
}

pub fn h1(content: impl IntoSpans) -> Block {
    Factory::default().h1(content)
}

pub fn h2(content: impl IntoSpans) -> Block {
    Factory::default().h2(content)
}

pub fn h3(content: impl IntoSpans) -> Block {
    Factory::default().h3(content)
}

pub fn bullet_list<I, S>(items: I) -> Block
where
    I: IntoIterator<Item = S>,
    S: IntoSpans,
{
    Factory::default().bullet_list(items)
}

pub fn numbered_list<I, S>(items: I) -> Block
where
    I: IntoIterator<Item = S>,
    S: IntoSpans,
{
    Factory::default().numbered_list(items)
}

pub fn check_list<I, S>(items: I) -> Block
where
    I: IntoIterator<Item = (bool, S)>,
    S: IntoSpans,
{
    Factory::default().check_list(items)
}

pub fn code_block(language: &str, literal: &str) -> Block {
    Factory::default().code_block(language, literal)
}

pub fn block_quote(content: impl IntoSpans) -> Block {
    Factory::default().block_quote(content)
}

pub fn divider() -> Block {
    Factory::default().divider()
}

pub fn image(url: &str, alt: &str) -> Block {
    Factory::default().image(url, alt)
}

pub fn callout(callout_type: CalloutType, content: impl IntoSpans) -> Block {
    Factory::default().callout(callout_type, content)
}

pub fn table(headers: Vec<String>, rows: Vec<Vec<String>>) -> Block {
    Factory::default().table(headers, rows)
}
