//! The block tree model.

use serde::{Deserialize, Serialize};

use crate::parser::alert::CalloutType;

/// The core block enum, discriminated by its serialized `type` tag.
///
/// Shape-specific properties live in per-variant payload structs so that
/// parser and serializer dispatch stay exhaustive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockValue {
    /// A paragraph.  Inline content lives in the owning [`Block`]'s
    /// `content`.
    Paragraph,

    /// An ATX heading.
    ///
    /// ``` md
    /// ## Hi!
    /// ```
    Heading(NodeHeading),

    /// An unordered list.  Children are [`BlockValue::Item`] blocks.
    ///
    /// ``` md
    /// - An unordered list
    /// - Another item
    /// ```
    BulletList,

    /// An ordered list.  Children are [`BlockValue::Item`] blocks.
    /// Serialization renumbers items sequentially from 1.
    NumberedList,

    /// A task list.  Children are [`BlockValue::TaskItem`] blocks.
    ///
    /// ``` md
    /// - [x] Done
    /// - [ ] Not yet
    /// ```
    CheckList,

    /// A single list item.  Inline content is the item text; `children`
    /// may hold a nested list.
    Item,

    /// A task list item and its checked state.
    TaskItem {
        /// Whether the item's checkbox is ticked (`[x]`).
        checked: bool,
    },

    /// A fenced code block.  The literal contents are carried as the
    /// block's single unstyled span, not interpreted as Markdown.
    CodeBlock(NodeCodeBlock),

    /// A block quote.
    ///
    /// ``` md
    /// > A block quote.
    /// ```
    BlockQuote,

    /// An image on a line of its own.
    Image(NodeImage),

    /// A thematic break.  Has no content.
    Divider,

    /// A callout: a block quote opened by a `[!TYPE]` marker line.
    ///
    /// ``` md
    /// > [!WARNING]
    /// > Mind the gap.
    /// ```
    Callout(NodeCallout),

    /// A pipe-delimited table.  Header and body cells are plain text.
    Table(NodeTable),
}

/// The metadata of a heading.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeHeading {
    /// The level of the heading, from 1 to 6.
    pub level: u8,
}

/// The metadata of a fenced code block.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCodeBlock {
    /// The info string after the opening fence, if any; the first word is
    /// treated as the language tag.
    #[serde(rename = "language", default, skip_serializing_if = "String::is_empty")]
    pub info: String,
}

/// The source and alternative text of an image block.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeImage {
    /// The image source URL.
    pub url: String,

    /// The alternative text, shown when the image cannot be rendered.
    pub alt: String,
}

/// The metadata of a callout block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCallout {
    /// The kind of callout.
    #[serde(rename = "calloutType")]
    pub callout_type: CalloutType,
}

/// The cell grid of a table block.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTable {
    /// Header cells, one per column.
    pub headers: Vec<String>,

    /// Body rows; each row's cells are ordered by column.
    pub rows: Vec<Vec<String>>,
}

/// The details of a link destination attached to a span.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLink {
    /// The URL of the link destination.
    pub url: String,

    /// The title of the link, or empty if none was given.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

impl BlockValue {
    /// Whether this block groups list items.
    pub fn is_list(&self) -> bool {
        matches!(
            *self,
            BlockValue::BulletList | BlockValue::NumberedList | BlockValue::CheckList
        )
    }

    /// Whether this block is an item inside a list.
    pub fn is_item(&self) -> bool {
        matches!(*self, BlockValue::Item | BlockValue::TaskItem { .. })
    }

    /// Whether the block's `content` holds styled inline spans.  Code
    /// block content is a single literal span and never styled.
    pub fn contains_inlines(&self) -> bool {
        matches!(
            *self,
            BlockValue::Paragraph
                | BlockValue::Heading(..)
                | BlockValue::Item
                | BlockValue::TaskItem { .. }
                | BlockValue::BlockQuote
                | BlockValue::Callout(..)
        )
    }

    /// The serialized `type` tag for this block.
    pub fn type_name(&self) -> &'static str {
        match *self {
            BlockValue::Paragraph => "paragraph",
            BlockValue::Heading(..) => "heading",
            BlockValue::BulletList => "bulletList",
            BlockValue::NumberedList => "numberedList",
            BlockValue::CheckList => "checkList",
            BlockValue::Item => "item",
            BlockValue::TaskItem { .. } => "taskItem",
            BlockValue::CodeBlock(..) => "codeBlock",
            BlockValue::BlockQuote => "blockquote",
            BlockValue::Image(..) => "image",
            BlockValue::Divider => "divider",
            BlockValue::Callout(..) => "callout",
            BlockValue::Table(..) => "table",
        }
    }
}

/// A single block in the tree.
///
/// A block exclusively owns its inline spans and child blocks; there is no
/// sharing between trees.  Its `id` is assigned at creation, never changes
/// and is never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// The process-unique opaque identifier of this block.
    pub id: String,

    /// The block value itself.
    #[serde(flatten)]
    pub value: BlockValue,

    /// Inline text belonging directly to this block; empty for
    /// structural-only types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<TextSpan>,

    /// Child blocks; present only for list-type blocks (items) and items
    /// holding a nested list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Block {
    /// Create a new block with the given id and value and no content.
    pub fn new(id: String, value: BlockValue) -> Self {
        Block {
            id,
            value,
            content: vec![],
            children: vec![],
        }
    }

    /// The concatenated text of this block's spans, styles discarded.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for span in &self.content {
            out.push_str(&span.text);
        }
        out
    }
}

/// A run of text sharing one exact set of inline styles.
///
/// Spans are value objects with no identity beyond their position in a
/// block's content sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The span text.  Never empty in canonical output.
    pub text: String,

    /// The styles applied to the whole run.
    #[serde(default, skip_serializing_if = "Styles::is_plain")]
    pub styles: Styles,
}

impl TextSpan {
    /// Create a span with the given styles.
    pub fn new(text: impl Into<String>, styles: Styles) -> Self {
        TextSpan {
            text: text.into(),
            styles,
        }
    }

    /// Create an unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        TextSpan::new(text, Styles::default())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The set of inline styles active on a span.  Flags are independent and
/// compose by union when markers nest.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Styles {
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,

    /// No markdown marker maps to underline; the flag round-trips through
    /// JSON and renders as `<u>` in HTML only.
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub code: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub highlight: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<NodeLink>,
}

impl Styles {
    /// Whether no style at all is applied.
    pub fn is_plain(&self) -> bool {
        *self == Styles::default()
    }
}

/// Collapse a span sequence into canonical form: empty-text spans are
/// dropped and adjacent spans with identical styles are concatenated.
///
/// Both the inline parser and the serializers emit canonical sequences.
pub fn merge_spans(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    let mut out: Vec<TextSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        if span.text.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.styles == span.styles => last.text.push_str(&span.text),
            _ => out.push(span),
        }
    }
    out
}
