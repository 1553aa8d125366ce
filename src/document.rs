//! The document container and its immutable-update helpers.
//!
//! Every structural operation leaves the receiver untouched and returns a
//! new `Document`; pre- and post-mutation trees share nothing.  Lookups by
//! id are a linear scan over the top-level blocks, and an unknown id makes
//! any mutation a silent no-op returning an unchanged copy.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::nodes::Block;

/// The current document format version.
pub const DOCUMENT_VERSION: u32 = 1;

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Document metadata; timestamps are epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(rename = "createdAt")]
    pub created_at: u64,

    #[serde(rename = "updatedAt")]
    pub updated_at: u64,
}

/// An ordered sequence of top-level blocks plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub version: u32,
    pub blocks: Vec<Block>,
    pub meta: DocumentMeta,
}

impl Default for Document {
    fn default() -> Self {
        Document::new(vec![])
    }
}

impl Document {
    /// Create a document over the given blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        let now = now_millis();
        Document {
            version: DOCUMENT_VERSION,
            blocks,
            meta: DocumentMeta {
                created_at: now,
                updated_at: now,
            },
        }
    }

    fn with_blocks(&self, blocks: Vec<Block>) -> Document {
        Document {
            version: self.version,
            blocks,
            meta: DocumentMeta {
                created_at: self.meta.created_at,
                updated_at: now_millis(),
            },
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The position of the block with the given id, if present.
    pub fn block_index(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// The block with the given id, if present.
    pub fn find_block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn append_block(&self, block: Block) -> Document {
        let mut blocks = self.blocks.clone();
        blocks.push(block);
        self.with_blocks(blocks)
    }

    /// Insert at `index`, clamped into the valid range.
    pub fn insert_block(&self, index: usize, block: Block) -> Document {
        let mut blocks = self.blocks.clone();
        let index = index.min(blocks.len());
        blocks.insert(index, block);
        self.with_blocks(blocks)
    }

    pub fn remove_block(&self, id: &str) -> Document {
        match self.block_index(id) {
            Some(index) => {
                let mut blocks = self.blocks.clone();
                blocks.remove(index);
                self.with_blocks(blocks)
            }
            None => self.clone(),
        }
    }

    /// Apply `f` to the block with the given id.  The block's id survives
    /// the update regardless of what `f` does to it.
    pub fn update_block(&self, id: &str, f: impl FnOnce(&mut Block)) -> Document {
        match self.block_index(id) {
            Some(index) => {
                let mut blocks = self.blocks.clone();
                let kept_id = blocks[index].id.clone();
                f(&mut blocks[index]);
                blocks[index].id = kept_id;
                self.with_blocks(blocks)
            }
            None => self.clone(),
        }
    }

    /// Move the block with the given id to `to_index`, clamped.
    pub fn move_block(&self, id: &str, to_index: usize) -> Document {
        match self.block_index(id) {
            Some(index) => {
                let mut blocks = self.blocks.clone();
                let block = blocks.remove(index);
                let to_index = to_index.min(blocks.len());
                blocks.insert(to_index, block);
                self.with_blocks(blocks)
            }
            None => self.clone(),
        }
    }

    pub fn clear_blocks(&self) -> Document {
        self.with_blocks(vec![])
    }

    pub fn set_blocks(&self, blocks: Vec<Block>) -> Document {
        self.with_blocks(blocks)
    }
}
