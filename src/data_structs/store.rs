use anyhow::{anyhow, ensure};
use hashbrown::HashSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::block::Block;
use super::span::Span;
use super::typedef::BlockId;

/// Flat arena of blocks keyed by id.
///
/// The hierarchy lives entirely in each block's `children` list. Insertion
/// order is preserved, which keeps every traversal of the store
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStore {
    root:   BlockId,
    blocks: IndexMap<BlockId, Block>,
}

impl BlockStore {
    /// Creates a store holding only the root block.
    pub fn new(root: Block) -> Self {
        let root_id = root.id().clone();
        let mut blocks = IndexMap::new();
        blocks.insert(root_id.clone(), root);
        Self {
            root: root_id,
            blocks,
        }
    }

    /// Inserts a block. Returns `None` if a block with the same id is
    /// already present.
    pub fn insert(
        &mut self,
        block: Block,
    ) -> Option<()> {
        if self.blocks.contains_key(block.id()) {
            None
        }
        else {
            self.blocks.insert(block.id().clone(), block);
            Some(())
        }
    }

    /// Inserts a block, failing on duplicate ids.
    pub fn try_insert(
        &mut self,
        block: Block,
    ) -> anyhow::Result<()> {
        let id = block.id().clone();
        self.insert(block)
            .ok_or_else(|| anyhow!("Duplicate block id {}", id))
    }

    /// Removes every listed block in a single pass. The root is never
    /// removed.
    pub fn remove_all(
        &mut self,
        ids: &[BlockId],
    ) -> anyhow::Result<()> {
        ensure!(
            !ids.contains(&self.root),
            "Root block {} can not be removed",
            self.root
        );
        let ids: HashSet<&BlockId> = HashSet::from_iter(ids);
        self.blocks.retain(|id, _| !ids.contains(id));
        Ok(())
    }

    pub fn get(
        &self,
        id: &BlockId,
    ) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn try_get(
        &self,
        id: &BlockId,
    ) -> anyhow::Result<&Block> {
        self.blocks
            .get(id)
            .ok_or_else(|| anyhow!("Block {} is not present in store", id))
    }

    pub fn try_get_mut(
        &mut self,
        id: &BlockId,
    ) -> anyhow::Result<&mut Block> {
        self.blocks
            .get_mut(id)
            .ok_or_else(|| anyhow!("Block {} is not present in store", id))
    }

    pub fn contains(
        &self,
        id: &BlockId,
    ) -> bool {
        self.blocks.contains_key(id)
    }

    pub fn root_id(&self) -> &BlockId {
        &self.root
    }

    pub fn root(&self) -> &Block {
        &self.blocks[&self.root]
    }

    pub fn is_root(
        &self,
        id: &BlockId,
    ) -> bool {
        &self.root == id
    }

    /// Sequence text under `span`, taken from the root block.
    pub fn sequence_slice(
        &self,
        span: &Span,
    ) -> anyhow::Result<&str> {
        self.root()
            .sequence()
            .get(span.range())
            .ok_or_else(|| anyhow!("Span {} is outside of the root sequence", span))
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, BlockId, Block> {
        self.blocks.iter()
    }

    pub fn into_parts(self) -> (BlockId, IndexMap<BlockId, Block>) {
        (self.root, self.blocks)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
