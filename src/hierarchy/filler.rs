use anyhow::ensure;
use itertools::Itertools;
use log::trace;

use crate::data_structs::{Block, BlockId, BlockStore, Span};

pub const FILLER_KIND: &str = "filler";
pub const FILLER_NAME_SUFFIX: &str = "...";
pub const DEFAULT_FILLER_PREFIX_LEN: usize = 3;

/// Pads the children of every non-leaf block with filler blocks, so that the
/// children tile the parent span without gaps. Leaves are left untouched.
///
/// Returns the number of fillers created.
pub fn fill_gaps(
    store: &mut BlockStore,
    prefix_len: usize,
) -> anyhow::Result<usize> {
    let parents = store
        .iter()
        .filter(|(_, block)| !block.is_leaf())
        .map(|(id, _)| id.clone())
        .collect_vec();

    let mut created = 0;
    for parent_id in parents {
        let (children, fillers) = pad_children(store, &parent_id, prefix_len)?;
        created += fillers.len();
        for filler in fillers {
            store.try_insert(filler)?;
        }
        store.try_get_mut(&parent_id)?.children = children;
    }
    Ok(created)
}

/// Children of `parent_id` interleaved with fillers, plus the new filler
/// blocks themselves.
fn pad_children(
    store: &BlockStore,
    parent_id: &BlockId,
    prefix_len: usize,
) -> anyhow::Result<(Vec<BlockId>, Vec<Block>)> {
    let parent = store.try_get(parent_id)?;
    let parent_span = *parent.span();

    let mut padded = Vec::with_capacity(parent.children().len() * 2 + 1);
    let mut fillers = Vec::new();
    let mut cursor = parent_span.start();

    for child_id in parent.children() {
        let child_span = *store.try_get(child_id)?.span();
        ensure!(
            child_span.start() >= cursor,
            "Child {} ({}) of {} overlaps its left neighbour",
            child_id,
            child_span,
            parent_id
        );
        if child_span.start() > cursor {
            let filler = filler_block(
                store,
                Span::new(cursor, child_span.start() - 1),
                prefix_len,
            )?;
            padded.push(filler.id().clone());
            fillers.push(filler);
        }
        padded.push(child_id.clone());
        cursor = child_span.end() + 1;
    }

    if cursor <= parent_span.end() {
        let filler = filler_block(
            store,
            Span::new(cursor, parent_span.end()),
            prefix_len,
        )?;
        padded.push(filler.id().clone());
        fillers.push(filler);
    }

    if !fillers.is_empty() {
        trace!("Padded {} with {} fillers", parent_id, fillers.len());
    }
    Ok((padded, fillers))
}

/// Synthetic block covering `span`, named after the first `prefix_len`
/// characters of its sequence.
fn filler_block(
    store: &BlockStore,
    span: Span,
    prefix_len: usize,
) -> anyhow::Result<Block> {
    let sequence = store.sequence_slice(&span)?;
    let name = sequence
        .chars()
        .take(prefix_len)
        .chain(FILLER_NAME_SUFFIX.chars())
        .collect::<String>();

    Ok(Block::new(BlockId::generate(), span, FILLER_KIND)
        .with_name(Some(name))
        .with_sequence(sequence.to_string()))
}
