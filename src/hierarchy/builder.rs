use anyhow::{ensure, Context};
use itertools::Itertools;
use log::trace;

use super::relationship::{classify, Relationship};
use crate::data_structs::{BlockId, BlockStore, Span};

/// Pending demotion of `block` into the annotations of `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demotion {
    pub block:  BlockId,
    pub target: BlockId,
}

impl Demotion {
    pub fn new(
        block: BlockId,
        target: BlockId,
    ) -> Self {
        Self { block, target }
    }
}

/// Nests every non-root block of the store under its smallest containing
/// block.
///
/// Blocks are processed from shortest to longest; the root always comes
/// last, even when a feature spans the whole sequence. Blocks that can not
/// become structural children (same span as their container, or
/// overlapping an existing sibling) are returned as [`Demotion`]s in the
/// order they were decided. The store itself is only touched through
/// `children` lists.
pub fn build_hierarchy(store: &mut BlockStore) -> anyhow::Result<Vec<Demotion>> {
    let root_id = store.root_id().clone();
    let root_length = store.root().length();

    let order = store
        .iter()
        .map(|(id, block)| (id.clone(), *block.span()))
        .sorted_by_key(|(id, span)| (*id == root_id, span.length()))
        .collect_vec();

    let mut demotions = Vec::new();

    for (idx, (block_id, span)) in order.iter().enumerate() {
        if *block_id == root_id {
            continue;
        }

        let candidates = order[idx + 1..]
            .iter()
            // Whole-sequence features never adopt each other.
            .filter(|(id, other)| *id == root_id || other.length() != root_length)
            .filter(|(_, other)| other.contains(span));

        let mut placed = false;
        for (candidate_id, candidate_span) in candidates {
            let relationship = classify(span, candidate_span).with_context(|| {
                format!("Failed to classify {} against {}", block_id, candidate_id)
            })?;

            match relationship {
                Relationship::Child => {
                    match insertion_index(store, span, candidate_id)? {
                        Some(index) => {
                            trace!(
                                "Nesting {} ({}) under {} at {}",
                                block_id,
                                span,
                                candidate_id,
                                index
                            );
                            store
                                .try_get_mut(candidate_id)?
                                .children
                                .insert(index, block_id.clone());
                        },
                        None => {
                            trace!(
                                "{} ({}) overlaps a sibling under {}",
                                block_id,
                                span,
                                candidate_id
                            );
                            demotions.push(Demotion::new(
                                block_id.clone(),
                                candidate_id.clone(),
                            ));
                        },
                    }
                    placed = true;
                    break;
                },
                Relationship::Equal => {
                    trace!("{} ({}) duplicates {}", block_id, span, candidate_id);
                    demotions.push(Demotion::new(
                        block_id.clone(),
                        candidate_id.clone(),
                    ));
                    placed = true;
                    break;
                },
                _ => continue,
            }
        }

        if !placed {
            ensure!(
                span.length() == root_length,
                "Block {} ({}) is not contained in root {} ({})",
                block_id,
                span,
                root_id,
                store.root().span()
            );
            trace!("{} ({}) spans the whole sequence", block_id, span);
            demotions.push(Demotion::new(block_id.clone(), root_id.clone()));
        }
    }

    Ok(demotions)
}

/// Position of `span` among the children of `parent_id`, or `None` if it
/// overlaps one of them.
fn insertion_index(
    store: &BlockStore,
    span: &Span,
    parent_id: &BlockId,
) -> anyhow::Result<Option<usize>> {
    let mut index = 0;
    for sibling_id in store.try_get(parent_id)?.children() {
        let sibling = store.try_get(sibling_id)?;
        match classify(span, sibling.span())? {
            Relationship::After => index += 1,
            Relationship::Before => {},
            _ => return Ok(None),
        }
    }
    Ok(Some(index))
}

