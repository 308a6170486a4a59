//! Reconstruction of the block hierarchy from a flat store.
//!
//! The pipeline runs in four stages, each usable on its own:
//!
//! 1. [`classify`]: pairwise relationship of two spans.
//! 2. [`build_hierarchy`]: nests blocks by containment and collects the
//!    [`Demotion`]s for blocks that can not be nested.
//! 3. [`apply_demotions`]: folds demoted blocks and their subtrees into
//!    ancestor annotations and purges them from the store.
//! 4. [`fill_gaps`]: inserts filler blocks so that children tile their
//!    parent.
//!
//! [`resolve`] runs the whole pipeline on an owned store, so a failing
//! record never leaves a half-built tree behind.

mod builder;
mod demote;
mod filler;
mod relationship;

#[cfg(test)]
mod tests;

pub use builder::{build_hierarchy, Demotion};
pub use demote::{apply_demotions, demote};
pub use filler::{fill_gaps, DEFAULT_FILLER_PREFIX_LEN, FILLER_KIND, FILLER_NAME_SUFFIX};
use log::debug;
pub use relationship::{classify, Relationship};

use crate::data_structs::BlockStore;

/// Runs the full pipeline and returns the finished store.
pub fn resolve(
    mut store: BlockStore,
    filler_prefix_len: usize,
) -> anyhow::Result<BlockStore> {
    let total = store.len();

    let demotions = build_hierarchy(&mut store)?;
    debug!(
        "Hierarchy of {} built from {} blocks, {} demotions queued",
        store.root_id(),
        total,
        demotions.len()
    );

    let removed = apply_demotions(&mut store, &demotions)?;
    debug!(
        "Demoted {} blocks of {} into annotations",
        removed.len(),
        store.root_id()
    );

    let fillers = fill_gaps(&mut store, filler_prefix_len)?;
    debug!("Inserted {} fillers into {}", fillers, store.root_id());

    Ok(store)
}
