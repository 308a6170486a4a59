use anyhow::ensure;
use log::trace;

use super::builder::Demotion;
use crate::data_structs::{Annotation, BlockId, BlockStore};

/// Applies the demotions in order and purges every demoted block from the
/// store. Returns the purged ids.
///
/// Order matters: a block that receives annotations may itself be demoted
/// later, carrying everything it collected along.
pub fn apply_demotions(
    store: &mut BlockStore,
    demotions: &[Demotion],
) -> anyhow::Result<Vec<BlockId>> {
    let mut removed = Vec::new();
    for demotion in demotions {
        removed.extend(demote(store, &demotion.block, &demotion.target)?);
    }
    store.remove_all(&removed)?;
    Ok(removed)
}

/// Flattens `block_id` into the annotations of `target_id`.
///
/// The block's own annotations follow its annotation, then the whole subtree
/// below it is flattened into the same target. The block stays in the store
/// with emptied `children` and `annotations`; the returned ids are the ones
/// to purge.
pub fn demote(
    store: &mut BlockStore,
    block_id: &BlockId,
    target_id: &BlockId,
) -> anyhow::Result<Vec<BlockId>> {
    ensure!(
        !store.is_root(block_id),
        "Root block {} can not be demoted",
        block_id
    );
    ensure!(
        block_id != target_id,
        "Block {} can not be demoted into itself",
        block_id
    );

    let block = store.try_get_mut(block_id)?;
    let annotation = Annotation::from(&*block);
    let nested = std::mem::take(&mut block.annotations);
    let children = std::mem::take(&mut block.children);

    trace!(
        "Demoting {} into {} ({} nested annotations, {} children)",
        block_id,
        target_id,
        nested.len(),
        children.len()
    );

    let target = store.try_get_mut(target_id)?;
    target.annotations.push(annotation);
    target.annotations.extend(nested);

    let mut removed = vec![block_id.clone()];
    for child_id in children.iter() {
        removed.extend(demote(store, child_id, target_id)?);
    }
    Ok(removed)
}
