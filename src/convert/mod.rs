//! Conversion of parsed sequence records into block hierarchies.
//!
//! [`convert_record`] transcribes one [`SequenceRecord`] into a flat
//! [`BlockStore`] and resolves its hierarchy. [`convert_records`] does the same
//! for a batch of records and assembles the results into a
//! [`ProjectBundle`].

mod config;
mod project;
mod transcribe;


use anyhow::{ensure, Context};
pub use config::ConvertConfig;
use indexmap::IndexMap;
use log::{debug, info, warn};
pub use project::{Project, ProjectBundle};
use rayon::prelude::*;
pub use transcribe::{
    feature_block,
    feature_name,
    root_block,
    transcribe,
    RECORD_KIND,
    SOURCE_FEATURE_TYPE,
};

use crate::data_structs::{Block, BlockId, BlockStore};
use crate::hierarchy::resolve;
use crate::record::SequenceRecord;

/// Converts a single record into a resolved block store.
pub fn convert_record(
    record: &SequenceRecord,
    config: &ConvertConfig,
) -> anyhow::Result<BlockStore> {
    let store = transcribe(record)
        .with_context(|| format!("Failed to transcribe record {}", record.label()))?;
    debug!(
        "Record {}: {} features transcribed into {} blocks",
        record.label(),
        record.features.len(),
        store.len()
    );
    resolve(store, config.filler_prefix_len)
        .with_context(|| format!("Failed to resolve hierarchy of record {}", record.label()))
}

/// Converts every record and assembles the project bundle.
///
/// Components follow input order regardless of [`ConvertConfig::parallel`].
/// The project takes its name and description from the last converted
/// record.
pub fn convert_records(
    records: &[SequenceRecord],
    config: &ConvertConfig,
) -> anyhow::Result<ProjectBundle> {
    let results: Vec<anyhow::Result<BlockStore>> = if config.parallel {
        records
            .par_iter()
            .map(|record| convert_record(record, config))
            .collect()
    }
    else {
        records
            .iter()
            .map(|record| convert_record(record, config))
            .collect()
    };

    let mut bundle = ProjectBundle::default();
    let mut skipped = 0;

    for (record, result) in records.iter().zip(results) {
        let store = match result {
            Ok(store) => store,
            Err(e) if config.skip_failed_records => {
                warn!("Skipping record {}: {:#}", record.label(), e);
                skipped += 1;
                continue;
            },
            Err(e) => return Err(e),
        };

        let (root_id, blocks) = store.into_parts();
        if let Some(root) = blocks.get(&root_id) {
            bundle.project.name = root.name().clone();
            bundle.project.description = root.description().clone();
        }
        bundle.project.components.push(root_id);
        merge_blocks(&mut bundle.blocks, blocks)?;
    }

    info!(
        "Converted {} of {} records into {} blocks ({} skipped)",
        bundle.project.components.len(),
        records.len(),
        bundle.blocks.len(),
        skipped
    );
    Ok(bundle)
}

fn merge_blocks(
    target: &mut IndexMap<BlockId, Block>,
    blocks: IndexMap<BlockId, Block>,
) -> anyhow::Result<()> {
    for (id, block) in blocks {
        ensure!(
            !target.contains_key(&id),
            "Block id {} is shared by two records",
            id
        );
        target.insert(id, block);
    }
    Ok(())
}
