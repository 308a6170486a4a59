use anyhow::{ensure, Context};
use indexmap::IndexMap;
use log::trace;

use crate::data_structs::{Block, BlockId, BlockRole, BlockStore, RecordMetadata, Span};
use crate::record::{FeatureRecord, SequenceRecord};

/// Feature type describing the record as a whole.
pub const SOURCE_FEATURE_TYPE: &str = "source";
/// Kind of the root block created for every record.
pub const RECORD_KIND: &str = "record";

const NAME_QUALIFIER: &str = "name";
const LABEL_QUALIFIER: &str = "label";
const GENE_QUALIFIER: &str = "gene";
const PRODUCT_QUALIFIER: &str = "product";
const DESCRIPTION_QUALIFIER: &str = "GD_description";

/// Creates the root block spanning the whole record sequence.
pub fn root_block(record: &SequenceRecord) -> anyhow::Result<Block> {
    ensure!(
        !record.sequence.is_empty(),
        "Record {} has an empty sequence",
        record.label()
    );

    let metadata = RecordMetadata {
        original_id: record.id.clone(),
        annotations: record.annotations.clone(),
        source_qualifiers: IndexMap::new(),
    };

    Ok(Block::new(
        BlockId::generate(),
        Span::new(0, record.sequence.len() - 1),
        RECORD_KIND,
    )
    .with_name(record.name.clone().or_else(|| record.id.clone()))
    .with_description(record.description.clone())
    .with_sequence(record.sequence.clone())
    .with_record(Some(metadata)))
}

/// Creates the block of a single feature.
///
/// Fails on empty, reversed or out of bounds coordinates.
pub fn feature_block(
    feature: &FeatureRecord,
    sequence: &str,
) -> anyhow::Result<Block> {
    ensure!(
        feature.end <= sequence.len(),
        "Feature {} [{}, {}) ends past the sequence end {}",
        feature.kind,
        feature.start,
        feature.end,
        sequence.len()
    );
    let span = Span::from_half_open(feature.start, feature.end)
        .with_context(|| format!("Invalid coordinates of feature {}", feature.kind))?;
    let slice = sequence.get(span.range()).with_context(|| {
        format!(
            "Feature {} ({}) does not fall on character boundaries",
            feature.kind, span
        )
    })?;

    let role = BlockRole::from_feature_type(&feature.kind);
    let qualifiers = feature
        .qualifiers
        .iter()
        .filter(|(key, _)| key.as_str() != NAME_QUALIFIER)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect::<IndexMap<_, _>>();

    Ok(Block::new(BlockId::generate(), span, feature.kind.as_str())
        .with_name(Some(feature_name(feature, role)))
        .with_description(feature.qualifier(DESCRIPTION_QUALIFIER).map(String::from))
        .with_strand(feature.strand)
        .with_role(role)
        .with_qualifiers(qualifiers)
        .with_sequence(slice.to_string()))
}

/// Picks the display name of a feature: the `name` qualifier, then `label`,
/// `gene` for coding features, `product`, the role and finally the type.
pub fn feature_name(
    feature: &FeatureRecord,
    role: Option<BlockRole>,
) -> String {
    feature
        .qualifier(NAME_QUALIFIER)
        .or_else(|| feature.qualifier(LABEL_QUALIFIER))
        .or_else(|| {
            if role == Some(BlockRole::Cds) {
                feature.qualifier(GENE_QUALIFIER)
            }
            else {
                None
            }
        })
        .or_else(|| feature.qualifier(PRODUCT_QUALIFIER))
        .or_else(|| role.map(|role| role.as_str()))
        .unwrap_or(feature.kind.as_str())
        .to_string()
}

/// Builds the flat store of a record: the root block plus one block per
/// feature, in feature order. `source` features decorate the root instead of
/// becoming blocks.
pub fn transcribe(record: &SequenceRecord) -> anyhow::Result<BlockStore> {
    let mut store = BlockStore::new(root_block(record)?);
    let root_id = store.root_id().clone();

    for (idx, feature) in record.features.iter().enumerate() {
        if feature.kind == SOURCE_FEATURE_TYPE {
            let metadata = store
                .try_get_mut(&root_id)?
                .record_mut()
                .get_or_insert_with(RecordMetadata::default);
            for (key, value) in feature.qualifiers.iter() {
                metadata
                    .source_qualifiers
                    .insert(key.clone(), value.clone());
            }
            continue;
        }

        let block = feature_block(feature, &record.sequence)
            .with_context(|| format!("Failed to transcribe feature #{}", idx))?;
        trace!(
            "Feature #{} {} -> block {} ({})",
            idx,
            feature.kind,
            block.id(),
            block.span()
        );
        store.try_insert(block)?;
    }

    Ok(store)
}
