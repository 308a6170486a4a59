use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::annotation::Annotation;
use super::enums::{BlockRole, Strand};
use super::span::Span;
use super::typedef::{BlockId, PosType};
use crate::{getter_fn, with_field_fn};

/// Record-level metadata carried by a root block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    pub original_id:       Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub annotations:       IndexMap<String, Value>,
    /// Qualifiers of the record's `source` feature.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub source_qualifiers: IndexMap<String, String>,
}

/// Node of the containment hierarchy.
///
/// Blocks never own each other: `children` holds ids resolved through the
/// [`BlockStore`](super::BlockStore) the block lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    id:                      BlockId,
    span:                    Span,
    kind:                    String,
    name:                    Option<String>,
    description:             Option<String>,
    #[serde(default)]
    strand:                  Strand,
    role:                    Option<BlockRole>,
    #[serde(default)]
    tags:                    Vec<String>,
    #[serde(default)]
    qualifiers:              IndexMap<String, String>,
    #[serde(default)]
    sequence:                String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    record:                  Option<RecordMetadata>,
    #[serde(default)]
    pub(crate) children:     Vec<BlockId>,
    #[serde(default)]
    pub(crate) annotations:  Vec<Annotation>,
}

impl Block {
    /// Creates a block with no metadata, children or annotations.
    pub fn new<K: Into<String>>(
        id: BlockId,
        span: Span,
        kind: K,
    ) -> Self {
        Self {
            id,
            span,
            kind: kind.into(),
            name: None,
            description: None,
            strand: Strand::None,
            role: None,
            tags: Vec::new(),
            qualifiers: IndexMap::new(),
            sequence: String::new(),
            record: None,
            children: Vec::new(),
            annotations: Vec::new(),
        }
    }

    getter_fn!(id, BlockId);

    getter_fn!(span, Span);

    getter_fn!(kind, String);

    getter_fn!(name, Option<String>);

    getter_fn!(description, Option<String>);

    getter_fn!(strand, Strand);

    getter_fn!(role, Option<BlockRole>);

    getter_fn!(tags, Vec<String>);

    getter_fn!(qualifiers, IndexMap<String, String>);

    getter_fn!(sequence, String);

    getter_fn!(record, Option<RecordMetadata>);

    getter_fn!(record, mut Option<RecordMetadata>);

    getter_fn!(children, Vec<BlockId>);

    getter_fn!(annotations, Vec<Annotation>);

    with_field_fn!(name, Option<String>);

    with_field_fn!(description, Option<String>);

    with_field_fn!(strand, Strand);

    with_field_fn!(role, Option<BlockRole>);

    with_field_fn!(tags, Vec<String>);

    with_field_fn!(qualifiers, IndexMap<String, String>);

    with_field_fn!(sequence, String);

    with_field_fn!(record, Option<RecordMetadata>);

    /// Sequence length following the `end - start` convention.
    pub fn length(&self) -> PosType {
        self.span.length()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
