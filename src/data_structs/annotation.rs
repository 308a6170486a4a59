use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::block::Block;
use super::typedef::{BlockId, PosType};

/// Flattened data of a demoted block, attached to one of its ancestors.
///
/// Only `name`, `description`, `start`, `end` and `tags` are kept as
/// first-class fields. The strand turns into [`Annotation::is_forward`] and
/// every other piece of block metadata lands in [`Annotation::notes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub source_id:   BlockId,
    pub name:        Option<String>,
    pub description: Option<String>,
    pub start:       PosType,
    pub end:         PosType,
    #[serde(default)]
    pub tags:        Vec<String>,
    pub is_forward:  bool,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub notes:       IndexMap<String, Value>,
    pub sequence:    String,
}

impl From<&Block> for Annotation {
    fn from(block: &Block) -> Self {
        let mut notes = IndexMap::new();
        notes.insert("type".to_string(), Value::from(block.kind().as_str()));
        if let Some(role) = block.role() {
            notes.insert("role".to_string(), Value::from(role.as_str()));
        }
        if !block.qualifiers().is_empty() {
            notes.insert(
                "qualifiers".to_string(),
                Value::Object(
                    block
                        .qualifiers()
                        .iter()
                        .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
                        .collect(),
                ),
            );
        }

        Self {
            source_id: block.id().clone(),
            name: block.name().clone(),
            description: block.description().clone(),
            start: block.span().start(),
            end: block.span().end(),
            tags: block.tags().clone(),
            is_forward: block.strand().is_forward(),
            notes,
            sequence: block.sequence().clone(),
        }
    }
}
