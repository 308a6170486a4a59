use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data_structs::{Block, BlockId};

/// Document wrapper listing the root block of every converted record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name:        Option<String>,
    pub description: Option<String>,
    pub components:  Vec<BlockId>,
}

/// Assembled output of a conversion: the project plus every block of every
/// converted record, keyed by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBundle {
    pub project: Project,
    pub blocks:  IndexMap<BlockId, Block>,
}

impl ProjectBundle {
    /// Root blocks in component order.
    pub fn roots(&self) -> impl Iterator<Item = &Block> + '_ {
        self.project
            .components
            .iter()
            .filter_map(|id| self.blocks.get(id))
    }

    pub fn get(
        &self,
        id: &BlockId,
    ) -> Option<&Block> {
        self.blocks.get(id)
    }
}
