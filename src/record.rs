//! Record model handed over by flat-file parsers.
//!
//! Coordinates follow parser conventions: `start` and `end` are 0-based and
//! half-open. They are converted into inclusive [`Span`]s when blocks are
//! created.
//!
//! [`Span`]: crate::data_structs::Span

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data_structs::{PosType, Strand};
use crate::with_field_fn;

/// One annotated interval of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub start:      PosType,
    pub end:        PosType,
    #[serde(default)]
    pub strand:     Strand,
    #[serde(rename = "type")]
    pub kind:       String,
    /// First value of every qualifier, in file order.
    #[serde(default)]
    pub qualifiers: IndexMap<String, String>,
}

impl FeatureRecord {
    pub fn new<K: Into<String>>(
        start: PosType,
        end: PosType,
        strand: Strand,
        kind: K,
    ) -> Self {
        Self {
            start,
            end,
            strand,
            kind: kind.into(),
            qualifiers: IndexMap::new(),
        }
    }

    /// Adds a qualifier, keeping the first value seen for a key.
    pub fn with_qualifier<K: Into<String>, V: Into<String>>(
        mut self,
        key: K,
        value: V,
    ) -> Self {
        self.qualifiers
            .entry(key.into())
            .or_insert_with(|| value.into());
        self
    }

    pub fn qualifier(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.qualifiers.get(key).map(String::as_str)
    }
}

/// A parsed sequence record: the sequence text plus its features.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SequenceRecord {
    #[serde(default)]
    pub id:          Option<String>,
    #[serde(default)]
    pub name:        Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub sequence:    String,
    #[serde(default)]
    pub features:    Vec<FeatureRecord>,
    /// Record-level annotations (molecule type, topology, references...).
    #[serde(default)]
    pub annotations: IndexMap<String, Value>,
}

impl SequenceRecord {
    pub fn new<S: Into<String>>(sequence: S) -> Self {
        Self {
            sequence: sequence.into(),
            ..Default::default()
        }
    }

    with_field_fn!(id, Option<String>);

    with_field_fn!(name, Option<String>);

    with_field_fn!(description, Option<String>);

    with_field_fn!(features, Vec<FeatureRecord>);

    with_field_fn!(annotations, IndexMap<String, Value>);

    /// Label used in logs and error messages.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}
