use serde::{Deserialize, Serialize};

use crate::hierarchy::DEFAULT_FILLER_PREFIX_LEN;
use crate::with_field_fn;

/// Settings of a multi-record conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Log and skip records that fail to convert instead of aborting.
    pub skip_failed_records: bool,
    /// Number of sequence characters used to name filler blocks.
    pub filler_prefix_len:   usize,
    /// Convert records on the rayon thread pool.
    pub parallel:            bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            skip_failed_records: false,
            filler_prefix_len:   DEFAULT_FILLER_PREFIX_LEN,
            parallel:            true,
        }
    }
}

impl ConvertConfig {
    with_field_fn!(skip_failed_records, bool);

    with_field_fn!(filler_prefix_len, usize);

    with_field_fn!(parallel, bool);
}
