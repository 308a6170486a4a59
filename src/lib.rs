//! Reconstruction of nested block hierarchies from flat feature annotations.
//!
//! A parsed [`record::SequenceRecord`] is transcribed into a flat
//! [`data_structs::BlockStore`], then [`hierarchy::resolve`] nests the blocks
//! by containment, folds conflicting features into annotations and pads every
//! parent with filler blocks. [`convert`] ties the steps together and
//! assembles multi-record projects.

pub mod convert;
pub mod data_structs;
pub mod exports;
pub mod hierarchy;
pub mod record;
pub mod utils;
