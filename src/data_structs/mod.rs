//! Core data structures of the block hierarchy.
//!
//! - [`Block`]: a node of the containment hierarchy, referring to its
//!   children by [`BlockId`].
//! - [`BlockStore`]: the flat, insertion-ordered arena holding every block of
//!   one record.
//! - [`Annotation`]: the flattened form of a block that could not be kept as
//!   a structural child.
//! - [`Span`]: inclusive coordinates on the root sequence.
//! - Common enumerations: [`Strand`] and the structural [`BlockRole`].

mod annotation;
mod block;
mod enums;
mod span;
mod store;
pub mod typedef;


pub use annotation::Annotation;
pub use block::{Block, RecordMetadata};
pub use enums::{BlockRole, Strand};
pub use span::Span;
pub use store::BlockStore;
pub use typedef::{BlockId, PosType};
