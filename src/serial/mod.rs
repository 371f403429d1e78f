//! XML serialization.
//!
//! Writes a finished `Document` back out as markup text. The writer reads
//! the tree only through content-list and filtered-view queries.

pub mod xml;

pub use xml::{
    serialize, serialize_content, serialize_node, serialize_with_options, SerializeOptions,
};
