//! Partition engine for distributed finite-element meshes.
//!
//! Three sequential stages over a parsed mesh:
//! - [`assemble`]: group elements by `(physical name, type)` and discover
//!   the partition count from the embedded ownership tags
//! - [`Interfaces::build`]: reconcile the two one-sided views of every
//!   partition boundary and assign a global interface numbering
//! - [`extract`]: slice out one partition's elements, nodes and
//!   local-to-global mapping, with optional local renumbering and
//!   zero-based indexing

mod assemble;
mod error;
mod extract;
mod interface;
mod summary;

pub use assemble::{AssembledMesh, assemble};
pub use error::{PartitionError, Result};
pub use extract::{ExtractOptions, IndexingBase, LocalPartition, NodalOrdering, extract};
pub use interface::{InterfacePair, InterfaceView, Interfaces, PartitionPair};
pub use summary::MeshSummary;
