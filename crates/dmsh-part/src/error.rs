//! Error types for the partition engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PartitionError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PartitionError {
    #[error("element {element}: connectivity has {found} entries, expected {expected}")]
    ConnectivityMismatch {
        element: i32,
        expected: usize,
        found: usize,
    },

    #[error("element {element} carries no physical group tag")]
    MissingPhysicalTag { element: i32 },

    #[error("element {element} references physical group {physical_id}, which has no name")]
    UnknownPhysicalGroup { element: i32, physical_id: i32 },

    #[error("element {element}: partition tag list is too short for {entries} entries")]
    InvalidPartitionTags { element: i32, entries: i32 },

    #[error("element {element}: invalid sharer tag {tag}, expected a negative id of another partition")]
    InvalidSharerTag { element: i32, tag: i32 },

    #[error("one-sided interface: partition {owner} shares with {sharer}, but not the reverse")]
    AsymmetricInterface { owner: i32, sharer: i32 },

    #[error("connectivity references node {node}, which has no record")]
    UnknownNode { node: i32 },
}
