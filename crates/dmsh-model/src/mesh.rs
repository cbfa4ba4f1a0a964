//! Nodes, group keys and the assembled mesh container.

use std::collections::BTreeMap;

use crate::element::{Element, ElementType};

/// Physical group id to name, as declared in `$PhysicalNames`.
pub type PhysicalGroupMap = BTreeMap<i32, String>;

/// A node in the mesh, identified by its file-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: i32,
    pub coordinates: [f64; 3],
}

impl Node {
    pub fn new(id: i32, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            coordinates: [x, y, z],
        }
    }
}

/// Composite bucket key: physical group name plus element type.
///
/// The derived order (name first, then type id) is the iteration order of
/// the mesh and therefore of every per-partition output document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey {
    pub name: String,
    pub element_type: ElementType,
}

impl GroupKey {
    pub fn new(name: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            name: name.into(),
            element_type,
        }
    }
}

/// Elements grouped by `(physical name, element type)`.
///
/// Bucket contents keep parse order; the key set is ordered by `GroupKey`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub groups: BTreeMap<GroupKey, Vec<Element>>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to its bucket, creating the bucket on first use.
    pub fn push(&mut self, key: GroupKey, element: Element) {
        self.groups.entry(key).or_default().push(element);
    }

    /// Total element count across all buckets.
    pub fn total_elements(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
