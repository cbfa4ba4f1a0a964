//! Mesh assembly: bucket grouping and partition discovery.

use std::collections::HashMap;

use dmsh_gmsh::RawMesh;
use dmsh_model::{Element, GroupKey, Mesh, Node, PhysicalGroupMap};

use crate::error::{PartitionError, Result};

/// Fully assembled mesh. Read-only input to reconciliation and to every
/// per-partition extraction.
#[derive(Debug, Clone)]
pub struct AssembledMesh {
    pub mesh: Mesh,
    pub nodes: Vec<Node>,
    pub physical_names: PhysicalGroupMap,
    /// Highest partition id observed across all ownership and sharer tags.
    pub partition_count: usize,
    node_index: HashMap<i32, usize>,
}

impl AssembledMesh {
    /// Look up a node record by its global id.
    pub fn node(&self, id: i32) -> Option<&Node> {
        self.node_index.get(&id).map(|&idx| &self.nodes[idx])
    }
}

/// Group every raw element into its `(physical name, type)` bucket and
/// accumulate the partition count.
///
/// The accumulator is only finalized once the whole element list has been
/// consumed; nothing reads it mid-pass.
pub fn assemble(raw: RawMesh) -> Result<AssembledMesh> {
    let mut mesh = Mesh::new();
    let mut highest_partition: i32 = 1;

    for element in raw.elements {
        validate_connectivity(&element)?;

        let physical_id = element
            .physical_id()
            .ok_or(PartitionError::MissingPhysicalTag {
                element: element.id,
            })?;
        let name =
            raw.physical_names
                .get(&physical_id)
                .ok_or(PartitionError::UnknownPhysicalGroup {
                    element: element.id,
                    physical_id,
                })?;

        let entries = element.partition_entries();
        if entries != 0 {
            if entries < 0 || (element.tags.len() as i32) < 3 + entries {
                return Err(PartitionError::InvalidPartitionTags {
                    element: element.id,
                    entries,
                });
            }
            highest_partition = highest_partition.max(element.owner_partition().abs());
            for &tag in element.sharer_tags() {
                highest_partition = highest_partition.max(tag.abs());
            }
        }

        mesh.push(GroupKey::new(name.clone(), element.element_type), element);
    }

    let node_index = raw
        .nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id, idx))
        .collect();

    Ok(AssembledMesh {
        mesh,
        nodes: raw.nodes,
        physical_names: raw.physical_names,
        partition_count: highest_partition as usize,
        node_index,
    })
}

fn validate_connectivity(element: &Element) -> Result<()> {
    let expected = element.element_type.node_count();
    if element.connectivity.len() != expected {
        return Err(PartitionError::ConnectivityMismatch {
            element: element.id,
            expected,
            found: element.connectivity.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmsh_model::ElementType;

    fn raw_mesh(elements: Vec<Element>) -> RawMesh {
        let mut physical_names = PhysicalGroupMap::new();
        physical_names.insert(1, "domain".to_string());
        physical_names.insert(2, "wall".to_string());
        RawMesh {
            version: 2.2,
            physical_names,
            nodes: vec![
                Node::new(1, 0.0, 0.0, 0.0),
                Node::new(2, 1.0, 0.0, 0.0),
                Node::new(3, 0.0, 1.0, 0.0),
            ],
            elements,
        }
    }

    fn triangle(id: i32, tags: Vec<i32>) -> Element {
        Element {
            id,
            element_type: ElementType::Triangle3,
            tags,
            connectivity: vec![1, 2, 3],
        }
    }

    #[test]
    fn groups_elements_by_name_and_type() {
        let assembled = assemble(raw_mesh(vec![
            triangle(1, vec![1, 1]),
            triangle(2, vec![2, 1]),
            triangle(3, vec![1, 1]),
        ]))
        .expect("assemble should succeed");

        assert_eq!(assembled.mesh.groups.len(), 2);
        assert_eq!(assembled.mesh.total_elements(), 3);
        let domain = &assembled.mesh.groups[&GroupKey::new("domain", ElementType::Triangle3)];
        let ids: Vec<i32> = domain.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(assembled.partition_count, 1);
    }

    #[test]
    fn discovers_partition_count_from_owner_and_sharer_tags() {
        let assembled = assemble(raw_mesh(vec![
            triangle(1, vec![1, 1, 2, 1, -4]),
            triangle(2, vec![1, 1, 1, 3]),
        ]))
        .expect("assemble should succeed");
        assert_eq!(assembled.partition_count, 4);
    }

    #[test]
    fn rejects_unknown_physical_group() {
        let err = assemble(raw_mesh(vec![triangle(5, vec![9, 1])])).expect_err("should fail");
        assert_eq!(
            err,
            PartitionError::UnknownPhysicalGroup {
                element: 5,
                physical_id: 9
            }
        );
    }

    #[test]
    fn rejects_missing_physical_tag() {
        let err = assemble(raw_mesh(vec![triangle(4, vec![])])).expect_err("should fail");
        assert_eq!(err, PartitionError::MissingPhysicalTag { element: 4 });
    }

    #[test]
    fn rejects_connectivity_mismatch() {
        let mut element = triangle(2, vec![1, 1]);
        element.connectivity.push(4);
        let err = assemble(raw_mesh(vec![element])).expect_err("should fail");
        assert_eq!(
            err,
            PartitionError::ConnectivityMismatch {
                element: 2,
                expected: 3,
                found: 4
            }
        );
    }

    #[test]
    fn rejects_short_partition_tag_list() {
        let err = assemble(raw_mesh(vec![triangle(6, vec![1, 1, 3, 1, -2])]))
            .expect_err("should fail");
        assert_eq!(
            err,
            PartitionError::InvalidPartitionTags {
                element: 6,
                entries: 3
            }
        );
    }

    #[test]
    fn node_lookup_uses_file_ids() {
        let assembled = assemble(raw_mesh(vec![triangle(1, vec![1, 1])]))
            .expect("assemble should succeed");
        assert_eq!(assembled.node(2).map(|n| n.coordinates), Some([1.0, 0.0, 0.0]));
        assert!(assembled.node(99).is_none());
    }
}
