//! Per-partition extraction and renumbering.

use dmsh_model::{Mesh, Node};

use crate::assemble::AssembledMesh;
use crate::error::{PartitionError, Result};

/// Whether output connectivity keeps global node ids or is rewritten to
/// per-partition ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodalOrdering {
    #[default]
    Global,
    Local,
}

/// Base for every id in the extracted partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexingBase {
    Zero,
    #[default]
    One,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractOptions {
    pub ordering: NodalOrdering,
    pub base: IndexingBase,
}

/// One partition's slice of the assembled mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPartition {
    /// The 1-based partition id the slice was extracted for.
    pub id: i32,
    pub mesh: Mesh,
    /// Sorted, deduplicated global node ids referenced by the partition;
    /// a node's position in this list is its local index.
    pub local_to_global: Vec<i32>,
    /// Node records in `local_to_global` order.
    pub nodes: Vec<Node>,
}

/// Filter the mesh down to the elements owned by `partition` and derive
/// the partition-local node data.
///
/// Renumbering and zero-basing are defined in terms of the original
/// 1-based ids, so the base shift is applied strictly last.
pub fn extract(
    assembled: &AssembledMesh,
    partition: i32,
    options: &ExtractOptions,
) -> Result<LocalPartition> {
    let mut mesh = Mesh::new();
    for (key, elements) in &assembled.mesh.groups {
        let owned: Vec<_> = elements
            .iter()
            .filter(|element| element.owner_partition().abs() == partition)
            .cloned()
            .collect();
        if !owned.is_empty() {
            mesh.groups.insert(key.clone(), owned);
        }
    }

    let mut local_to_global: Vec<i32> = mesh
        .groups
        .values()
        .flatten()
        .flat_map(|element| element.connectivity.iter().copied())
        .collect();
    local_to_global.sort_unstable();
    local_to_global.dedup();

    let mut nodes = Vec::with_capacity(local_to_global.len());
    for &id in &local_to_global {
        let node = assembled
            .node(id)
            .ok_or(PartitionError::UnknownNode { node: id })?;
        nodes.push(node.clone());
    }

    if options.ordering == NodalOrdering::Local {
        renumber_to_local(&mut mesh, &local_to_global)?;
    }
    if options.base == IndexingBase::Zero {
        shift_to_zero_based(&mut mesh, &mut local_to_global, &mut nodes);
    }

    Ok(LocalPartition {
        id: partition,
        mesh,
        local_to_global,
        nodes,
    })
}

/// Rewrite every connectivity entry from its global node id to its
/// 1-based rank in the mapping.
fn renumber_to_local(mesh: &mut Mesh, local_to_global: &[i32]) -> Result<()> {
    for elements in mesh.groups.values_mut() {
        for element in elements {
            for entry in &mut element.connectivity {
                let rank = local_to_global
                    .binary_search(entry)
                    .map_err(|_| PartitionError::UnknownNode { node: *entry })?;
                *entry = rank as i32 + 1;
            }
        }
    }
    Ok(())
}

fn shift_to_zero_based(mesh: &mut Mesh, local_to_global: &mut [i32], nodes: &mut [Node]) {
    for elements in mesh.groups.values_mut() {
        for element in elements {
            element.id -= 1;
            for entry in &mut element.connectivity {
                *entry -= 1;
            }
        }
    }
    for id in local_to_global.iter_mut() {
        *id -= 1;
    }
    for node in nodes.iter_mut() {
        node.id -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use dmsh_gmsh::RawMesh;
    use dmsh_model::{Element, ElementType, GroupKey, PhysicalGroupMap};

    /// Two quads side by side, nodes 1..6, left owned by partition 1 and
    /// right by partition 2.
    fn two_quads() -> AssembledMesh {
        let mut physical_names = PhysicalGroupMap::new();
        physical_names.insert(1, "domain".to_string());
        let nodes = vec![
            Node::new(1, 0.0, 0.0, 0.0),
            Node::new(2, 1.0, 0.0, 0.0),
            Node::new(3, 2.0, 0.0, 0.0),
            Node::new(4, 0.0, 1.0, 0.0),
            Node::new(5, 1.0, 1.0, 0.0),
            Node::new(6, 2.0, 1.0, 0.0),
        ];
        let elements = vec![
            Element {
                id: 1,
                element_type: ElementType::Quadrilateral4,
                tags: vec![1, 1, 2, 1, -2],
                connectivity: vec![1, 2, 5, 4],
            },
            Element {
                id: 2,
                element_type: ElementType::Quadrilateral4,
                tags: vec![1, 1, 2, 2, -1],
                connectivity: vec![2, 3, 6, 5],
            },
        ];
        assemble(RawMesh {
            version: 2.2,
            physical_names,
            nodes,
            elements,
        })
        .expect("assemble should succeed")
    }

    fn domain_key() -> GroupKey {
        GroupKey::new("domain", ElementType::Quadrilateral4)
    }

    #[test]
    fn filters_to_owned_elements_with_sorted_mapping() {
        let local = extract(&two_quads(), 2, &ExtractOptions::default())
            .expect("extract should succeed");

        assert_eq!(local.id, 2);
        assert_eq!(local.mesh.total_elements(), 1);
        assert_eq!(local.mesh.groups[&domain_key()][0].id, 2);
        assert_eq!(local.local_to_global, vec![2, 3, 5, 6]);
        let node_ids: Vec<i32> = local.nodes.iter().map(|n| n.id).collect();
        assert_eq!(node_ids, local.local_to_global);
        // Global ordering keeps the file's connectivity untouched.
        assert_eq!(local.mesh.groups[&domain_key()][0].connectivity, vec![2, 3, 6, 5]);
    }

    #[test]
    fn local_ordering_rewrites_connectivity_to_ranks() {
        let options = ExtractOptions {
            ordering: NodalOrdering::Local,
            base: IndexingBase::One,
        };
        let local = extract(&two_quads(), 2, &options).expect("extract should succeed");
        // Global 2,3,6,5 against mapping [2,3,5,6] gives ranks 1,2,4,3.
        assert_eq!(local.mesh.groups[&domain_key()][0].connectivity, vec![1, 2, 4, 3]);
    }

    #[test]
    fn local_ordering_round_trips_through_the_mapping() {
        let assembled = two_quads();
        let global = extract(&assembled, 1, &ExtractOptions::default())
            .expect("extract should succeed");
        let local = extract(
            &assembled,
            1,
            &ExtractOptions {
                ordering: NodalOrdering::Local,
                base: IndexingBase::One,
            },
        )
        .expect("extract should succeed");

        let original = &global.mesh.groups[&domain_key()][0].connectivity;
        let remapped: Vec<i32> = local.mesh.groups[&domain_key()][0]
            .connectivity
            .iter()
            .map(|&rank| local.local_to_global[rank as usize - 1])
            .collect();
        assert_eq!(&remapped, original);
    }

    #[test]
    fn zero_basing_shifts_every_id_once() {
        let one_based = extract(&two_quads(), 1, &ExtractOptions::default())
            .expect("extract should succeed");
        let zero_based = extract(
            &two_quads(),
            1,
            &ExtractOptions {
                ordering: NodalOrdering::Global,
                base: IndexingBase::Zero,
            },
        )
        .expect("extract should succeed");

        assert_eq!(
            zero_based.local_to_global,
            one_based
                .local_to_global
                .iter()
                .map(|id| id - 1)
                .collect::<Vec<_>>()
        );
        assert_eq!(zero_based.mesh.groups[&domain_key()][0].id, 0);
        assert_eq!(
            zero_based.mesh.groups[&domain_key()][0].connectivity,
            vec![0, 1, 4, 3]
        );
        assert_eq!(zero_based.nodes[0].id, 0);
        // Coordinates are untouched by the index shift.
        assert_eq!(zero_based.nodes[0].coordinates, one_based.nodes[0].coordinates);
    }

    #[test]
    fn extraction_is_deterministic() {
        let assembled = two_quads();
        let options = ExtractOptions {
            ordering: NodalOrdering::Local,
            base: IndexingBase::Zero,
        };
        let first = extract(&assembled, 1, &options).expect("extract should succeed");
        let second = extract(&assembled, 1, &options).expect("extract should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn missing_node_record_is_an_error() {
        let mut physical_names = PhysicalGroupMap::new();
        physical_names.insert(1, "domain".to_string());
        let assembled = assemble(RawMesh {
            version: 2.2,
            physical_names,
            nodes: vec![Node::new(1, 0.0, 0.0, 0.0), Node::new(2, 1.0, 0.0, 0.0)],
            elements: vec![Element {
                id: 1,
                element_type: ElementType::Triangle3,
                tags: vec![1, 1],
                connectivity: vec![1, 2, 3],
            }],
        })
        .expect("assemble should succeed");

        let err = extract(&assembled, 1, &ExtractOptions::default()).expect_err("should fail");
        assert_eq!(err, PartitionError::UnknownNode { node: 3 });
    }
}
