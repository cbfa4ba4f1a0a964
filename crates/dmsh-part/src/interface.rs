//! Interface reconciliation and global interface numbering.
//!
//! Every element shared across a partition boundary yields two one-sided
//! views of that boundary: the owner's and the sharer's. Only nodes
//! confirmed from both directions are true interface degrees of freedom; a
//! node present on a ghost element but not confirmed by the other side
//! must not enter the global numbering.

use std::collections::{BTreeMap, BTreeSet};

use crate::assemble::AssembledMesh;
use crate::error::{PartitionError, Result};

/// Unordered partition pair, stored with `low < high`. The derived order
/// is the order in which pairs receive their global interface indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PartitionPair {
    pub low: i32,
    pub high: i32,
}

impl PartitionPair {
    pub fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn contains(&self, partition: i32) -> bool {
        self.low == partition || self.high == partition
    }

    pub fn other(&self, partition: i32) -> i32 {
        if partition == self.low {
            self.high
        } else {
            self.low
        }
    }
}

/// One reconciled interface: the agreed node ids in ascending order and
/// the first global interface index assigned to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfacePair {
    pub nodes: Vec<i32>,
    pub start_index: usize,
}

/// All reconciled interfaces of a mesh with their global numbering.
#[derive(Debug, Clone, Default)]
pub struct Interfaces {
    pairs: BTreeMap<PartitionPair, InterfacePair>,
    total_nodes: usize,
}

/// One partition's view of a reconciled interface. `sign` is +1 when the
/// partition is the lower-numbered side of the pair, -1 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceView<'a> {
    pub neighbour: i32,
    pub sign: i32,
    pub start_index: usize,
    pub nodes: &'a [i32],
}

impl Interfaces {
    pub fn build(assembled: &AssembledMesh) -> Result<Self> {
        let mut one_sided: BTreeMap<(i32, i32), BTreeSet<i32>> = BTreeMap::new();

        for elements in assembled.mesh.groups.values() {
            for element in elements {
                let owner = element.owner_partition();
                for &tag in element.sharer_tags() {
                    if tag >= 0 || -tag == owner {
                        return Err(PartitionError::InvalidSharerTag {
                            element: element.id,
                            tag,
                        });
                    }
                    // Sets absorb the duplicates from neighbouring shared
                    // elements touching the same boundary nodes.
                    one_sided
                        .entry((owner, -tag))
                        .or_default()
                        .extend(element.connectivity.iter().copied());
                }
            }
        }

        let mut pairs = BTreeMap::new();
        for (&(owner, sharer), seen_by_owner) in &one_sided {
            let Some(seen_by_sharer) = one_sided.get(&(sharer, owner)) else {
                return Err(PartitionError::AsymmetricInterface { owner, sharer });
            };
            if owner < sharer {
                let agreed: Vec<i32> = seen_by_owner
                    .intersection(seen_by_sharer)
                    .copied()
                    .collect();
                pairs.insert(
                    PartitionPair::new(owner, sharer),
                    InterfacePair {
                        nodes: agreed,
                        start_index: 0,
                    },
                );
            }
        }

        // One running counter across all pairs, visited in ascending pair
        // order; node order within a pair is ascending id.
        let mut next_index = 0usize;
        for interface in pairs.values_mut() {
            interface.start_index = next_index;
            next_index += interface.nodes.len();
        }

        Ok(Self {
            pairs,
            total_nodes: next_index,
        })
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&PartitionPair, &InterfacePair)> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Total number of interface degrees of freedom across the mesh.
    pub fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    /// The interfaces touching `partition`, in ascending pair order.
    pub fn views_for(&self, partition: i32) -> Vec<InterfaceView<'_>> {
        self.pairs
            .iter()
            .filter(|(pair, _)| pair.contains(partition))
            .map(|(pair, interface)| InterfaceView {
                neighbour: pair.other(partition),
                sign: if pair.low == partition { 1 } else { -1 },
                start_index: interface.start_index,
                nodes: &interface.nodes,
            })
            .collect()
    }
}
