//! Serializable partition documents.

use serde::Serialize;

use dmsh_part::{IndexingBase, Interfaces, LocalPartition};

use crate::convert::ConvertConfig;

/// One partition's output document.
///
/// `partition` and `neighbour` are 0-based process indices regardless of
/// the configured indexing base; the base governs node, element and
/// mapping ids only.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PartitionDocument {
    pub partition: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub nodes: Vec<NodeRecord>,
    pub elements: Vec<ElementGroupRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_to_global: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<InterfaceRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_interface_nodes: Option<usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub coordinates: [f64; 3],
}

/// One non-empty `(physical name, element type)` bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ElementGroupRecord {
    pub name: String,
    /// Gmsh element type id.
    pub element_type: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<i32>>,
    pub connectivity: Vec<Vec<i32>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InterfaceRecord {
    pub neighbour: usize,
    /// +1 on the lower-numbered side of the pair, -1 on the other.
    pub sign: i32,
    /// First global interface index assigned to this pair's nodes.
    pub global_start_index: usize,
    pub nodes: Vec<i32>,
}

impl PartitionDocument {
    /// Render one extracted partition. Interface and mapping sections are
    /// only present when the mesh is distributed.
    pub fn build(
        local: &LocalPartition,
        interfaces: &Interfaces,
        distributed: bool,
        config: &ConvertConfig,
    ) -> Self {
        let nodes = local
            .nodes
            .iter()
            .map(|node| NodeRecord {
                id: config.write_indices.then_some(node.id),
                coordinates: node.coordinates,
            })
            .collect();

        let elements = local
            .mesh
            .groups
            .iter()
            .map(|(key, elements)| ElementGroupRecord {
                name: key.name.clone(),
                element_type: key.element_type.gmsh_id(),
                ids: config
                    .write_indices
                    .then(|| elements.iter().map(|e| e.id).collect()),
                connectivity: elements.iter().map(|e| e.connectivity.clone()).collect(),
            })
            .collect();

        let (local_to_global, interface_records, total) = if distributed {
            let shift = match config.options.base {
                IndexingBase::Zero => 1,
                IndexingBase::One => 0,
            };
            let records = interfaces
                .views_for(local.id)
                .into_iter()
                .map(|view| InterfaceRecord {
                    neighbour: (view.neighbour - 1) as usize,
                    sign: view.sign,
                    global_start_index: view.start_index,
                    nodes: view.nodes.iter().map(|id| id - shift).collect(),
                })
                .collect();
            (
                Some(local.local_to_global.clone()),
                Some(records),
                Some(interfaces.total_nodes()),
            )
        } else {
            (None, None, None)
        };

        Self {
            partition: (local.id - 1) as usize,
            method: config.method.clone(),
            nodes,
            elements,
            local_to_global,
            interfaces: interface_records,
            total_interface_nodes: total,
        }
    }
}
